//! # 示例应用程序
//!
//! 演示如何声明属性组、通过命令行参数和属性文件启动配置，并读取解析后的值。
//!
//! ```text
//! example-app lorn.config.Options.PROPERTY_FILE_PATH=app.properties app.Server.PORT=9000
//! ```

use anyhow::Context;
use clap::Parser;
use config_abstractions::{ExportGroup, Property, PropertyGroup};
use config_composition::{initialize, LoggingConfig, PropertyExt, StartupConfig, StartupError};
use config_impl::MemoryExporter;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::info;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "Lorn ADSP 配置解析示例")]
struct Args {
    /// 使用开发环境日志配置
    #[arg(long)]
    dev: bool,

    /// 使用 JSON 日志
    #[arg(long, conflicts_with = "dev")]
    json_logs: bool,

    /// `名称=值` 形式的配置参数
    settings: Vec<String>,
}

static HOST: Lazy<Property> = Lazy::new(|| {
    Property::string("HOST")
        .required()
        .default_value("localhost")
        .alias_in_and_out("server.host")
        .description("监听地址")
        .build()
});

static PORT: Lazy<Property> = Lazy::new(|| {
    Property::int("PORT")
        .required()
        .alias_in("port")
        .description("监听端口")
        .build()
});

static DEBUG: Lazy<Property> = Lazy::new(|| {
    Property::flag("DEBUG")
        .default_value(false)
        .description("是否输出调试信息")
        .build()
});

fn server_group() -> PropertyGroup {
    PropertyGroup::new("app.Server")
        .with_description("服务端设置")
        .with_property(HOST.clone())
        .with_property(PORT.clone())
        .with_property(DEBUG.clone())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let logging = if args.dev {
        LoggingConfig::development()
    } else if args.json_logs {
        LoggingConfig::production()
    } else {
        LoggingConfig::default()
    };

    let exporter = Arc::new(MemoryExporter::new());
    let config = StartupConfig {
        groups: vec![server_group()],
        exports: vec![ExportGroup::for_group(exporter.clone(), "app.Server")],
        command_line_args: args.settings,
        logging: Some(logging),
        ..StartupConfig::default()
    };

    let core = match initialize(config) {
        Ok(core) => core,
        // 报告已写到标准错误
        Err(StartupError::Fatal(_)) => std::process::exit(1),
        Err(err) => return Err(err).context("配置启动失败"),
    };

    info!("配置启动完成，共 {} 个显式值", core.values().len());

    let host = HOST.string_value()?.unwrap_or_default();
    let port = PORT.int_value()?.context("PORT 是必需属性")?;
    println!("服务地址: {host}:{port}");

    if DEBUG.flag_value()?.unwrap_or(false) {
        println!("有效配置: {}", serde_json::to_string_pretty(&core.to_json())?);
        println!("导出结果: {}", serde_json::to_string_pretty(&exporter.to_json())?);
    }

    Ok(())
}

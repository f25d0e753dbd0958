//! 启动配置

use crate::logging::LoggingConfig;
use config_abstractions::{ExportGroup, LoaderHandle, NamingStrategy, PropertyGroup};
use config_impl::{EnvironmentLoader, PropertyFileLoader, StringArgumentLoader, PROPERTY_FILE_PATH};
use std::sync::Arc;

/// 启动配置
///
/// 一次性构造并整体传入 [`crate::initialize`]，所有属性组都必须显式列出。
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// 命名策略，为空时不区分大小写
    pub naming_strategy: Option<Arc<dyn NamingStrategy>>,
    /// 按注册顺序排列的属性组
    pub groups: Vec<PropertyGroup>,
    /// 加载器链，为空时使用默认链
    pub loaders: Vec<LoaderHandle>,
    /// 导出指令
    pub exports: Vec<ExportGroup>,
    /// 交给默认链中字符串参数加载器的参数
    pub command_line_args: Vec<String>,
    /// 启动失败时是否把报告写到标准错误
    pub print_failure_report: bool,
    /// 日志配置，为空时不安装日志订阅者
    pub logging: Option<LoggingConfig>,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            naming_strategy: None,
            groups: Vec::new(),
            loaders: Vec::new(),
            exports: Vec::new(),
            command_line_args: Vec::new(),
            print_failure_report: true,
            logging: None,
        }
    }
}

impl StartupConfig {
    /// 实际使用的加载器链
    ///
    /// 默认链依次为命令行参数、环境变量和属性文件。
    pub fn effective_loaders(&self) -> Vec<LoaderHandle> {
        if !self.loaders.is_empty() {
            return self.loaders.clone();
        }

        vec![
            LoaderHandle::new(StringArgumentLoader::new(self.command_line_args.iter().cloned())),
            LoaderHandle::new(EnvironmentLoader::new()),
            LoaderHandle::new(PropertyFileLoader::new(&PROPERTY_FILE_PATH)),
        ]
    }
}

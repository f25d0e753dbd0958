//! # 配置组合层
//!
//! 这个 crate 负责把属性注册表、加载器链和导出器组合成一次完整的配置启动，
//! 并以进程级状态的形式向应用的其余部分提供只读的配置视图。
//!
//! ## 启动阶段
//!
//! 1. 构建属性注册表，存在问题则中止
//! 2. 运行加载器链并校验必需值，存在问题则中止
//! 3. 运行导出指令
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use config_abstractions::{Property, PropertyGroup};
//! use config_composition::{initialize, PropertyExt, StartupConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let port = Property::int("PORT").default_value(8080).build();
//!     let group = PropertyGroup::new("app.Server").with_property(port.clone());
//!
//!     initialize(StartupConfig {
//!         groups: vec![group],
//!         command_line_args: std::env::args().skip(1).collect(),
//!         ..StartupConfig::default()
//!     })?;
//!
//!     println!("端口: {:?}", port.int_value()?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod config_core;
pub mod error;
pub mod global;
pub mod logging;
pub mod report;

pub use crate::config::StartupConfig;
pub use crate::config_core::ConfigCore;
pub use crate::error::StartupError;
pub use crate::global::{core, initialize, is_initialized, reload, reset, PropertyExt};
pub use crate::logging::{init_logging, LoggingConfig};
pub use crate::report::ReportGenerator;

// 重新导出错误类型
pub use config_abstractions::AppFatalError;
pub use config_common::ConfigError;

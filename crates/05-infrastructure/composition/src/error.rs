//! 启动错误定义

use config_abstractions::AppFatalError;
use config_common::ConfigError;
use thiserror::Error;

/// 启动错误
#[derive(Error, Debug, Clone)]
pub enum StartupError {
    /// 配置声明或配置值存在问题
    #[error(transparent)]
    Fatal(#[from] AppFatalError),

    /// 调用方的编程错误
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl StartupError {
    /// 聚合致命错误，如果是的话
    pub fn as_fatal(&self) -> Option<&AppFatalError> {
        match self {
            Self::Fatal(err) => Some(err),
            Self::Config(_) => None,
        }
    }
}

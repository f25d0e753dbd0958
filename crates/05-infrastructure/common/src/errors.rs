//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
///
/// 表示调用方的编程错误，与启动阶段累积的问题（Problem）不同，
/// 这些错误会立即返回给调用方。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("配置尚未初始化，无法读取属性值")]
    NotInitialized,

    #[error("配置已经初始化，不能重复初始化")]
    AlreadyInitialized,

    #[error("属性未注册: {name}")]
    PropertyNotRegistered { name: String },

    #[error("属性类型不匹配: {name}, 期望 {expected}, 实际 {actual}")]
    TypeMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("日志初始化失败: {message}")]
    LoggingInit { message: String },
}

impl ConfigError {
    /// 创建属性未注册错误
    pub fn property_not_registered(name: impl Into<String>) -> Self {
        Self::PropertyNotRegistered { name: name.into() }
    }
}

/// 值解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("无法将 '{raw}' 解析为 {expected}: {reason}")]
pub struct ValueParseError {
    /// 原始文本
    pub raw: String,
    /// 期望的类型名称
    pub expected: String,
    /// 失败原因
    pub reason: String,
}

impl ValueParseError {
    /// 创建新的解析错误
    pub fn new(
        raw: impl Into<String>,
        expected: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            raw: raw.into(),
            expected: expected.into(),
            reason: reason.into(),
        }
    }
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;

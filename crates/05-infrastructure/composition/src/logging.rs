//! 日志初始化

use config_common::ConfigError;
use once_cell::sync::OnceCell;
use tracing::{info, warn};

/// 进程内是否已尝试安装日志订阅者
static LOGGING_INSTALLED: OnceCell<()> = OnceCell::new();

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: tracing::Level,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
    /// 是否显示文件名
    pub show_file: bool,
    /// 是否显示行号
    pub show_line_number: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: true,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// 开发环境：输出加载器和被遮蔽值的调试日志
    pub fn development() -> Self {
        Self {
            level: tracing::Level::DEBUG,
            show_target: true,
            show_thread_ids: true,
            show_file: true,
            show_line_number: true,
            json_format: false,
        }
    }

    /// 生产环境：JSON 格式
    pub fn production() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: false,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: true,
        }
    }
}

/// 安装全局日志订阅者
///
/// 进程中只能安装一次，重复安装返回 [`ConfigError::LoggingInit`]。
pub fn init_logging(config: &LoggingConfig) -> Result<(), ConfigError> {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(config.level)
        .with_target(config.show_target)
        .with_thread_ids(config.show_thread_ids)
        .with_file(config.show_file)
        .with_line_number(config.show_line_number);

    if config.json_format {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    }
    .map_err(|e| ConfigError::LoggingInit {
        message: e.to_string(),
    })?;

    info!("日志系统初始化完成");
    Ok(())
}

/// 每个进程至多安装一次日志订阅者
///
/// 之后的调用直接返回。宿主进程已安装全局订阅者时记录警告并沿用该订阅者。
pub(crate) fn ensure_logging(config: &LoggingConfig) {
    LOGGING_INSTALLED.get_or_init(|| {
        if let Err(e) = init_logging(config) {
            warn!("未安装日志订阅者，沿用已有的全局订阅者: {}", e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_installed_at_most_once() {
        ensure_logging(&LoggingConfig::development());
        ensure_logging(&LoggingConfig::production());

        assert!(LOGGING_INSTALLED.get().is_some());
        assert!(matches!(
            init_logging(&LoggingConfig::default()),
            Err(ConfigError::LoggingInit { .. })
        ));
    }
}

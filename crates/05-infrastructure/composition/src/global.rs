//! 进程级配置状态
//!
//! 已安装的核心只通过整体替换 `Arc` 改变，读取方要么看到旧核心，要么看到
//! 新核心，不会看到构建到一半的状态。

use crate::config::StartupConfig;
use crate::config_core::ConfigCore;
use crate::error::StartupError;
use crate::logging::ensure_logging;
use chrono::NaiveDateTime;
use config_abstractions::{ConstructionDefinition, Property, ValueSource};
use config_common::{ConfigError, PropertyValue, ValueType};
use once_cell::sync::Lazy;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::{info, warn};

/// 当前安装的配置核心
static CONFIG_CORE: Lazy<RwLock<Option<Arc<ConfigCore>>>> = Lazy::new(|| RwLock::new(None));

/// 串行化 initialize / reload / reset
static LIFECYCLE: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// 初始化进程级配置
///
/// 已有核心安装时返回 [`ConfigError::AlreadyInitialized`]。日志订阅者每个进程
/// 只安装一次，`reset` 之后再次初始化沿用已安装的订阅者。
pub fn initialize(config: StartupConfig) -> Result<Arc<ConfigCore>, StartupError> {
    let _guard = LIFECYCLE.lock();

    if CONFIG_CORE.read().is_some() {
        return Err(ConfigError::AlreadyInitialized.into());
    }

    if let Some(logging) = &config.logging {
        ensure_logging(logging);
    }

    let core = Arc::new(ConfigCore::new(config)?);
    *CONFIG_CORE.write() = Some(Arc::clone(&core));
    info!("配置已初始化");
    Ok(core)
}

/// 以新的启动配置整体替换当前核心
///
/// 构建期间读取方仍看到原核心，成功后一次性替换。构建失败时原核心被卸载，
/// 之后的读取返回 [`ConfigError::NotInitialized`]。日志配置被忽略。
pub fn reload(config: StartupConfig) -> Result<Arc<ConfigCore>, StartupError> {
    let _guard = LIFECYCLE.lock();

    match ConfigCore::new(config) {
        Ok(core) => {
            let core = Arc::new(core);
            *CONFIG_CORE.write() = Some(Arc::clone(&core));
            info!("配置已重新加载");
            Ok(core)
        }
        Err(e) => {
            *CONFIG_CORE.write() = None;
            warn!("配置重新加载失败，已卸载原有配置");
            Err(e.into())
        }
    }
}

/// 卸载当前核心
pub fn reset() {
    let _guard = LIFECYCLE.lock();
    if CONFIG_CORE.write().take().is_some() {
        info!("配置已重置");
    }
}

/// 当前安装的核心
pub fn core() -> Result<Arc<ConfigCore>, ConfigError> {
    CONFIG_CORE.read().clone().ok_or(ConfigError::NotInitialized)
}

/// 是否已安装核心
pub fn is_initialized() -> bool {
    CONFIG_CORE.read().is_some()
}

/// 通过进程级配置读取属性值
///
/// 配置未初始化时返回 [`ConfigError::NotInitialized`]，属性未在当前核心中
/// 注册时返回 [`ConfigError::PropertyNotRegistered`]，从不静默返回默认值。
pub trait PropertyExt {
    /// 有效值：显式值，否则为默认值
    fn value(&self) -> Result<Option<PropertyValue>, ConfigError>;

    /// 显式设置的值
    fn explicit_value(&self) -> Result<Option<PropertyValue>, ConfigError>;

    fn is_explicitly_set(&self) -> Result<bool, ConfigError>;

    fn string_value(&self) -> Result<Option<String>, ConfigError>;

    fn flag_value(&self) -> Result<Option<bool>, ConfigError>;

    fn int_value(&self) -> Result<Option<i32>, ConfigError>;

    fn long_value(&self) -> Result<Option<i64>, ConfigError>;

    fn double_value(&self) -> Result<Option<f64>, ConfigError>;

    fn date_time_value(&self) -> Result<Option<NaiveDateTime>, ConfigError>;
}

/// 取得当前核心并确认属性已注册
fn registered_core(property: &Property) -> Result<Arc<ConfigCore>, ConfigError> {
    let core = core()?;
    if core.canonical_name(property).is_none() {
        return Err(ConfigError::property_not_registered(property.local_name()));
    }
    Ok(core)
}

fn typed_value<T>(
    property: &Property,
    expected: ValueType,
    extract: impl FnOnce(&PropertyValue) -> Option<T>,
) -> Result<Option<T>, ConfigError> {
    if property.value_type() != expected {
        return Err(ConfigError::TypeMismatch {
            name: property.local_name().to_string(),
            expected: expected.name().to_string(),
            actual: property.value_type().name().to_string(),
        });
    }
    Ok(property.value()?.as_ref().and_then(extract))
}

impl PropertyExt for Property {
    fn value(&self) -> Result<Option<PropertyValue>, ConfigError> {
        Ok(registered_core(self)?.effective_value(self))
    }

    fn explicit_value(&self) -> Result<Option<PropertyValue>, ConfigError> {
        Ok(registered_core(self)?.explicit_value(self))
    }

    fn is_explicitly_set(&self) -> Result<bool, ConfigError> {
        Ok(registered_core(self)?.is_explicitly_set(self))
    }

    fn string_value(&self) -> Result<Option<String>, ConfigError> {
        typed_value(self, ValueType::String, |v| v.as_str().map(str::to_string))
    }

    fn flag_value(&self) -> Result<Option<bool>, ConfigError> {
        typed_value(self, ValueType::Flag, PropertyValue::as_flag)
    }

    fn int_value(&self) -> Result<Option<i32>, ConfigError> {
        typed_value(self, ValueType::Integer, PropertyValue::as_int)
    }

    fn long_value(&self) -> Result<Option<i64>, ConfigError> {
        typed_value(self, ValueType::Long, PropertyValue::as_long)
    }

    fn double_value(&self) -> Result<Option<f64>, ConfigError> {
        typed_value(self, ValueType::Double, PropertyValue::as_double)
    }

    fn date_time_value(&self) -> Result<Option<NaiveDateTime>, ConfigError> {
        typed_value(self, ValueType::LocalDateTime, PropertyValue::as_date_time)
    }
}

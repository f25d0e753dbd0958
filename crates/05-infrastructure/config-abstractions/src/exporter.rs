//! 导出器抽象接口

use crate::definition::ConstructionDefinition;
use crate::property::PropertyGroup;
use crate::values::ValueSource;
use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;

/// 导出错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ExportError {
    /// 错误消息
    pub message: String,
}

impl ExportError {
    /// 创建新的导出错误
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 导出器 trait
///
/// 在加载和校验成功后，把某个属性组的已解析值发布到外部目标。
pub trait Exporter: Send + Sync + Debug {
    /// 获取导出器名称
    fn name(&self) -> &str;

    /// 导出一个属性组
    fn export(
        &self,
        group: &PropertyGroup,
        definition: &dyn ConstructionDefinition,
        values: &dyn ValueSource,
    ) -> Result<(), ExportError>;
}

/// 导出指令
///
/// 指定导出器以及目标组；目标为空表示导出全部组。
#[derive(Debug, Clone)]
pub struct ExportGroup {
    exporter: Arc<dyn Exporter>,
    group: Option<String>,
}

impl ExportGroup {
    /// 导出指定的组
    pub fn for_group(exporter: Arc<dyn Exporter>, group_name: impl Into<String>) -> Self {
        Self {
            exporter,
            group: Some(group_name.into()),
        }
    }

    /// 导出全部组
    pub fn for_all_groups(exporter: Arc<dyn Exporter>) -> Self {
        Self {
            exporter,
            group: None,
        }
    }

    pub fn exporter(&self) -> &dyn Exporter {
        self.exporter.as_ref()
    }

    /// 目标组名称，`None` 表示全部组
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }
}

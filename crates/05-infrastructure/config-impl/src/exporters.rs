//! 导出器实现

use config_abstractions::{
    ConstructionDefinition, ExportError, Exporter, PropertyGroup, ValueSource,
};
use config_common::PropertyValue;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::debug;

/// 内存导出器
///
/// 以属性的每个可导出名称发布其有效值，没有有效值的属性不发布。
#[derive(Debug, Default)]
pub struct MemoryExporter {
    values: RwLock<BTreeMap<String, PropertyValue>>,
}

impl MemoryExporter {
    /// 创建新的内存导出器
    pub fn new() -> Self {
        Self::default()
    }

    /// 按导出名称获取值
    pub fn get(&self, name: &str) -> Option<PropertyValue> {
        self.values.read().get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }

    /// 以字符串形式返回全部已导出的值
    pub fn as_string_map(&self) -> BTreeMap<String, String> {
        self.values
            .read()
            .iter()
            .map(|(name, value)| (name.clone(), value.to_string()))
            .collect()
    }

    /// 以 JSON 对象返回全部已导出的值
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .values
            .read()
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}

impl Exporter for MemoryExporter {
    fn name(&self) -> &str {
        "MemoryExporter"
    }

    fn export(
        &self,
        group: &PropertyGroup,
        definition: &dyn ConstructionDefinition,
        values: &dyn ValueSource,
    ) -> Result<(), ExportError> {
        let mut published = self.values.write();
        let mut count = 0;

        for property in definition.properties_for_group(group.name()) {
            let Some(value) = values.effective_value(property) else {
                continue;
            };
            for name in definition
                .effective_names(property)
                .iter()
                .filter(|name| name.output)
            {
                published.insert(name.actual_name.clone(), value.clone());
                count += 1;
            }
        }

        debug!("组 {} 导出了 {} 个名称", group.name(), count);
        Ok(())
    }
}

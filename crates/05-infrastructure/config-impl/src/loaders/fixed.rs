//! 固定值加载器

use super::apply_named_raw;
use config_abstractions::{ConstructionDefinition, Loader, LoaderValues, Property, ValueSource};
use config_common::PropertyValue;

/// 固定值加载器
///
/// 在代码中直接给出属性值，常用于测试或内置默认配置。
#[derive(Debug, Clone, Default)]
pub struct FixedValueLoader {
    values: Vec<(Property, PropertyValue)>,
    raw_values: Vec<(String, String)>,
}

impl FixedValueLoader {
    /// 创建空加载器
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加强类型值
    pub fn with_value(mut self, property: &Property, value: impl Into<PropertyValue>) -> Self {
        self.values.push((property.clone(), value.into()));
        self
    }

    /// 按名称添加原始文本，加载时经修剪和解析
    pub fn with_raw(mut self, name: impl Into<String>, raw: impl Into<String>) -> Self {
        self.raw_values.push((name.into(), raw.into()));
        self
    }
}

impl Loader for FixedValueLoader {
    fn name(&self) -> &str {
        "FixedValueLoader"
    }

    fn load(&self, definition: &dyn ConstructionDefinition, _: &dyn ValueSource) -> LoaderValues {
        let mut out = LoaderValues::new();

        for (property, value) in &self.values {
            out.add_value(property.clone(), value.clone());
        }

        for (name, raw) in &self.raw_values {
            apply_named_raw(self.name(), definition, name, raw, "代码中的固定值", &mut out);
        }

        out
    }

    fn describe_source(&self) -> String {
        format!("{} 个固定值", self.values.len() + self.raw_values.len())
    }
}

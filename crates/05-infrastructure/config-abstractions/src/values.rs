//! 已解析值的只读视图

use crate::property::Property;
use config_common::PropertyValue;

/// 值来源 trait
///
/// 加载器和导出器通过它读取已解析的值。
pub trait ValueSource: Send + Sync {
    /// 属性是否被某个加载器显式设置
    fn is_explicitly_set(&self, property: &Property) -> bool;

    /// 显式设置的值
    fn explicit_value(&self, property: &Property) -> Option<PropertyValue>;

    /// 有效值：显式值，否则为属性的默认值
    fn effective_value(&self, property: &Property) -> Option<PropertyValue> {
        self.explicit_value(property)
            .or_else(|| property.default_value().cloned())
    }
}

//! 属性注册表抽象接口

use crate::exporter::ExportGroup;
use crate::naming::NamingStrategy;
use crate::property::{EffectiveName, Property, PropertyGroup};

/// 属性注册表 trait
///
/// 启动时构建一次的只读注册表，所有访问器返回不可变视图。
pub trait ConstructionDefinition: Send + Sync {
    /// 按任意名称查找属性，名称先经命名策略转换
    fn property(&self, name: &str) -> Option<&Property>;

    /// 属性的全部有效名称，规范名称在前
    fn effective_names(&self, property: &Property) -> &[EffectiveName];

    /// 属性的别名（不含规范名称）
    ///
    /// 规范名称因冲突未能登记时，登记成功的名称全部是别名。
    fn aliases(&self, property: &Property) -> Vec<&EffectiveName> {
        let canonical = self.canonical_name(property);
        self.effective_names(property)
            .iter()
            .filter(|name| Some(name.actual_name.as_str()) != canonical)
            .collect()
    }

    /// 属性的规范名称
    fn canonical_name(&self, property: &Property) -> Option<&str>;

    /// 属性所属的组
    fn group_for_property(&self, property: &Property) -> Option<&PropertyGroup>;

    /// 组内的属性，未注册的组返回空列表
    fn properties_for_group(&self, group_name: &str) -> &[Property];

    /// 按注册顺序返回全部属性
    fn properties(&self) -> &[Property];

    /// 按注册顺序返回全部属性组
    fn groups(&self) -> &[PropertyGroup];

    /// 导出指令
    fn export_groups(&self) -> &[ExportGroup];

    fn naming_strategy(&self) -> &dyn NamingStrategy;
}

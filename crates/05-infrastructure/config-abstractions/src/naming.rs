//! 命名策略抽象接口

use crate::property::{EffectiveName, Property};
use std::fmt::Debug;

/// 命名策略 trait
///
/// 将声明的规范名称及别名映射为有效名称，并将任意输入文本转换为查找键。
/// 实现必须是确定性的纯函数，不持有可变状态。
pub trait NamingStrategy: Send + Sync + Debug {
    /// 将任意名称转换为查找键
    fn to_effective_name(&self, name: &str) -> String;

    /// 计算属性的全部有效名称
    ///
    /// 规范名称排在第一位（读取与导出均可用），之后按声明顺序排列别名。
    fn names_for(&self, canonical_name: &str, property: &Property) -> Vec<EffectiveName> {
        let mut names = Vec::with_capacity(property.aliases().len() + 1);
        names.push(EffectiveName::new(
            canonical_name,
            self.to_effective_name(canonical_name),
            true,
            true,
        ));

        for alias in property.aliases() {
            names.push(EffectiveName::new(
                alias.name.clone(),
                self.to_effective_name(&alias.name),
                alias.input,
                alias.output,
            ));
        }

        names
    }

    /// 面向用户的命名规则说明，用于示例配置输出
    fn naming_notes(&self) -> &str;
}

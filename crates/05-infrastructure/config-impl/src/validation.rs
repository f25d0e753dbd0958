//! 必需值校验

use config_abstractions::{ConstructionDefinition, ProblemList, RequirementProblem, ValueSource};
use tracing::{debug, warn};

/// 检查所有必需属性是否都有有效值
///
/// 按注册顺序遍历属性，每个缺失的必需属性记录一个问题，返回新增问题数量。
pub fn check_required_values(
    definition: &dyn ConstructionDefinition,
    values: &dyn ValueSource,
    problems: &mut ProblemList,
) -> usize {
    let mut missing = 0;

    for property in definition.properties() {
        if !property.is_required() || values.effective_value(property).is_some() {
            continue;
        }

        let group = definition
            .group_for_property(property)
            .map(|g| g.name().to_string())
            .unwrap_or_default();
        let canonical_name = definition
            .canonical_name(property)
            .unwrap_or_else(|| property.local_name())
            .to_string();

        warn!("必需属性 {} 没有值", canonical_name);
        problems.push(RequirementProblem::RequiredPropertyMissing {
            group,
            canonical_name,
            property: property.clone(),
        });
        missing += 1;
    }

    debug!("必需值校验完成: {} 个缺失", missing);
    missing
}

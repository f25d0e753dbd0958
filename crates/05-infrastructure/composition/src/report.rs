//! 启动失败报告与示例配置

use config_abstractions::{
    AppFatalError, ConstructionDefinition, ConstructionProblem, LoaderHandle, Problem, ProblemKind,
    Property,
};

const RULE: &str = "========================================================================";

/// 报告生成器
pub struct ReportGenerator;

impl ReportGenerator {
    /// 生成启动失败报告
    ///
    /// 问题按阶段分组，组内保持记录顺序。
    pub fn problems_report(error: &AppFatalError, definition: &dyn ConstructionDefinition) -> String {
        let mut lines = vec![
            RULE.to_string(),
            format!("配置启动失败: {}", error.message()),
            RULE.to_string(),
        ];

        for kind in [
            ProblemKind::Construction,
            ProblemKind::Loader,
            ProblemKind::Requirement,
        ] {
            let problems = error.problems().filter(kind);
            if problems.is_empty() {
                continue;
            }

            lines.push(format!("[{}阶段] {} 个问题", kind.phase_name(), problems.len()));
            for problem in problems {
                lines.push(format!("  - {problem}"));
                if let Some(context) = Self::problem_context(problem, definition) {
                    lines.push(format!("    {context}"));
                }
            }
        }

        lines.push(RULE.to_string());
        lines.join("\n")
    }

    /// 问题涉及的属性和组
    fn problem_context(problem: &Problem, definition: &dyn ConstructionDefinition) -> Option<String> {
        let property = match problem {
            Problem::Construction(
                ConstructionProblem::NonUniqueNames { property, .. }
                | ConstructionProblem::InvalidDefaultValue { property, .. }
                | ConstructionProblem::LoaderPropertyNotRegistered { property, .. },
            ) => property,
            Problem::Construction(ConstructionProblem::DuplicateLoader { loader }) => {
                return Some(format!("加载器来源: {}", loader.describe_source()));
            }
            Problem::Requirement(requirement) => requirement.property(),
            _ => return None,
        };

        let group = definition.group_for_property(property)?;
        let description = property
            .description()
            .map(|d| format!(", 说明: {d}"))
            .unwrap_or_default();
        Some(format!(
            "属性 {} 属于组 {}{}",
            group.canonical_name_of(property),
            group.name(),
            description
        ))
    }

    /// 生成示例配置
    ///
    /// 列出每个组的每个属性、类型、是否必需、默认值、说明和有效名称，
    /// 以及每个加载器依赖的属性。
    pub fn config_samples(definition: &dyn ConstructionDefinition, loaders: &[LoaderHandle]) -> String {
        let mut lines = vec![
            "# 示例配置".to_string(),
            format!("# {}", definition.naming_strategy().naming_notes()),
        ];

        for group in definition.groups() {
            lines.push("#".to_string());
            match group.description() {
                Some(description) => lines.push(format!("# 组: {} ({description})", group.name())),
                None => lines.push(format!("# 组: {}", group.name())),
            }

            for property in definition.properties_for_group(group.name()) {
                Self::property_sample(&mut lines, property, definition);
            }
        }

        if !loaders.is_empty() {
            lines.push("#".to_string());
            lines.push("# 加载器（按运行顺序）".to_string());
            for (position, loader) in loaders.iter().enumerate() {
                lines.push(format!(
                    "#   {}. {} - {}",
                    position + 1,
                    loader.name(),
                    loader.describe_source()
                ));
                for property in loader.declared_properties() {
                    let name = definition
                        .canonical_name(&property)
                        .unwrap_or_else(|| property.local_name())
                        .to_string();
                    lines.push(format!("#      依赖属性: {name}"));
                }
            }
        }

        lines.join("\n")
    }

    fn property_sample(lines: &mut Vec<String>, property: &Property, definition: &dyn ConstructionDefinition) {
        let canonical = definition
            .canonical_name(property)
            .unwrap_or_else(|| property.local_name());
        let default = property
            .default_value()
            .map_or_else(|| "无".to_string(), ToString::to_string);

        lines.push(format!("# {canonical}"));
        lines.push(format!(
            "#   类型: {}  必需: {}  默认值: {default}",
            property.value_type(),
            if property.is_required() { "是" } else { "否" }
        ));
        if let Some(description) = property.description() {
            lines.push(format!("#   说明: {description}"));
        }

        let names = definition
            .effective_names(property)
            .iter()
            .map(|name| {
                let direction = match (name.input, name.output) {
                    (true, true) => "读/导出",
                    (true, false) => "读",
                    (false, true) => "导出",
                    (false, false) => "-",
                };
                format!("{} ({direction})", name.actual_name)
            })
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("#   名称: {names}"));

        let sample = property
            .default_value()
            .map(ToString::to_string)
            .unwrap_or_default();
        lines.push(format!("{canonical}={sample}"));
    }
}

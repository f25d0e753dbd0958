//! 配置启动核心
//!
//! 按阶段完成一次配置启动：构建注册表、运行加载器链、校验必需值、运行导出。
//! 每个阶段结束时检查问题列表，非空即中止，后续阶段不再运行。

use crate::config::StartupConfig;
use crate::report::ReportGenerator;
use config_abstractions::{
    AppFatalError, ConstructionDefinition, ConstructionProblem, EffectiveName, ExportGroup,
    LoaderHandle, NamingStrategy, ProblemList, Property, PropertyGroup, ValueSource,
};
use config_common::PropertyValue;
use config_impl::{
    build_definition, check_required_values, run_loader_chain, DefinitionBuild, LayeredValueMap,
    RuntimeDefinition, CREATE_SAMPLES,
};
use tracing::{error, info};

/// 配置启动核心
///
/// 启动成功后不可变，可在任意线程并发读取。
#[derive(Debug)]
pub struct ConfigCore {
    definition: RuntimeDefinition,
    loaders: Vec<LoaderHandle>,
    values: LayeredValueMap,
}

impl ConfigCore {
    /// 运行完整的启动流程
    pub fn new(config: StartupConfig) -> Result<Self, AppFatalError> {
        info!("开始配置启动: {} 个属性组", config.groups.len());

        let DefinitionBuild {
            definition,
            loaders,
            problems,
        } = build_definition(
            config.naming_strategy.clone(),
            &config.groups,
            &config.effective_loaders(),
            &config.exports,
        );

        if !problems.is_empty() {
            return Err(Self::fail(
                AppFatalError::construction(problems),
                &definition,
                &loaders,
                config.print_failure_report,
            ));
        }

        info!("开始加载配置值: {} 个加载器", loaders.len());
        let mut problems = ProblemList::new();
        let values = run_loader_chain(&definition, &loaders, &mut problems);
        check_required_values(&definition, &values, &mut problems);

        if !problems.is_empty() {
            return Err(Self::fail(
                AppFatalError::loading(problems),
                &definition,
                &loaders,
                config.print_failure_report,
            ));
        }

        let problems = run_exports(&definition, &values);
        if !problems.is_empty() {
            return Err(Self::fail(
                AppFatalError::export(problems),
                &definition,
                &loaders,
                config.print_failure_report,
            ));
        }

        let core = Self {
            definition,
            loaders,
            values,
        };

        if core.effective_value(&CREATE_SAMPLES) == Some(PropertyValue::Flag(true)) {
            println!(
                "{}",
                ReportGenerator::config_samples(&core.definition, &core.loaders)
            );
        }

        info!(
            "配置启动完成: {} 个属性, {} 个显式值",
            core.definition.properties().len(),
            core.values.len()
        );
        Ok(core)
    }

    fn fail(
        err: AppFatalError,
        definition: &RuntimeDefinition,
        loaders: &[LoaderHandle],
        print_report: bool,
    ) -> AppFatalError {
        error!("{}", err);

        if print_report {
            eprintln!("{}", ReportGenerator::problems_report(&err, definition));
            eprintln!("{}", ReportGenerator::config_samples(definition, loaders));
        }

        err
    }

    /// 只读属性注册表
    pub fn definition(&self) -> &RuntimeDefinition {
        &self.definition
    }

    /// 分层值映射
    pub fn values(&self) -> &LayeredValueMap {
        &self.values
    }

    /// 实际运行的加载器链
    pub fn loaders(&self) -> &[LoaderHandle] {
        &self.loaders
    }

    /// 按名称读取有效值
    pub fn value_by_name(&self, name: &str) -> Option<PropertyValue> {
        self.definition
            .property(name)
            .and_then(|property| self.effective_value(property))
    }

    /// 以规范名称为键的有效值快照
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .definition
            .properties()
            .iter()
            .filter_map(|property| {
                let name = self.definition.canonical_name(property)?;
                let value = self
                    .effective_value(property)
                    .map_or(serde_json::Value::Null, |v| v.to_json());
                Some((name.to_string(), value))
            })
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}

/// 按注册顺序运行导出指令，返回导出失败的问题
fn run_exports(definition: &RuntimeDefinition, values: &LayeredValueMap) -> ProblemList {
    let mut problems = ProblemList::new();

    for export_group in definition.export_groups() {
        for group in export_targets(definition, export_group) {
            if let Err(e) = export_group.exporter().export(group, definition, values) {
                error!(
                    "导出器 {} 导出组 {} 失败: {}",
                    export_group.exporter().name(),
                    group.name(),
                    e
                );
                problems.push(ConstructionProblem::ExportFailed {
                    exporter: export_group.exporter().name().to_string(),
                    group: group.name().to_string(),
                    message: e.message,
                });
            }
        }
    }

    problems
}

fn export_targets<'a>(
    definition: &'a RuntimeDefinition,
    export_group: &ExportGroup,
) -> Vec<&'a PropertyGroup> {
    match export_group.group() {
        Some(name) => definition
            .groups()
            .iter()
            .filter(|group| group.name() == name)
            .collect(),
        None => definition.groups().iter().collect(),
    }
}

impl ConstructionDefinition for ConfigCore {
    fn property(&self, name: &str) -> Option<&Property> {
        self.definition.property(name)
    }

    fn effective_names(&self, property: &Property) -> &[EffectiveName] {
        self.definition.effective_names(property)
    }

    fn canonical_name(&self, property: &Property) -> Option<&str> {
        self.definition.canonical_name(property)
    }

    fn group_for_property(&self, property: &Property) -> Option<&PropertyGroup> {
        self.definition.group_for_property(property)
    }

    fn properties_for_group(&self, group_name: &str) -> &[Property] {
        self.definition.properties_for_group(group_name)
    }

    fn properties(&self) -> &[Property] {
        self.definition.properties()
    }

    fn groups(&self) -> &[PropertyGroup] {
        self.definition.groups()
    }

    fn export_groups(&self) -> &[ExportGroup] {
        self.definition.export_groups()
    }

    fn naming_strategy(&self) -> &dyn NamingStrategy {
        self.definition.naming_strategy()
    }
}

impl ValueSource for ConfigCore {
    fn is_explicitly_set(&self, property: &Property) -> bool {
        self.values.is_explicitly_set(property)
    }

    fn explicit_value(&self, property: &Property) -> Option<PropertyValue> {
        self.values.explicit_value(property)
    }
}

//! 属性注册表的构建与只读实现

use crate::naming::CaseInsensitiveNaming;
use crate::options::options_group;
use config_abstractions::{
    ConstructionDefinition, ConstructionProblem, EffectiveName, ExportGroup, LoaderHandle,
    NamingStrategy, ProblemList, Property, PropertyGroup,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 合法别名：非空，不含空白、引号、反斜杠以及属性文件中的分隔和注释字符
static VALID_ALIAS: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r#"^[^\s"'=:#!\\]+$"#));

/// 只读属性注册表
///
/// 由 [`DefinitionBuilder`] 构建一次，之后不再修改。
#[derive(Debug)]
pub struct RuntimeDefinition {
    naming: Arc<dyn NamingStrategy>,
    groups: Vec<PropertyGroup>,
    properties: Vec<Property>,
    properties_by_group: HashMap<String, Vec<Property>>,
    group_index_by_property: HashMap<Property, usize>,
    property_by_name: HashMap<String, Property>,
    names_by_property: HashMap<Property, Vec<EffectiveName>>,
    canonical_by_property: HashMap<Property, String>,
    export_groups: Vec<ExportGroup>,
}

impl ConstructionDefinition for RuntimeDefinition {
    fn property(&self, name: &str) -> Option<&Property> {
        self.property_by_name
            .get(&self.naming.to_effective_name(name))
    }

    fn effective_names(&self, property: &Property) -> &[EffectiveName] {
        self.names_by_property
            .get(property)
            .map_or(&[], Vec::as_slice)
    }

    fn canonical_name(&self, property: &Property) -> Option<&str> {
        self.canonical_by_property.get(property).map(String::as_str)
    }

    fn group_for_property(&self, property: &Property) -> Option<&PropertyGroup> {
        self.group_index_by_property
            .get(property)
            .and_then(|&index| self.groups.get(index))
    }

    fn properties_for_group(&self, group_name: &str) -> &[Property] {
        self.properties_by_group
            .get(group_name)
            .map_or(&[], Vec::as_slice)
    }

    fn properties(&self) -> &[Property] {
        &self.properties
    }

    fn groups(&self) -> &[PropertyGroup] {
        &self.groups
    }

    fn export_groups(&self) -> &[ExportGroup] {
        &self.export_groups
    }

    fn naming_strategy(&self) -> &dyn NamingStrategy {
        self.naming.as_ref()
    }
}

/// 注册表构建结果
///
/// 无论是否记录了问题，注册表都会被冻结返回；调用方必须先检查
/// `problems`，非空时不得进入加载阶段。
#[derive(Debug)]
pub struct DefinitionBuild {
    /// 冻结的注册表
    pub definition: RuntimeDefinition,
    /// 去重后的加载器链，保持用户指定的顺序
    pub loaders: Vec<LoaderHandle>,
    /// 构建阶段记录的问题
    pub problems: ProblemList,
}

/// 注册表构建器
///
/// 单次构建过程中遇到的结构冲突都记录为问题而不是立即中止。
#[derive(Debug)]
pub struct DefinitionBuilder {
    naming: Arc<dyn NamingStrategy>,
    groups: Vec<PropertyGroup>,
    properties: Vec<Property>,
    properties_by_group: HashMap<String, Vec<Property>>,
    group_index_by_property: HashMap<Property, usize>,
    property_by_name: HashMap<String, Property>,
    names_in_use: HashMap<String, Property>,
    names_by_property: HashMap<Property, Vec<EffectiveName>>,
    canonical_by_property: HashMap<Property, String>,
    loaders: Vec<LoaderHandle>,
    export_groups: Vec<ExportGroup>,
    problems: ProblemList,
}

impl DefinitionBuilder {
    /// 创建新的注册表构建器
    pub fn new(naming: Arc<dyn NamingStrategy>) -> Self {
        Self {
            naming,
            groups: Vec::new(),
            properties: Vec::new(),
            properties_by_group: HashMap::new(),
            group_index_by_property: HashMap::new(),
            property_by_name: HashMap::new(),
            names_in_use: HashMap::new(),
            names_by_property: HashMap::new(),
            canonical_by_property: HashMap::new(),
            loaders: Vec::new(),
            export_groups: Vec::new(),
            problems: ProblemList::new(),
        }
    }

    /// 添加加载器，同一实例重复添加时记录问题并跳过
    pub fn add_loader(&mut self, loader: LoaderHandle) {
        if self.loaders.iter().any(|existing| existing.same_instance(&loader)) {
            warn!("加载器实例重复注册: {}", loader.name());
            self.problems
                .push(ConstructionProblem::DuplicateLoader { loader });
        } else {
            debug!("注册加载器: {}", loader.name());
            self.loaders.push(loader);
        }
    }

    /// 是否已注册指定名称的组
    pub fn contains_group(&self, group_name: &str) -> bool {
        self.properties_by_group.contains_key(group_name)
    }

    /// 注册属性组
    pub fn add_group(&mut self, group: &PropertyGroup) {
        if self.contains_group(group.name()) {
            warn!("属性组重复注册: {}", group.name());
            self.problems.push(ConstructionProblem::DuplicateGroup {
                group: group.name().to_string(),
            });
            return;
        }

        debug!("注册属性组: {}", group.name());
        let group_index = self.groups.len();
        let mut accepted = Vec::with_capacity(group.properties().len());

        for property in group.properties() {
            if let Some(&existing_index) = self.group_index_by_property.get(property) {
                let existing_group = self
                    .groups
                    .get(existing_index)
                    .map_or(group.name(), PropertyGroup::name);
                self.problems.push(ConstructionProblem::DuplicateProperty {
                    local_name: property.local_name().to_string(),
                    group: group.name().to_string(),
                    existing_group: existing_group.to_string(),
                    property: property.clone(),
                });
                continue;
            }

            let canonical = group.canonical_name_of(property);
            self.check_default_value(property, &canonical);
            let names = self.register_names(property, &canonical);

            self.group_index_by_property
                .insert(property.clone(), group_index);
            self.canonical_by_property
                .insert(property.clone(), canonical);
            self.names_by_property.insert(property.clone(), names);
            self.properties.push(property.clone());
            accepted.push(property.clone());
        }

        let mut frozen = PropertyGroup::new(group.name()).with_properties(accepted.iter().cloned());
        if let Some(description) = group.description() {
            frozen = frozen.with_description(description);
        }

        self.properties_by_group
            .insert(group.name().to_string(), accepted);
        self.groups.push(frozen);
    }

    /// 添加导出指令
    pub fn add_export_group(&mut self, export_group: ExportGroup) {
        self.export_groups.push(export_group);
    }

    /// 当前已记录的问题
    pub fn problems(&self) -> &ProblemList {
        &self.problems
    }

    fn check_default_value(&mut self, property: &Property, canonical: &str) {
        if let Some(default) = property.default_value() {
            if default.value_type() != property.value_type() {
                self.problems
                    .push(ConstructionProblem::InvalidDefaultValue {
                        canonical_name: canonical.to_string(),
                        expected: property.value_type(),
                        actual: default.value_type(),
                        property: property.clone(),
                    });
            }
        }
    }

    /// 计算并索引属性的有效名称，返回成功登记的名称
    fn register_names(&mut self, property: &Property, canonical: &str) -> Vec<EffectiveName> {
        let names = self.naming.names_for(canonical, property);
        let mut own_keys = HashSet::new();
        let mut registered = Vec::with_capacity(names.len());

        for (position, name) in names.into_iter().enumerate() {
            if position > 0 {
                if let Err(reason) = validate_alias(&name.actual_name) {
                    self.problems.push(ConstructionProblem::InvalidAlias {
                        canonical_name: canonical.to_string(),
                        alias: name.actual_name.clone(),
                        reason,
                    });
                    continue;
                }
            }

            // 同一属性重复声明同一名称时只保留第一次
            if !own_keys.insert(name.effective_name.clone()) {
                continue;
            }

            if let Some(holder) = self.names_in_use.get(&name.effective_name) {
                let existing = self
                    .canonical_by_property
                    .get(holder)
                    .cloned()
                    .unwrap_or_else(|| holder.local_name().to_string());
                warn!("名称冲突: {} ({} 与 {})", name.actual_name, existing, canonical);
                self.problems.push(ConstructionProblem::NonUniqueNames {
                    name: name.actual_name.clone(),
                    existing,
                    conflicting: canonical.to_string(),
                    property: property.clone(),
                });
                continue;
            }

            self.names_in_use
                .insert(name.effective_name.clone(), property.clone());
            if name.input {
                self.property_by_name
                    .insert(name.effective_name.clone(), property.clone());
            }
            registered.push(name);
        }

        registered
    }

    /// 冻结为只读注册表
    pub fn build(mut self) -> DefinitionBuild {
        for loader in &self.loaders {
            for property in loader.declared_properties() {
                if !self.group_index_by_property.contains_key(&property) {
                    self.problems
                        .push(ConstructionProblem::LoaderPropertyNotRegistered {
                            loader: loader.name().to_string(),
                            local_name: property.local_name().to_string(),
                            property,
                        });
                }
            }
        }

        for export_group in &self.export_groups {
            if let Some(group_name) = export_group.group() {
                if !self.properties_by_group.contains_key(group_name) {
                    self.problems
                        .push(ConstructionProblem::ExportGroupNotRegistered {
                            exporter: export_group.exporter().name().to_string(),
                            group: group_name.to_string(),
                        });
                }
            }
        }

        info!(
            "属性注册表构建完成: {} 个组, {} 个属性, {} 个加载器, {} 个问题",
            self.groups.len(),
            self.properties.len(),
            self.loaders.len(),
            self.problems.len()
        );

        DefinitionBuild {
            definition: RuntimeDefinition {
                naming: self.naming,
                groups: self.groups,
                properties: self.properties,
                properties_by_group: self.properties_by_group,
                group_index_by_property: self.group_index_by_property,
                property_by_name: self.property_by_name,
                names_by_property: self.names_by_property,
                canonical_by_property: self.canonical_by_property,
                export_groups: self.export_groups,
            },
            loaders: self.loaders,
            problems: self.problems,
        }
    }
}

fn validate_alias(alias: &str) -> Result<(), String> {
    if alias.is_empty() {
        return Err("别名为空".to_string());
    }
    match Lazy::force(&VALID_ALIAS) {
        Ok(pattern) if pattern.is_match(alias) => Ok(()),
        Ok(_) => Err("别名不能包含空白、引号、反斜杠、=、:、# 或 !".to_string()),
        Err(e) => Err(format!("别名校验规则无效: {e}")),
    }
}

/// 一次性构建注册表
///
/// 先按顺序去重加载器，再依次注册用户的属性组；框架选项组总是会被注册，
/// 如果调用方没有显式列出，则追加在最后。`naming` 为空时使用
/// [`CaseInsensitiveNaming`]。
pub fn build_definition(
    naming: Option<Arc<dyn NamingStrategy>>,
    groups: &[PropertyGroup],
    loaders: &[LoaderHandle],
    export_groups: &[ExportGroup],
) -> DefinitionBuild {
    let naming = naming.unwrap_or_else(|| Arc::new(CaseInsensitiveNaming));
    let mut builder = DefinitionBuilder::new(naming);

    for loader in loaders {
        builder.add_loader(loader.clone());
    }

    for group in groups {
        builder.add_group(group);
    }

    let options = options_group();
    if !builder.contains_group(options.name()) {
        builder.add_group(options);
    }

    for export_group in export_groups {
        builder.add_export_group(export_group.clone());
    }

    builder.build()
}

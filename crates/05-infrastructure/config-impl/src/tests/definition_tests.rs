//! 注册表构建测试

use crate::definition::{build_definition, DefinitionBuilder};
use crate::loaders::{FixedValueLoader, PropertyFileLoader};
use crate::naming::{CaseInsensitiveNaming, CaseSensitiveNaming};
use crate::options::{OPTIONS_GROUP_NAME, PROPERTY_FILE_PATH};
use crate::exporters::MemoryExporter;
use config_abstractions::{
    ConstructionDefinition, ConstructionProblem, ExportGroup, LoaderHandle, ProblemKind, Property,
    PropertyGroup,
};
use std::sync::Arc;

fn server_group() -> (PropertyGroup, Property, Property) {
    let host = Property::string("HOST").alias_in("host").build();
    let port = Property::int("PORT").default_value(80).build();
    let group = PropertyGroup::new("app.Server")
        .with_property(host.clone())
        .with_property(port.clone());
    (group, host, port)
}

/// 测试同一加载器实例重复注册只产生一个问题
#[test]
fn test_duplicate_loader_records_exactly_one_problem() {
    let loader = LoaderHandle::new(FixedValueLoader::new());
    let other = LoaderHandle::new(FixedValueLoader::new());

    let build = build_definition(
        None,
        &[],
        &[loader.clone(), other.clone(), loader.clone()],
        &[],
    );

    assert_eq!(build.problems.len(), 1);
    let problem = build.problems.construction_problems().next().expect("应有构建问题");
    match problem {
        ConstructionProblem::DuplicateLoader { loader: dup } => assert_eq!(dup, &loader),
        unexpected => panic!("意外的问题: {unexpected:?}"),
    }
    assert_eq!(build.loaders, vec![loader, other]);
}

/// 测试名称冲突记录问题且不覆盖已有名称
#[test]
fn test_name_collision_is_recorded_not_inserted() {
    let (group, host, _) = server_group();
    let intruder = Property::string("INTRUDER").alias_in("HOST").build();
    let other = PropertyGroup::new("app.Other").with_property(intruder.clone());

    let build = build_definition(None, &[group, other], &[], &[]);

    assert_eq!(build.problems.count(ProblemKind::Construction), 1);
    assert!(matches!(
        build.problems.construction_problems().next(),
        Some(ConstructionProblem::NonUniqueNames { property, .. }) if property == &intruder
    ));
    assert_eq!(build.definition.property("host"), Some(&host));
    assert_eq!(build.definition.effective_names(&intruder).len(), 1);
}

/// 测试不区分大小写的查找
#[test]
fn test_case_insensitive_lookup_resolves_same_property() {
    let (group, host, _) = server_group();
    let build = build_definition(None, &[group], &[], &[]);

    assert!(build.problems.is_empty());
    assert_eq!(build.definition.property("app.Server.HOST"), Some(&host));
    assert_eq!(build.definition.property("APP.SERVER.host"), Some(&host));
    assert_eq!(
        build.definition.property("Foo.Bar"),
        build.definition.property("foo.bar")
    );
}

/// 测试区分大小写时仅大小写不同的名称可以共存
#[test]
fn test_case_sensitive_naming_keeps_case_variants_apart() {
    let upper = Property::string("Name").build();
    let lower = Property::string("name").build();
    let group = PropertyGroup::new("g")
        .with_property(upper.clone())
        .with_property(lower.clone());

    let build = build_definition(Some(Arc::new(CaseSensitiveNaming)), &[group.clone()], &[], &[]);
    assert!(build.problems.is_empty());
    assert_eq!(build.definition.property("g.Name"), Some(&upper));
    assert_eq!(build.definition.property("g.name"), Some(&lower));

    let folded = build_definition(None, &[group], &[], &[]);
    assert_eq!(folded.problems.count(ProblemKind::Construction), 1);
}

/// 测试重复的组、属性、无效别名和默认值
#[test]
fn test_structural_problems_are_all_collected() {
    let shared = Property::int("SHARED").build();
    let bad_alias = Property::string("BAD").alias_in("has space").alias_in("").build();
    let bad_default = Property::int("BAD_DEFAULT").default_value("ten").build();

    let first = PropertyGroup::new("one")
        .with_property(shared.clone())
        .with_property(bad_alias)
        .with_property(bad_default);
    let second = PropertyGroup::new("two").with_property(shared.clone());
    let repeated = PropertyGroup::new("one");

    let mut builder = DefinitionBuilder::new(Arc::new(CaseInsensitiveNaming));
    builder.add_group(&first);
    builder.add_group(&second);
    builder.add_group(&repeated);
    let build = builder.build();

    let problems: Vec<_> = build.problems.construction_problems().collect();
    assert_eq!(problems.len(), 5, "{problems:?}");
    assert_eq!(
        problems
            .iter()
            .filter(|p| matches!(p, ConstructionProblem::InvalidAlias { .. }))
            .count(),
        2
    );
    assert!(problems
        .iter()
        .any(|p| matches!(p, ConstructionProblem::InvalidDefaultValue { .. })));
    assert!(problems
        .iter()
        .any(|p| matches!(p, ConstructionProblem::DuplicateProperty { existing_group, .. } if existing_group == "one")));
    assert!(problems
        .iter()
        .any(|p| matches!(p, ConstructionProblem::DuplicateGroup { group } if group == "one")));
    assert!(build.definition.properties_for_group("two").is_empty());
}

/// 测试同一属性重复声明同一名称不构成冲突
#[test]
fn test_repeated_own_alias_is_not_a_collision() {
    let property = Property::string("NAME").alias_in("app.NAME").build();
    let group = PropertyGroup::new("app").with_property(property.clone());

    let build = build_definition(None, &[group], &[], &[]);

    assert!(build.problems.is_empty());
    assert_eq!(build.definition.effective_names(&property).len(), 1);
    assert!(build.definition.aliases(&property).is_empty());
}

/// 测试规范名称冲突时别名仍然可见
#[test]
fn test_aliases_survive_canonical_collision() {
    let squatter = Property::string("OTHER").alias_in("app.X").build();
    let property = Property::string("X").alias_in("legacy.x").build();
    let first = PropertyGroup::new("first").with_property(squatter);
    let app = PropertyGroup::new("app").with_property(property.clone());

    let build = build_definition(None, &[first, app], &[], &[]);

    assert_eq!(build.problems.count(ProblemKind::Construction), 1);
    assert_eq!(build.definition.canonical_name(&property), Some("app.X"));
    let aliases: Vec<_> = build
        .definition
        .aliases(&property)
        .into_iter()
        .map(|name| name.actual_name.as_str())
        .collect();
    assert_eq!(aliases, vec!["legacy.x"]);
}

/// 测试框架选项组总会被注册
#[test]
fn test_options_group_is_always_registered() {
    let (group, _, _) = server_group();
    let build = build_definition(None, &[group], &[], &[]);

    let names: Vec<_> = build.definition.groups().iter().map(|g| g.name()).collect();
    assert_eq!(names, vec!["app.Server", OPTIONS_GROUP_NAME]);
    assert_eq!(
        build.definition.canonical_name(&PROPERTY_FILE_PATH),
        Some("lorn.config.Options.PROPERTY_FILE_PATH")
    );
}

/// 测试加载器依赖未注册属性和导出目标未注册
#[test]
fn test_unregistered_loader_property_and_export_group() {
    let orphan = Property::string("ORPHAN_PATH").build();
    let loader = LoaderHandle::new(PropertyFileLoader::new(&orphan));
    let export = ExportGroup::for_group(Arc::new(MemoryExporter::new()), "missing.Group");

    let build = build_definition(None, &[], &[loader], &[export]);

    let problems: Vec<_> = build.problems.construction_problems().collect();
    assert_eq!(problems.len(), 2);
    assert!(matches!(
        problems[0],
        ConstructionProblem::LoaderPropertyNotRegistered { property, .. } if property == &orphan
    ));
    assert!(matches!(
        problems[1],
        ConstructionProblem::ExportGroupNotRegistered { group, .. } if group == "missing.Group"
    ));
}

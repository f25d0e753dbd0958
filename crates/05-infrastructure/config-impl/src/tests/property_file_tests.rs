//! 属性文件加载测试

use crate::chain::run_loader_chain;
use crate::definition::build_definition;
use crate::loaders::{PropertyFileLoader, StringArgumentLoader};
use crate::options::PROPERTY_FILE_PATH;
use config_abstractions::{
    LoaderHandle, LoaderProblem, ProblemList, Property, PropertyGroup, ValueSource,
};
use config_common::{PropertyValue, Trimmer};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_properties(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("创建临时文件失败");
    file.write_all(content.as_bytes()).expect("写入临时文件失败");
    file
}

fn file_chain(path: &str) -> Vec<LoaderHandle> {
    vec![
        LoaderHandle::new(StringArgumentLoader::new([format!(
            "lorn.config.Options.PROPERTY_FILE_PATH={path}"
        )])),
        LoaderHandle::new(PropertyFileLoader::new(&PROPERTY_FILE_PATH)),
    ]
}

/// 测试文件中的重复键以最后一个值为准
#[test]
fn test_duplicate_keys_resolve_to_last_value() {
    let k = Property::int("k").alias_in("k").build();
    let group = PropertyGroup::new("app").with_property(k.clone());
    let file = write_properties("k=1\nk=2\n");

    let loaders = file_chain(&file.path().to_string_lossy());
    let build = build_definition(None, &[group], &loaders, &[]);
    assert!(build.problems.is_empty());

    let mut problems = ProblemList::new();
    let values = run_loader_chain(&build.definition, &build.loaders, &mut problems);

    assert!(problems.is_empty());
    assert_eq!(values.explicit_value(&k), Some(PropertyValue::Int(2)));
}

/// 测试文件路径来自前面的加载器，且尾部空白由修剪策略决定
#[test]
fn test_file_path_from_earlier_loader_and_trailing_whitespace() {
    let kept = Property::string("KEPT").trimmer(Trimmer::Preserve).build();
    let trimmed = Property::string("TRIMMED").build();
    let group = PropertyGroup::new("app")
        .with_property(kept.clone())
        .with_property(trimmed.clone());
    let file = write_properties("app.KEPT=value  \napp.TRIMMED=value  \n");

    let loaders = file_chain(&file.path().to_string_lossy());
    let build = build_definition(None, &[group], &loaders, &[]);

    let mut problems = ProblemList::new();
    let values = run_loader_chain(&build.definition, &build.loaders, &mut problems);

    assert!(problems.is_empty());
    assert_eq!(values.explicit_value(&kept), Some(PropertyValue::from("value  ")));
    assert_eq!(values.explicit_value(&trimmed), Some(PropertyValue::from("value")));
    assert!(values.is_explicitly_set(&PROPERTY_FILE_PATH));
}

/// 测试未识别的键和缺失的文件
#[test]
fn test_unknown_keys_and_missing_file_are_problems() {
    let group = PropertyGroup::new("app").with_property(Property::string("KNOWN").build());
    let file = write_properties("app.KNOWN=yes\napp.UNKNOWN=no\n");

    let loaders = file_chain(&file.path().to_string_lossy());
    let build = build_definition(None, &[group.clone()], &loaders, &[]);
    let mut problems = ProblemList::new();
    run_loader_chain(&build.definition, &build.loaders, &mut problems);

    let found: Vec<_> = problems.loader_problems().collect();
    assert_eq!(found.len(), 1);
    assert!(matches!(found[0], LoaderProblem::UnknownProperty { name, .. } if name == "app.UNKNOWN"));

    let dir = tempfile::tempdir().expect("创建临时目录失败");
    let missing = dir.path().join("absent.properties");
    let loaders = file_chain(&missing.to_string_lossy());
    let build = build_definition(None, &[group], &loaders, &[]);
    let mut problems = ProblemList::new();
    run_loader_chain(&build.definition, &build.loaders, &mut problems);

    assert!(matches!(
        problems.loader_problems().next(),
        Some(LoaderProblem::SourceNotFound { .. })
    ));
}

/// 测试未设置路径时不读取文件
#[test]
fn test_unset_path_loads_nothing() {
    let loaders = vec![LoaderHandle::new(PropertyFileLoader::new(&PROPERTY_FILE_PATH))];
    let build = build_definition(None, &[], &loaders, &[]);

    let mut problems = ProblemList::new();
    let values = run_loader_chain(&build.definition, &build.loaders, &mut problems);

    assert!(problems.is_empty());
    assert!(values.is_empty());
}

//! 配置启动流程集成测试

use config_abstractions::{
    ConstructionDefinition, ConstructionProblem, ExportError, ExportGroup, Exporter, Loader,
    LoaderHandle, LoaderValues, ProblemKind, Property, PropertyGroup, ValueSource,
};
use config_common::PropertyValue;
use config_composition::{ConfigCore, StartupConfig};
use config_impl::{
    FixedValueLoader, MemoryExporter, StringArgumentLoader, PROPERTY_FILE_PATH,
};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// 统计调用次数的加载器
#[derive(Debug)]
struct CountingLoader {
    calls: Arc<AtomicUsize>,
}

impl Loader for CountingLoader {
    fn name(&self) -> &str {
        "CountingLoader"
    }

    fn load(&self, _: &dyn ConstructionDefinition, _: &dyn ValueSource) -> LoaderValues {
        self.calls.fetch_add(1, Ordering::SeqCst);
        LoaderValues::new()
    }

    fn describe_source(&self) -> String {
        "counter".to_string()
    }
}

/// 总是失败的导出器
#[derive(Debug)]
struct RejectingExporter;

impl Exporter for RejectingExporter {
    fn name(&self) -> &str {
        "RejectingExporter"
    }

    fn export(
        &self,
        _: &PropertyGroup,
        _: &dyn ConstructionDefinition,
        _: &dyn ValueSource,
    ) -> Result<(), ExportError> {
        Err(ExportError::new("目标不可写"))
    }
}

fn quiet(config: StartupConfig) -> StartupConfig {
    StartupConfig {
        print_failure_report: false,
        ..config
    }
}

/// 测试重复加载器导致构建失败且不运行任何加载器
#[test]
fn test_duplicate_loader_halts_before_loading() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = LoaderHandle::new(CountingLoader {
        calls: calls.clone(),
    });

    let err = ConfigCore::new(quiet(StartupConfig {
        loaders: vec![counter.clone(), counter],
        ..StartupConfig::default()
    }))
    .expect_err("重复加载器应导致启动失败");

    assert_eq!(err.problems().len(), 1);
    assert_eq!(err.problems().count(ProblemKind::Construction), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 0, "构建失败时不应运行加载器");
}

/// 测试名称冲突导致构建失败且不运行任何加载器
#[test]
fn test_name_collision_halts_before_loading() {
    let calls = Arc::new(AtomicUsize::new(0));
    let first = Property::string("NAME").alias_in("shared").build();
    let second = Property::string("OTHER").alias_in("SHARED").build();

    let err = ConfigCore::new(quiet(StartupConfig {
        groups: vec![
            PropertyGroup::new("a").with_property(first),
            PropertyGroup::new("b").with_property(second),
        ],
        loaders: vec![LoaderHandle::new(CountingLoader {
            calls: calls.clone(),
        })],
        ..StartupConfig::default()
    }))
    .expect_err("名称冲突应导致启动失败");

    assert!(matches!(
        err.problems().construction_problems().next(),
        Some(ConstructionProblem::NonUniqueNames { name, .. }) if name == "SHARED"
    ));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

/// 测试必需值问题数量等于缺失的必需属性数量，且与加载问题合并报告
#[test]
fn test_requirement_problems_count_every_missing_required_property() {
    let groups = vec![
        PropertyGroup::new("app.Db")
            .with_property(Property::string("URL").required().build())
            .with_property(Property::string("USER").required().default_value("sa").build()),
        PropertyGroup::new("app.Server")
            .with_property(Property::int("PORT").required().build())
            .with_property(Property::int("THREADS").build()),
    ];

    let err = ConfigCore::new(quiet(StartupConfig {
        groups,
        loaders: vec![LoaderHandle::new(StringArgumentLoader::new(["nope=1"]))],
        ..StartupConfig::default()
    }))
    .expect_err("缺少必需值应导致启动失败");

    assert_eq!(err.problems().count(ProblemKind::Requirement), 2);
    assert_eq!(err.problems().count(ProblemKind::Loader), 1);

    let groups: Vec<_> = err
        .problems()
        .requirement_problems()
        .map(|p| p.group().to_string())
        .collect();
    assert_eq!(groups, vec!["app.Db", "app.Server"]);
}

/// 测试默认加载器链：文件路径由命令行参数给出，文件加载器读取
#[test]
fn test_command_line_path_feeds_property_file_loader() {
    let mut file = tempfile::NamedTempFile::new().expect("创建临时文件失败");
    writeln!(file, "app.Server.PORT=8081\napp.Server.HOST = example.org").expect("写入失败");

    let port = Property::int("PORT").required().build();
    let host = Property::string("HOST").build();
    let group = PropertyGroup::new("app.Server")
        .with_property(port.clone())
        .with_property(host.clone());

    let core = ConfigCore::new(quiet(StartupConfig {
        groups: vec![group],
        command_line_args: vec![
            format!("lorn.config.Options.PROPERTY_FILE_PATH={}", file.path().display()),
            "app.server.port=9000".to_string(),
        ],
        ..StartupConfig::default()
    }))
    .expect("启动应成功");

    assert!(core.is_explicitly_set(&PROPERTY_FILE_PATH));
    assert_eq!(core.explicit_value(&port), Some(PropertyValue::Int(9000)));
    assert_eq!(core.explicit_value(&host), Some(PropertyValue::from("example.org")));
    assert_eq!(core.values().shadowed_values().len(), 1);
    assert_eq!(
        core.values().loader_for(&port).map(|l| l.name()),
        Some("StringArgumentLoader")
    );
    assert_eq!(
        core.loaders().iter().map(|l| l.name()).collect::<Vec<_>>(),
        vec!["StringArgumentLoader", "EnvironmentLoader", "PropertyFileLoader"]
    );
}

/// 测试相同输入重复启动得到相同的值映射
#[test]
fn test_startup_is_idempotent() {
    let name = Property::string("NAME").build();
    let config = quiet(StartupConfig {
        groups: vec![PropertyGroup::new("app").with_property(name.clone())],
        loaders: vec![
            LoaderHandle::new(FixedValueLoader::new().with_raw("app.name", "first")),
            LoaderHandle::new(FixedValueLoader::new().with_value(&name, "second")),
        ],
        ..StartupConfig::default()
    });

    let one = ConfigCore::new(config.clone()).expect("启动应成功");
    let two = ConfigCore::new(config).expect("启动应成功");

    assert_eq!(one.values(), two.values());
    assert_eq!(one.explicit_value(&name), Some(PropertyValue::from("first")));
}

/// 测试使用默认加载器链时重复启动同样得到相同的值映射
#[test]
fn test_default_chain_startup_is_idempotent() {
    let name = Property::string("NAME").build();
    let config = quiet(StartupConfig {
        groups: vec![PropertyGroup::new("lorn.test.Idempotent").with_property(name.clone())],
        command_line_args: vec!["lorn.test.Idempotent.NAME=x".to_string()],
        ..StartupConfig::default()
    });

    let one = ConfigCore::new(config.clone()).expect("启动应成功");
    let two = ConfigCore::new(config).expect("启动应成功");

    assert_eq!(one.values(), two.values(), "默认链的两次启动应得到相同的值与来源");
    assert_eq!(one.explicit_value(&name), Some(PropertyValue::from("x")));
    assert_eq!(
        one.values().loader_for(&name).map(|l| l.name()),
        Some("StringArgumentLoader")
    );
}

/// 测试不区分大小写的名称查找
#[test]
fn test_case_insensitive_lookup_on_core() {
    let property = Property::string("Bar").build();
    let core = ConfigCore::new(quiet(StartupConfig {
        groups: vec![PropertyGroup::new("Foo").with_property(property.clone())],
        loaders: vec![LoaderHandle::new(FixedValueLoader::new().with_raw("FOO.BAR", "x"))],
        ..StartupConfig::default()
    }))
    .expect("启动应成功");

    assert_eq!(core.property("Foo.Bar"), Some(&property));
    assert_eq!(core.property("foo.bar"), Some(&property));
    assert_eq!(core.value_by_name("foo.BAR"), Some(PropertyValue::from("x")));
    assert_eq!(core.to_json()["Foo.Bar"], serde_json::json!("x"));
}

/// 测试导出成功与导出失败
#[test]
fn test_exports_run_after_validation() {
    let port = Property::int("PORT").default_value(80).alias_out("port").build();
    let group = PropertyGroup::new("app").with_property(port);
    let memory = Arc::new(MemoryExporter::new());

    let core = ConfigCore::new(quiet(StartupConfig {
        groups: vec![group.clone()],
        loaders: vec![LoaderHandle::new(FixedValueLoader::new())],
        exports: vec![ExportGroup::for_group(memory.clone(), "app")],
        ..StartupConfig::default()
    }));
    assert!(core.is_ok());
    assert_eq!(memory.get("port"), Some(PropertyValue::Int(80)));
    assert_eq!(memory.get("lorn.config.Options.CREATE_SAMPLES"), None);

    let err = ConfigCore::new(quiet(StartupConfig {
        groups: vec![group],
        loaders: vec![LoaderHandle::new(FixedValueLoader::new())],
        exports: vec![ExportGroup::for_all_groups(Arc::new(RejectingExporter))],
        ..StartupConfig::default()
    }))
    .expect_err("导出失败应导致启动失败");

    let failures = err
        .problems()
        .construction_problems()
        .filter(|p| matches!(p, ConstructionProblem::ExportFailed { .. }))
        .count();
    assert_eq!(failures, 2, "每个组各失败一次");
}

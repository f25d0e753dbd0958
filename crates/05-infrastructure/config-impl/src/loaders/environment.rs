//! 环境变量加载器

use super::apply_raw;
use config_abstractions::{ConstructionDefinition, Loader, LoaderValues, ValueSource};
use std::collections::BTreeMap;
use tracing::debug;

/// 环境变量加载器
///
/// 环境变量名经命名策略转换后与属性的输入名称匹配，与任何属性都不匹配的
/// 变量被忽略。
#[derive(Debug, Clone, Default)]
pub struct EnvironmentLoader {
    snapshot: Option<BTreeMap<String, String>>,
}

impl EnvironmentLoader {
    /// 加载时读取当前进程的环境变量
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用给定的变量集合代替进程环境
    pub fn from_map<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            snapshot: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    fn vars(&self) -> BTreeMap<String, String> {
        match &self.snapshot {
            Some(vars) => vars.clone(),
            // 非 UTF-8 的变量不可能匹配任何属性名称
            None => std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        }
    }
}

impl Loader for EnvironmentLoader {
    fn name(&self) -> &str {
        "EnvironmentLoader"
    }

    fn load(&self, definition: &dyn ConstructionDefinition, _: &dyn ValueSource) -> LoaderValues {
        let mut out = LoaderValues::new();
        let vars = self.vars();

        for (key, raw) in &vars {
            if let Some(property) = definition.property(key) {
                apply_raw(self.name(), property, key, raw, &mut out);
            }
        }

        debug!("检查了 {} 个环境变量，匹配 {} 个属性", vars.len(), out.values().len());
        out
    }

    fn describe_source(&self) -> String {
        match &self.snapshot {
            Some(_) => "注入的环境变量".to_string(),
            None => "进程环境变量".to_string(),
        }
    }
}

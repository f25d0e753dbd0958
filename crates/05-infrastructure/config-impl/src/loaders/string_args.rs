//! 字符串参数加载器

use super::{apply_named_raw, apply_raw};
use config_abstractions::{
    ConstructionDefinition, Loader, LoaderProblem, LoaderValues, ValueSource,
};
use config_common::ValueType;
use tracing::debug;

/// 键值分隔符
const KVP_DELIMITER: char = '=';

/// 字符串参数加载器
///
/// 解析 `name=value` 形式的字符串，通常来自命令行。
#[derive(Debug, Clone, Default)]
pub struct StringArgumentLoader {
    args: Vec<String>,
}

impl StringArgumentLoader {
    /// 创建新的字符串参数加载器
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Loader for StringArgumentLoader {
    fn name(&self) -> &str {
        "StringArgumentLoader"
    }

    fn load(&self, definition: &dyn ConstructionDefinition, _: &dyn ValueSource) -> LoaderValues {
        let mut out = LoaderValues::new();
        let source = self.describe_source();

        for arg in &self.args {
            let arg = arg.trim();
            if arg.is_empty() {
                continue;
            }

            match arg.split_once(KVP_DELIMITER) {
                Some((name, raw)) => {
                    apply_named_raw(self.name(), definition, name.trim(), raw, &source, &mut out);
                }
                None => match definition.property(arg) {
                    // 只写名称的标志表示 true
                    Some(property) if property.value_type() == ValueType::Flag => {
                        apply_raw(self.name(), property, arg, "true", &mut out);
                    }
                    Some(_) => out.add_problem(LoaderProblem::InvalidValue {
                        loader: self.name().to_string(),
                        name: arg.to_string(),
                        raw: String::new(),
                        message: "缺少值，只有标志属性可以省略值".to_string(),
                    }),
                    None => out.add_problem(LoaderProblem::UnknownProperty {
                        loader: self.name().to_string(),
                        name: arg.to_string(),
                        source_description: source.clone(),
                    }),
                },
            }
        }

        debug!("从 {} 个参数中解析出 {} 个值", self.args.len(), out.values().len());
        out
    }

    fn describe_source(&self) -> String {
        "命令行参数".to_string()
    }
}

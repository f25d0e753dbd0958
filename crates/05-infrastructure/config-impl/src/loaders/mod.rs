//! 常用加载器实现

mod environment;
mod fixed;
mod property_file;
mod string_args;

pub use environment::EnvironmentLoader;
pub use fixed::FixedValueLoader;
pub use property_file::{parse_properties, PropertyFileLoader};
pub use string_args::StringArgumentLoader;

use config_abstractions::{ConstructionDefinition, LoaderProblem, LoaderValues, Property};

/// 修剪并解析原始文本，把结果写入 `out`
///
/// 修剪后为空的文本不构成值；解析失败记录为 `InvalidValue` 问题。
fn apply_raw(loader: &str, property: &Property, name: &str, raw: &str, out: &mut LoaderValues) {
    match property.parse_raw(raw) {
        Ok(Some(value)) => out.add_value(property.clone(), value),
        Ok(None) => {}
        Err(e) => out.add_problem(LoaderProblem::InvalidValue {
            loader: loader.to_string(),
            name: name.to_string(),
            raw: raw.to_string(),
            message: e.to_string(),
        }),
    }
}

/// 按名称查找属性并应用原始文本，名称无法识别时记录 `UnknownProperty` 问题
fn apply_named_raw(
    loader: &str,
    definition: &dyn ConstructionDefinition,
    name: &str,
    raw: &str,
    source_description: &str,
    out: &mut LoaderValues,
) {
    match definition.property(name) {
        Some(property) => apply_raw(loader, property, name, raw, out),
        None => out.add_problem(LoaderProblem::UnknownProperty {
            loader: loader.to_string(),
            name: name.to_string(),
            source_description: source_description.to_string(),
        }),
    }
}

//! # Configuration Implementation
//!
//! 配置解析核心的具体实现：注册表构建、加载器链、分层值映射以及常用加载器。
//!
//! ## 主要组件
//!
//! - [`DefinitionBuilder`] / [`RuntimeDefinition`] - 属性注册表的构建与只读视图
//! - [`CaseInsensitiveNaming`] - 默认命名策略
//! - [`run_loader_chain`] - 按顺序运行加载器链
//! - [`LayeredValueMap`] - 带来源信息的分层值映射
//! - [`check_required_values`] - 必需值校验
//! - [`StringArgumentLoader`] / [`EnvironmentLoader`] / [`PropertyFileLoader`] /
//!   [`FixedValueLoader`] - 常用加载器
//! - [`MemoryExporter`] - 内存导出器

pub mod chain;
pub mod definition;
pub mod exporters;
pub mod loaders;
pub mod naming;
pub mod options;
pub mod validation;
pub mod value_map;

#[cfg(test)]
mod tests;

pub use chain::*;
pub use definition::*;
pub use exporters::*;
pub use loaders::*;
pub use naming::*;
pub use options::*;
pub use validation::*;
pub use value_map::*;

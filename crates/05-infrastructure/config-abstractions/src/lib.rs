//! # Configuration Abstractions
//!
//! 配置解析抽象层，定义属性声明、加载器契约与问题分类。
//!
//! ## 核心接口
//!
//! - [`Property`] / [`PropertyGroup`] - 静态声明的配置属性与属性组
//! - [`NamingStrategy`] - 名称到查找键的映射策略
//! - [`ConstructionDefinition`] - 构建完成后的只读属性注册表
//! - [`Loader`] - 配置值来源
//! - [`ValueSource`] - 只读的已解析值视图
//! - [`Exporter`] - 解析完成后的导出目标
//! - [`Problem`] / [`AppFatalError`] - 启动问题与聚合致命错误

pub mod definition;
pub mod exporter;
pub mod loader;
pub mod naming;
pub mod problem;
pub mod property;
pub mod values;

pub use definition::*;
pub use exporter::*;
pub use loader::*;
pub use naming::*;
pub use problem::*;
pub use property::*;
pub use values::*;

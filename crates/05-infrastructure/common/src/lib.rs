//! # Configuration Common
//!
//! 这个 crate 提供了配置解析核心的公共值类型和错误定义。
//!
//! ## 核心组件
//!
//! - [`ValueType`] - 属性值类型标签
//! - [`PropertyValue`] - 已解析的强类型属性值
//! - [`Trimmer`] - 原始文本的修剪策略
//! - [`ConfigError`] - 编程错误（例如启动前读取配置）
//!
//! ## 设计原则
//!
//! - 封闭的值类型集合，不依赖反射
//! - 解析失败以值的形式返回，由调用方决定如何记录

pub mod errors;
pub mod value;

pub use errors::*;
pub use value::*;

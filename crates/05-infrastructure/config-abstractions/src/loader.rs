//! 配置加载器抽象接口

use crate::definition::ConstructionDefinition;
use crate::problem::LoaderProblem;
use crate::property::Property;
use crate::values::ValueSource;
use config_common::PropertyValue;
use std::fmt::{self, Debug};
use std::ops::Deref;
use std::sync::Arc;

/// 配置加载器 trait
///
/// 从某种介质（命令行、环境变量、文件等）解析属性值。预期内的失败
/// 必须以问题的形式放入返回值，而不是 panic。
pub trait Loader: Send + Sync + Debug {
    /// 获取加载器名称
    fn name(&self) -> &str;

    /// 加载属性值
    ///
    /// `existing` 恰好包含链中排在本加载器之前的加载器所解析的值。
    fn load(
        &self,
        definition: &dyn ConstructionDefinition,
        existing: &dyn ValueSource,
    ) -> LoaderValues;

    /// 加载器自身依赖的属性（例如文件路径属性）
    fn declared_properties(&self) -> Vec<Property> {
        Vec::new()
    }

    /// 面向人的来源描述，仅用于诊断
    fn describe_source(&self) -> String;
}

/// 加载器句柄
///
/// 以实例身份比较：同一个加载器实例的两个句柄相等，即使两个实例的
/// 配置完全相同也互不相等。
#[derive(Clone)]
pub struct LoaderHandle(Arc<dyn Loader>);

impl LoaderHandle {
    /// 包装一个新的加载器实例
    pub fn new<L: Loader + 'static>(loader: L) -> Self {
        Self(Arc::new(loader))
    }

    /// 从已共享的加载器创建句柄
    pub fn from_arc(loader: Arc<dyn Loader>) -> Self {
        Self(loader)
    }

    /// 是否指向同一个加载器实例
    pub fn same_instance(&self, other: &Self) -> bool {
        Arc::as_ptr(&self.0).cast::<()>() == Arc::as_ptr(&other.0).cast::<()>()
    }
}

impl Deref for LoaderHandle {
    type Target = dyn Loader;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl PartialEq for LoaderHandle {
    fn eq(&self, other: &Self) -> bool {
        self.same_instance(other)
    }
}

impl Eq for LoaderHandle {}

impl Debug for LoaderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LoaderHandle").field(&self.0.name()).finish()
    }
}

/// 单次加载的结果
///
/// 同一加载器对同一属性多次给值时，后给出的值替换先前的值。
#[derive(Debug, Clone, Default)]
pub struct LoaderValues {
    values: Vec<(Property, PropertyValue)>,
    problems: Vec<LoaderProblem>,
}

impl LoaderValues {
    /// 创建空结果
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建只包含一个问题的结果
    pub fn with_problem(problem: LoaderProblem) -> Self {
        Self {
            values: Vec::new(),
            problems: vec![problem],
        }
    }

    /// 添加值
    pub fn add_value(&mut self, property: Property, value: PropertyValue) {
        if let Some(slot) = self.values.iter_mut().find(|(p, _)| *p == property) {
            slot.1 = value;
        } else {
            self.values.push((property, value));
        }
    }

    /// 添加问题
    pub fn add_problem(&mut self, problem: LoaderProblem) {
        self.problems.push(problem);
    }

    pub fn values(&self) -> &[(Property, PropertyValue)] {
        &self.values
    }

    pub fn problems(&self) -> &[LoaderProblem] {
        &self.problems
    }

    /// 给定属性的值
    pub fn value_of(&self, property: &Property) -> Option<&PropertyValue> {
        self.values
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v)
    }

    /// 拆分为值与问题
    pub fn into_parts(self) -> (Vec<(Property, PropertyValue)>, Vec<LoaderProblem>) {
        (self.values, self.problems)
    }
}

//! 启动问题分类与聚合致命错误
//!
//! 问题在各阶段内累积，从不单独抛出；只有在阶段检查点时问题列表非空，
//! 才会组装成一个 [`AppFatalError`]。

use crate::loader::LoaderHandle;
use crate::property::Property;
use config_common::ValueType;
use thiserror::Error;

/// 构建阶段问题：静态声明本身有误
#[derive(Error, Debug, Clone)]
pub enum ConstructionProblem {
    #[error("加载器实例重复注册: {}", .loader.name())]
    DuplicateLoader { loader: LoaderHandle },

    #[error("名称 '{name}' 不唯一: 已被 {existing} 使用，{conflicting} 无法再使用")]
    NonUniqueNames {
        name: String,
        existing: String,
        conflicting: String,
        property: Property,
    },

    #[error("属性 {local_name} 在组 {group} 中重复注册（已属于组 {existing_group}）")]
    DuplicateProperty {
        local_name: String,
        group: String,
        existing_group: String,
        property: Property,
    },

    #[error("属性组重复注册: {group}")]
    DuplicateGroup { group: String },

    #[error("属性 {canonical_name} 的别名 '{alias}' 无效: {reason}")]
    InvalidAlias {
        canonical_name: String,
        alias: String,
        reason: String,
    },

    #[error("属性 {canonical_name} 的默认值类型为 {actual}，与声明类型 {expected} 不一致")]
    InvalidDefaultValue {
        canonical_name: String,
        expected: ValueType,
        actual: ValueType,
        property: Property,
    },

    #[error("加载器 {loader} 依赖的属性 {local_name} 不属于任何已注册的组")]
    LoaderPropertyNotRegistered {
        loader: String,
        local_name: String,
        property: Property,
    },

    #[error("导出器 {exporter} 指定的组 {group} 未注册")]
    ExportGroupNotRegistered { exporter: String, group: String },

    #[error("导出器 {exporter} 导出组 {group} 失败: {message}")]
    ExportFailed {
        exporter: String,
        group: String,
        message: String,
    },
}

/// 加载阶段问题：值来源在运行时失败
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoaderProblem {
    #[error("[{loader}] 找不到配置来源: {source_description}")]
    SourceNotFound {
        loader: String,
        source_description: String,
    },

    #[error("[{loader}] 读取配置来源失败: {source_description}, 原因: {message}")]
    Io {
        loader: String,
        source_description: String,
        message: String,
    },

    #[error("[{loader}] 属性 {name} 的值 '{raw}' 无效: {message}")]
    InvalidValue {
        loader: String,
        name: String,
        raw: String,
        message: String,
    },

    #[error("[{loader}] 属性 {canonical_name} 的值类型为 {actual}，期望 {expected}")]
    TypeMismatch {
        loader: String,
        canonical_name: String,
        expected: ValueType,
        actual: ValueType,
    },

    #[error("[{loader}] 无法识别的属性名称 '{name}'（来源: {source_description}）")]
    UnknownProperty {
        loader: String,
        name: String,
        source_description: String,
    },

    #[error("[{loader}] 返回了未注册的属性 {local_name}")]
    UnregisteredProperty { loader: String, local_name: String },
}

impl LoaderProblem {
    /// 产生该问题的加载器名称
    pub fn loader_name(&self) -> &str {
        match self {
            Self::SourceNotFound { loader, .. }
            | Self::Io { loader, .. }
            | Self::InvalidValue { loader, .. }
            | Self::TypeMismatch { loader, .. }
            | Self::UnknownProperty { loader, .. }
            | Self::UnregisteredProperty { loader, .. } => loader,
        }
    }
}

/// 必需值问题：必需属性在所有加载器运行后仍没有有效值
#[derive(Error, Debug, Clone)]
pub enum RequirementProblem {
    #[error("必需属性 {canonical_name}（组 {group}）没有值")]
    RequiredPropertyMissing {
        group: String,
        canonical_name: String,
        property: Property,
    },
}

impl RequirementProblem {
    pub fn property(&self) -> &Property {
        match self {
            Self::RequiredPropertyMissing { property, .. } => property,
        }
    }

    pub fn group(&self) -> &str {
        match self {
            Self::RequiredPropertyMissing { group, .. } => group,
        }
    }
}

/// 问题种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProblemKind {
    /// 构建阶段
    Construction,
    /// 加载阶段
    Loader,
    /// 必需值校验
    Requirement,
}

impl ProblemKind {
    /// 阶段的显示名称
    pub fn phase_name(&self) -> &'static str {
        match self {
            Self::Construction => "构建",
            Self::Loader => "加载",
            Self::Requirement => "必需值校验",
        }
    }
}

/// 启动问题
#[derive(Error, Debug, Clone)]
pub enum Problem {
    #[error(transparent)]
    Construction(#[from] ConstructionProblem),

    #[error(transparent)]
    Loader(#[from] LoaderProblem),

    #[error(transparent)]
    Requirement(#[from] RequirementProblem),
}

impl Problem {
    pub fn kind(&self) -> ProblemKind {
        match self {
            Self::Construction(_) => ProblemKind::Construction,
            Self::Loader(_) => ProblemKind::Loader,
            Self::Requirement(_) => ProblemKind::Requirement,
        }
    }
}

/// 问题列表
///
/// 只追加、保持顺序的问题集合。
#[derive(Debug, Clone, Default)]
pub struct ProblemList {
    problems: Vec<Problem>,
}

impl ProblemList {
    /// 创建空列表
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加问题
    pub fn push(&mut self, problem: impl Into<Problem>) {
        self.problems.push(problem.into());
    }

    /// 批量追加问题
    pub fn extend<P: Into<Problem>>(&mut self, problems: impl IntoIterator<Item = P>) {
        self.problems.extend(problems.into_iter().map(Into::into));
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Problem> {
        self.problems.iter()
    }

    /// 按种类过滤
    pub fn filter(&self, kind: ProblemKind) -> Vec<&Problem> {
        self.problems.iter().filter(|p| p.kind() == kind).collect()
    }

    /// 指定种类的问题数量
    pub fn count(&self, kind: ProblemKind) -> usize {
        self.problems.iter().filter(|p| p.kind() == kind).count()
    }

    pub fn construction_problems(&self) -> impl Iterator<Item = &ConstructionProblem> {
        self.problems.iter().filter_map(|p| match p {
            Problem::Construction(c) => Some(c),
            _ => None,
        })
    }

    pub fn loader_problems(&self) -> impl Iterator<Item = &LoaderProblem> {
        self.problems.iter().filter_map(|p| match p {
            Problem::Loader(l) => Some(l),
            _ => None,
        })
    }

    pub fn requirement_problems(&self) -> impl Iterator<Item = &RequirementProblem> {
        self.problems.iter().filter_map(|p| match p {
            Problem::Requirement(r) => Some(r),
            _ => None,
        })
    }
}

impl<'a> IntoIterator for &'a ProblemList {
    type Item = &'a Problem;
    type IntoIter = std::slice::Iter<'a, Problem>;

    fn into_iter(self) -> Self::IntoIter {
        self.problems.iter()
    }
}

impl IntoIterator for ProblemList {
    type Item = Problem;
    type IntoIter = std::vec::IntoIter<Problem>;

    fn into_iter(self) -> Self::IntoIter {
        self.problems.into_iter()
    }
}

/// 聚合致命错误
///
/// 携带阶段检查点时的完整问题列表。
#[derive(Error, Debug, Clone)]
#[error("{message}（共 {} 个问题）", .problems.len())]
pub struct AppFatalError {
    message: String,
    problems: ProblemList,
}

impl AppFatalError {
    /// 创建新的致命错误
    pub fn new(message: impl Into<String>, problems: ProblemList) -> Self {
        Self {
            message: message.into(),
            problems,
        }
    }

    /// 构建阶段失败
    pub fn construction(problems: ProblemList) -> Self {
        Self::new(
            "配置框架自身的声明存在问题，未尝试加载任何值",
            problems,
        )
    }

    /// 加载或校验阶段失败
    pub fn loading(problems: ProblemList) -> Self {
        Self::new("无法加载或校验配置值", problems)
    }

    /// 导出阶段失败
    pub fn export(problems: ProblemList) -> Self {
        Self::new("配置值已解析，但导出失败", problems)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn problems(&self) -> &ProblemList {
        &self.problems
    }
}

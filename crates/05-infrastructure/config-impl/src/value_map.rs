//! 分层值映射
//!
//! 按加载器链顺序折叠各加载器的结果：每个属性只接受第一个给值的加载器，
//! 后续加载器给出的值记录为被遮蔽的值，不会覆盖，也不视为问题。

use config_abstractions::{
    ConstructionDefinition, LoaderHandle, LoaderProblem, Property, ValueSource,
};
use config_common::PropertyValue;
use std::collections::HashMap;
use tracing::debug;

/// 显式设置的值及其来源
#[derive(Debug, Clone)]
pub struct ValueEntry {
    pub property: Property,
    pub value: PropertyValue,
    /// 设置该值的加载器实例
    pub loader: LoaderHandle,
}

/// 被先前加载器遮蔽的值
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowedValue {
    pub property: Property,
    pub value: PropertyValue,
    /// 给出被遮蔽值的加载器
    pub loader: LoaderHandle,
    /// 实际生效值的加载器
    pub winner: LoaderHandle,
}

/// 分层值映射
#[derive(Debug, Clone, Default)]
pub struct LayeredValueMap {
    entries: Vec<ValueEntry>,
    index: HashMap<Property, usize>,
    shadowed: Vec<ShadowedValue>,
    /// 按合并顺序排列的加载器，即加载器在链中的位置
    chain: Vec<LoaderHandle>,
}

impl LayeredValueMap {
    /// 创建空映射
    pub fn new() -> Self {
        Self::default()
    }

    /// 合并一个加载器的值，返回合并过程中发现的问题
    ///
    /// 未注册的属性和类型不符的值不会进入映射。
    pub fn add_values(
        &mut self,
        loader: &LoaderHandle,
        values: Vec<(Property, PropertyValue)>,
        definition: &dyn ConstructionDefinition,
    ) -> Vec<LoaderProblem> {
        let mut problems = Vec::new();
        if !self.chain.contains(loader) {
            self.chain.push(loader.clone());
        }

        for (property, value) in values {
            let Some(canonical) = definition.canonical_name(&property) else {
                problems.push(LoaderProblem::UnregisteredProperty {
                    loader: loader.name().to_string(),
                    local_name: property.local_name().to_string(),
                });
                continue;
            };

            if value.value_type() != property.value_type() {
                problems.push(LoaderProblem::TypeMismatch {
                    loader: loader.name().to_string(),
                    canonical_name: canonical.to_string(),
                    expected: property.value_type(),
                    actual: value.value_type(),
                });
                continue;
            }

            if let Some(&position) = self.index.get(&property) {
                let winner = self.entries[position].loader.clone();
                debug!(
                    "属性 {} 已由 {} 设置，忽略 {} 给出的值",
                    canonical,
                    winner.name(),
                    loader.name()
                );
                self.shadowed.push(ShadowedValue {
                    property,
                    value,
                    loader: loader.clone(),
                    winner,
                });
                continue;
            }

            self.index.insert(property.clone(), self.entries.len());
            self.entries.push(ValueEntry {
                property,
                value,
                loader: loader.clone(),
            });
        }

        problems
    }

    /// 按设置顺序返回全部显式值
    pub fn entries(&self) -> &[ValueEntry] {
        &self.entries
    }

    /// 被遮蔽的值
    pub fn shadowed_values(&self) -> &[ShadowedValue] {
        &self.shadowed
    }

    /// 设置该属性的加载器
    pub fn loader_for(&self, property: &Property) -> Option<&LoaderHandle> {
        self.entry(property).map(|entry| &entry.loader)
    }

    /// 加载器在链中的位置
    pub fn chain_position(&self, loader: &LoaderHandle) -> Option<usize> {
        self.chain.iter().position(|seen| seen == loader)
    }

    /// 来源：链中位置和加载器名称
    fn provenance<'a>(&self, entry: &'a ValueEntry) -> (Option<usize>, &'a str) {
        (self.chain_position(&entry.loader), entry.loader.name())
    }

    pub fn entry(&self, property: &Property) -> Option<&ValueEntry> {
        self.index
            .get(property)
            .and_then(|&position| self.entries.get(position))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ValueSource for LayeredValueMap {
    fn is_explicitly_set(&self, property: &Property) -> bool {
        self.index.contains_key(property)
    }

    fn explicit_value(&self, property: &Property) -> Option<PropertyValue> {
        self.entry(property).map(|entry| entry.value.clone())
    }
}

/// 两个映射的显式值与来源完全一致时相等，被遮蔽的值不参与比较
///
/// 来源按加载器在链中的位置和名称比较，不要求是同一个加载器实例。
impl PartialEq for LayeredValueMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().zip(&other.entries).all(|(a, b)| {
                a.property == b.property
                    && a.value == b.value
                    && self.provenance(a) == other.provenance(b)
            })
    }
}

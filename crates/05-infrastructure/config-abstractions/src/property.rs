//! 配置属性声明

use config_common::{PropertyValue, Trimmer, ValueParseError, ValueType};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// 属性别名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    /// 别名文本
    pub name: String,
    /// 是否可用于读取
    pub input: bool,
    /// 是否可用于导出
    pub output: bool,
}

#[derive(Debug)]
struct PropertyInner {
    local_name: String,
    value_type: ValueType,
    default_value: Option<PropertyValue>,
    required: bool,
    aliases: Vec<Alias>,
    trimmer: Trimmer,
    description: Option<String>,
}

/// 配置属性
///
/// 不可变的属性描述符。克隆只复制句柄，相等性与哈希基于声明实例本身，
/// 与名称无关：两个同名的属性是不同的属性。
#[derive(Clone)]
pub struct Property {
    inner: Arc<PropertyInner>,
}

impl Property {
    /// 声明字符串属性
    pub fn string(local_name: impl Into<String>) -> PropertyBuilder {
        PropertyBuilder::new(local_name, ValueType::String)
    }

    /// 声明布尔标志属性
    pub fn flag(local_name: impl Into<String>) -> PropertyBuilder {
        PropertyBuilder::new(local_name, ValueType::Flag)
    }

    /// 声明 32 位整数属性
    pub fn int(local_name: impl Into<String>) -> PropertyBuilder {
        PropertyBuilder::new(local_name, ValueType::Integer)
    }

    /// 声明 64 位整数属性
    pub fn long(local_name: impl Into<String>) -> PropertyBuilder {
        PropertyBuilder::new(local_name, ValueType::Long)
    }

    /// 声明浮点数属性
    pub fn double(local_name: impl Into<String>) -> PropertyBuilder {
        PropertyBuilder::new(local_name, ValueType::Double)
    }

    /// 声明本地日期时间属性
    pub fn date_time(local_name: impl Into<String>) -> PropertyBuilder {
        PropertyBuilder::new(local_name, ValueType::LocalDateTime)
    }

    /// 属性在所属组内的名称
    pub fn local_name(&self) -> &str {
        &self.inner.local_name
    }

    pub fn value_type(&self) -> ValueType {
        self.inner.value_type
    }

    pub fn default_value(&self) -> Option<&PropertyValue> {
        self.inner.default_value.as_ref()
    }

    pub fn is_required(&self) -> bool {
        self.inner.required
    }

    /// 按声明顺序返回别名
    pub fn aliases(&self) -> &[Alias] {
        &self.inner.aliases
    }

    pub fn trimmer(&self) -> Trimmer {
        self.inner.trimmer
    }

    pub fn description(&self) -> Option<&str> {
        self.inner.description.as_deref()
    }

    /// 修剪并解析原始文本
    ///
    /// 修剪后为空时返回 `Ok(None)`，即该文本不构成一个值。
    pub fn parse_raw(&self, raw: &str) -> Result<Option<PropertyValue>, ValueParseError> {
        match self.inner.trimmer.apply(raw) {
            Some(text) => self.inner.value_type.parse(&text).map(Some),
            None => Ok(None),
        }
    }
}

impl PartialEq for Property {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Property {}

impl Hash for Property {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.inner), state);
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("local_name", &self.inner.local_name)
            .field("value_type", &self.inner.value_type)
            .field("required", &self.inner.required)
            .finish()
    }
}

/// 属性构建器
#[derive(Debug)]
pub struct PropertyBuilder {
    local_name: String,
    value_type: ValueType,
    default_value: Option<PropertyValue>,
    required: bool,
    aliases: Vec<Alias>,
    trimmer: Option<Trimmer>,
    description: Option<String>,
}

impl PropertyBuilder {
    /// 创建新的属性构建器
    pub fn new(local_name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            local_name: local_name.into(),
            value_type,
            default_value: None,
            required: false,
            aliases: Vec::new(),
            trimmer: None,
            description: None,
        }
    }

    /// 设置默认值
    ///
    /// 默认值类型与声明类型不一致时，注册表构建阶段会记录问题。
    pub fn default_value(mut self, value: impl Into<PropertyValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// 标记为必需
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// 添加仅用于读取的别名
    pub fn alias_in(self, name: impl Into<String>) -> Self {
        self.alias(name, true, false)
    }

    /// 添加仅用于导出的别名
    pub fn alias_out(self, name: impl Into<String>) -> Self {
        self.alias(name, false, true)
    }

    /// 添加读取和导出均可用的别名
    pub fn alias_in_and_out(self, name: impl Into<String>) -> Self {
        self.alias(name, true, true)
    }

    fn alias(mut self, name: impl Into<String>, input: bool, output: bool) -> Self {
        self.aliases.push(Alias {
            name: name.into(),
            input,
            output,
        });
        self
    }

    /// 设置修剪策略
    pub fn trimmer(mut self, trimmer: Trimmer) -> Self {
        self.trimmer = Some(trimmer);
        self
    }

    /// 设置描述
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// 构建属性
    pub fn build(self) -> Property {
        let trimmer = self
            .trimmer
            .unwrap_or_else(|| self.value_type.default_trimmer());
        Property {
            inner: Arc::new(PropertyInner {
                local_name: self.local_name,
                value_type: self.value_type,
                default_value: self.default_value,
                required: self.required,
                aliases: self.aliases,
                trimmer,
                description: self.description,
            }),
        }
    }
}

/// 属性组
///
/// 一起声明的有序属性集合，以名称标识。组内属性的规范名称为
/// `组名.属性名`。
#[derive(Debug, Clone)]
pub struct PropertyGroup {
    name: String,
    description: Option<String>,
    properties: Vec<Property>,
}

impl PropertyGroup {
    /// 创建新的属性组
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            properties: Vec::new(),
        }
    }

    /// 添加属性
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// 批量添加属性
    pub fn with_properties(mut self, properties: impl IntoIterator<Item = Property>) -> Self {
        self.properties.extend(properties);
        self
    }

    /// 设置描述
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// 计算组内属性的规范名称
    pub fn canonical_name_of(&self, property: &Property) -> String {
        format!("{}.{}", self.name, property.local_name())
    }
}

impl PartialEq for PropertyGroup {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for PropertyGroup {}

/// 有效名称
///
/// 解析后的查找或导出名称，带有方向标记。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveName {
    /// 声明时的原始名称
    pub actual_name: String,
    /// 经命名策略转换后的查找键
    pub effective_name: String,
    /// 是否可用于读取
    pub input: bool,
    /// 是否可用于导出
    pub output: bool,
}

impl EffectiveName {
    /// 创建新的有效名称
    pub fn new(
        actual_name: impl Into<String>,
        effective_name: impl Into<String>,
        input: bool,
        output: bool,
    ) -> Self {
        Self {
            actual_name: actual_name.into(),
            effective_name: effective_name.into(),
            input,
            output,
        }
    }
}

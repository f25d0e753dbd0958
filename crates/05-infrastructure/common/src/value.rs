//! 属性值类型定义
//!
//! 提供属性值的类型标签、强类型值以及从原始文本解析的规则。

use crate::errors::ValueParseError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 本地日期时间的输出格式
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// 属性值类型标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    /// 字符串
    String,
    /// 布尔标志
    Flag,
    /// 32 位整数
    Integer,
    /// 64 位整数
    Long,
    /// 双精度浮点数
    Double,
    /// 本地日期时间（不含时区）
    LocalDateTime,
}

impl ValueType {
    /// 获取类型名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Flag => "Flag",
            Self::Integer => "Integer",
            Self::Long => "Long",
            Self::Double => "Double",
            Self::LocalDateTime => "LocalDateTime",
        }
    }

    /// 默认修剪策略
    ///
    /// 字符串保留引号内的空白，其余类型修剪为空即视为未设置。
    pub fn default_trimmer(&self) -> Trimmer {
        match self {
            Self::String => Trimmer::QuotedSpacePreserving,
            _ => Trimmer::TrimToNull,
        }
    }

    /// 将已修剪的文本解析为该类型的值
    pub fn parse(&self, raw: &str) -> Result<PropertyValue, ValueParseError> {
        match self {
            Self::String => Ok(PropertyValue::Str(raw.to_string())),
            Self::Flag => parse_flag(raw).map(PropertyValue::Flag),
            Self::Integer => raw
                .trim()
                .parse::<i32>()
                .map(PropertyValue::Int)
                .map_err(|e| ValueParseError::new(raw, self.name(), e.to_string())),
            Self::Long => raw
                .trim()
                .parse::<i64>()
                .map(PropertyValue::Long)
                .map_err(|e| ValueParseError::new(raw, self.name(), e.to_string())),
            Self::Double => raw
                .trim()
                .parse::<f64>()
                .map(PropertyValue::Double)
                .map_err(|e| ValueParseError::new(raw, self.name(), e.to_string())),
            Self::LocalDateTime => parse_date_time(raw).map(PropertyValue::LocalDateTime),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn parse_flag(raw: &str) -> Result<bool, ValueParseError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "on" | "1" => Ok(true),
        "false" | "f" | "no" | "n" | "off" | "0" => Ok(false),
        _ => Err(ValueParseError::new(
            raw,
            ValueType::Flag.name(),
            "期望 true/false、yes/no、on/off 或 1/0",
        )),
    }
}

fn parse_date_time(raw: &str) -> Result<NaiveDateTime, ValueParseError> {
    let text = raw.trim();
    text.parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M"))
        .map_err(|e| ValueParseError::new(raw, ValueType::LocalDateTime.name(), e.to_string()))
}

/// 强类型属性值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// 字符串值
    Str(String),
    /// 布尔标志值
    Flag(bool),
    /// 32 位整数值
    Int(i32),
    /// 64 位整数值
    Long(i64),
    /// 浮点数值
    Double(f64),
    /// 本地日期时间值
    LocalDateTime(NaiveDateTime),
}

impl PropertyValue {
    /// 获取值的类型标签
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Str(_) => ValueType::String,
            Self::Flag(_) => ValueType::Flag,
            Self::Int(_) => ValueType::Integer,
            Self::Long(_) => ValueType::Long,
            Self::Double(_) => ValueType::Double,
            Self::LocalDateTime(_) => ValueType::LocalDateTime,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            Self::Long(l) => Some(*l),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_date_time(&self) -> Option<NaiveDateTime> {
        match self {
            Self::LocalDateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// 转换为 JSON 值
    ///
    /// 非有限的浮点数转换为 `null`。
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Str(s) => serde_json::Value::String(s.clone()),
            Self::Flag(b) => serde_json::Value::Bool(*b),
            Self::Int(i) => serde_json::Value::from(*i),
            Self::Long(l) => serde_json::Value::from(*l),
            Self::Double(d) => serde_json::Number::from_f64(*d)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Self::LocalDateTime(_) => serde_json::Value::String(self.to_string()),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Flag(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Long(l) => write!(f, "{l}"),
            Self::Double(d) => write!(f, "{d}"),
            Self::LocalDateTime(dt) => write!(f, "{}", dt.format(DATE_TIME_FORMAT)),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<NaiveDateTime> for PropertyValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::LocalDateTime(value)
    }
}

/// 原始文本修剪策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Trimmer {
    /// 去除首尾空白，结果为空时视为未设置
    #[default]
    TrimToNull,
    /// 去除首尾空白；若剩余文本被双引号包围，则去掉外层引号并保留其中所有内容
    QuotedSpacePreserving,
    /// 不做任何修剪
    Preserve,
}

impl Trimmer {
    /// 应用修剪策略
    ///
    /// 返回 `None` 表示该文本等同于未设置值。
    pub fn apply(&self, raw: &str) -> Option<String> {
        match self {
            Self::TrimToNull => {
                let trimmed = raw.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Self::QuotedSpacePreserving => {
                let trimmed = raw.trim();
                if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
                    Some(trimmed[1..trimmed.len() - 1].to_string())
                } else if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Self::Preserve => Some(raw.to_string()),
        }
    }
}

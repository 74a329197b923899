//! 标量属性值与封闭转换表
//!
//! 定义文档中的 `value` 字面量只能落到这里列出的七种目标类型，
//! 转换表不可扩展。

use std::fmt;

/// 标量字段的声明类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// 文本
    Text,
    /// 32 位整数
    Int,
    /// 64 位整数
    Long,
    /// 双精度浮点
    Double,
    /// 单精度浮点
    Float,
    /// 布尔值
    Bool,
    /// 字节
    Byte,
}

impl PropertyKind {
    /// 类型名称，用于错误信息
    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Int => "int",
            Self::Long => "long",
            Self::Double => "double",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Byte => "byte",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 转换完成的标量值
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Text(String),
    Int(i32),
    Long(i64),
    Double(f64),
    Float(f32),
    Bool(bool),
    Byte(i8),
}

impl PropertyValue {
    /// 值对应的声明类型
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Text(_) => PropertyKind::Text,
            Self::Int(_) => PropertyKind::Int,
            Self::Long(_) => PropertyKind::Long,
            Self::Double(_) => PropertyKind::Double,
            Self::Float(_) => PropertyKind::Float,
            Self::Bool(_) => PropertyKind::Bool,
            Self::Byte(_) => PropertyKind::Byte,
        }
    }
}

/// 可作为标量字段的 Rust 类型
///
/// 实现即加入封闭转换表；注册表只接受实现了此 trait 的字段类型，
/// 因此"字段类型不在转换表内"在编译期就不可表达。
pub trait ScalarField: Sized + Send + Sync + 'static {
    /// 对应的声明类型
    const KIND: PropertyKind;

    /// 从转换完成的标量值中取出具体值
    fn from_value(value: PropertyValue) -> Option<Self>;
}

impl ScalarField for String {
    const KIND: PropertyKind = PropertyKind::Text;

    fn from_value(value: PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl ScalarField for i32 {
    const KIND: PropertyKind = PropertyKind::Int;

    fn from_value(value: PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Int(number) => Some(number),
            _ => None,
        }
    }
}

impl ScalarField for i64 {
    const KIND: PropertyKind = PropertyKind::Long;

    fn from_value(value: PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Long(number) => Some(number),
            _ => None,
        }
    }
}

impl ScalarField for f64 {
    const KIND: PropertyKind = PropertyKind::Double;

    fn from_value(value: PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Double(number) => Some(number),
            _ => None,
        }
    }
}

impl ScalarField for f32 {
    const KIND: PropertyKind = PropertyKind::Float;

    fn from_value(value: PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Float(number) => Some(number),
            _ => None,
        }
    }
}

impl ScalarField for bool {
    const KIND: PropertyKind = PropertyKind::Bool;

    fn from_value(value: PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Bool(flag) => Some(flag),
            _ => None,
        }
    }
}

impl ScalarField for i8 {
    const KIND: PropertyKind = PropertyKind::Byte;

    fn from_value(value: PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Byte(number) => Some(number),
            _ => None,
        }
    }
}

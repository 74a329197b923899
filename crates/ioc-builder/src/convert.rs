//! 字面量到标量值的转换

use ioc_common::{PropertyKind, PropertyValue};

/// 把字面量转换为声明类型的标量值
///
/// 布尔值仅接受 `true`/`false` 文本形式，数值采用标准文本形式；
/// 转换失败返回 `None`，由调用方补充上下文。
pub(crate) fn convert_literal(literal: &str, kind: PropertyKind) -> Option<PropertyValue> {
    match kind {
        PropertyKind::Text => Some(PropertyValue::Text(literal.to_string())),
        PropertyKind::Int => literal.parse().ok().map(PropertyValue::Int),
        PropertyKind::Long => literal.parse().ok().map(PropertyValue::Long),
        PropertyKind::Double => literal.parse().ok().map(PropertyValue::Double),
        PropertyKind::Float => literal.parse().ok().map(PropertyValue::Float),
        PropertyKind::Bool => literal.parse().ok().map(PropertyValue::Bool),
        PropertyKind::Byte => literal.parse().ok().map(PropertyValue::Byte),
    }
}

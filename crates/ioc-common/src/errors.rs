//! 错误类型定义

use crate::value::PropertyKind;
use thiserror::Error;

/// 定义读取错误类型
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("资源不可读: {location}, 原因: {source}")]
    SourceUnreadable {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("文档格式错误: {location}, 原因: {message}")]
    MalformedDocument { location: String, message: String },

    #[error("元素 <{element}> 缺少必需属性 '{attribute}'")]
    MissingMandatoryAttribute { element: String, attribute: String },
}

impl ReadError {
    /// 创建文档格式错误
    pub fn malformed(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedDocument {
            location: location.into(),
            message: message.into(),
        }
    }

    /// 创建必需属性缺失错误
    pub fn missing_attribute(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingMandatoryAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }
}

/// 图构建错误类型
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("类型无法构造: bean '{id}', 类型 '{type_name}' 未注册")]
    TypeNotConstructible { id: String, type_name: String },

    #[error("内部一致性错误: 实例化阶段未产出 bean '{id}'")]
    MissingBean { id: String },

    #[error("未知属性: bean '{id}' 的类型没有名为 '{property}' 的标量字段")]
    UnknownProperty { id: String, property: String },

    #[error("属性转换失败: bean '{id}' 属性 '{property}', 字面量 '{literal}' 不是合法的 {kind}")]
    PropertyConversion {
        id: String,
        property: String,
        kind: PropertyKind,
        literal: String,
    },

    #[error("缺少修改器: bean '{id}' 属性 '{property}' 需要 {mutator}")]
    MissingMutator {
        id: String,
        property: String,
        mutator: String,
    },

    #[error("引用目标不存在: 图中没有 id 为 '{id}' 的 bean")]
    MissingReferenceTarget { id: String },

    #[error("引用字段不存在: bean '{id}' 的类型没有名为 '{field}' 的引用字段")]
    MissingReferenceField { id: String, field: String },
}

/// 上下文错误类型
#[derive(Error, Debug)]
pub enum ContextError {
    #[error("定义读取错误: {source}")]
    Read {
        #[from]
        source: ReadError,
    },

    #[error("图构建错误: {source}")]
    Build {
        #[from]
        source: BuildError,
    },

    #[error("bean 不存在: {key}")]
    NoSuchBean { key: String },

    #[error("bean 不唯一: 多个 bean 持有类型 {type_name}")]
    NoUniqueBean { type_name: String },

    #[error("bean 类型不匹配: id '{id}' 不是期望的类型 {expected}")]
    BeanTypeMismatch { id: String, expected: String },
}

/// 结果类型别名
pub type ReadResult<T> = Result<T, ReadError>;
pub type BuildResult<T> = Result<T, BuildError>;
pub type ContextResult<T> = Result<T, ContextError>;

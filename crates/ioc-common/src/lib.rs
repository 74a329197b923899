//! # IoC Common
//!
//! 这个 crate 提供了 Lorn IoC 容器的公共实体、类型注册表和错误类型。
//!
//! ## 核心组件
//!
//! - [`BeanDefinition`] - bean 的声明式定义记录
//! - [`Bean`] - 标识与已构建实例的运行时配对
//! - [`TypeRegistry`] - 类型名到零参工厂与字段访问器的映射
//! - [`ReadError`] / [`BuildError`] / [`ContextError`] - 错误分类
//!
//! ## 设计原则
//!
//! - 以显式注册替代运行时反射，换取编译期安全
//! - 同步优先：读取与构建单线程顺序执行
//! - 任何失败立即终止整次构建，不暴露部分结果

pub mod bean;
pub mod definition;
pub mod errors;
pub mod registry;
pub mod value;

pub use bean::*;
pub use definition::*;
pub use errors::*;
pub use registry::*;
pub use value::*;

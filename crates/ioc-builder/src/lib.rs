//! # IoC Builder
//!
//! 这个 crate 负责 Lorn IoC 容器的图构建：把有序的 bean 定义列表
//! 转换为 id 到运行时 bean 的映射。
//!
//! ## 核心组件
//!
//! - [`BeanGraphBuilder`] - 三趟顺序构建（实例化 → 标量属性 → 引用装配）
//!
//! 三趟各自处理整份列表，因此跨定义的前向引用与声明顺序无关。

pub mod builder;
mod convert;

pub use builder::*;

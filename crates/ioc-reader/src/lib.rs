//! # IoC Reader
//!
//! 这个 crate 负责 Lorn IoC 容器的定义读取：把一个或多个 XML 文档
//! 解析为拍平、有序的 [`BeanDefinition`] 列表，并递归展开跨文档的
//! import 指令。
//!
//! ## 核心组件
//!
//! - [`BeanDefinitionReader`] - 定义读取器接口
//! - [`ResourceLoader`] - 来源定位能力接口
//! - [`XmlBeanDefinitionReader`] - 基于文档树遍历的 XML 前端
//!
//! [`BeanDefinition`]: ioc_common::BeanDefinition

pub mod reader;
pub mod resource;
pub mod xml;

pub use reader::*;
pub use resource::*;
pub use xml::*;

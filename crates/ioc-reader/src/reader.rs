//! 定义读取抽象接口

use ioc_common::{BeanDefinition, ReadResult};

/// bean 定义读取器 trait
///
/// 把一个或多个来源文档解析为拍平、有序的 bean 定义列表。
pub trait BeanDefinitionReader {
    /// 读取全部 bean 定义
    ///
    /// 任何失败都会中止整次读取，不返回部分列表。重复的 id 在此阶段
    /// 不去重，交由图构建阶段处理。
    fn read_bean_definitions(&self) -> ReadResult<Vec<BeanDefinition>>;
}

//! 应用上下文

use ioc_builder::BeanGraphBuilder;
use ioc_common::{Bean, BeanDefinition, BeanInstance, ContextError, ContextResult, TypeRegistry};
use ioc_reader::{BeanDefinitionReader, ResourceLoader, XmlBeanDefinitionReader};
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// 应用上下文
///
/// 装配完成的 bean 图的只读门面。图在构建结束后不再变化，
/// 上下文不提供任何重新装配入口。
pub struct ApplicationContext {
    beans: HashMap<String, Bean>,
}

impl ApplicationContext {
    /// 从 XML 来源构建上下文
    ///
    /// 依次执行定义读取与三趟图构建；任何一步失败整体失败。
    pub fn from_xml(
        loader: Arc<dyn ResourceLoader>,
        registry: Arc<TypeRegistry>,
        sources: impl IntoIterator<Item = impl Into<String>>,
    ) -> ContextResult<Self> {
        let reader = XmlBeanDefinitionReader::new(loader, sources);
        let definitions = reader.read_bean_definitions()?;
        Self::from_definitions(registry, &definitions)
    }

    /// 从既有定义列表构建上下文
    pub fn from_definitions(
        registry: Arc<TypeRegistry>,
        definitions: &[BeanDefinition],
    ) -> ContextResult<Self> {
        let beans = BeanGraphBuilder::new(registry).build(definitions)?;
        info!("应用上下文就绪, 共 {} 个 bean", beans.len());
        Ok(Self { beans })
    }

    /// 按 id 获取 bean 实例句柄
    pub fn bean(&self, id: &str) -> ContextResult<BeanInstance> {
        self.beans
            .get(id)
            .map(Bean::value)
            .ok_or_else(|| ContextError::NoSuchBean {
                key: id.to_string(),
            })
    }

    /// 按类型获取唯一的 bean 实例句柄
    ///
    /// 没有实例为该类型的 bean 报告不存在；多于一个报告不唯一。
    pub fn bean_of_type<T: Any>(&self) -> ContextResult<BeanInstance> {
        let mut matches = self
            .beans
            .values()
            .filter(|bean| bean.is_instance_of::<T>());
        let first = matches.next().ok_or_else(|| ContextError::NoSuchBean {
            key: type_name::<T>().to_string(),
        })?;
        if matches.next().is_some() {
            return Err(ContextError::NoUniqueBean {
                type_name: type_name::<T>().to_string(),
            });
        }
        Ok(first.value())
    }

    /// 按 id 获取 bean 并校验实例类型
    pub fn typed_bean<T: Any>(&self, id: &str) -> ContextResult<BeanInstance> {
        let bean = self.beans.get(id).ok_or_else(|| ContextError::NoSuchBean {
            key: id.to_string(),
        })?;
        if !bean.is_instance_of::<T>() {
            return Err(ContextError::BeanTypeMismatch {
                id: id.to_string(),
                expected: type_name::<T>().to_string(),
            });
        }
        Ok(bean.value())
    }

    /// 以只读方式访问指定 id 的具体类型实例
    pub fn with_bean<T: Any, R>(
        &self,
        id: &str,
        reader: impl FnOnce(&T) -> R,
    ) -> ContextResult<R> {
        let bean = self.beans.get(id).ok_or_else(|| ContextError::NoSuchBean {
            key: id.to_string(),
        })?;
        bean.with_value(reader)
            .ok_or_else(|| ContextError::BeanTypeMismatch {
                id: id.to_string(),
                expected: type_name::<T>().to_string(),
            })
    }

    /// 全部 bean 的 id
    pub fn bean_ids(&self) -> Vec<&str> {
        self.beans.keys().map(String::as_str).collect()
    }

    /// bean 数量
    pub fn len(&self) -> usize {
        self.beans.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.beans.is_empty()
    }
}

impl fmt::Debug for ApplicationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationContext")
            .field("beans", &self.beans.keys().collect::<Vec<_>>())
            .finish()
    }
}

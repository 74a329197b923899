//! Bean 运行时实体

use parking_lot::RwLock;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 已构建实例的共享句柄
///
/// 图映射持有唯一的长期所有权；引用装配写入各字段的是同一句柄的
/// 共享克隆，身份可用 [`Arc::ptr_eq`] 判定。
pub type BeanInstance = Arc<RwLock<Box<dyn Any + Send + Sync>>>;

/// Bean 运行时实体
///
/// 将标识与已构建的实例配对。
pub struct Bean {
    id: String,
    value: BeanInstance,
}

impl Bean {
    /// 用新构建的实例创建 bean
    pub fn new(id: impl Into<String>, instance: Box<dyn Any + Send + Sync>) -> Self {
        Self {
            id: id.into(),
            value: Arc::new(RwLock::new(instance)),
        }
    }

    /// bean 标识
    pub fn id(&self) -> &str {
        &self.id
    }

    /// 实例句柄的共享克隆
    pub fn value(&self) -> BeanInstance {
        Arc::clone(&self.value)
    }

    /// 实例是否为指定类型
    pub fn is_instance_of<T: Any>(&self) -> bool {
        self.value.read().is::<T>()
    }

    /// 以只读方式访问具体类型的实例
    pub fn with_value<T: Any, R>(&self, reader: impl FnOnce(&T) -> R) -> Option<R> {
        let guard = self.value.read();
        guard.downcast_ref::<T>().map(reader)
    }

    /// 以可写方式访问具体类型的实例
    pub fn with_value_mut<T: Any, R>(&self, writer: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut guard = self.value.write();
        guard.downcast_mut::<T>().map(writer)
    }
}

impl fmt::Debug for Bean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bean")
            .field("id", &self.id)
            .field("value", &"<instance>")
            .finish()
    }
}

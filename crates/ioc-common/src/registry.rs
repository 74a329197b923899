//! 类型注册表
//!
//! 以显式注册替代运行时反射：类型名映射到零参工厂，字段名映射到
//! 带类型的赋值函数。可注册类型必须支持零参构造，由 `Default` 约束
//! 在注册时静态保证；不满足约束的类型根本无法注册。

use crate::bean::BeanInstance;
use crate::value::{PropertyKind, PropertyValue, ScalarField};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// 零参工厂函数类型
pub type FactoryFn = Box<dyn Fn() -> Box<dyn Any + Send + Sync> + Send + Sync>;

/// 标量属性赋值函数类型
pub type ScalarSetterFn = Box<dyn Fn(&mut (dyn Any + Send + Sync), PropertyValue) + Send + Sync>;

/// 引用字段赋值函数类型
pub type RefSetterFn = Box<dyn Fn(&mut (dyn Any + Send + Sync), BeanInstance) + Send + Sync>;

/// 标量字段访问信息
pub struct ScalarAccessor {
    /// 字段声明类型
    kind: PropertyKind,
    /// 公开修改器；字段存在但未注册修改器时为 None
    setter: Option<ScalarSetterFn>,
}

impl ScalarAccessor {
    /// 字段声明类型
    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    /// 字段的修改器
    pub fn setter(&self) -> Option<&ScalarSetterFn> {
        self.setter.as_ref()
    }
}

impl fmt::Debug for ScalarAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarAccessor")
            .field("kind", &self.kind)
            .field("setter", &self.setter.as_ref().map(|_| "<function>"))
            .finish()
    }
}

/// 单个类型的注册信息（类型擦除后）
pub struct TypeRegistration {
    type_name: String,
    factory: FactoryFn,
    /// 键为小写字段名，实现大小写不敏感匹配
    scalar_fields: HashMap<String, ScalarAccessor>,
    /// 键为声明的属性名
    reference_fields: HashMap<String, RefSetterFn>,
}

impl TypeRegistration {
    /// 开始注册指定类型
    ///
    /// `Default` 约束即"可零参构造"能力契约。
    pub fn of<T>(type_name: impl Into<String>) -> TypeRegistrationBuilder<T>
    where
        T: Default + Any + Send + Sync,
    {
        TypeRegistrationBuilder {
            inner: Self {
                type_name: type_name.into(),
                factory: Box::new(|| Box::new(T::default())),
                scalar_fields: HashMap::new(),
                reference_fields: HashMap::new(),
            },
            _marker: PhantomData,
        }
    }

    /// 注册的类型名
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// 创建一个新实例
    pub fn instantiate(&self) -> Box<dyn Any + Send + Sync> {
        (self.factory)()
    }

    /// 按属性名查找标量字段，大小写不敏感
    pub fn scalar_field(&self, property: &str) -> Option<&ScalarAccessor> {
        self.scalar_fields.get(&property.to_ascii_lowercase())
    }

    /// 按声明的属性名查找引用字段
    pub fn reference_field(&self, name: &str) -> Option<&RefSetterFn> {
        self.reference_fields.get(name)
    }
}

impl fmt::Debug for TypeRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistration")
            .field("type_name", &self.type_name)
            .field("factory", &"<function>")
            .field("scalar_fields", &self.scalar_fields)
            .field(
                "reference_fields",
                &self.reference_fields.keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// 类型注册构建器
///
/// 泛型参数把字段赋值函数与被注册类型静态绑定，注册完成后擦除。
pub struct TypeRegistrationBuilder<T> {
    inner: TypeRegistration,
    _marker: PhantomData<fn(T)>,
}

impl<T: Any + Send + Sync> TypeRegistrationBuilder<T> {
    /// 注册标量字段及其修改器
    pub fn with_scalar<V, F>(mut self, name: &str, setter: F) -> Self
    where
        V: ScalarField,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        let apply: ScalarSetterFn = Box::new(move |instance, value| {
            if let Some(target) = instance.downcast_mut::<T>() {
                if let Some(value) = V::from_value(value) {
                    setter(target, value);
                }
            }
        });
        self.inner.scalar_fields.insert(
            name.to_ascii_lowercase(),
            ScalarAccessor {
                kind: V::KIND,
                setter: Some(apply),
            },
        );
        self
    }

    /// 声明一个没有公开修改器的标量字段
    ///
    /// 字段可被定位但无法赋值，对应构建阶段的"缺少修改器"错误。
    pub fn with_field<V: ScalarField>(mut self, name: &str) -> Self {
        self.inner.scalar_fields.insert(
            name.to_ascii_lowercase(),
            ScalarAccessor {
                kind: V::KIND,
                setter: None,
            },
        );
        self
    }

    /// 注册引用字段
    ///
    /// 装配阶段把被引用 bean 的共享句柄直接写入该字段，不经过修改器。
    pub fn with_reference<F>(mut self, name: &str, setter: F) -> Self
    where
        F: Fn(&mut T, BeanInstance) + Send + Sync + 'static,
    {
        let apply: RefSetterFn = Box::new(move |instance, handle| {
            if let Some(target) = instance.downcast_mut::<T>() {
                setter(target, handle);
            }
        });
        self.inner.reference_fields.insert(name.to_string(), apply);
        self
    }
}

impl<T> From<TypeRegistrationBuilder<T>> for TypeRegistration {
    fn from(builder: TypeRegistrationBuilder<T>) -> Self {
        builder.inner
    }
}

/// 类型注册表
///
/// 类型名到注册信息的映射，充当图构建阶段的实例化与字段访问能力。
#[derive(Default)]
pub struct TypeRegistry {
    types: HashMap<String, TypeRegistration>,
}

impl TypeRegistry {
    /// 创建空的注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一个类型；同名注册会被覆盖
    pub fn register(&mut self, registration: impl Into<TypeRegistration>) -> &mut Self {
        let registration = registration.into();
        debug!("注册类型: {}", registration.type_name());
        self.types
            .insert(registration.type_name().to_string(), registration);
        self
    }

    /// 按类型名查找注册信息
    pub fn lookup(&self, type_name: &str) -> Option<&TypeRegistration> {
        self.types.get(type_name)
    }

    /// 类型是否已注册
    pub fn is_registered(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// 所有已注册的类型名
    pub fn registered_type_names(&self) -> Vec<&str> {
        self.types.keys().map(String::as_str).collect()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.types.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// 全局类型注册表
static GLOBAL_TYPE_REGISTRY: Lazy<RwLock<Option<Arc<TypeRegistry>>>> =
    Lazy::new(|| RwLock::new(None));

/// 获取全局类型注册表
pub fn global_type_registry() -> Option<Arc<TypeRegistry>> {
    GLOBAL_TYPE_REGISTRY.read().clone()
}

/// 设置全局类型注册表
pub fn set_global_type_registry(registry: Arc<TypeRegistry>) {
    *GLOBAL_TYPE_REGISTRY.write() = Some(registry);
}

//! Bean 定义实体

use crate::errors::{ReadError, ReadResult};

/// Bean 定义
///
/// 描述一个待构建对象的声明式记录：标识、类型名以及标量/引用属性。
/// 属性以有序关联表保存，键唯一，保留插入顺序以保证构建的可复现性。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeanDefinition {
    id: String,
    type_name: String,
    scalar_properties: Vec<(String, String)>,
    reference_properties: Vec<(String, String)>,
}

impl BeanDefinition {
    /// 创建新的 bean 定义
    ///
    /// `id` 与 `type_name` 必须非空；缺失属于解析错误而非构建错误。
    pub fn new(id: impl Into<String>, type_name: impl Into<String>) -> ReadResult<Self> {
        let id = id.into();
        let type_name = type_name.into();
        if id.is_empty() {
            return Err(ReadError::missing_attribute("bean", "id"));
        }
        if type_name.is_empty() {
            return Err(ReadError::missing_attribute("bean", "class"));
        }
        Ok(Self {
            id,
            type_name,
            scalar_properties: Vec::new(),
            reference_properties: Vec::new(),
        })
    }

    /// bean 标识
    pub fn id(&self) -> &str {
        &self.id
    }

    /// 待实例化的类型名
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// 记录一个标量属性；同名属性会被覆盖，位置保持首次插入处
    pub fn set_scalar_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.scalar_properties.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.scalar_properties.push((name, value)),
        }
    }

    /// 记录一个引用属性；同名属性会被覆盖，位置保持首次插入处
    pub fn set_reference_property(&mut self, name: impl Into<String>, ref_id: impl Into<String>) {
        let name = name.into();
        let ref_id = ref_id.into();
        match self
            .reference_properties
            .iter_mut()
            .find(|(key, _)| *key == name)
        {
            Some(entry) => entry.1 = ref_id,
            None => self.reference_properties.push((name, ref_id)),
        }
    }

    /// 标量属性：属性名 → 字面量，按插入顺序
    pub fn scalar_properties(&self) -> &[(String, String)] {
        &self.scalar_properties
    }

    /// 引用属性：属性名 → 被引用 bean 的 id，按插入顺序
    pub fn reference_properties(&self) -> &[(String, String)] {
        &self.reference_properties
    }

    /// 是否声明了引用属性
    pub fn has_reference_properties(&self) -> bool {
        !self.reference_properties.is_empty()
    }
}

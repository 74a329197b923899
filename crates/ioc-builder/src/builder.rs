//! bean 图构建器

use crate::convert::convert_literal;
use ioc_common::{Bean, BeanDefinition, BuildError, BuildResult, TypeRegistration, TypeRegistry};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// bean 图构建器
///
/// 对整份定义列表做三趟顺序处理：实例化、应用标量属性、装配引用。
/// 整列表处理保证跨定义的前向引用与声明顺序无关；任何一趟失败都会
/// 中止整次构建，不暴露部分图。
pub struct BeanGraphBuilder {
    registry: Arc<TypeRegistry>,
}

impl BeanGraphBuilder {
    /// 以类型注册表创建构建器
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self { registry }
    }

    /// 构建 id 到 bean 的映射
    pub fn build(&self, definitions: &[BeanDefinition]) -> BuildResult<HashMap<String, Bean>> {
        info!("开始构建 bean 图, 共 {} 条定义", definitions.len());
        let beans = self.instantiate(definitions)?;
        self.apply_scalar_properties(&beans, definitions)?;
        self.apply_reference_properties(&beans, definitions)?;
        info!("bean 图构建完成, 共 {} 个 bean", beans.len());
        Ok(beans)
    }

    /// 第一趟：按定义实例化全部 bean
    fn instantiate(&self, definitions: &[BeanDefinition]) -> BuildResult<HashMap<String, Bean>> {
        let mut beans = HashMap::new();
        for definition in definitions {
            let registration = self.registration(definition)?;
            let instance = registration.instantiate();
            debug!(
                "实例化 bean: id={}, class={}",
                definition.id(),
                definition.type_name()
            );
            // 重复 id 覆盖旧实例, 后出现的定义生效
            beans.insert(
                definition.id().to_string(),
                Bean::new(definition.id(), instance),
            );
        }
        Ok(beans)
    }

    /// 第二趟：转换并应用标量属性
    fn apply_scalar_properties(
        &self,
        beans: &HashMap<String, Bean>,
        definitions: &[BeanDefinition],
    ) -> BuildResult<()> {
        for definition in definitions {
            let id = definition.id();
            let bean = beans.get(id).ok_or_else(|| BuildError::MissingBean {
                id: id.to_string(),
            })?;
            let registration = self.registration(definition)?;
            for (property, literal) in definition.scalar_properties() {
                let accessor = registration.scalar_field(property).ok_or_else(|| {
                    BuildError::UnknownProperty {
                        id: id.to_string(),
                        property: property.clone(),
                    }
                })?;
                let value = convert_literal(literal, accessor.kind()).ok_or_else(|| {
                    BuildError::PropertyConversion {
                        id: id.to_string(),
                        property: property.clone(),
                        kind: accessor.kind(),
                        literal: literal.clone(),
                    }
                })?;
                let setter = accessor.setter().ok_or_else(|| BuildError::MissingMutator {
                    id: id.to_string(),
                    property: property.clone(),
                    mutator: expected_mutator_name(property),
                })?;
                let handle = bean.value();
                let mut guard = handle.write();
                setter(guard.as_mut(), value);
                debug!("应用标量属性: id={}, property={}", id, property);
            }
        }
        Ok(())
    }

    /// 第三趟：装配引用属性
    fn apply_reference_properties(
        &self,
        beans: &HashMap<String, Bean>,
        definitions: &[BeanDefinition],
    ) -> BuildResult<()> {
        for definition in definitions {
            // 映射中不存在的定义静默跳过
            let Some(owner) = beans.get(definition.id()) else {
                continue;
            };
            if !definition.has_reference_properties() {
                continue;
            }
            let registration = self.registration(definition)?;
            for (property, ref_id) in definition.reference_properties() {
                let target =
                    beans
                        .get(ref_id)
                        .ok_or_else(|| BuildError::MissingReferenceTarget {
                            id: ref_id.clone(),
                        })?;
                // 引用字段按声明的属性名定位
                let setter = registration.reference_field(property).ok_or_else(|| {
                    BuildError::MissingReferenceField {
                        id: definition.id().to_string(),
                        field: property.clone(),
                    }
                })?;
                // 先克隆目标句柄再锁持有者, 自引用也不会嵌套加锁
                let target_handle = target.value();
                let owner_handle = owner.value();
                let mut guard = owner_handle.write();
                setter(guard.as_mut(), target_handle);
                debug!(
                    "装配引用: id={}, field={}, ref={}",
                    definition.id(),
                    property,
                    ref_id
                );
            }
        }
        Ok(())
    }

    fn registration(&self, definition: &BeanDefinition) -> BuildResult<&TypeRegistration> {
        self.registry.lookup(definition.type_name()).ok_or_else(|| {
            BuildError::TypeNotConstructible {
                id: definition.id().to_string(),
                type_name: definition.type_name().to_string(),
            }
        })
    }
}

/// 期望的修改器名称, 仅用于错误信息
fn expected_mutator_name(property: &str) -> String {
    format!("set_{}", property.to_ascii_lowercase())
}

//! XML 定义文档读取器
//!
//! 单一的文档树遍历前端：按文档顺序访问 `<beans>` 的子元素，
//! `<bean>` 直接产出定义，`<import>` 在出现位置处递归展开被引用
//! 文档，因此被导入文档的定义排在 import 之后声明的定义之前。

use crate::reader::BeanDefinitionReader;
use crate::resource::ResourceLoader;
use ioc_common::{BeanDefinition, ReadError, ReadResult};
use std::sync::Arc;
use tracing::debug;

/// import 嵌套的默认最大深度
///
/// import 循环不做检测，超过深度即按文档格式错误终止，避免耗尽栈。
const DEFAULT_MAX_IMPORT_DEPTH: usize = 32;

/// XML bean 定义读取器
pub struct XmlBeanDefinitionReader {
    loader: Arc<dyn ResourceLoader>,
    sources: Vec<String>,
    max_import_depth: usize,
}

impl XmlBeanDefinitionReader {
    /// 以来源列表创建读取器
    ///
    /// 来源按给定顺序展开；相对位置的解析交给 `loader`。
    pub fn new(
        loader: Arc<dyn ResourceLoader>,
        sources: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            loader,
            sources: sources.into_iter().map(Into::into).collect(),
            max_import_depth: DEFAULT_MAX_IMPORT_DEPTH,
        }
    }

    /// 设置 import 嵌套的最大深度
    pub fn with_max_import_depth(mut self, depth: usize) -> Self {
        self.max_import_depth = depth;
        self
    }

    fn read_document(
        &self,
        location: &str,
        depth: usize,
        definitions: &mut Vec<BeanDefinition>,
    ) -> ReadResult<()> {
        if depth > self.max_import_depth {
            return Err(ReadError::malformed(
                location,
                format!("import 嵌套超过最大深度 {}", self.max_import_depth),
            ));
        }

        let content = self.loader.load(location)?;
        let document = roxmltree::Document::parse(&content)
            .map_err(|error| ReadError::malformed(location, error.to_string()))?;
        let root = document.root_element();
        if root.tag_name().name() != "beans" {
            return Err(ReadError::malformed(
                location,
                format!("根元素应为 <beans>, 实际为 <{}>", root.tag_name().name()),
            ));
        }

        debug!("解析定义文档: {}", location);
        for child in root.children().filter(roxmltree::Node::is_element) {
            match child.tag_name().name() {
                "import" => {
                    let resource = mandatory_attribute(&child, "import", "resource")?;
                    self.read_document(resource, depth + 1, definitions)?;
                }
                "bean" => definitions.push(read_bean(&child, location)?),
                other => {
                    return Err(ReadError::malformed(
                        location,
                        format!("<beans> 下出现未知元素 <{other}>"),
                    ));
                }
            }
        }
        Ok(())
    }
}

impl BeanDefinitionReader for XmlBeanDefinitionReader {
    fn read_bean_definitions(&self) -> ReadResult<Vec<BeanDefinition>> {
        let mut definitions = Vec::new();
        for source in &self.sources {
            self.read_document(source, 0, &mut definitions)?;
        }
        debug!("共读取 {} 条 bean 定义", definitions.len());
        Ok(definitions)
    }
}

/// 读取必需属性；缺失或为空都按缺失处理
fn mandatory_attribute<'a>(
    node: &roxmltree::Node<'a, '_>,
    element: &str,
    attribute: &str,
) -> ReadResult<&'a str> {
    match node.attribute(attribute) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ReadError::missing_attribute(element, attribute)),
    }
}

fn read_bean(node: &roxmltree::Node<'_, '_>, location: &str) -> ReadResult<BeanDefinition> {
    let id = mandatory_attribute(node, "bean", "id")?;
    let class = mandatory_attribute(node, "bean", "class")?;
    let mut definition = BeanDefinition::new(id, class)?;

    for child in node.children().filter(roxmltree::Node::is_element) {
        if child.tag_name().name() != "property" {
            return Err(ReadError::malformed(
                location,
                format!("<bean> 下出现未知元素 <{}>", child.tag_name().name()),
            ));
        }
        let name = mandatory_attribute(&child, "property", "name")?;
        // 与原始行为一致：空属性值视同缺失
        if let Some(value) = child.attribute("value").filter(|value| !value.is_empty()) {
            definition.set_scalar_property(name, value);
        } else if let Some(ref_id) = child.attribute("ref").filter(|ref_id| !ref_id.is_empty()) {
            definition.set_reference_property(name, ref_id);
        } else {
            debug!("bean '{}' 的属性 '{}' 既无 value 也无 ref, 忽略", id, name);
        }
    }

    debug!("读取 bean 定义: id={}, class={}", id, class);
    Ok(definition)
}

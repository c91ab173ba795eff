use std::sync::Arc;

use crate::markup::{AttrMap, AttrValue};

/// Minimal view of a node or mark instance at render time: its element
/// type name plus the attribute values stored on the instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    pub name: String,
    pub attrs: AttrMap,
}

impl ElementData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: AttrMap::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }
}

/// Payload handed to an extension's render callback.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderInput {
    pub element: ElementData,
    /// Attribute name → value, restricted to declarations flagged as
    /// rendered, with declared defaults filled in.
    pub attributes: AttrMap,
}

/// Render descriptor returned by render callbacks.
///
/// Opaque to schema assembly; the parse/render engine interprets it.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutput {
    Element {
        tag: String,
        attrs: AttrMap,
        children: Vec<RenderOutput>,
    },
    Text(String),
    /// Placeholder for the element's own content.
    Content,
}

/// A spec's wrapped render hook: element instance in, descriptor out.
pub type RenderFn = Arc<dyn Fn(&ElementData) -> RenderOutput + Send + Sync>;

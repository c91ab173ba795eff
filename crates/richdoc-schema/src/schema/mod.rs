pub mod assemble;
pub mod build;
pub mod normalize;

use std::fmt;

use indexmap::IndexMap;

use crate::markup::AttrValue;
use crate::markup::render::RenderFn;
use crate::markup::rules::ParseRule;

/// One attribute slot of an element spec.
#[derive(Debug, Clone, PartialEq)]
pub struct AttrSlot {
    pub default: AttrValue,
}

/// Cleaned structural specification for one node-kind element, ready for
/// the schema engine.
#[derive(Clone, Default)]
pub struct NodeSpec {
    pub content: Option<String>,
    pub marks: Option<String>,
    pub group: Option<String>,
    pub inline: Option<bool>,
    pub atom: Option<bool>,
    pub selectable: Option<bool>,
    pub draggable: Option<bool>,
    pub code: Option<bool>,
    pub defining: Option<bool>,
    pub isolating: Option<bool>,
    /// `None` when no attributes are declared; the engine distinguishes an
    /// absent table from an empty one.
    pub attrs: Option<IndexMap<String, AttrSlot>>,
    pub parse_dom: Option<Vec<ParseRule>>,
    pub to_dom: Option<RenderFn>,
}

/// Cleaned structural specification for one mark-kind element.
#[derive(Clone, Default)]
pub struct MarkSpec {
    pub inclusive: Option<bool>,
    pub excludes: Option<String>,
    pub group: Option<String>,
    pub spanning: Option<bool>,
    pub attrs: Option<IndexMap<String, AttrSlot>>,
    pub parse_dom: Option<Vec<ParseRule>>,
    pub to_dom: Option<RenderFn>,
}

impl fmt::Debug for NodeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeSpec")
            .field("content", &self.content)
            .field("marks", &self.marks)
            .field("group", &self.group)
            .field("inline", &self.inline)
            .field("atom", &self.atom)
            .field("selectable", &self.selectable)
            .field("draggable", &self.draggable)
            .field("code", &self.code)
            .field("defining", &self.defining)
            .field("isolating", &self.isolating)
            .field("attrs", &self.attrs)
            .field("parse_dom", &self.parse_dom)
            .field("to_dom", &self.to_dom.is_some())
            .finish()
    }
}

impl fmt::Debug for MarkSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkSpec")
            .field("inclusive", &self.inclusive)
            .field("excludes", &self.excludes)
            .field("group", &self.group)
            .field("spanning", &self.spanning)
            .field("attrs", &self.attrs)
            .field("parse_dom", &self.parse_dom)
            .field("to_dom", &self.to_dom.is_some())
            .finish()
    }
}

/// Fully assembled node and mark tables plus the root element designation,
/// ready to hand to a [`SchemaEngine`].
///
/// Table iteration follows first insertion order of each name.
#[derive(Debug, Clone)]
pub struct SchemaBlueprint {
    pub top_node: Option<String>,
    pub nodes: IndexMap<String, NodeSpec>,
    pub marks: IndexMap<String, MarkSpec>,
}

/// The document-model engine seam: consumes a blueprint and returns a
/// usable schema. Assembly propagates its failures unchanged.
pub trait SchemaEngine {
    type Schema;
    type Error;

    fn construct(&self, blueprint: SchemaBlueprint) -> Result<Self::Schema, Self::Error>;
}

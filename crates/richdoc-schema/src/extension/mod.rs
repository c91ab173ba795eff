pub mod attrs;

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::extension::attrs::{AttributeSpec, GlobalAttributes};
use crate::markup::render::{RenderInput, RenderOutput};
use crate::markup::rules::ParseRule;

/// Opaque configuration bag handed read-only to an extension's callbacks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options(Map<String, Value>);

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

impl From<Map<String, Value>> for Options {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Callback producing an extension's ordered parse rule list.
pub type ParseHtmlFn = Arc<dyn Fn(&Options) -> Option<Vec<ParseRule>> + Send + Sync>;

/// Callback producing a render descriptor for one element instance.
pub type RenderHtmlFn = Arc<dyn Fn(&Options, RenderInput) -> RenderOutput + Send + Sync>;

/// Declarative descriptor for one node-kind element type.
///
/// Structural fields left unset stay absent from the built spec; the
/// schema engine distinguishes absent from explicitly-set values.
///
/// ```
/// use richdoc_schema::{NodeExtension, ParseRule};
///
/// let paragraph = NodeExtension::new("paragraph")
///     .content("inline*")
///     .group("block")
///     .parse_html(|_options| Some(vec![ParseRule::tag("p")]));
/// assert_eq!(paragraph.name, "paragraph");
/// ```
pub struct NodeExtension {
    pub name: String,
    pub options: Options,
    pub top_node: bool,
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
    pub attributes: Vec<AttributeSpec>,
    pub parse_html: Option<ParseHtmlFn>,
    pub render_html: Option<RenderHtmlFn>,
}

impl NodeExtension {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Options::new(),
            top_node: false,
            content: None,
            marks: None,
            group: None,
            inline: None,
            atom: None,
            selectable: None,
            draggable: None,
            code: None,
            defining: None,
            isolating: None,
            attributes: Vec::new(),
            parse_html: None,
            render_html: None,
        }
    }

    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Mark this node as the document root. At most one node extension
    /// should do so; `Assembler` documents how ties resolve.
    pub fn top_node(mut self) -> Self {
        self.top_node = true;
        self
    }

    pub fn content(mut self, expr: impl Into<String>) -> Self {
        self.content = Some(expr.into());
        self
    }

    pub fn marks(mut self, expr: impl Into<String>) -> Self {
        self.marks = Some(expr.into());
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn inline(mut self, inline: bool) -> Self {
        self.inline = Some(inline);
        self
    }

    pub fn atom(mut self, atom: bool) -> Self {
        self.atom = Some(atom);
        self
    }

    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = Some(selectable);
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = Some(draggable);
        self
    }

    pub fn code(mut self, code: bool) -> Self {
        self.code = Some(code);
        self
    }

    pub fn defining(mut self, defining: bool) -> Self {
        self.defining = Some(defining);
        self
    }

    pub fn isolating(mut self, isolating: bool) -> Self {
        self.isolating = Some(isolating);
        self
    }

    pub fn attribute(mut self, attribute: AttributeSpec) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn parse_html<F>(mut self, f: F) -> Self
    where
        F: Fn(&Options) -> Option<Vec<ParseRule>> + Send + Sync + 'static,
    {
        self.parse_html = Some(Arc::new(f));
        self
    }

    pub fn render_html<F>(mut self, f: F) -> Self
    where
        F: Fn(&Options, RenderInput) -> RenderOutput + Send + Sync + 'static,
    {
        self.render_html = Some(Arc::new(f));
        self
    }
}

/// Declarative descriptor for one mark-kind element type.
pub struct MarkExtension {
    pub name: String,
    pub options: Options,
    pub inclusive: Option<bool>,
    pub excludes: Option<String>,
    pub group: Option<String>,
    pub spanning: Option<bool>,
    pub attributes: Vec<AttributeSpec>,
    pub parse_html: Option<ParseHtmlFn>,
    pub render_html: Option<RenderHtmlFn>,
}

impl MarkExtension {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Options::new(),
            inclusive: None,
            excludes: None,
            group: None,
            spanning: None,
            attributes: Vec::new(),
            parse_html: None,
            render_html: None,
        }
    }

    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn inclusive(mut self, inclusive: bool) -> Self {
        self.inclusive = Some(inclusive);
        self
    }

    pub fn excludes(mut self, expr: impl Into<String>) -> Self {
        self.excludes = Some(expr.into());
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn spanning(mut self, spanning: bool) -> Self {
        self.spanning = Some(spanning);
        self
    }

    pub fn attribute(mut self, attribute: AttributeSpec) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn parse_html<F>(mut self, f: F) -> Self
    where
        F: Fn(&Options) -> Option<Vec<ParseRule>> + Send + Sync + 'static,
    {
        self.parse_html = Some(Arc::new(f));
        self
    }

    pub fn render_html<F>(mut self, f: F) -> Self
    where
        F: Fn(&Options, RenderInput) -> RenderOutput + Send + Sync + 'static,
    {
        self.render_html = Some(Arc::new(f));
        self
    }
}

/// Descriptor that contributes no element type of its own, only
/// cross-cutting attribute declarations targeted at other types by name.
pub struct HelperExtension {
    pub name: String,
    pub options: Options,
    pub global_attributes: Vec<GlobalAttributes>,
}

impl HelperExtension {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Options::new(),
            global_attributes: Vec::new(),
        }
    }

    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn global_attributes(mut self, group: GlobalAttributes) -> Self {
        self.global_attributes.push(group);
        self
    }
}

/// One entry of the extension sequence a schema is assembled from.
pub enum Extension {
    Node(NodeExtension),
    Mark(MarkExtension),
    Helper(HelperExtension),
}

impl Extension {
    pub fn name(&self) -> &str {
        match self {
            Extension::Node(node) => &node.name,
            Extension::Mark(mark) => &mark.name,
            Extension::Helper(helper) => &helper.name,
        }
    }
}

impl fmt::Debug for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extension::Node(node) => write!(f, "Node({})", node.name),
            Extension::Mark(mark) => write!(f, "Mark({})", mark.name),
            Extension::Helper(helper) => write!(f, "Helper({})", helper.name),
        }
    }
}

impl From<NodeExtension> for Extension {
    fn from(node: NodeExtension) -> Self {
        Extension::Node(node)
    }
}

impl From<MarkExtension> for Extension {
    fn from(mark: MarkExtension) -> Self {
        Extension::Mark(mark)
    }
}

impl From<HelperExtension> for Extension {
    fn from(helper: HelperExtension) -> Self {
        Extension::Helper(helper)
    }
}

/// Node-kind and mark-kind views of one extension sequence, in input order.
pub struct SplitExtensions<'a> {
    pub nodes: Vec<&'a NodeExtension>,
    pub marks: Vec<&'a MarkExtension>,
}

pub fn split_extensions(extensions: &[Extension]) -> SplitExtensions<'_> {
    let mut nodes = Vec::new();
    let mut marks = Vec::new();

    for extension in extensions {
        match extension {
            Extension::Node(node) => nodes.push(node),
            Extension::Mark(mark) => marks.push(mark),
            // Helper extensions contribute attributes only, never a table
            // entry of their own.
            Extension::Helper(_) => {}
        }
    }

    SplitExtensions { nodes, marks }
}

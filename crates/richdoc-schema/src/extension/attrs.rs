use std::sync::Arc;

use crate::extension::Extension;
use crate::markup::element::MarkupElement;
use crate::markup::render::ElementData;
use crate::markup::{AttrMap, AttrValue};

/// Extractor reading one declared attribute out of a matched markup
/// element. Returns a partial mapping, usually one key.
pub type ParseAttrFn = Arc<dyn Fn(&MarkupElement) -> AttrMap + Send + Sync>;

/// One attribute declaration as authored on an extension.
#[derive(Clone)]
pub struct AttributeSpec {
    pub name: String,
    pub default: AttrValue,
    pub rendered: bool,
    pub parse: Option<ParseAttrFn>,
}

impl AttributeSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: AttrValue::Null,
            rendered: true,
            parse: None,
        }
    }

    pub fn default_value(mut self, value: impl Into<AttrValue>) -> Self {
        self.default = value.into();
        self
    }

    /// Non-rendered attributes are kept out of parse-rule injection and of
    /// the rendered-attributes payload.
    pub fn rendered(mut self, rendered: bool) -> Self {
        self.rendered = rendered;
        self
    }

    pub fn parse_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&MarkupElement) -> AttrMap + Send + Sync + 'static,
    {
        self.parse = Some(Arc::new(f));
        self
    }
}

/// Attribute declarations a helper extension contributes to other element
/// types by name.
#[derive(Clone)]
pub struct GlobalAttributes {
    pub types: Vec<String>,
    pub attributes: Vec<AttributeSpec>,
}

impl GlobalAttributes {
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            types: types.into_iter().map(Into::into).collect(),
            attributes: Vec::new(),
        }
    }

    pub fn attribute(mut self, attribute: AttributeSpec) -> Self {
        self.attributes.push(attribute);
        self
    }
}

/// Resolved declaration payload: default, rendered flag, extractor.
#[derive(Clone)]
pub struct Attribute {
    pub default: AttrValue,
    pub rendered: bool,
    pub parse: ParseAttrFn,
}

/// A flattened attribute declaration, tagged with its owning element type.
///
/// `owner` is a name reference: declarations whose owner names no node or
/// mark extension never reach a built spec.
#[derive(Clone)]
pub struct ExtensionAttribute {
    pub owner: String,
    pub name: String,
    pub attribute: Attribute,
}

/// Flatten every extension's attribute declarations into one ordered
/// sequence: extension order first, declaration order within an extension.
///
/// Declarations without a custom extractor read the markup attribute of
/// the same name. Unknown owner names survive here and fall out at
/// spec-build time.
pub fn collect_attributes(extensions: &[Extension]) -> Vec<ExtensionAttribute> {
    let mut all = Vec::new();

    for extension in extensions {
        match extension {
            Extension::Node(node) => flatten(&node.name, &node.attributes, &mut all),
            Extension::Mark(mark) => flatten(&mark.name, &mark.attributes, &mut all),
            Extension::Helper(helper) => {
                for group in &helper.global_attributes {
                    for target in &group.types {
                        flatten(target, &group.attributes, &mut all);
                    }
                }
            }
        }
    }

    all
}

fn flatten(owner: &str, specs: &[AttributeSpec], out: &mut Vec<ExtensionAttribute>) {
    for spec in specs {
        out.push(ExtensionAttribute {
            owner: owner.to_owned(),
            name: spec.name.clone(),
            attribute: Attribute {
                default: spec.default.clone(),
                rendered: spec.rendered,
                parse: spec
                    .parse
                    .clone()
                    .unwrap_or_else(|| markup_attr_reader(&spec.name)),
            },
        });
    }
}

/// Default extractor: read the markup attribute with the declaration's own
/// name, yielding a one-key mapping when the element carries it.
fn markup_attr_reader(name: &str) -> ParseAttrFn {
    let name = name.to_owned();
    Arc::new(move |element| {
        let mut attrs = AttrMap::new();
        if let Some(value) = element.attr(&name) {
            attrs.insert(name.clone(), AttrValue::from(value));
        }
        attrs
    })
}

/// Compute the render payload for one element instance: declarations
/// flagged as rendered, instance value where stored, declared default
/// otherwise.
pub fn rendered_attributes(element: &ElementData, attributes: &[ExtensionAttribute]) -> AttrMap {
    let mut rendered = AttrMap::new();

    for item in attributes {
        if !item.attribute.rendered {
            continue;
        }
        let value = element
            .attrs
            .get(&item.name)
            .cloned()
            .unwrap_or_else(|| item.attribute.default.clone());
        rendered.insert(item.name.clone(), value);
    }

    rendered
}

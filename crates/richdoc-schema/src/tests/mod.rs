//! Shared fixtures for unit tests: a small but realistic extension set and
//! stub schema engines.

use std::convert::Infallible;

use serde_json::json;

use crate::extension::attrs::AttributeSpec;
use crate::extension::{Extension, MarkExtension, NodeExtension, Options};
use crate::markup::AttrMap;
use crate::markup::render::RenderOutput;
use crate::markup::rules::{MatchOutcome, ParseRule};
use crate::schema::{SchemaBlueprint, SchemaEngine};

/// Document root: holds block content, flagged as the top node.
pub fn doc_extension() -> Extension {
    Extension::from(NodeExtension::new("doc").content("block+").top_node())
}

pub fn paragraph_extension() -> Extension {
    Extension::from(
        NodeExtension::new("paragraph")
            .content("inline*")
            .group("block")
            .parse_html(|_options| Some(vec![ParseRule::tag("p")]))
            .render_html(|_options, _input| RenderOutput::Element {
                tag: "p".to_owned(),
                attrs: AttrMap::new(),
                children: vec![RenderOutput::Content],
            }),
    )
}

/// Heading with a `level` attribute extracted from the matched tag.
pub fn heading_extension() -> Extension {
    Extension::from(
        NodeExtension::new("heading")
            .options(Options::new().with("levels", json!([1, 2, 3])))
            .content("inline*")
            .group("block")
            .defining(true)
            .attribute(AttributeSpec::new("level").default_value(1).parse_with(
                |element| {
                    let mut attrs = AttrMap::new();
                    if let Some(level) = element
                        .tag()
                        .strip_prefix('h')
                        .and_then(|level| level.parse::<u8>().ok())
                    {
                        attrs.insert("level".to_owned(), json!(level));
                    }
                    attrs
                },
            ))
            .parse_html(|options| {
                let levels = options.get("levels")?.as_array()?;
                Some(
                    levels
                        .iter()
                        .map(|level| {
                            ParseRule::tag(format!("h{level}"))
                                .get_attrs(|_element| MatchOutcome::empty())
                        })
                        .collect(),
                )
            })
            .render_html(|_options, input| {
                let level = input.attributes["level"].as_u64().unwrap_or(1);
                RenderOutput::Element {
                    tag: format!("h{level}"),
                    attrs: input.attributes.clone(),
                    children: vec![RenderOutput::Content],
                }
            }),
    )
}

pub fn text_extension() -> Extension {
    Extension::from(NodeExtension::new("text").group("inline"))
}

pub fn bold_extension() -> Extension {
    Extension::from(
        MarkExtension::new("bold")
            .parse_html(|_options| {
                Some(vec![
                    ParseRule::tag("strong"),
                    ParseRule::tag("b"),
                    ParseRule::style("font-weight"),
                ])
            })
            .render_html(|_options, _input| RenderOutput::Element {
                tag: "strong".to_owned(),
                attrs: AttrMap::new(),
                children: vec![RenderOutput::Content],
            }),
    )
}

/// The fixture sequence used across assembler tests: doc, paragraph,
/// heading, text nodes plus a bold mark.
pub fn basic_extensions() -> Vec<Extension> {
    vec![
        doc_extension(),
        paragraph_extension(),
        heading_extension(),
        text_extension(),
        bold_extension(),
    ]
}

/// Engine stub that hands the blueprint back unchanged.
pub struct EchoEngine;

impl SchemaEngine for EchoEngine {
    type Schema = SchemaBlueprint;
    type Error = Infallible;

    fn construct(&self, blueprint: SchemaBlueprint) -> Result<Self::Schema, Self::Error> {
        Ok(blueprint)
    }
}

/// Engine stub that fails every construction, for propagation tests.
pub struct RejectingEngine;

impl SchemaEngine for RejectingEngine {
    type Schema = SchemaBlueprint;
    type Error = String;

    fn construct(&self, _blueprint: SchemaBlueprint) -> Result<Self::Schema, Self::Error> {
        Err("content expression rejected".to_owned())
    }
}

use std::sync::Arc;

use indexmap::IndexMap;

use crate::extension::attrs::{ExtensionAttribute, rendered_attributes};
use crate::extension::{MarkExtension, NodeExtension, Options, ParseHtmlFn, RenderHtmlFn};
use crate::markup::render::{RenderFn, RenderInput};
use crate::markup::rules::{ParseRule, inject_attributes};
use crate::schema::{AttrSlot, MarkSpec, NodeSpec};

/// Build the cleaned spec for one node-kind extension.
pub fn build_node_spec(
    extension: &NodeExtension,
    all_attributes: &[ExtensionAttribute],
) -> NodeSpec {
    let own = own_attributes(&extension.name, all_attributes);

    NodeSpec {
        content: extension.content.clone(),
        marks: extension.marks.clone(),
        group: extension.group.clone(),
        inline: extension.inline,
        atom: extension.atom,
        selectable: extension.selectable,
        draggable: extension.draggable,
        code: extension.code,
        defining: extension.defining,
        isolating: extension.isolating,
        attrs: clean_attrs(attr_slots(&own)),
        parse_dom: parse_rules(extension.parse_html.as_ref(), &extension.options, &own),
        to_dom: render_hook(extension.render_html.as_ref(), &extension.options, &own),
    }
}

/// Build the cleaned spec for one mark-kind extension.
pub fn build_mark_spec(
    extension: &MarkExtension,
    all_attributes: &[ExtensionAttribute],
) -> MarkSpec {
    let own = own_attributes(&extension.name, all_attributes);

    MarkSpec {
        inclusive: extension.inclusive,
        excludes: extension.excludes.clone(),
        group: extension.group.clone(),
        spanning: extension.spanning,
        attrs: clean_attrs(attr_slots(&own)),
        parse_dom: parse_rules(extension.parse_html.as_ref(), &extension.options, &own),
        to_dom: render_hook(extension.render_html.as_ref(), &extension.options, &own),
    }
}

fn own_attributes(name: &str, all: &[ExtensionAttribute]) -> Vec<ExtensionAttribute> {
    all.iter().filter(|item| item.owner == name).cloned().collect()
}

fn attr_slots(own: &[ExtensionAttribute]) -> IndexMap<String, AttrSlot> {
    own.iter()
        .map(|item| {
            (
                item.name.clone(),
                AttrSlot {
                    default: item.attribute.default.clone(),
                },
            )
        })
        .collect()
}

/// An empty attribute table must be absent, not present-and-empty.
pub fn clean_attrs(slots: IndexMap<String, AttrSlot>) -> Option<IndexMap<String, AttrSlot>> {
    if slots.is_empty() { None } else { Some(slots) }
}

fn parse_rules(
    parse_html: Option<&ParseHtmlFn>,
    options: &Options,
    own: &[ExtensionAttribute],
) -> Option<Vec<ParseRule>> {
    let callback = parse_html?;
    let rules = callback(options)?;
    if rules.is_empty() {
        return None;
    }

    Some(
        rules
            .into_iter()
            .map(|rule| inject_attributes(rule, own))
            .collect(),
    )
}

fn render_hook(
    render_html: Option<&RenderHtmlFn>,
    options: &Options,
    own: &[ExtensionAttribute],
) -> Option<RenderFn> {
    let callback = render_html?.clone();
    let options = options.clone();
    let own = own.to_vec();

    Some(Arc::new(move |element| {
        let attributes = rendered_attributes(element, &own);
        callback(
            &options,
            RenderInput {
                element: element.clone(),
                attributes,
            },
        )
    }))
}

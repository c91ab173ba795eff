use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::markup::AttrValue;
use crate::markup::rules::{ParseRule, RuleMatcher};
use crate::schema::{AttrSlot, MarkSpec, NodeSpec, SchemaBlueprint};

/// Closure-free, serializable view of a blueprint: everything observable
/// about the assembled tables without invoking any extension callback.
/// Meant for debugging output and structural test assertions.
#[derive(Debug, Serialize, PartialEq)]
pub struct BlueprintSnap {
    pub top_node: Option<String>,
    pub nodes: Vec<NodeSnap>,
    pub marks: Vec<MarkSnap>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct NodeSnap {
    pub name: String,
    pub content: Option<String>,
    pub marks: Option<String>,
    pub group: Option<String>,
    pub flags: BTreeMap<String, bool>,
    pub attrs: Vec<AttrSnap>,
    pub parse_rules: Vec<RuleSnap>,
    pub has_render: bool,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct MarkSnap {
    pub name: String,
    pub excludes: Option<String>,
    pub group: Option<String>,
    pub flags: BTreeMap<String, bool>,
    pub attrs: Vec<AttrSnap>,
    pub parse_rules: Vec<RuleSnap>,
    pub has_render: bool,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct AttrSnap {
    pub name: String,
    pub default: AttrValue,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct RuleSnap {
    pub matcher: String,
    pub has_get_attrs: bool,
}

pub fn normalize(blueprint: &SchemaBlueprint) -> BlueprintSnap {
    BlueprintSnap {
        top_node: blueprint.top_node.clone(),
        nodes: blueprint
            .nodes
            .iter()
            .map(|(name, spec)| node_snap(name, spec))
            .collect(),
        marks: blueprint
            .marks
            .iter()
            .map(|(name, spec)| mark_snap(name, spec))
            .collect(),
    }
}

fn node_snap(name: &str, spec: &NodeSpec) -> NodeSnap {
    let mut flags = BTreeMap::new();
    flag(&mut flags, "inline", spec.inline);
    flag(&mut flags, "atom", spec.atom);
    flag(&mut flags, "selectable", spec.selectable);
    flag(&mut flags, "draggable", spec.draggable);
    flag(&mut flags, "code", spec.code);
    flag(&mut flags, "defining", spec.defining);
    flag(&mut flags, "isolating", spec.isolating);

    NodeSnap {
        name: name.to_owned(),
        content: spec.content.clone(),
        marks: spec.marks.clone(),
        group: spec.group.clone(),
        flags,
        attrs: attr_snaps(spec.attrs.as_ref()),
        parse_rules: rule_snaps(spec.parse_dom.as_deref()),
        has_render: spec.to_dom.is_some(),
    }
}

fn mark_snap(name: &str, spec: &MarkSpec) -> MarkSnap {
    let mut flags = BTreeMap::new();
    flag(&mut flags, "inclusive", spec.inclusive);
    flag(&mut flags, "spanning", spec.spanning);

    MarkSnap {
        name: name.to_owned(),
        excludes: spec.excludes.clone(),
        group: spec.group.clone(),
        flags,
        attrs: attr_snaps(spec.attrs.as_ref()),
        parse_rules: rule_snaps(spec.parse_dom.as_deref()),
        has_render: spec.to_dom.is_some(),
    }
}

fn flag(flags: &mut BTreeMap<String, bool>, name: &str, value: Option<bool>) {
    if let Some(value) = value {
        flags.insert(name.to_owned(), value);
    }
}

fn attr_snaps(attrs: Option<&IndexMap<String, AttrSlot>>) -> Vec<AttrSnap> {
    attrs
        .map(|table| {
            table
                .iter()
                .map(|(name, slot)| AttrSnap {
                    name: name.clone(),
                    default: slot.default.clone(),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn rule_snaps(rules: Option<&[ParseRule]>) -> Vec<RuleSnap> {
    rules
        .map(|rules| {
            rules
                .iter()
                .map(|rule| RuleSnap {
                    matcher: match &rule.matcher {
                        RuleMatcher::Tag(selector) => format!("tag:{selector}"),
                        RuleMatcher::Style(property) => format!("style:{property}"),
                    },
                    has_get_attrs: rule.get_attrs.is_some(),
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::assemble::Assembler;
    use crate::tests::basic_extensions;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(RuleMatcher::Tag("h1".to_owned()), "tag:h1")]
    #[case(RuleMatcher::Style("font-weight".to_owned()), "style:font-weight")]
    fn matcher_formatting(#[case] matcher: RuleMatcher, #[case] expected: &str) {
        let snaps = rule_snaps(Some(&[ParseRule {
            matcher,
            get_attrs: None,
        }]));
        assert_eq!(snaps[0].matcher, expected);
        assert!(!snaps[0].has_get_attrs);
    }

    #[test]
    fn undeclared_flags_stay_out_of_the_snapshot() {
        let blueprint = Assembler::new().compile(&basic_extensions()).unwrap();
        let snap = normalize(&blueprint);

        let doc = snap.nodes.iter().find(|node| node.name == "doc").unwrap();
        assert!(doc.flags.is_empty());
        assert!(!doc.has_render);
    }

    #[test]
    fn snapshot_serializes_without_callbacks() {
        let blueprint = Assembler::new().compile(&basic_extensions()).unwrap();
        let value = serde_json::to_value(normalize(&blueprint)).unwrap();

        assert_eq!(value["top_node"], json!("doc"));
        assert_eq!(value["nodes"][2]["name"], json!("heading"));
        assert_eq!(value["nodes"][2]["attrs"][0]["name"], json!("level"));
        assert_eq!(value["nodes"][2]["attrs"][0]["default"], json!(1));
    }
}

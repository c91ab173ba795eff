use std::fmt;
use std::sync::Arc;

use crate::extension::attrs::ExtensionAttribute;
use crate::markup::AttrMap;
use crate::markup::element::MarkupElement;

/// What a parse rule matches on: a tag selector or a style property.
/// The two concerns are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleMatcher {
    Tag(String),
    Style(String),
}

impl RuleMatcher {
    pub fn is_style(&self) -> bool {
        matches!(self, RuleMatcher::Style(_))
    }
}

/// Result of a rule's attribute extractor: a partial attribute mapping, or
/// an explicit rejection of the whole match.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    Attrs(AttrMap),
    Reject,
}

impl MatchOutcome {
    pub fn empty() -> Self {
        MatchOutcome::Attrs(AttrMap::new())
    }

    pub fn is_reject(&self) -> bool {
        matches!(self, MatchOutcome::Reject)
    }
}

impl From<AttrMap> for MatchOutcome {
    fn from(attrs: AttrMap) -> Self {
        MatchOutcome::Attrs(attrs)
    }
}

/// Extractor a rule runs against the element it matched.
pub type GetAttrsFn = Arc<dyn Fn(&MarkupElement) -> MatchOutcome + Send + Sync>;

/// One markup-matching rule of an element's parse list.
#[derive(Clone)]
pub struct ParseRule {
    pub matcher: RuleMatcher,
    pub get_attrs: Option<GetAttrsFn>,
}

impl ParseRule {
    pub fn tag(selector: impl Into<String>) -> Self {
        Self {
            matcher: RuleMatcher::Tag(selector.into()),
            get_attrs: None,
        }
    }

    pub fn style(property: impl Into<String>) -> Self {
        Self {
            matcher: RuleMatcher::Style(property.into()),
            get_attrs: None,
        }
    }

    pub fn get_attrs<F>(mut self, f: F) -> Self
    where
        F: Fn(&MarkupElement) -> MatchOutcome + Send + Sync + 'static,
    {
        self.get_attrs = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for ParseRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseRule")
            .field("matcher", &self.matcher)
            .field("get_attrs", &self.get_attrs.is_some())
            .finish()
    }
}

/// Augment a parse rule so it also extracts the declared attributes of its
/// owner element.
///
/// Style rules pass through untouched. For tag rules the returned rule
/// runs the original extractor first, and an explicit rejection
/// short-circuits before any declared extraction runs. On key collisions,
/// extracted declared attributes overwrite whatever the rule's own
/// extractor produced.
pub fn inject_attributes(rule: ParseRule, attributes: &[ExtensionAttribute]) -> ParseRule {
    if rule.matcher.is_style() {
        return rule;
    }

    let declared: Vec<ExtensionAttribute> = attributes
        .iter()
        .filter(|item| item.attribute.rendered)
        .cloned()
        .collect();
    let original = rule.get_attrs;

    ParseRule {
        matcher: rule.matcher,
        get_attrs: Some(Arc::new(move |element| {
            let mut merged = match &original {
                Some(get_attrs) => match get_attrs(element) {
                    MatchOutcome::Attrs(attrs) => attrs,
                    MatchOutcome::Reject => return MatchOutcome::Reject,
                },
                None => AttrMap::new(),
            };

            for item in &declared {
                for (name, value) in (item.attribute.parse)(element) {
                    merged.insert(name, value);
                }
            }

            MatchOutcome::Attrs(merged)
        })),
    }
}

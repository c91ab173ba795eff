use std::collections::BTreeMap;

/// A matched markup element as seen by attribute extractors.
///
/// The parse engine hands rule callbacks this minimal view of the element
/// they matched: tag name, markup attributes, and inline style entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupElement {
    tag: String,
    attrs: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
}

impl MarkupElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: BTreeMap::new(),
            styles: BTreeMap::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(property.into(), value.into());
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Look up a markup attribute by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Look up an inline style entry by property name.
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }
}

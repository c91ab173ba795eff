pub mod element;
pub mod render;
pub mod rules;

/// Attribute values are opaque JSON values; extensions decide their shape.
pub type AttrValue = serde_json::Value;

/// Attribute name → value mapping, in insertion order.
pub type AttrMap = indexmap::IndexMap<String, AttrValue>;

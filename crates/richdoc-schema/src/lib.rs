pub mod extension;
pub mod markup;
pub mod schema;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use extension::{attrs::*, *};
pub use markup::{AttrMap, AttrValue, element::*, render::*, rules::*};
pub use schema::{assemble::*, build::*, normalize::*, *};

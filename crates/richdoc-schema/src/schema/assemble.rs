use std::collections::BTreeSet;

use indexmap::IndexMap;
use log::debug;
use thiserror::Error;

use crate::extension::attrs::collect_attributes;
use crate::extension::{Extension, split_extensions};
use crate::schema::build::{build_mark_spec, build_node_spec};
use crate::schema::{SchemaBlueprint, SchemaEngine};

/// Ambiguities rejected by strict-mode assembly.
///
/// Lenient assembly resolves both silently: last write wins for names,
/// first match wins for the document root.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssembleError {
    #[error("duplicate extension name `{name}`")]
    DuplicateName { name: String },
    #[error("multiple node extensions declare the document root: `{first}` and `{second}`")]
    MultipleTopNodes { first: String, second: String },
}

/// Compiles an extension sequence into a schema blueprint.
///
/// Ordering contract: later entries in the input sequence take precedence
/// wherever names collide, independently for the node and mark tables.
/// Compilation re-invokes every extension callback; no results are cached
/// across calls, so repeated compilation of a pure extension set yields
/// structurally equal blueprints.
#[derive(Debug, Clone, Copy, Default)]
pub struct Assembler {
    strict: bool,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn duplicate names and ambiguous roots into errors instead of
    /// resolving them silently.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    pub fn compile(&self, extensions: &[Extension]) -> Result<SchemaBlueprint, AssembleError> {
        if self.strict {
            validate(extensions)?;
        }
        Ok(compile_blueprint(extensions))
    }
}

/// Assemble a schema in one call: compile the extension sequence
/// (leniently) and delegate the blueprint to the engine. Engine failures
/// propagate unchanged.
pub fn assemble_schema<E: SchemaEngine>(
    extensions: &[Extension],
    engine: &E,
) -> Result<E::Schema, E::Error> {
    engine.construct(compile_blueprint(extensions))
}

fn compile_blueprint(extensions: &[Extension]) -> SchemaBlueprint {
    let all_attributes = collect_attributes(extensions);
    let split = split_extensions(extensions);

    let top_node = split
        .nodes
        .iter()
        .find(|node| node.top_node)
        .map(|node| node.name.clone());

    let mut nodes = IndexMap::new();
    for extension in &split.nodes {
        if nodes.contains_key(&extension.name) {
            debug!("event=spec_overwritten kind=node name={}", extension.name);
        }
        nodes.insert(
            extension.name.clone(),
            build_node_spec(extension, &all_attributes),
        );
    }

    let mut marks = IndexMap::new();
    for extension in &split.marks {
        if marks.contains_key(&extension.name) {
            debug!("event=spec_overwritten kind=mark name={}", extension.name);
        }
        marks.insert(
            extension.name.clone(),
            build_mark_spec(extension, &all_attributes),
        );
    }

    debug!(
        "event=blueprint_compiled nodes={} marks={} top_node={:?}",
        nodes.len(),
        marks.len(),
        top_node
    );

    SchemaBlueprint {
        top_node,
        nodes,
        marks,
    }
}

fn validate(extensions: &[Extension]) -> Result<(), AssembleError> {
    let split = split_extensions(extensions);

    let mut node_names = BTreeSet::new();
    let mut root: Option<&str> = None;
    for node in &split.nodes {
        if !node_names.insert(node.name.as_str()) {
            return Err(AssembleError::DuplicateName {
                name: node.name.clone(),
            });
        }
        if node.top_node {
            if let Some(first) = root {
                return Err(AssembleError::MultipleTopNodes {
                    first: first.to_owned(),
                    second: node.name.clone(),
                });
            }
            root = Some(&node.name);
        }
    }

    let mut mark_names = BTreeSet::new();
    for mark in &split.marks {
        if !mark_names.insert(mark.name.as_str()) {
            return Err(AssembleError::DuplicateName {
                name: mark.name.clone(),
            });
        }
    }

    Ok(())
}

//! Symbol-resolution capability supplied by the host compiler
//!
//! The engine never talks to a concrete compiler API. Everything it needs to
//! know about merged types comes through [`SymbolResolver`], so tests and
//! alternative hosts can substitute their own implementation.

pub mod forest_resolver;

pub use forest_resolver::ForestResolver;

use crate::ir::{MergedTypeKey, NodeId, TypeDeclaration};
use std::collections::BTreeSet;
use thiserror::Error;

/// The merged-type symbol a declaration site belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    pub key: MergedTypeKey,
    /// Set when the type is declared inside another type
    pub containing_type: Option<MergedTypeKey>,
}

impl ResolvedType {
    pub fn top_level(key: MergedTypeKey) -> Self {
        Self {
            key,
            containing_type: None,
        }
    }

    pub fn nested(key: MergedTypeKey, containing_type: MergedTypeKey) -> Self {
        Self {
            key,
            containing_type: Some(containing_type),
        }
    }

    pub fn is_nested(&self) -> bool {
        self.containing_type.is_some()
    }
}

/// Why the host could not resolve a declaration
///
/// Any of these means the host integration contract was violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionFailure {
    /// The node is not part of the compilation the resolver describes
    #[error("declaration {0} is not part of the compilation")]
    UnknownNode(NodeId),

    /// The host reported a failure of its own
    #[error("{0}")]
    Host(String),
}

/// Host-provided symbol resolution
pub trait SymbolResolver {
    /// Resolve a declaration site to its merged type
    fn resolve_merged_type(&self, node: &TypeDeclaration) -> Result<ResolvedType, ResolutionFailure>;

    /// Every member name already present on the merged type, from all of its sites
    fn existing_members(&self, key: &MergedTypeKey) -> BTreeSet<String>;
}

//! Resolver over an in-memory declaration forest

use crate::host::{ResolutionFailure, ResolvedType, SymbolResolver};
use crate::ir::{DeclarationForest, MergedTypeKey, NodeId, TypeDeclaration};
use std::collections::{BTreeSet, HashMap};

/// [`SymbolResolver`] that merges the sites of a [`DeclarationForest`]
///
/// Top-level sites with the same name and namespace form one merged type;
/// their members (nested type names included) are unioned. Nested sites
/// resolve with their containing type set and never contribute members to a
/// top-level type of the same name.
#[derive(Debug, Default)]
pub struct ForestResolver {
    nodes: HashMap<NodeId, ResolvedType>,
    members: HashMap<MergedTypeKey, BTreeSet<String>>,
}

impl ForestResolver {
    /// Index every site of the forest
    pub fn new(forest: &DeclarationForest) -> Self {
        let mut resolver = Self::default();
        for unit in &forest.units {
            for decl in &unit.declarations {
                resolver.index(decl, None);
            }
        }
        resolver
    }

    fn index(&mut self, decl: &TypeDeclaration, containing: Option<&MergedTypeKey>) {
        let key = MergedTypeKey::new(decl.name.clone(), decl.namespace.clone());

        let resolved = match containing {
            Some(outer) => ResolvedType::nested(key.clone(), outer.clone()),
            None => {
                let names = self.members.entry(key.clone()).or_default();
                names.extend(decl.members.iter().map(|m| m.name.clone()));
                names.extend(decl.nested.iter().map(|n| n.name.clone()));
                ResolvedType::top_level(key.clone())
            }
        };
        self.nodes.insert(decl.id, resolved);

        for nested in &decl.nested {
            self.index(nested, Some(&key));
        }
    }

    /// Number of merged top-level types
    pub fn merged_type_count(&self) -> usize {
        self.members.len()
    }
}

impl SymbolResolver for ForestResolver {
    fn resolve_merged_type(&self, node: &TypeDeclaration) -> Result<ResolvedType, ResolutionFailure> {
        self.nodes
            .get(&node.id)
            .cloned()
            .ok_or(ResolutionFailure::UnknownNode(node.id))
    }

    fn existing_members(&self, key: &MergedTypeKey) -> BTreeSet<String> {
        self.members.get(key).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::SourceUnit;

    #[test]
    fn test_members_merge_across_sites() {
        let forest = DeclarationForest::new()
            .unit(SourceUnit::new("A.cs").declare(TypeDeclaration::class("Banner").in_namespace("Demo").partial().member("Foo")))
            .unit(
                SourceUnit::new("B.cs").declare(
                    TypeDeclaration::class("Banner")
                        .in_namespace("Demo")
                        .partial()
                        .member("Bar")
                        .nest(TypeDeclaration::class("Baz")),
                ),
            );
        let resolver = ForestResolver::new(&forest);

        let members = resolver.existing_members(&MergedTypeKey::in_namespace("Demo", "Banner"));
        assert_eq!(members.into_iter().collect::<Vec<_>>(), ["Bar", "Baz", "Foo"]);
        assert_eq!(resolver.merged_type_count(), 1);
    }

    #[test]
    fn test_nested_site_resolves_with_container() {
        let forest = DeclarationForest::new().unit(
            SourceUnit::new("A.cs")
                .declare(TypeDeclaration::class("Outer").in_namespace("Demo").nest(TypeDeclaration::class("Inner").partial().member("X"))),
        );
        let resolver = ForestResolver::new(&forest);
        let inner = &forest.units[0].declarations[0].nested[0];

        let resolved = resolver.resolve_merged_type(inner).unwrap();
        assert!(resolved.is_nested());
        assert_eq!(resolved.containing_type, Some(MergedTypeKey::in_namespace("Demo", "Outer")));
        assert!(resolver.existing_members(&resolved.key).is_empty());
    }

    #[test]
    fn test_unknown_node_fails() {
        let resolver = ForestResolver::new(&DeclarationForest::new());
        let stray = TypeDeclaration::class("Stray").with_id(NodeId(99));

        assert_eq!(
            resolver.resolve_merged_type(&stray),
            Err(ResolutionFailure::UnknownNode(NodeId(99)))
        );
    }
}

//! Per-merged-type accumulation and name uniqueness

use crate::engine::identifier::canonical_name;
use crate::ir::{AnnotationRequest, MergedTypeKey, TypeKind};
use indexmap::IndexMap;
use std::collections::HashSet;

/// Outcome of claiming a member name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Accepted,
    Duplicate,
}

/// Everything collected for one merged type
#[derive(Debug, Clone)]
pub struct TypeAccumulatorEntry {
    kind: TypeKind,
    items: Vec<AnnotationRequest>,
    seen_names: HashSet<String>,
}

impl TypeAccumulatorEntry {
    /// Create an entry seeded with the type's pre-existing member names
    pub fn new<I, S>(kind: TypeKind, existing_members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            kind,
            items: Vec::new(),
            seen_names: existing_members
                .into_iter()
                .map(|name| canonical_name(name.as_ref()).to_string())
                .collect(),
        }
    }

    /// Claim a member name for this type
    ///
    /// Fails if the name already exists on any site of the type or was
    /// claimed by an earlier annotation.
    pub fn try_register(&mut self, member_name: &str) -> Registration {
        if self.seen_names.insert(canonical_name(member_name).to_string()) {
            Registration::Accepted
        } else {
            Registration::Duplicate
        }
    }

    /// Register the request's name and keep it if the name was free
    pub fn accept(&mut self, request: AnnotationRequest) -> Registration {
        let registration = self.try_register(&request.member_name);
        if registration == Registration::Accepted {
            self.items.push(request);
        }
        registration
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Accepted requests in acceptance order
    pub fn items(&self) -> &[AnnotationRequest] {
        &self.items
    }

    pub fn is_seen(&self, member_name: &str) -> bool {
        self.seen_names.contains(canonical_name(member_name))
    }
}

/// Mapping from merged type to its entry, in first-encounter order
#[derive(Debug, Default)]
pub struct TypeAccumulator {
    entries: IndexMap<MergedTypeKey, TypeAccumulatorEntry>,
}

impl TypeAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the entry for `key`, creating it on first sight
    ///
    /// `seed` runs only when the entry is created, so existing members are
    /// looked up once per merged type.
    pub fn entry_or_seed<F, I>(&mut self, key: &MergedTypeKey, kind: TypeKind, seed: F) -> &mut TypeAccumulatorEntry
    where
        F: FnOnce() -> I,
        I: IntoIterator<Item = String>,
    {
        if !self.entries.contains_key(key) {
            tracing::debug!(merged_type = %key, "figgle.accumulator.seed");
            self.entries
                .insert(key.clone(), TypeAccumulatorEntry::new(kind, seed()));
        }
        // Inserted above when missing.
        &mut self.entries[key]
    }

    pub fn get(&self, key: &MergedTypeKey) -> Option<&TypeAccumulatorEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the accumulator, yielding entries in first-encounter order
    pub fn into_entries(self) -> impl Iterator<Item = (MergedTypeKey, TypeAccumulatorEntry)> {
        self.entries.into_iter()
    }
}

//! Merged-type identity and extracted requests

use crate::ir::SourceSpan;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Map a blank namespace to the global namespace
///
/// Surrounding whitespace is trimmed; `Some("")` and `None` are the same
/// namespace.
pub fn normalize_namespace(namespace: Option<String>) -> Option<String> {
    namespace.and_then(|ns| {
        let trimmed = ns.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == ns.len() {
            Some(ns)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// serde helper applying [`normalize_namespace`] on input
pub(crate) fn deserialize_namespace<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(normalize_namespace)
}

/// Identity of a logical type that may be split across several sites
///
/// Two sites with equal keys are the same type for name collisions and for
/// the generation target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MergedTypeKey {
    /// Simple type name
    pub name: String,
    /// Namespace path, absent for the global namespace
    #[serde(default, deserialize_with = "deserialize_namespace")]
    pub namespace: Option<String>,
}

impl MergedTypeKey {
    pub fn new(name: impl Into<String>, namespace: Option<impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            namespace: normalize_namespace(namespace.map(Into::into)),
        }
    }

    /// Key for a type in the global namespace
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
        }
    }

    /// Key for a type in a namespace
    ///
    /// A blank namespace yields the global-namespace key.
    pub fn in_namespace(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: normalize_namespace(Some(namespace.into())),
        }
    }

    /// The same key with a blank namespace mapped to the global one
    ///
    /// Keys coming from a host resolver may be built field by field.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name,
            namespace: normalize_namespace(self.namespace),
        }
    }

    /// Namespace path, `None` for the global namespace or a blank one
    pub fn namespace_path(&self) -> Option<&str> {
        self.namespace.as_deref().map(str::trim).filter(|ns| !ns.is_empty())
    }
}

impl fmt::Display for MergedTypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.namespace_path() {
            Some(ns) => write!(f, "{}.{}", ns, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// One marker found on one declaration site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRequest {
    /// Name of the member to generate
    pub member_name: String,
    pub member_name_location: SourceSpan,
    /// Font identifier passed to the rendering service
    pub font_name: String,
    pub font_name_location: SourceSpan,
    /// Text to render
    pub source_text: String,
    /// Location of the whole annotation
    pub location: SourceSpan,
}

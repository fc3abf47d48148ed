//! Error types and diagnostics
//!
//! Two kinds of failure exist. Problems in the user's annotations are
//! [`Diagnostic`]s: they are collected, located, and never stop the run.
//! A broken host integration is a [`FiggleError`] and aborts the run.

use crate::ir::{NodeId, SourceSpan};
use crate::host::ResolutionFailure;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for figgle-gen operations
pub type FiggleResult<T> = Result<T, FiggleError>;

/// Main error type for figgle-gen
#[derive(Debug, Error)]
pub enum FiggleError {
    /// The host could not resolve a declaration it handed over
    #[error("Failed to resolve merged type for declaration '{name}' ({node}): {source}")]
    Resolution {
        node: NodeId,
        name: String,
        #[source]
        source: ResolutionFailure,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be parsed
    #[error("Configuration error in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// A fragment id that is not a plain file name
    #[error("Fragment id '{0}' is not a valid file name")]
    InvalidHintName(String),

    /// Two fragment ids that name the same file on a case-insensitive filesystem
    #[error("Fragment ids '{first}' and '{second}' differ only in case")]
    HintNameCollision { first: String, second: String },

    /// Every node id is taken
    #[error("No node id left to assign")]
    IdSpaceExhausted,
}

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticSeverity {
    Error,
}

impl DiagnosticSeverity {
    /// Get display string
    pub fn display(&self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "error",
        }
    }

    /// Get ANSI color code
    pub fn color(&self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "\x1b[31m", // Red
        }
    }
}

/// Diagnostic category shared by every descriptor
pub const CATEGORY: &str = "Figgle";

/// The diagnostic catalog
///
/// Codes and message templates are stable; hosts may filter on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// FGL0001
    UnknownFont,
    /// FGL0002
    InvalidMemberName,
    /// FGL0003
    DuplicateMemberName,
    /// FGL0004
    TypeNotMergeable,
    /// FGL0005
    NestedTypeUnsupported,
}

impl DiagnosticKind {
    /// Stable diagnostic id
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::UnknownFont => "FGL0001",
            DiagnosticKind::InvalidMemberName => "FGL0002",
            DiagnosticKind::DuplicateMemberName => "FGL0003",
            DiagnosticKind::TypeNotMergeable => "FGL0004",
            DiagnosticKind::NestedTypeUnsupported => "FGL0005",
        }
    }

    /// Short title
    pub fn title(&self) -> &'static str {
        match self {
            DiagnosticKind::UnknownFont => "Font not found",
            DiagnosticKind::InvalidMemberName => "Invalid member name",
            DiagnosticKind::DuplicateMemberName => "Duplicate member name",
            DiagnosticKind::TypeNotMergeable => "Type must be partial",
            DiagnosticKind::NestedTypeUnsupported => "Nested types are not supported",
        }
    }

    /// Message template, `{0}` is the single argument
    pub fn message_template(&self) -> &'static str {
        match self {
            DiagnosticKind::UnknownFont => "A font with name '{0}' was not found",
            DiagnosticKind::InvalidMemberName => "The string '{0}' is not a valid member name",
            DiagnosticKind::DuplicateMemberName => "Member '{0}' has already been declared",
            DiagnosticKind::TypeNotMergeable => "Type '{0}' must be partial",
            DiagnosticKind::NestedTypeUnsupported => {
                "Unable to generate Figgle text for nested type '{0}'. Generation is only supported for non-nested types."
            }
        }
    }

    pub fn severity(&self) -> DiagnosticSeverity {
        DiagnosticSeverity::Error
    }

    pub fn category(&self) -> &'static str {
        CATEGORY
    }

    /// All catalog entries in code order
    pub fn all() -> [DiagnosticKind; 5] {
        [
            DiagnosticKind::UnknownFont,
            DiagnosticKind::InvalidMemberName,
            DiagnosticKind::DuplicateMemberName,
            DiagnosticKind::TypeNotMergeable,
            DiagnosticKind::NestedTypeUnsupported,
        ]
    }
}

/// A located, user-facing report of a recoverable problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub location: SourceSpan,
    /// Message arguments in template order
    pub arguments: Vec<String>,
}

impl Diagnostic {
    /// Create a diagnostic
    pub fn new(kind: DiagnosticKind, location: SourceSpan, arguments: Vec<String>) -> Self {
        Self {
            kind,
            location,
            arguments,
        }
    }

    pub fn unknown_font(location: SourceSpan, font_name: &str) -> Self {
        Self::new(DiagnosticKind::UnknownFont, location, vec![font_name.to_string()])
    }

    pub fn invalid_member_name(location: SourceSpan, member_name: &str) -> Self {
        Self::new(DiagnosticKind::InvalidMemberName, location, vec![member_name.to_string()])
    }

    pub fn duplicate_member_name(location: SourceSpan, member_name: &str) -> Self {
        Self::new(DiagnosticKind::DuplicateMemberName, location, vec![member_name.to_string()])
    }

    pub fn type_not_mergeable(location: SourceSpan, type_name: &str) -> Self {
        Self::new(DiagnosticKind::TypeNotMergeable, location, vec![type_name.to_string()])
    }

    pub fn nested_type_unsupported(location: SourceSpan, type_name: &str) -> Self {
        Self::new(DiagnosticKind::NestedTypeUnsupported, location, vec![type_name.to_string()])
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn severity(&self) -> DiagnosticSeverity {
        self.kind.severity()
    }

    /// The message with its arguments substituted
    pub fn message(&self) -> String {
        let mut message = self.kind.message_template().to_string();
        for (i, arg) in self.arguments.iter().enumerate() {
            message = message.replace(&format!("{{{}}}", i), arg);
        }
        message
    }

    /// Format the diagnostic for display
    pub fn format(&self) -> String {
        format!(
            "{}: {}[{}]: {}",
            self.location,
            self.severity().display(),
            self.code(),
            self.message()
        )
    }

    /// Format with ANSI colors
    pub fn format_colored(&self) -> String {
        let reset = "\x1b[0m";
        format!(
            "\x1b[2m{}{}: {}{}{}\x1b[2m[{}]{}: {}",
            self.location,
            reset,
            self.severity().color(),
            self.severity().display(),
            reset,
            self.code(),
            reset,
            self.message()
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// Append-only collector, discovery order
#[derive(Debug, Default)]
pub struct DiagnosticsCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticsCollector {
    /// Create a new collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn report(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(
            code = diagnostic.code(),
            location = %diagnostic.location,
            "figgle.diagnostic"
        );
        self.diagnostics.push(diagnostic);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity() == DiagnosticSeverity::Error)
    }

    /// Get all diagnostics
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Take the diagnostics in discovery order
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Take the diagnostics ordered by location
    ///
    /// The sort is stable, so diagnostics at the same location keep their
    /// discovery order.
    pub fn into_sorted_by_location(self) -> Vec<Diagnostic> {
        let mut diagnostics = self.diagnostics;
        diagnostics.sort_by(|a, b| a.location.cmp(&b.location));
        diagnostics
    }
}

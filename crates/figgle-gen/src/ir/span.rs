//! Source locations

use serde::{Deserialize, Serialize};
use std::fmt;

/// A located region of a source file
///
/// `start` and `end` are byte offsets; `line` and `column` are 1-based and
/// only used for display. Field order defines the sort order, so sorting
/// spans groups them by file and then by position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSpan {
    /// Source file path as reported by the host
    pub file: String,
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceSpan {
    /// Create a span
    pub fn new(file: impl Into<String>, start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            start,
            end,
            line,
            column,
        }
    }

    /// A span that has not been given a location yet
    pub fn is_unassigned(&self) -> bool {
        self.file.is_empty()
    }

    /// Length of the span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no bytes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

//! Generator configuration from `figgle.toml`
//!
//! Every section and key is optional; a missing file means defaults.
//!
//! ```toml
//! [emit]
//! accessibility = "internal"
//! member_style = "const"
//! indent_width = 2
//!
//! [diagnostics]
//! order = "location"
//! ```

use crate::diagnostics::{FiggleError, FiggleResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up by [`GeneratorConfig::load_from_dir`]
pub const CONFIG_FILE_NAME: &str = "figgle.toml";

/// Full generator configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Fragment emission settings
    pub emit: EmitOptions,
    /// Diagnostic reporting settings
    pub diagnostics: DiagnosticOptions,
}

/// Accessibility of generated members
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    #[default]
    Public,
    Internal,
    Private,
    Protected,
    ProtectedInternal,
}

impl Accessibility {
    pub fn keyword(&self) -> &'static str {
        match self {
            Accessibility::Public => "public",
            Accessibility::Internal => "internal",
            Accessibility::Private => "private",
            Accessibility::Protected => "protected",
            Accessibility::ProtectedInternal => "protected internal",
        }
    }
}

/// Shape of the generated read-only member
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStyle {
    /// `static string Name { get; } = @"..."`
    #[default]
    Property,
    /// `static readonly string Name = @"..."`
    ReadonlyField,
    /// `const string Name = @"..."`
    Const,
}

/// Line terminator for the fragment's own structure
///
/// Rendered text inside the verbatim literal is never rewritten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }
}

/// Fragment emission settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitOptions {
    pub accessibility: Accessibility,
    pub member_style: MemberStyle,
    /// Spaces per indentation level
    pub indent_width: usize,
    /// Emit the `<auto-generated />` header
    pub header: bool,
    /// Appended to `{namespace}.{type}.` to form the fragment id
    pub hint_suffix: String,
    pub line_ending: LineEnding,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            accessibility: Accessibility::default(),
            member_style: MemberStyle::default(),
            indent_width: 4,
            header: true,
            hint_suffix: "FiggleText.g.cs".to_string(),
            line_ending: LineEnding::default(),
        }
    }
}

/// Order in which diagnostics are surfaced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticOrder {
    /// Extraction phase then emission phase, each in discovery order
    #[default]
    Discovery,
    /// Sorted by source location
    Location,
}

/// Diagnostic reporting settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticOptions {
    pub order: DiagnosticOrder,
}

impl GeneratorConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Parse configuration from a file
    pub fn from_file(path: impl AsRef<Path>) -> FiggleResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(FiggleError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|source| FiggleError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `figgle.toml` from a directory, or defaults if there is none
    pub fn load_from_dir(dir: impl AsRef<Path>) -> FiggleResult<Self> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        if path.exists() {
            tracing::debug!(path = %path.display(), "figgle.config.load");
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }
}

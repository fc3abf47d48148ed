//! Generation results

use crate::codegen::RenderedMember;
use crate::diagnostics::{Diagnostic, DiagnosticSeverity, FiggleError, FiggleResult};
use crate::ir::MergedTypeKey;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Whether `hint_name` names a single file directly inside the output dir
fn is_plain_file_name(hint_name: &str) -> bool {
    if hint_name.contains(['/', '\\', ':']) {
        return false;
    }
    let mut components = Path::new(hint_name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Synthesized source for one merged type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFragment {
    /// Fragment id, also used as the file name
    pub hint_name: String,
    pub key: MergedTypeKey,
    /// Members in emission order
    pub members: Vec<RenderedMember>,
    /// Complete fragment text
    pub source: String,
}

impl GeneratedFragment {
    /// Find a generated member by name
    pub fn member(&self, name: &str) -> Option<&RenderedMember> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// Everything a run produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOutput {
    pub fragments: Vec<GeneratedFragment>,
    /// Diagnostics in reporting order
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationOutput {
    /// Fragment generated for a merged type
    pub fn fragment(&self, key: &MergedTypeKey) -> Option<&GeneratedFragment> {
        self.fragments.iter().find(|f| &f.key == key)
    }

    /// Diagnostics with the given code (e.g. "FGL0003")
    pub fn diagnostics_with_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.diagnostics.iter().filter(move |d| d.code() == code)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity() == DiagnosticSeverity::Error)
    }

    /// Serialize fragments and diagnostics for a host bridge
    pub fn to_json(&self) -> FiggleResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every hint name is a plain file name and that no two
    /// differ only in case
    pub fn check_hint_names(&self) -> FiggleResult<()> {
        let mut seen: HashMap<String, &str> = HashMap::with_capacity(self.fragments.len());
        for fragment in &self.fragments {
            let name = fragment.hint_name.as_str();
            if !is_plain_file_name(name) {
                return Err(FiggleError::InvalidHintName(name.to_string()));
            }
            if let Some(first) = seen.insert(name.to_lowercase(), name) {
                return Err(FiggleError::HintNameCollision {
                    first: first.to_string(),
                    second: name.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Write every fragment to `dir`, one file per hint name
    ///
    /// Nothing is written if any hint name fails [`Self::check_hint_names`].
    pub fn write_to(&self, dir: impl AsRef<Path>) -> FiggleResult<Vec<PathBuf>> {
        self.check_hint_names()?;
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(self.fragments.len());
        for fragment in &self.fragments {
            let path = dir.join(&fragment.hint_name);
            fs::write(&path, &fragment.source)?;
            tracing::debug!(path = %path.display(), "figgle.fragment.write");
            written.push(path);
        }
        Ok(written)
    }

    /// Print all diagnostics to stderr
    pub fn print_diagnostics(&self) {
        for diagnostic in &self.diagnostics {
            eprintln!("{}", diagnostic.format_colored());
        }
    }
}

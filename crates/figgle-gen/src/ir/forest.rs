//! Declaration forests
//!
//! A forest is every source unit of one compilation. Hosts usually hand it
//! over as JSON; tests build it fluently. Either way, nodes that arrive
//! without an id or a span are given one by a deterministic layout pass that
//! places each attribute, header, and member on its own line, so diagnostics
//! always carry a usable location.

use crate::diagnostics::{FiggleError, FiggleResult};
use crate::ir::{NodeId, SourceSpan, TypeDeclaration};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const INDENT: usize = 4;

/// One source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceUnit {
    /// File path
    pub path: String,
    /// Top-level type declarations in source order
    #[serde(default)]
    pub declarations: Vec<TypeDeclaration>,
}

impl SourceUnit {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            declarations: Vec::new(),
        }
    }

    /// Add a top-level declaration
    pub fn declare(mut self, decl: TypeDeclaration) -> Self {
        self.declarations.push(decl);
        self
    }
}

/// Every source unit of a compilation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationForest {
    pub units: Vec<SourceUnit>,
}

impl DeclarationForest {
    /// Create an empty forest
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source unit, assigning missing ids and spans
    ///
    /// If the id space is exhausted the new nodes keep `NodeId::UNASSIGNED`.
    pub fn unit(mut self, unit: SourceUnit) -> Self {
        self.units.push(unit);
        if let Err(e) = self.assign_layout() {
            tracing::warn!(error = %e, "figgle.forest.layout");
        }
        self
    }

    /// Parse a forest from JSON
    pub fn from_json(json: &str) -> FiggleResult<Self> {
        let mut forest: Self = serde_json::from_str(json)?;
        forest.assign_layout()?;
        Ok(forest)
    }

    /// Read a forest from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> FiggleResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(FiggleError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serialize the forest to JSON
    pub fn to_json(&self) -> FiggleResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// All declarations, nested ones included, depth-first in source order
    pub fn walk(&self) -> Vec<&TypeDeclaration> {
        let mut out = Vec::new();
        for unit in &self.units {
            for decl in &unit.declarations {
                push_depth_first(decl, &mut out);
            }
        }
        out
    }

    /// Number of declaration sites, nested ones included
    pub fn len(&self) -> usize {
        self.walk().len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.iter().all(|u| u.declarations.is_empty())
    }

    /// Fill in ids and spans the host did not provide
    ///
    /// Ids already present are kept and new ones are allocated above the
    /// highest id in the forest, so repeated calls are stable.
    fn assign_layout(&mut self) -> FiggleResult<()> {
        let mut ids = IdAllocator::new(self.walk().iter().map(|d| d.id));

        for unit in &mut self.units {
            let mut cursor = LayoutCursor::new(&unit.path);
            for decl in &mut unit.declarations {
                layout_declaration(decl, 0, &mut cursor, &mut ids)?;
            }
        }
        Ok(())
    }
}

/// Hands out node ids not yet used in the forest
///
/// Allocation starts above the highest id in use and wraps around to the
/// lowest free id once `u32::MAX` is taken.
struct IdAllocator {
    used: HashSet<u32>,
    next: u32,
}

impl IdAllocator {
    fn new(existing: impl IntoIterator<Item = NodeId>) -> Self {
        let used: HashSet<u32> = existing
            .into_iter()
            .filter(|id| !id.is_unassigned())
            .map(|id| id.0)
            .collect();
        let next = used
            .iter()
            .max()
            .and_then(|max| max.checked_add(1))
            .unwrap_or(1);
        Self { used, next }
    }

    fn allocate(&mut self) -> FiggleResult<NodeId> {
        // Every id except UNASSIGNED taken.
        if self.used.len() >= u32::MAX as usize {
            return Err(FiggleError::IdSpaceExhausted);
        }
        let mut candidate = self.next.max(1);
        while self.used.contains(&candidate) {
            candidate = candidate.checked_add(1).unwrap_or(1);
        }
        self.used.insert(candidate);
        self.next = candidate.checked_add(1).unwrap_or(1);
        Ok(NodeId(candidate))
    }
}

fn push_depth_first<'a>(decl: &'a TypeDeclaration, out: &mut Vec<&'a TypeDeclaration>) {
    out.push(decl);
    for nested in &decl.nested {
        push_depth_first(nested, out);
    }
}

/// Position of the next synthetic source line
struct LayoutCursor<'a> {
    file: &'a str,
    line: usize,
    offset: usize,
}

impl<'a> LayoutCursor<'a> {
    fn new(file: &'a str) -> Self {
        Self {
            file,
            line: 1,
            offset: 0,
        }
    }

    /// Span at `column_offset` within the current line
    fn span(&self, column_offset: usize, width: usize) -> SourceSpan {
        let start = self.offset + column_offset;
        SourceSpan::new(self.file, start, start + width, self.line, column_offset + 1)
    }

    /// Advance past a line of the given total width
    fn next_line(&mut self, width: usize) {
        self.offset += width + 1;
        self.line += 1;
    }
}

fn layout_declaration(
    decl: &mut TypeDeclaration,
    depth: usize,
    cursor: &mut LayoutCursor<'_>,
    ids: &mut IdAllocator,
) -> FiggleResult<()> {
    let indent = depth * INDENT;

    if decl.id.is_unassigned() {
        decl.id = ids.allocate()?;
    }

    // [Name(arg, arg, arg)]
    for attr in &mut decl.attributes {
        let mut column = indent + 1 + attr.name.len() + 1;
        for arg in &mut attr.arguments {
            let width = arg.source_width();
            if arg.span.is_unassigned() {
                let value_offset = arg.name.as_ref().map(|n| n.len() + 2).unwrap_or(0);
                arg.span = cursor.span(column + value_offset, width - value_offset);
            }
            column += width + 2;
        }
        let width = column.saturating_sub(2).max(indent + 1 + attr.name.len() + 1) + 2 - indent;
        if attr.span.is_unassigned() {
            attr.span = cursor.span(indent, width);
        }
        cursor.next_line(indent + width);
    }

    let header = decl.header_width();
    if decl.span.is_unassigned() {
        decl.span = cursor.span(indent, header);
    }
    cursor.next_line(indent + header);
    // {
    cursor.next_line(indent + 1);

    for member in &mut decl.members {
        let member_indent = indent + INDENT;
        if member.span.is_unassigned() {
            member.span = cursor.span(member_indent, member.name.len());
        }
        cursor.next_line(member_indent + member.name.len());
    }

    for nested in &mut decl.nested {
        layout_declaration(nested, depth + 1, cursor, ids)?;
    }

    // }
    cursor.next_line(indent + 1);
    Ok(())
}

//! C# fragment generator
//!
//! Generates one partial-type fragment per merged type. The rendered text is
//! embedded in a verbatim string literal, where the only character needing
//! an escape is `"`.

use crate::config::{EmitOptions, MemberStyle};
use crate::ir::{MergedTypeKey, TypeKind};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A member ready to be written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedMember {
    pub name: String,
    /// Rendered text, unescaped
    pub value: String,
}

/// Escape text for a C# verbatim string literal by doubling every `"`
pub fn escape_verbatim(text: &str) -> Cow<'_, str> {
    if text.contains('"') {
        Cow::Owned(text.replace('"', "\"\""))
    } else {
        Cow::Borrowed(text)
    }
}

/// Generator for partial-type fragments
pub struct FragmentGenerator<'a> {
    options: &'a EmitOptions,
}

impl<'a> FragmentGenerator<'a> {
    /// Create a new generator with the given emit options
    pub fn new(options: &'a EmitOptions) -> Self {
        Self { options }
    }

    /// Fragment id for a merged type
    ///
    /// Type names never contain `.`, so the last segment before the suffix
    /// is always the type name and distinct keys produce distinct ids.
    pub fn hint_name(&self, key: &MergedTypeKey) -> String {
        match key.namespace_path() {
            Some(ns) => format!("{}.{}.{}", ns, key.name, self.options.hint_suffix),
            None => format!("{}.{}", key.name, self.options.hint_suffix),
        }
    }

    /// Generate the complete fragment source
    pub fn generate(&self, key: &MergedTypeKey, kind: TypeKind, members: &[RenderedMember]) -> String {
        let nl = self.options.line_ending.as_str();
        let mut output = String::new();

        if self.options.header {
            output.push_str("// <auto-generated />");
            output.push_str(nl);
            output.push_str("// Generated by figgle-gen - do not edit manually");
            output.push_str(nl);
            output.push_str(nl);
        }

        let namespace = key.namespace_path();
        let depth = match namespace {
            Some(ns) => {
                output.push_str(&format!("namespace {}{}{{{}", ns, nl, nl));
                1
            }
            None => 0,
        };

        self.push_type_body(&mut output, key, kind, members, depth);

        if namespace.is_some() {
            output.push('}');
            output.push_str(nl);
        }

        output
    }

    fn push_type_body(
        &self,
        output: &mut String,
        key: &MergedTypeKey,
        kind: TypeKind,
        members: &[RenderedMember],
        depth: usize,
    ) {
        let nl = self.options.line_ending.as_str();
        let indent = self.indent(depth);

        output.push_str(&format!("{}partial {} {}{}", indent, kind.keyword(), key.name, nl));
        output.push_str(&format!("{}{{{}", indent, nl));

        for member in members {
            output.push_str(&self.indent(depth + 1));
            output.push_str(&self.member_declaration(member));
            output.push_str(nl);
        }

        output.push_str(&format!("{}}}{}", indent, nl));
    }

    /// Declaration of one member, without indentation or line ending
    pub fn member_declaration(&self, member: &RenderedMember) -> String {
        let access = self.options.accessibility.keyword();
        let literal = format!("@\"{}\"", escape_verbatim(&member.value));

        match self.options.member_style {
            MemberStyle::Property => format!("{} static string {} {{ get; }} = {};", access, member.name, literal),
            MemberStyle::ReadonlyField => format!("{} static readonly string {} = {};", access, member.name, literal),
            MemberStyle::Const => format!("{} const string {} = {};", access, member.name, literal),
        }
    }

    fn indent(&self, depth: usize) -> String {
        " ".repeat(self.options.indent_width * depth)
    }
}

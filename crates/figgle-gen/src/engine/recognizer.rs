//! Recognition of the `GenerateFiggleText` marker
//!
//! The recognizer is closed: it knows exactly one attribute shape and says
//! so with a tagged result instead of probing names at the call site.

use crate::ir::{ArgValue, Attribute, SourceSpan};
use std::fmt;

/// Unqualified marker name
pub const MARKER_NAME: &str = "GenerateFiggleText";

/// Namespace the marker lives in
pub const MARKER_NAMESPACE: &str = "Figgle";

/// Constructor parameter names, in positional order
pub const PARAMETERS: [&str; 3] = ["memberName", "fontName", "sourceText"];

/// A literal argument and its location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralArg<'a> {
    pub value: &'a str,
    pub span: &'a SourceSpan,
}

/// The three arguments of a well-formed marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerArgs<'a> {
    pub member_name: LiteralArg<'a>,
    pub font_name: LiteralArg<'a>,
    pub source_text: LiteralArg<'a>,
}

/// Why a marker's arguments could not be bound
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    /// Not exactly three arguments
    WrongArity(usize),
    /// An argument is not a string literal
    NonLiteral(&'static str),
    /// A named argument does not match any parameter
    UnknownParameter(String),
    /// A parameter was given more than once
    DuplicateParameter(&'static str),
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::WrongArity(n) => write!(f, "expected 3 arguments, found {}", n),
            MalformedReason::NonLiteral(param) => write!(f, "argument '{}' is not a string literal", param),
            MalformedReason::UnknownParameter(name) => write!(f, "no parameter named '{}'", name),
            MalformedReason::DuplicateParameter(param) => write!(f, "parameter '{}' given more than once", param),
        }
    }
}

/// Result of looking at one attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recognition<'a> {
    Recognized(MarkerArgs<'a>),
    NotRecognized,
    MalformedArgs(MalformedReason),
}

/// Whether an attribute name refers to the marker
///
/// Accepts the short and `Attribute`-suffixed forms, optionally qualified by
/// `Figgle.` and `global::`.
pub fn is_marker_name(name: &str) -> bool {
    let name = name.trim();
    let name = name.strip_prefix("global::").unwrap_or(name);
    let name = name
        .strip_prefix(MARKER_NAMESPACE)
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(name);
    let name = name.strip_suffix("Attribute").unwrap_or(name);
    name == MARKER_NAME
}

/// Recognize the marker and bind its three literal arguments
///
/// Positional arguments bind in parameter order; `name: value` arguments
/// bind by parameter name.
pub fn recognize(attr: &Attribute) -> Recognition<'_> {
    if !is_marker_name(&attr.name) {
        return Recognition::NotRecognized;
    }
    if attr.arguments.len() != PARAMETERS.len() {
        return Recognition::MalformedArgs(MalformedReason::WrongArity(attr.arguments.len()));
    }

    let mut bound: [Option<LiteralArg<'_>>; 3] = [None; 3];
    for (position, arg) in attr.arguments.iter().enumerate() {
        let index = match &arg.name {
            Some(name) => match PARAMETERS.iter().position(|p| *p == name.as_str()) {
                Some(index) => index,
                None => return Recognition::MalformedArgs(MalformedReason::UnknownParameter(name.clone())),
            },
            None => position,
        };

        if bound[index].is_some() {
            return Recognition::MalformedArgs(MalformedReason::DuplicateParameter(PARAMETERS[index]));
        }

        let value = match &arg.value {
            ArgValue::Text(text) => text.as_str(),
            ArgValue::Expression(_) => {
                return Recognition::MalformedArgs(MalformedReason::NonLiteral(PARAMETERS[index]))
            }
        };
        bound[index] = Some(LiteralArg { value, span: &arg.span });
    }

    match bound {
        [Some(member_name), Some(font_name), Some(source_text)] => Recognition::Recognized(MarkerArgs {
            member_name,
            font_name,
            source_text,
        }),
        // Three arguments bound without duplicates always fill every slot.
        _ => Recognition::MalformedArgs(MalformedReason::WrongArity(attr.arguments.len())),
    }
}

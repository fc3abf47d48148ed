//! Declaration-node model
//!
//! This is the shape in which the host compiler hands its declaration
//! forest to the engine: type declarations with their attributes, existing
//! members, and nested types. Only what the engine reads is modelled.

use crate::ir::key::{deserialize_namespace, normalize_namespace};
use crate::ir::SourceSpan;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Host-assigned identity of one declaration site
///
/// `NodeId(0)` means "not assigned yet"; the forest layout pass fills it in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Placeholder for nodes built without an id
    pub const UNASSIGNED: NodeId = NodeId(0);

    pub fn is_unassigned(self) -> bool {
        self == Self::UNASSIGNED
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of type declaration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Struct,
    Interface,
    Record,
    RecordStruct,
}

impl TypeKind {
    /// The C# keyword(s) that introduce this kind of type
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
            TypeKind::Interface => "interface",
            TypeKind::Record => "record",
            TypeKind::RecordStruct => "record struct",
        }
    }
}

/// Value of one attribute argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ArgValue {
    /// A string literal, already unescaped by the host
    Text(String),
    /// Any computed or non-string argument, kept as its source text
    Expression(String),
}

impl ArgValue {
    /// Literal text, if this argument is a string literal
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ArgValue::Text(text) => Some(text),
            ArgValue::Expression(_) => None,
        }
    }
}

/// One argument of an attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeArgument {
    /// Parameter name for the `name: value` form
    #[serde(default)]
    pub name: Option<String>,
    /// Argument value
    pub value: ArgValue,
    /// Location of the value
    #[serde(default)]
    pub span: SourceSpan,
}

impl AttributeArgument {
    /// Positional string literal
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            name: None,
            value: ArgValue::Text(value.into()),
            span: SourceSpan::default(),
        }
    }

    /// Positional computed expression
    pub fn expression(source: impl Into<String>) -> Self {
        Self {
            name: None,
            value: ArgValue::Expression(source.into()),
            span: SourceSpan::default(),
        }
    }

    /// Bind the argument to a parameter by name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the location
    pub fn at(mut self, span: SourceSpan) -> Self {
        self.span = span;
        self
    }

    /// Width of the argument as it would be written in source
    pub(crate) fn source_width(&self) -> usize {
        let name_width = self.name.as_ref().map(|n| n.len() + 2).unwrap_or(0);
        let value_width = match &self.value {
            ArgValue::Text(text) => text.len() + 2,
            ArgValue::Expression(source) => source.len(),
        };
        name_width + value_width
    }
}

/// An attribute attached to a declaration site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name as written (may be qualified)
    pub name: String,
    /// Arguments in source order
    #[serde(default)]
    pub arguments: Vec<AttributeArgument>,
    /// Location of the whole attribute
    #[serde(default)]
    pub span: SourceSpan,
}

impl Attribute {
    /// Create an attribute without arguments
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            span: SourceSpan::default(),
        }
    }

    /// `[GenerateFiggleText(memberName, fontName, sourceText)]`
    pub fn figgle_text(
        member_name: impl Into<String>,
        font_name: impl Into<String>,
        source_text: impl Into<String>,
    ) -> Self {
        Self::new("GenerateFiggleText")
            .arg(AttributeArgument::text(member_name))
            .arg(AttributeArgument::text(font_name))
            .arg(AttributeArgument::text(source_text))
    }

    /// Add an argument
    pub fn arg(mut self, arg: AttributeArgument) -> Self {
        self.arguments.push(arg);
        self
    }

    /// Set the location
    pub fn at(mut self, span: SourceSpan) -> Self {
        self.span = span;
        self
    }
}

/// A member that already exists on a declaration site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDeclaration {
    pub name: String,
    #[serde(default)]
    pub span: SourceSpan,
}

impl MemberDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            span: SourceSpan::default(),
        }
    }
}

/// One physical declaration site of a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    /// Site identity used by the resolver
    #[serde(default)]
    pub id: NodeId,
    /// Simple name
    pub name: String,
    /// Declaration kind
    #[serde(default)]
    pub kind: TypeKind,
    /// Enclosing namespace path (e.g. "Demo.Tools"), absent for the global namespace
    #[serde(default, deserialize_with = "deserialize_namespace")]
    pub namespace: Option<String>,
    /// Whether this site carries the `partial` modifier
    #[serde(default)]
    pub partial: bool,
    /// Attributes in source order
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    /// Members declared on this site
    #[serde(default)]
    pub members: Vec<MemberDeclaration>,
    /// Types declared inside this one
    #[serde(default)]
    pub nested: Vec<TypeDeclaration>,
    /// Location of the declaration header
    #[serde(default)]
    pub span: SourceSpan,
}

impl TypeDeclaration {
    /// Create a declaration of the given kind
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            id: NodeId::UNASSIGNED,
            name: name.into(),
            kind,
            namespace: None,
            partial: false,
            attributes: Vec::new(),
            members: Vec::new(),
            nested: Vec::new(),
            span: SourceSpan::default(),
        }
    }

    /// Create a class declaration
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Class, name)
    }

    /// Create a struct declaration
    pub fn struct_decl(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Struct, name)
    }

    /// Place the declaration in a namespace; a blank one means global
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = normalize_namespace(Some(namespace.into()));
        self
    }

    /// Mark the site `partial`
    pub fn partial(mut self) -> Self {
        self.partial = true;
        self
    }

    /// Attach an attribute
    pub fn annotate(mut self, attr: Attribute) -> Self {
        self.attributes.push(attr);
        self
    }

    /// Declare an existing member
    pub fn member(mut self, name: impl Into<String>) -> Self {
        self.members.push(MemberDeclaration::new(name));
        self
    }

    /// Declare a nested type
    ///
    /// The nested declaration inherits this declaration's namespace.
    pub fn nest(mut self, mut decl: TypeDeclaration) -> Self {
        decl.namespace = self.namespace.clone();
        self.nested.push(decl);
        self
    }

    /// Set the id
    pub fn with_id(mut self, id: NodeId) -> Self {
        self.id = id;
        self
    }

    /// Set the location
    pub fn at(mut self, span: SourceSpan) -> Self {
        self.span = span;
        self
    }

    /// Header text width as it would be written in source
    pub(crate) fn header_width(&self) -> usize {
        let partial = if self.partial { "partial ".len() } else { 0 };
        partial + self.kind.keyword().len() + 1 + self.name.len()
    }
}

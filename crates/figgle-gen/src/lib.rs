//! figgle-gen: compile-time generation of Figgle text members
//!
//! Scans a forest of C# type declarations for `[GenerateFiggleText]`
//! markers, validates every request against the merged type it targets, and
//! synthesizes one partial-type fragment per merged type holding the rendered
//! block-letter text. Problems in the input are reported as located
//! diagnostics; a single bad annotation never suppresses the rest.
//!
//! # Architecture
//!
//! - `ir`: declaration-node model, source spans, merged-type keys
//! - `host`: symbol-resolution capability supplied by the host compiler
//! - `render`: rendering-service interface and the compile-time font inventory
//! - `engine`: marker recognition, identifier checks, accumulation, and the
//!   two-phase generation session
//! - `codegen`: C# fragment synthesis
//! - `diagnostics`: diagnostic catalog and error types
//! - `config`: `figgle.toml` configuration
//! - `build`: runner that drives a whole forest through a session
//!
//! # Usage
//!
//! ```rust,ignore
//! use figgle_gen::{DeclarationForest, FiggleGenerator, GeneratorConfig};
//!
//! let forest = DeclarationForest::from_file("obj/declarations.json")?;
//! let output = FiggleGenerator::new()
//!     .config(GeneratorConfig::load_from_dir(".")?)
//!     .run(&forest)?;
//! output.write_to("obj/generated")?;
//! ```

pub mod build;
pub mod codegen;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod host;
pub mod ir;
pub mod render;

// Re-export commonly used types
pub use build::{FiggleGenerator, GeneratedFragment, GenerationOutput};
pub use codegen::FragmentGenerator;
pub use config::{Accessibility, DiagnosticOrder, EmitOptions, GeneratorConfig, LineEnding, MemberStyle};
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSeverity, DiagnosticsCollector, FiggleError, FiggleResult};
pub use engine::{recognize, GenerationSession, Recognition};
pub use host::{ForestResolver, ResolutionFailure, ResolvedType, SymbolResolver};
pub use ir::{
    AnnotationRequest, ArgValue, Attribute, AttributeArgument, DeclarationForest, MemberDeclaration,
    MergedTypeKey, NodeId, SourceSpan, SourceUnit, TypeDeclaration, TypeKind,
};
pub use render::{collect_fonts, FontDescriptor, FontRegistry, FontRenderer, FIGGLE_FONTS};

// Re-export linkme for the font inventory
pub use linkme;

//! Code generation for Figgle fragments
//!
//! This module provides the generator for C# partial-type fragments.

pub mod csharp;

pub use csharp::{escape_verbatim, FragmentGenerator, RenderedMember};

//! Runner utilities for hosts and build scripts
//!
//! This module drives a whole declaration forest through a generation
//! session and hands back (or writes out) the result.

pub mod generator;
pub mod output;

pub use generator::FiggleGenerator;
pub use output::{GeneratedFragment, GenerationOutput};

//! Annotation scanning, validation, and the generation session
//!
//! - `recognizer`: closed recognizer for the marker attribute
//! - `identifier`: member-name syntax
//! - `accumulator`: per-merged-type collection and uniqueness
//! - `session`: the Collecting / Emitting lifecycle

pub mod accumulator;
pub mod identifier;
pub mod recognizer;
pub mod session;

pub use accumulator::{Registration, TypeAccumulator, TypeAccumulatorEntry};
pub use identifier::{canonical_name, is_valid_identifier};
pub use recognizer::{recognize, is_marker_name, MalformedReason, MarkerArgs, Recognition};
pub use session::GenerationSession;

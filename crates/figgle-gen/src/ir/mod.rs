//! Intermediate Representation (IR) for declaration forests
//!
//! This module provides the declaration-node model the host hands over,
//! source locations, and the merged-type identity the engine groups by.

pub mod forest;
pub mod key;
pub mod span;
pub mod syntax;

pub use forest::*;
pub use key::*;
pub use span::*;
pub use syntax::*;

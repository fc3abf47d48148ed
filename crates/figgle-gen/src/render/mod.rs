//! Rendering service
//!
//! Turning a font name and a string into block-letter text is an external
//! concern. The engine only sees [`FontRenderer`]; [`FontRegistry`] is the
//! implementation backed by the compile-time font inventory.

pub mod inventory;
pub mod registry;

pub use inventory::*;
pub use registry::FontRegistry;

/// Pure font rendering
///
/// Implementations must return byte-identical output for repeated calls
/// with the same arguments.
pub trait FontRenderer: Send + Sync {
    /// Render `text` in `font`, or `None` if the font is unknown
    fn render(&self, font: &str, text: &str) -> Option<String>;
}

impl<F> FontRenderer for F
where
    F: Fn(&str, &str) -> Option<String> + Send + Sync,
{
    fn render(&self, font: &str, text: &str) -> Option<String> {
        self(font, text)
    }
}

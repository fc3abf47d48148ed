//! Compile-time font inventory
//!
//! Fonts are collected at link time using the `linkme` crate's distributed
//! slices, either through [`register_font!`](crate::register_font) or the
//! `#[figgle_font]` attribute from `figgle-gen-macro`.

use std::fmt;

/// Signature of a font's render function
pub type RenderFn = fn(&str) -> String;

/// A named font and its render function
#[derive(Clone, Copy)]
pub struct FontDescriptor {
    pub name: &'static str,
    pub render: RenderFn,
}

impl FontDescriptor {
    pub const fn new(name: &'static str, render: RenderFn) -> Self {
        Self { name, render }
    }
}

impl fmt::Debug for FontDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontDescriptor").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Distributed slice for collecting fonts at compile time
#[linkme::distributed_slice]
pub static FIGGLE_FONTS: [fn() -> FontDescriptor];

/// Collect all registered fonts from the distributed slice
pub fn collect_fonts() -> Vec<FontDescriptor> {
    FIGGLE_FONTS.iter().map(|f| f()).collect()
}

/// Macro to register a font in the distributed slice
///
/// ```rust,ignore
/// fn shout(text: &str) -> String {
///     text.to_uppercase()
/// }
///
/// figgle_gen::register_font!(figgle_gen::FontDescriptor::new("shout", shout));
/// ```
#[macro_export]
macro_rules! register_font {
    ($font:expr) => {
        const _: () = {
            #[$crate::linkme::distributed_slice($crate::render::FIGGLE_FONTS)]
            #[linkme(crate = $crate::linkme)]
            static _FIGGLE_FONT: fn() -> $crate::render::FontDescriptor = || $font;
        };
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shout(text: &str) -> String {
        text.to_uppercase()
    }

    crate::register_font!(FontDescriptor::new("inventory-shout", shout));

    #[test]
    fn test_registered_font_is_collected() {
        let fonts = collect_fonts();
        let font = fonts.iter().find(|f| f.name == "inventory-shout").unwrap();

        assert_eq!((font.render)("abc"), "ABC");
    }
}

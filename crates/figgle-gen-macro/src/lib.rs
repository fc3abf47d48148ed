//! Proc macros for figgle-gen
//!
//! Provides an attribute macro that registers a Rust function as a Figgle
//! font in the figgle-gen font inventory.
//!
//! # Usage
//!
//! ```text
//! use figgle_gen_macro::figgle_font;
//!
//! #[figgle_font("stacey")]
//! fn stacey(text: &str) -> String {
//!     // ...
//! }
//! ```

use proc_macro::TokenStream;

mod font;

/// Attribute macro for registering a font render function
///
/// This macro:
/// 1. Leaves the original function unchanged
/// 2. Generates a companion function that returns a `FontDescriptor`
/// 3. Registers the descriptor in the figgle-gen font inventory
///
/// The function must have the shape `fn(&str) -> String`.
///
/// # Attributes
/// - `#[figgle_font]` - Font named after the function
/// - `#[figgle_font("Big Money")]` - Custom font name
/// - `#[figgle_font(name = "Big Money")]` - Same, spelled out
///
/// Fonts are matched case-insensitively, so `"Stacey"` and `"stacey"` name
/// the same font. When two functions claim a name, the first one collected
/// wins.
#[proc_macro_attribute]
pub fn figgle_font(attr: TokenStream, item: TokenStream) -> TokenStream {
    font::figgle_font_impl(attr.into(), item.into()).into()
}

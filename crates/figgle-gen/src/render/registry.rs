//! Font registry

use crate::render::{collect_fonts, FontDescriptor, FontRenderer};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

type SharedRenderFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Registry of named fonts
///
/// Lookup ignores ASCII case. When a name is registered twice the first
/// registration is kept.
#[derive(Clone, Default)]
pub struct FontRegistry {
    fonts: IndexMap<String, SharedRenderFn>,
}

impl FontRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from the distributed slice
    pub fn from_inventory() -> Self {
        let mut registry = Self::new();
        for font in collect_fonts() {
            registry.register_descriptor(font);
        }
        tracing::debug!(count = registry.len(), "figgle.fonts.inventory");
        registry
    }

    /// Register a font render function
    pub fn register<F>(&mut self, name: &str, render: F) -> &mut Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.fonts
            .entry(name.to_ascii_lowercase())
            .or_insert_with(|| Arc::new(render));
        self
    }

    /// Register a font from its descriptor
    pub fn register_descriptor(&mut self, font: FontDescriptor) -> &mut Self {
        self.register(font.name, font.render)
    }

    /// Builder-style registration
    pub fn with_font<F>(mut self, name: &str, render: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.register(name, render);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fonts.contains_key(&name.to_ascii_lowercase())
    }

    /// Registered font names, lowercased, in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fonts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

impl FontRenderer for FontRegistry {
    fn render(&self, font: &str, text: &str) -> Option<String> {
        self.fonts.get(&font.to_ascii_lowercase()).map(|render| render(text))
    }
}

impl fmt::Debug for FontRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontRegistry")
            .field("fonts", &self.fonts.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(text: &str) -> String {
        format!("[{}]", text)
    }

    crate::register_font!(FontDescriptor::new("registry-boxed", boxed));

    #[test]
    fn test_lookup_ignores_case() {
        let registry = FontRegistry::new().with_font("Stacey", |t: &str| t.to_uppercase());

        assert!(registry.contains("stacey"));
        assert_eq!(registry.render("STACEY", "figgle").as_deref(), Some("FIGGLE"));
        assert_eq!(registry.render("missing", "figgle"), None);
    }

    #[test]
    fn test_first_registration_wins() {
        let registry = FontRegistry::new()
            .with_font("dup", |_: &str| "first".to_string())
            .with_font("DUP", |_: &str| "second".to_string());

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.render("dup", "x").as_deref(), Some("first"));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let registry = FontRegistry::new().with_font("boxed", boxed);
        let first = registry.render("boxed", "Figgle");

        assert_eq!(first, registry.render("boxed", "Figgle"));
        assert_eq!(first.as_deref(), Some("[Figgle]"));
    }

    #[test]
    fn test_registry_from_inventory() {
        let registry = FontRegistry::from_inventory();

        assert!(registry.contains("registry-boxed"));
        assert_eq!(registry.render("Registry-Boxed", "a").as_deref(), Some("[a]"));
    }
}

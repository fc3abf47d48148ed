//! FiggleGenerator for hosts and build scripts
//!
//! This module provides a high-level API that runs a whole declaration
//! forest through a [`GenerationSession`] with minimal boilerplate.

use crate::build::GenerationOutput;
use crate::config::GeneratorConfig;
use crate::diagnostics::FiggleResult;
use crate::engine::GenerationSession;
use crate::host::{ForestResolver, SymbolResolver};
use crate::ir::DeclarationForest;
use crate::render::{FontRegistry, FontRenderer};
use std::path::Path;

/// Builder that drives one generation run
///
/// # Example
/// ```ignore
/// use figgle_gen::{FiggleGenerator, GeneratorConfig};
///
/// let output = FiggleGenerator::new()
///     .config(GeneratorConfig::load_from_dir(".")?)
///     .generate_to("obj/declarations.json", "obj/generated")?;
/// output.print_diagnostics();
/// ```
pub struct FiggleGenerator {
    config: GeneratorConfig,
    renderer: Box<dyn FontRenderer>,
}

impl FiggleGenerator {
    /// Create a generator rendering with the fonts in the inventory
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
            renderer: Box::new(FontRegistry::from_inventory()),
        }
    }

    /// Set the configuration
    pub fn config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the rendering service
    pub fn renderer(mut self, renderer: impl FontRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Run over a forest, resolving merged types from the forest itself
    pub fn run(&self, forest: &DeclarationForest) -> FiggleResult<GenerationOutput> {
        let resolver = ForestResolver::new(forest);
        self.run_with(forest, &resolver)
    }

    /// Run over a forest with a host-supplied resolver
    ///
    /// Every declaration, nested ones included, is visited once in source
    /// order. A resolution failure aborts the run.
    pub fn run_with<R>(&self, forest: &DeclarationForest, resolver: &R) -> FiggleResult<GenerationOutput>
    where
        R: SymbolResolver + ?Sized,
    {
        let mut session = GenerationSession::new(self.config.clone());
        for decl in forest.walk() {
            session.visit(decl, resolver)?;
        }
        Ok(session.finalize(self.renderer.as_ref()))
    }

    /// Read a forest from JSON, run, and write the fragments to `out_dir`
    pub fn generate_to(&self, forest_path: impl AsRef<Path>, out_dir: impl AsRef<Path>) -> FiggleResult<GenerationOutput> {
        let forest = DeclarationForest::from_file(forest_path)?;
        let output = self.run(&forest)?;
        output.write_to(out_dir)?;
        Ok(output)
    }
}

impl Default for FiggleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

//! # baler-bundler
//!
//! The I/O side of baler: loads project configuration, turns resolved
//! [`DependencySet`]s into compiled files via concatenation and an
//! optional external minifier, writes the per-unit manifests a page
//! assembler consumes, and expands manifests back into page URLs.
//!
//! Graph resolution itself lives in `baler-graph`; this crate only
//! consumes its output.

pub mod compile;
pub mod config;
pub mod error;
pub mod manifest;

pub use compile::{compile_units, output_name, to_physical, CompileOptions, CompiledUnit};
pub use config::{BalerConfig, DEFAULT_CONFIG_FILE};
pub use error::{BundleError, Result};
pub use manifest::{expand_manifest, manifest_name, render_manifest, write_manifest};

use baler_graph::DependencySet;

impl CompileOptions {
    /// Build compile options from a loaded config.
    pub fn from_config(config: &BalerConfig) -> Self {
        Self {
            out_dir: config.out_dir.clone(),
            remote_root: config.remote_root.clone(),
            remote_symbol: config.remote_symbol.clone(),
            tests_root: config.tests_root.clone(),
            minifier: config.minifier.clone(),
        }
    }
}

/// Resolve and partition one entry with a fresh session, then compile
/// every unit. Convenience wrapper over the two crates' primitives.
pub fn build_entry(
    entry: &std::path::Path,
    config: &BalerConfig,
) -> Result<(Vec<DependencySet>, Vec<CompiledUnit>)> {
    let resolver = baler_graph::Resolver::new(baler_graph::DiskFileSystem);
    let root = resolver.resolve(entry, config.resolve_options())?;
    let sets = baler_graph::partition(&root);
    let compiled = compile_units(&sets, &CompileOptions::from_config(config))?;
    Ok((sets, compiled))
}

//! Manifest files: the page-assembly side of a compile unit.
//!
//! A manifest lists one path per line, stylesheets first then packages.
//! Packages are rewritten to their compiled filenames unless the package
//! is a no-compile file, in which case its original path is kept so it can
//! be served raw. The reverse direction ([`expand_manifest`]) turns a
//! manifest back into page-relative URLs.

use std::fs;
use std::path::Path;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use baler_graph::{paths, DependencySet};

use crate::error::Result;

/// Manifest file name for a compiled output name: `main.js` -> `main.manifest`.
pub fn manifest_name(output_name: &str) -> String {
    let stem = Path::new(output_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| output_name.to_string());
    format!("{stem}.manifest")
}

/// Render a set's manifest: stylesheets, then packages.
pub fn render_manifest(
    set: &DependencySet,
    compiled_names: &FxHashMap<String, String>,
    no_compile: &FxHashSet<String>,
) -> String {
    let mut lines = Vec::with_capacity(set.stylesheets.len() + set.packages.len());
    lines.extend(set.stylesheets.iter().cloned());

    for package in &set.packages {
        if no_compile.contains(package) {
            lines.push(package.clone());
        } else if let Some(name) = compiled_names.get(package) {
            lines.push(name.clone());
        } else {
            // A package with no compiled unit of its own; keep the source
            // path rather than invent a name.
            lines.push(package.clone());
        }
    }

    let mut content = lines.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }
    content
}

pub fn write_manifest(
    set: &DependencySet,
    compiled_names: &FxHashMap<String, String>,
    no_compile: &FxHashSet<String>,
    path: &Path,
) -> Result<()> {
    fs::write(path, render_manifest(set, compiled_names, no_compile))?;
    debug!(manifest = %path.display(), "wrote manifest");
    Ok(())
}

/// Expand a manifest back into page URLs.
///
/// Remote-symbol-prefixed entries pass through unconverted; every other
/// entry is rewritten relative to `base`.
pub fn expand_manifest(manifest: &Path, base: &Path, remote_symbol: &str) -> Result<Vec<String>> {
    let content = fs::read_to_string(manifest)?;
    Ok(expand_lines(content.lines(), base, remote_symbol))
}

fn expand_lines<'a>(
    lines: impl Iterator<Item = &'a str>,
    base: &Path,
    remote_symbol: &str,
) -> Vec<String> {
    let prefix = format!("{remote_symbol}/");
    lines
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if line.starts_with(&prefix) {
                line.to_string()
            } else if Path::new(line).is_absolute() {
                paths::path_to_string(&paths::relative_to(base, Path::new(line)))
            } else {
                line.to_string()
            }
        })
        .collect()
}

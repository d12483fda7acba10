//! CLI error handling and miette conversion.
//!
//! Library errors stay thiserror enums; conversion to miette happens once
//! at the `main` boundary so fatal errors render with hints.

use std::path::PathBuf;

use miette::Report;
use thiserror::Error;

use baler_bundler::BundleError;
use baler_graph::GraphError;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("bundle error: {0}")]
    Bundle(#[from] BundleError),

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convert a CLI error into a miette diagnostic for terminal rendering.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Bundle(BundleError::Graph(graph)) | CliError::Graph(graph) => {
            graph_error_to_miette(graph)
        }
        CliError::Bundle(BundleError::ConfigNotFound(path)) => miette::miette!(
            "Config file not found: {}\n\nHint: create a baler.config.json or pass --config <path>",
            path.display()
        ),
        other => miette::miette!("{other}"),
    }
}

fn graph_error_to_miette(err: GraphError) -> Report {
    match err {
        GraphError::Recursion(path) => miette::miette!(
            "Circular dependency detected: {path}\n\nHint: a file requires itself, directly or transitively"
        ),
        GraphError::Parsing { missing, referenced_from } => miette::miette!(
            "Failed to resolve {missing}\nRequired from: {referenced_from}\n\nHint: check the annotation path, or enable muteMissing for best-effort builds"
        ),
        GraphError::MissingFile(path) => miette::miette!("Entry file not found: {path}"),
        other => miette::miette!("{other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recursion_renders_with_a_hint() {
        let report = cli_error_to_miette(CliError::Graph(GraphError::Recursion(
            "/srv/js/a.js".to_string(),
        )));
        let rendered = format!("{report}");
        assert!(rendered.contains("Circular dependency"));
        assert!(rendered.contains("/srv/js/a.js"));
    }

    #[test]
    fn wrapped_parsing_error_names_both_files() {
        let report = cli_error_to_miette(CliError::Bundle(BundleError::Graph(
            GraphError::Parsing {
                missing: "/srv/js/heeper.js".to_string(),
                referenced_from: "/srv/js/main.js".to_string(),
            },
        )));
        let rendered = format!("{report}");
        assert!(rendered.contains("heeper.js"));
        assert!(rendered.contains("main.js"));
    }
}

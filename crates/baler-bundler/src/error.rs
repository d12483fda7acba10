//! Error types for the compile and manifest stages.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BundleError>;

#[derive(Debug, Error)]
pub enum BundleError {
    #[error(transparent)]
    Graph(#[from] baler_graph::GraphError),

    #[error("config not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("invalid JSON in config file: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("dependency set is empty, no output name can be derived")]
    EmptyUnit,

    #[error("entries {first} and {second} both compile to {name}; rename one of them")]
    OutputNameCollision {
        name: String,
        first: String,
        second: String,
    },

    #[error("minifier command is empty")]
    MinifierNotConfigured,

    #[error("minifier exited with {0}")]
    MinifierFailed(ExitStatus),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

//! Error types for graph resolution.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors raised while resolving an annotation-declared dependency graph.
///
/// Resolution is fail-fast: the first unmuted `MissingFile` or any
/// `Recursion` aborts the whole top-level call, so no partial trees ever
/// escape the resolver.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A referenced or entry file does not exist.
    ///
    /// Fatal unless the session's missing-file policy is `Mute`, in which
    /// case the resolver substitutes an empty leaf node instead.
    #[error("missing file: {0}")]
    MissingFile(String),

    /// A `MissingFile` that occurred while resolving a dependency referenced
    /// from within another file. Carries both paths so the failure is
    /// traceable to its true origin.
    #[error("failed to resolve {missing} (required from {referenced_from})")]
    Parsing {
        missing: String,
        referenced_from: String,
    },

    /// A file requires itself, directly or transitively. Always fatal,
    /// never muted or wrapped.
    #[error("recursive dependency on {0}")]
    Recursion(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

//! Resolved dependency nodes.

use std::sync::Arc;

use crate::annotation::OrderEntry;

/// The resolved form of one source file.
///
/// Identity is the normalized logical path, which doubles as the session
/// cache key: a node is built at most once per path per session, and a
/// file required from several parents is shared by reference. The graph is
/// a DAG, so children are `Arc`-shared rather than copied, and nodes are
/// never mutated once the resolver returns them.
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyNode {
    /// Normalized logical path. For remote files this carries the symbolic
    /// remote prefix and deliberately diverges from the on-disk location.
    pub path: String,
    /// File is a package boundary (`@root`).
    pub is_root: bool,
    /// File is exempt from minification (`@nocompile`).
    pub is_no_compile: bool,
    /// File lives under the shared remote root.
    pub is_remote: bool,
    /// Required script dependencies, in annotation order.
    pub children: Vec<Arc<DependencyNode>>,
    /// Stylesheet references, as rewritten logical paths. Never resolved
    /// recursively.
    pub stylesheet_refs: Vec<String>,
    /// Paths of transitively reached `@root` descendants, up to the first
    /// package boundary on each branch.
    pub package_refs: Vec<String>,
    /// Interleaving of `children` and `stylesheet_refs` in file-scan order.
    pub order: Vec<OrderEntry>,
}

impl DependencyNode {
    /// An empty leaf: no annotations, no edges. Used for non-scannable
    /// extensions and for muted missing files.
    pub fn leaf(path: impl Into<String>, is_remote: bool) -> Self {
        Self {
            path: path.into(),
            is_root: false,
            is_no_compile: false,
            is_remote,
            children: Vec::new(),
            stylesheet_refs: Vec::new(),
            package_refs: Vec::new(),
            order: Vec::new(),
        }
    }
}

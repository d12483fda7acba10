//! Per-call resolution configuration and recursion state.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::node::DependencyNode;
use crate::paths;

/// What to do when a referenced file does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPolicy {
    /// Abort the whole resolution with an error.
    #[default]
    Fail,
    /// Substitute an empty leaf node and keep going. Supports best-effort
    /// builds where one broken reference should not block everything else.
    Mute,
}

/// Configuration for one top-level resolution.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Directory holding remote/shared assets.
    pub remote_root: PathBuf,
    /// Symbolic prefix substituted for the remote root in logical paths,
    /// e.g. `@remote`. The physical location is used only for I/O.
    pub remote_symbol: String,
    /// Root for `@tests`/`@testsRemote` arguments. Defaults to the entry
    /// file's directory when unset.
    pub tests_root: Option<PathBuf>,
    pub missing_policy: MissingPolicy,
}

impl ResolveOptions {
    pub fn new(remote_root: impl Into<PathBuf>, remote_symbol: impl Into<String>) -> Self {
        Self {
            remote_root: remote_root.into(),
            remote_symbol: remote_symbol.into(),
            tests_root: None,
            missing_policy: MissingPolicy::Fail,
        }
    }

    pub fn tests_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.tests_root = Some(root.into());
        self
    }

    pub fn missing_policy(mut self, policy: MissingPolicy) -> Self {
        self.missing_policy = policy;
        self
    }
}

/// Mutable state for one top-level `resolve()` call.
///
/// Owns the node cache, the recursion stack used for cycle detection, and
/// the remote-recursion bookkeeping. Must not be shared by two overlapping
/// resolutions: cache and stack contamination from one would corrupt the
/// other. Create a fresh session per independent entry point.
#[derive(Debug)]
pub struct Session {
    pub(crate) options: ResolveOptions,
    pub(crate) cache: FxHashMap<String, Arc<DependencyNode>>,
    pub(crate) stack: Vec<String>,
    pub(crate) remote_depth: usize,
    /// Base directories of enclosing `@requireRemote`/`@testsRemote`
    /// arguments; joined to reconstruct the remote-relative position of
    /// locally-required files nested inside a remote file.
    pub(crate) remote_prefixes: Vec<String>,
    /// Physical roots the remote recursion entered under: the remote root
    /// for `@requireRemote`, the tests root for `@testsRemote`. Nested
    /// requires resolve against the innermost entry, so a file pulled in
    /// through the tests root finds its siblings there.
    pub(crate) remote_roots: Vec<PathBuf>,
}

impl Session {
    pub fn new(options: ResolveOptions) -> Self {
        Self {
            options,
            cache: FxHashMap::default(),
            stack: Vec::new(),
            remote_depth: 0,
            remote_prefixes: Vec::new(),
            remote_roots: Vec::new(),
        }
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Fill in the tests root default from the entry file's directory.
    pub(crate) fn default_tests_root(&mut self, entry_dir: &Path) {
        if self.options.tests_root.is_none() {
            self.options.tests_root = Some(entry_dir.to_path_buf());
        }
    }

    pub(crate) fn in_remote(&self) -> bool {
        self.remote_depth > 0
    }

    /// Joined remote-relative prefix for the current recursion position.
    pub(crate) fn remote_prefix(&self) -> String {
        let mut prefix = String::new();
        for dir in self.remote_prefixes.iter().filter(|d| !d.is_empty()) {
            prefix = paths::join_normalized(&prefix, dir);
        }
        prefix
    }

    /// Physical root of the innermost remote recursion, falling back to
    /// the configured remote root outside one.
    pub(crate) fn remote_base_root(&self) -> &Path {
        self.remote_roots
            .last()
            .map(PathBuf::as_path)
            .unwrap_or(&self.options.remote_root)
    }

    pub(crate) fn enter_remote(&mut self, base_dir: String, root: PathBuf) {
        self.remote_prefixes.push(base_dir);
        self.remote_roots.push(root);
        self.remote_depth += 1;
    }

    pub(crate) fn leave_remote(&mut self) {
        self.remote_prefixes.pop();
        self.remote_roots.pop();
        self.remote_depth -= 1;
    }
}

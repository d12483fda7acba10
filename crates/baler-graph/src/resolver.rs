//! The annotation-driven dependency resolver.
//!
//! `resolve()` turns one entry path into a cached, cycle-checked
//! [`DependencyNode`] graph. Each annotation occurrence dispatches to its
//! kind's handler; require-like kinds recurse, style kinds only verify
//! existence. Resolution is fail-fast: the first unmuted missing file or
//! any recursion aborts the whole call.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::annotation::{self, AnnotationKind, OrderEntry, RESOLVER_KINDS};
use crate::error::{GraphError, Result};
use crate::node::DependencyNode;
use crate::paths;
use crate::session::{MissingPolicy, ResolveOptions, Session};
use crate::source::{FileSystem, SourceHandle};

/// Resolves entry files into dependency graphs over a [`FileSystem`].
#[derive(Debug)]
pub struct Resolver<F: FileSystem> {
    fs: F,
}

impl<F: FileSystem> Resolver<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    pub fn file_system(&self) -> &F {
        &self.fs
    }

    /// Resolve `entry` in a fresh session.
    pub fn resolve(&self, entry: &Path, options: ResolveOptions) -> Result<Arc<DependencyNode>> {
        let mut session = Session::new(options);
        self.resolve_in(entry, &mut session)
    }

    /// Resolve `entry` inside an existing session.
    ///
    /// The session must not be shared with an overlapping resolution; its
    /// cache and recursion stack belong to one top-level call at a time.
    pub fn resolve_in(&self, entry: &Path, session: &mut Session) -> Result<Arc<DependencyNode>> {
        let handle = SourceHandle::from_path(entry);
        session.default_tests_root(handle.directory());

        let logical = paths::path_to_string(handle.path());
        debug!(entry = %logical, "resolving dependency graph");
        self.resolve_node(&logical, handle.path(), false, session)
    }

    /// Resolve one node. `logical` is the cache identity; `physical` is
    /// where the bytes actually live (they diverge for remote files).
    fn resolve_node(
        &self,
        logical: &str,
        physical: &Path,
        mark_remote: bool,
        session: &mut Session,
    ) -> Result<Arc<DependencyNode>> {
        if let Some(node) = session.cache.get(logical) {
            trace!(path = %logical, "cache hit");
            return Ok(node.clone());
        }
        if session.stack.iter().any(|entry| entry == logical) {
            return Err(GraphError::Recursion(logical.to_string()));
        }

        if !self.fs.exists(physical) {
            match session.options.missing_policy {
                MissingPolicy::Fail => return Err(GraphError::MissingFile(logical.to_string())),
                MissingPolicy::Mute => {
                    debug!(path = %logical, "missing file muted, substituting empty leaf");
                    return Ok(self.finish(DependencyNode::leaf(logical, mark_remote), session));
                }
            }
        }

        let handle = SourceHandle::from_path(physical);
        if !handle.is_annotatable() {
            return Ok(self.finish(DependencyNode::leaf(logical, mark_remote), session));
        }

        session.stack.push(logical.to_string());
        let built = self.scan_node(logical, &handle, mark_remote, session);
        session.stack.pop();

        Ok(self.finish(built?, session))
    }

    /// Cache a finished node under its identity.
    fn finish(&self, node: DependencyNode, session: &mut Session) -> Arc<DependencyNode> {
        let node = Arc::new(node);
        session.cache.insert(node.path.clone(), node.clone());
        node
    }

    fn scan_node(
        &self,
        logical: &str,
        handle: &SourceHandle,
        mark_remote: bool,
        session: &mut Session,
    ) -> Result<DependencyNode> {
        let lines = self.fs.read_lines(handle.path())?;
        let annotations = annotation::extract(&lines, RESOLVER_KINDS);

        let mut node = DependencyNode::leaf(logical, mark_remote);
        for entry in annotations.order() {
            match entry.kind {
                AnnotationKind::Root => node.is_root = true,
                AnnotationKind::NoCompile => node.is_no_compile = true,
                AnnotationKind::Require => {
                    let arg = &annotations.arguments(entry.kind)[entry.index];
                    self.require_local(arg, handle, logical, &mut node, session)?;
                }
                AnnotationKind::RequireRemote => {
                    let arg = &annotations.arguments(entry.kind)[entry.index];
                    self.require_remote(arg, RemoteBase::Remote, handle, logical, &mut node, session)?;
                }
                AnnotationKind::Tests => {
                    let arg = &annotations.arguments(entry.kind)[entry.index];
                    self.require_tests(arg, handle, logical, &mut node, session)?;
                }
                AnnotationKind::TestsRemote => {
                    let arg = &annotations.arguments(entry.kind)[entry.index];
                    self.require_remote(arg, RemoteBase::Tests, handle, logical, &mut node, session)?;
                }
                AnnotationKind::RequireStyle => {
                    let arg = &annotations.arguments(entry.kind)[entry.index];
                    self.require_style(arg, false, handle, logical, &mut node, session)?;
                }
                AnnotationKind::RequireRemoteStyle => {
                    let arg = &annotations.arguments(entry.kind)[entry.index];
                    self.require_style(arg, true, handle, logical, &mut node, session)?;
                }
            }
        }
        Ok(node)
    }

    /// `@require`: relative to the current file's directory, or to the
    /// position reconstructed from the recursed-path stack when nested
    /// inside a remote file.
    fn require_local(
        &self,
        arg: &str,
        handle: &SourceHandle,
        referenced_from: &str,
        node: &mut DependencyNode,
        session: &mut Session,
    ) -> Result<()> {
        let child = if session.in_remote() {
            let rel = paths::join_normalized(&session.remote_prefix(), arg);
            let physical = session.remote_base_root().join(&rel);
            let logical = paths::join_normalized(&session.options.remote_symbol, &rel);
            self.resolve_child(&logical, &physical, true, referenced_from, session)?
        } else {
            let child_handle = SourceHandle::from_path(handle.directory().join(arg));
            let logical = paths::path_to_string(child_handle.path());
            self.resolve_child(&logical, child_handle.path(), false, referenced_from, session)?
        };
        push_child(node, child);
        Ok(())
    }

    /// `@requireRemote` / `@testsRemote`: relative to the remote (or tests)
    /// root, with the logical path rewritten under the remote symbol. The
    /// argument's base directory and the physical root it resolved against
    /// are pushed onto the recursed-path stack for the duration of the
    /// recursion, so requires nested inside the file stay under that root.
    fn require_remote(
        &self,
        arg: &str,
        base: RemoteBase,
        handle: &SourceHandle,
        referenced_from: &str,
        node: &mut DependencyNode,
        session: &mut Session,
    ) -> Result<()> {
        let rel = paths::normalize(arg);
        let root = match base {
            RemoteBase::Remote => session.options.remote_root.clone(),
            RemoteBase::Tests => self.tests_root(handle, session),
        };
        let physical = root.join(&rel);
        let logical = paths::join_normalized(&session.options.remote_symbol, &rel);

        session.enter_remote(paths::parent(&rel), root);
        let resolved = self.resolve_child(&logical, &physical, true, referenced_from, session);
        session.leave_remote();

        push_child(node, resolved?);
        Ok(())
    }

    /// `@tests`: like `@require`, but against the tests source root.
    fn require_tests(
        &self,
        arg: &str,
        handle: &SourceHandle,
        referenced_from: &str,
        node: &mut DependencyNode,
        session: &mut Session,
    ) -> Result<()> {
        let child_handle = SourceHandle::from_path(self.tests_root(handle, session).join(arg));
        let logical = paths::path_to_string(child_handle.path());
        let child = self.resolve_child(&logical, child_handle.path(), false, referenced_from, session)?;
        push_child(node, child);
        Ok(())
    }

    /// `@requireStyle` / `@requireRemoteStyle`: verify existence, record
    /// the (possibly remote-rewritten) reference, never recurse.
    fn require_style(
        &self,
        arg: &str,
        remote_kind: bool,
        handle: &SourceHandle,
        referenced_from: &str,
        node: &mut DependencyNode,
        session: &mut Session,
    ) -> Result<()> {
        let (reference, physical) = if remote_kind {
            let rel = paths::normalize(arg);
            (
                paths::join_normalized(&session.options.remote_symbol, &rel),
                session.options.remote_root.join(&rel),
            )
        } else if session.in_remote() {
            let rel = paths::join_normalized(&session.remote_prefix(), arg);
            (
                paths::join_normalized(&session.options.remote_symbol, &rel),
                session.remote_base_root().join(&rel),
            )
        } else {
            let style_handle = SourceHandle::from_path(handle.directory().join(arg));
            (
                paths::path_to_string(style_handle.path()),
                style_handle.path().to_path_buf(),
            )
        };

        if !self.fs.exists(&physical) {
            match session.options.missing_policy {
                MissingPolicy::Fail => {
                    return Err(GraphError::Parsing {
                        missing: reference,
                        referenced_from: referenced_from.to_string(),
                    });
                }
                MissingPolicy::Mute => {
                    debug!(stylesheet = %reference, "missing stylesheet muted");
                }
            }
        }

        let index = node.stylesheet_refs.len();
        node.stylesheet_refs.push(reference);
        node.order.push(OrderEntry { kind: AnnotationKind::RequireStyle, index });
        Ok(())
    }

    /// Recurse into a dependency, rewrapping a bare `MissingFile` so the
    /// failure names the file that referenced it. `Parsing` already carries
    /// its true origin and `Recursion` is never wrapped.
    fn resolve_child(
        &self,
        logical: &str,
        physical: &Path,
        mark_remote: bool,
        referenced_from: &str,
        session: &mut Session,
    ) -> Result<Arc<DependencyNode>> {
        self.resolve_node(logical, physical, mark_remote, session)
            .map_err(|err| match err {
                GraphError::MissingFile(missing) => GraphError::Parsing {
                    missing,
                    referenced_from: referenced_from.to_string(),
                },
                other => other,
            })
    }

    fn tests_root(&self, handle: &SourceHandle, session: &Session) -> std::path::PathBuf {
        session
            .options
            .tests_root
            .clone()
            .unwrap_or_else(|| handle.directory().to_path_buf())
    }
}

/// Which root a remote-flavored require resolves against.
#[derive(Debug, Clone, Copy)]
enum RemoteBase {
    Remote,
    Tests,
}

/// Append a resolved child: record the require-kind order entry and fold
/// package references upward. A `@root` child contributes itself; a plain
/// child contributes the roots it reached.
fn push_child(node: &mut DependencyNode, child: Arc<DependencyNode>) {
    if child.is_root {
        if !node.package_refs.contains(&child.path) {
            node.package_refs.push(child.path.clone());
        }
    } else {
        for package in &child.package_refs {
            if !node.package_refs.contains(package) {
                node.package_refs.push(package.clone());
            }
        }
    }

    let index = node.children.len();
    node.children.push(child);
    node.order.push(OrderEntry { kind: AnnotationKind::Require, index });
}

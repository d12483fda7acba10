//! # baler-graph
//!
//! Dependency graph resolution for browser JS/CSS trees that have no
//! module system. Source files declare their edges through comment
//! annotations (`@require`, `@requireStyle`, `@root`, `@nocompile`,
//! `@tests`, and remote variants of each); this crate scans those
//! annotations, builds a cached, cycle-checked [`DependencyNode`] graph
//! across two source roots (the file's own tree and a shared "remote"
//! root addressed by a symbolic prefix), and partitions the graph into an
//! ordered, deduplicated sequence of compile units.
//!
//! The resolver is synchronous and session-scoped: one [`Session`] per
//! top-level [`Resolver::resolve`] call owns all recursion state, so
//! independent resolutions never contaminate each other. Output order is
//! script-load order and is deterministic.
//!
//! ```rust
//! use std::path::Path;
//! use baler_graph::{partition, MemoryFileSystem, ResolveOptions, Resolver};
//!
//! # fn main() -> baler_graph::Result<()> {
//! let mut fs = MemoryFileSystem::new();
//! fs.add_file("/srv/js/main.js", "// @require util.js");
//! fs.add_file("/srv/js/util.js", "");
//!
//! let resolver = Resolver::new(fs);
//! let root = resolver.resolve(
//!     Path::new("/srv/js/main.js"),
//!     ResolveOptions::new("/srv/shared", "@remote"),
//! )?;
//!
//! let units = partition(&root);
//! assert_eq!(units[0].dependencies, ["/srv/js/util.js", "/srv/js/main.js"]);
//! # Ok(())
//! # }
//! ```

pub mod annotation;
pub mod error;
pub mod node;
pub mod partition;
pub mod paths;
pub mod resolver;
pub mod session;
pub mod source;

pub use annotation::{extract, AnnotationKind, AnnotationSet, OrderEntry, RESOLVER_KINDS};
pub use error::{GraphError, Result};
pub use node::DependencyNode;
pub use partition::{partition, DependencySet};
pub use resolver::Resolver;
pub use session::{MissingPolicy, ResolveOptions, Session};
pub use source::{DiskFileSystem, FileSystem, MemoryFileSystem, SourceHandle};

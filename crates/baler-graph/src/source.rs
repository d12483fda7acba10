//! Filesystem capability and source file handles.
//!
//! The resolver depends only on the [`FileSystem`] trait, so any conforming
//! backing store works: real disk for builds, an in-memory map for tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use path_clean::PathClean;
use rustc_hash::FxHashMap;

use crate::error::Result;

/// Read access to source files.
///
/// Resolution is a blocking recursive descent, so the capability is
/// synchronous by design.
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;
    fn read_lines(&self, path: &Path) -> Result<Vec<String>>;
}

/// Disk-backed [`FileSystem`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskFileSystem;

impl FileSystem for DiskFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_lines(&self, path: &Path) -> Result<Vec<String>> {
        let content = fs::read_to_string(path)?;
        Ok(content.lines().map(str::to_string).collect())
    }
}

/// In-memory [`FileSystem`] keyed by cleaned paths.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: FxHashMap<PathBuf, String>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file. The path is cleaned before storage so lookups with
    /// redundant components still hit.
    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.insert(path.into().clean(), content.into());
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(&path.to_path_buf().clean())
    }

    fn read_lines(&self, path: &Path) -> Result<Vec<String>> {
        let content = self.files.get(&path.to_path_buf().clean()).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, path.display().to_string())
        })?;
        Ok(content.lines().map(str::to_string).collect())
    }
}

/// Decomposed view of one source file path.
///
/// Immutable once created; purely a naming convenience around the pieces
/// the resolver and the compile stage keep asking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceHandle {
    path: PathBuf,
    directory: PathBuf,
    stem: String,
    extension: String,
}

impl SourceHandle {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into().clean();
        let directory = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self { path, directory, stem, extension }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Only JavaScript sources carry annotations worth scanning.
    pub fn is_annotatable(&self) -> bool {
        self.extension == "js"
    }
}

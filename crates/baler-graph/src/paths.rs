//! Path normalization helpers for logical asset paths.
//!
//! Logical paths are plain `/`-separated strings. They may carry a symbolic
//! prefix (e.g. `@remote/widgets/grid.js`) that never exists on disk, so
//! normalization has to work on the string form rather than canonicalizing
//! against the filesystem.

use std::path::{Component, Path, PathBuf};

use path_clean::PathClean;

/// Collapse `.` and `..` components of a logical path.
///
/// `a/b/../c.js` becomes `a/c.js`; a symbolic prefix is preserved as an
/// ordinary leading component. Leading `..` components that escape the
/// root are kept as-is.
pub fn normalize(path: &str) -> String {
    path_to_string(&PathBuf::from(path).clean())
}

/// Join `base` and `tail` and normalize the result.
///
/// An empty `base` yields the normalized `tail` alone, which keeps joins
/// against a top-level remote prefix from growing a leading slash.
pub fn join_normalized(base: &str, tail: &str) -> String {
    if base.is_empty() {
        normalize(tail)
    } else {
        normalize(&format!("{base}/{tail}"))
    }
}

/// Directory portion of a logical path, without a trailing separator.
///
/// Returns an empty string for bare file names.
pub fn parent(path: &str) -> String {
    match path.rsplit_once('/') {
        Some((dir, _)) => dir.to_string(),
        None => String::new(),
    }
}

/// Compute the relative path from the directory `base` to `target`.
///
/// Both paths must be absolute. Components shared by both are stripped and
/// each remaining `base` component becomes one `..` step.
pub fn relative_to(base: &Path, target: &Path) -> PathBuf {
    let base: Vec<Component> = base.components().collect();
    let target: Vec<Component> = target.components().collect();

    let common = base
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base.len() {
        relative.push("..");
    }
    for component in &target[common..] {
        relative.push(component);
    }
    relative
}

/// Render a `Path` as a `/`-separated logical string.
pub fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_parent_components() {
        assert_eq!(normalize("a/b/../c.js"), "a/c.js");
        assert_eq!(normalize("./a/./b.js"), "a/b.js");
        assert_eq!(normalize("@remote/sub/../grid.js"), "@remote/grid.js");
    }

    #[test]
    fn normalize_keeps_escaping_components() {
        assert_eq!(normalize("../shared/a.js"), "../shared/a.js");
    }

    #[test]
    fn join_normalized_handles_empty_base() {
        assert_eq!(join_normalized("", "grid.js"), "grid.js");
        assert_eq!(join_normalized("widgets", "../grid.js"), "grid.js");
        assert_eq!(join_normalized("widgets/table", "rows.js"), "widgets/table/rows.js");
    }

    #[test]
    fn parent_of_bare_name_is_empty() {
        assert_eq!(parent("grid.js"), "");
        assert_eq!(parent("widgets/grid.js"), "widgets");
    }

    #[test]
    fn relative_to_walks_up_and_down() {
        let rel = relative_to(Path::new("/srv/js/widgets"), Path::new("/srv/css/grid.css"));
        assert_eq!(rel, PathBuf::from("../../css/grid.css"));

        let rel = relative_to(Path::new("/srv/js"), Path::new("/srv/js/app/main.js"));
        assert_eq!(rel, PathBuf::from("app/main.js"));
    }
}

//! The compile stage: dependency sets to compiled files on disk.
//!
//! Each dependency set becomes one output file named after the set's
//! defining entry. Dependencies are concatenated in order, no-compile
//! files are skipped, and the result is optionally piped through an
//! external minifier process.

use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info, warn};

use baler_graph::DependencySet;

use crate::error::{BundleError, Result};
use crate::manifest;

/// Settings for one compile run.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    pub out_dir: PathBuf,
    pub remote_root: PathBuf,
    pub remote_symbol: String,
    /// Tests-source root, when the project keeps one. Used to read back
    /// symbolic paths whose files were pulled in through `@testsRemote`.
    pub tests_root: Option<PathBuf>,
    /// Minifier program and arguments; `None` concatenates verbatim.
    pub minifier: Option<Vec<String>>,
}

/// Files written for one dependency set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledUnit {
    pub output: PathBuf,
    pub manifest: PathBuf,
}

/// Map a logical path back to its on-disk location.
///
/// Remote-symbol-prefixed paths normally live under the remote root, but
/// a file pulled in through `@testsRemote` carries the same symbolic
/// prefix while living under the tests root. When the remote-root
/// candidate does not exist and a tests root is configured, readback
/// falls back to the tests root.
pub fn to_physical(logical: &str, options: &CompileOptions) -> PathBuf {
    let prefix = format!("{}/", options.remote_symbol);
    let Some(rest) = logical.strip_prefix(&prefix) else {
        return PathBuf::from(logical);
    };
    let candidate = options.remote_root.join(rest);
    if !candidate.exists() {
        if let Some(tests_root) = &options.tests_root {
            let fallback = tests_root.join(rest);
            if fallback.exists() {
                return fallback;
            }
        }
    }
    candidate
}

/// Output file name for a set: the defining entry's stem plus `.js`.
pub fn output_name(set: &DependencySet) -> Result<String> {
    let defining = set.defining_path().ok_or(BundleError::EmptyUnit)?;
    let stem = Path::new(defining)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or(BundleError::EmptyUnit)?;
    Ok(format!("{stem}.js"))
}

/// Compile every set and write its manifest, dependency-first.
pub fn compile_units(sets: &[DependencySet], options: &CompileOptions) -> Result<Vec<CompiledUnit>> {
    // Cross-unit views the manifest writer needs: which compiled file a
    // package boundary maps to, and which files are exempt from compiling.
    // Two units whose defining entries share a stem would overwrite each
    // other's output, so name claims are checked here before any writes.
    let mut compiled_names: FxHashMap<String, String> = FxHashMap::default();
    let mut claimed: FxHashMap<String, String> = FxHashMap::default();
    let mut no_compile: FxHashSet<String> = FxHashSet::default();
    for set in sets {
        if let Some(defining) = set.defining_path() {
            let name = output_name(set)?;
            if let Some(first) = claimed.get(&name) {
                if first != defining {
                    return Err(BundleError::OutputNameCollision {
                        name,
                        first: first.clone(),
                        second: defining.to_string(),
                    });
                }
            } else {
                claimed.insert(name.clone(), defining.to_string());
            }
            compiled_names.insert(defining.to_string(), name);
        }
        no_compile.extend(set.no_compile_paths.iter().cloned());
    }

    fs::create_dir_all(&options.out_dir)?;

    let mut compiled = Vec::with_capacity(sets.len());
    for set in sets {
        compiled.push(compile_set(set, options, &compiled_names, &no_compile)?);
    }
    Ok(compiled)
}

fn compile_set(
    set: &DependencySet,
    options: &CompileOptions,
    compiled_names: &FxHashMap<String, String>,
    no_compile: &FxHashSet<String>,
) -> Result<CompiledUnit> {
    let name = output_name(set)?;
    let output = options.out_dir.join(&name);

    let mut source = String::new();
    for dependency in &set.dependencies {
        if set.no_compile_paths.contains(dependency) {
            debug!(path = %dependency, "skipping no-compile file");
            continue;
        }
        let physical = to_physical(dependency, options);
        source.push_str(&fs::read_to_string(&physical)?);
        if !source.ends_with('\n') {
            source.push('\n');
        }
    }

    let compiled = match &options.minifier {
        Some(command) => minify(source, command)?,
        None => source,
    };
    fs::write(&output, compiled)?;
    info!(output = %output.display(), "wrote compile unit");

    let manifest = options
        .out_dir
        .join(manifest::manifest_name(&name));
    manifest::write_manifest(set, compiled_names, no_compile, &manifest)?;

    Ok(CompiledUnit { output, manifest })
}

/// Pipe `source` through the external minifier.
///
/// stdin is fed and stderr drained on their own threads so the child
/// never blocks on a full pipe while we read stdout.
fn minify(source: String, command: &[String]) -> Result<String> {
    let (program, args) = command.split_first().ok_or(BundleError::MinifierNotConfigured)?;
    debug!(program = %program, "spawning minifier");

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| BundleError::InvalidConfig("minifier stdin unavailable".to_string()))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| BundleError::InvalidConfig("minifier stderr unavailable".to_string()))?;
    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| BundleError::InvalidConfig("minifier stdout unavailable".to_string()))?;

    let writer = thread::spawn(move || {
        let _ = stdin.write_all(source.as_bytes());
    });
    let pump = thread::spawn(move || {
        for line in BufReader::new(stderr).lines().map_while(std::result::Result::ok) {
            warn!(target: "minifier", "{line}");
        }
    });

    let mut minified = String::new();
    stdout.read_to_string(&mut minified)?;
    let status = child.wait()?;

    let _ = writer.join();
    let _ = pump.join();

    if !status.success() {
        return Err(BundleError::MinifierFailed(status));
    }
    Ok(minified)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(dependencies: &[&str], no_compile: &[&str]) -> DependencySet {
        DependencySet {
            stylesheets: Vec::new(),
            packages: Vec::new(),
            dependencies: dependencies.iter().map(|s| s.to_string()).collect(),
            no_compile_paths: no_compile.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn output_name_comes_from_the_defining_entry() {
        let unit = set(&["/srv/js/dep.js", "/srv/js/main.js"], &[]);
        assert_eq!(output_name(&unit).unwrap(), "main.js");
    }

    #[test]
    fn empty_set_has_no_output_name() {
        assert!(matches!(output_name(&set(&[], &[])), Err(BundleError::EmptyUnit)));
    }

    fn options_in(dir: &Path) -> CompileOptions {
        CompileOptions {
            out_dir: dir.join("dist"),
            remote_root: dir.join("shared"),
            remote_symbol: "@remote".to_string(),
            tests_root: None,
            minifier: None,
        }
    }

    #[test]
    fn to_physical_maps_remote_paths_under_the_remote_root() {
        let options = options_in(Path::new("/srv"));

        let physical = to_physical("@remote/widgets/grid.js", &options);
        assert_eq!(physical, PathBuf::from("/srv/shared/widgets/grid.js"));

        let local = to_physical("/srv/js/main.js", &options);
        assert_eq!(local, PathBuf::from("/srv/js/main.js"));
    }

    #[test]
    fn to_physical_falls_back_to_the_tests_root() {
        let dir = tempfile::tempdir().unwrap();
        let tests = dir.path().join("tests");
        fs::create_dir_all(dir.path().join("shared")).unwrap();
        fs::create_dir_all(&tests).unwrap();
        fs::write(tests.join("suite.js"), "var suite = 1;\n").unwrap();
        fs::write(dir.path().join("shared/grid.js"), "var grid = 1;\n").unwrap();

        let mut options = options_in(dir.path());
        options.tests_root = Some(tests.clone());

        // Absent under the remote root, present under the tests root.
        assert_eq!(to_physical("@remote/suite.js", &options), tests.join("suite.js"));
        // The remote root still wins when the file exists there.
        assert_eq!(
            to_physical("@remote/grid.js", &options),
            dir.path().join("shared/grid.js")
        );
    }

    #[test]
    fn compile_concatenates_dependency_first_and_skips_no_compile() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("dep.js"), "var dep = 1;\n").unwrap();
        fs::write(src.join("vendor.js"), "var vendor = 1;\n").unwrap();
        fs::write(src.join("main.js"), "var main = 1;\n").unwrap();

        let dep = src.join("dep.js").display().to_string();
        let vendor = src.join("vendor.js").display().to_string();
        let main = src.join("main.js").display().to_string();
        let unit = DependencySet {
            stylesheets: Vec::new(),
            packages: Vec::new(),
            dependencies: vec![dep, vendor.clone(), main],
            no_compile_paths: vec![vendor],
        };

        let options = options_in(dir.path());
        let compiled = compile_units(std::slice::from_ref(&unit), &options).unwrap();

        let content = fs::read_to_string(&compiled[0].output).unwrap();
        assert_eq!(content, "var dep = 1;\nvar main = 1;\n");
        assert!(compiled[0].manifest.exists());
    }

    #[test]
    fn colliding_output_names_are_rejected() {
        // Two entries named main.js in different directories would both
        // compile to dist/main.js.
        let dir = tempfile::tempdir().unwrap();
        let units = [set(&["/srv/a/main.js"], &[]), set(&["/srv/b/main.js"], &[])];

        let err = compile_units(&units, &options_in(dir.path())).unwrap_err();
        match err {
            BundleError::OutputNameCollision { name, first, second } => {
                assert_eq!(name, "main.js");
                assert_eq!(first, "/srv/a/main.js");
                assert_eq!(second, "/srv/b/main.js");
            }
            other => panic!("expected OutputNameCollision, got {other:?}"),
        }
        assert!(!dir.path().join("dist").exists());
    }

    #[test]
    fn minify_runs_the_external_command() {
        // `cat` is a good enough stand-in for a minifier on any unix box.
        let out = minify("var a = 1;\n".to_string(), &["cat".to_string()]).unwrap();
        assert_eq!(out, "var a = 1;\n");
    }

    #[test]
    fn failing_minifier_surfaces_its_status() {
        let err = minify("x".to_string(), &["false".to_string()]).unwrap_err();
        assert!(matches!(err, BundleError::MinifierFailed(_)));
    }
}

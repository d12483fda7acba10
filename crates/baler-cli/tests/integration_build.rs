//! End-to-end tests for the baler binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Lay out a small annotated project and return its root.
fn fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    let shared = dir.path().join("shared");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&shared).unwrap();

    fs::write(
        src.join("main.js"),
        "// @require util.js\n// @requireStyle app.css\n// @require widgets.js\nvar main = 1;\n",
    )
    .unwrap();
    fs::write(src.join("util.js"), "var util = 1;\n").unwrap();
    fs::write(src.join("app.css"), "body {}\n").unwrap();
    fs::write(src.join("widgets.js"), "// @root\nvar widgets = 1;\n").unwrap();

    write_config(dir.path());
    dir
}

fn write_config(root: &Path) {
    let config = serde_json::json!({
        "entry": [root.join("src/main.js")],
        "outDir": root.join("dist"),
        "remoteRoot": root.join("shared"),
    });
    fs::write(
        root.join("baler.config.json"),
        serde_json::to_string_pretty(&config).unwrap(),
    )
    .unwrap();
}

fn baler(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("baler").unwrap();
    cmd.current_dir(root).arg("--no-color");
    cmd
}

#[test]
fn build_writes_compiled_units_and_manifests() {
    let dir = fixture();

    baler(dir.path()).arg("build").assert().success();

    let compiled = fs::read_to_string(dir.path().join("dist/main.js")).unwrap();
    assert!(compiled.contains("var util = 1;"));
    assert!(compiled.contains("var main = 1;"));
    // The @root package compiles separately, not inline.
    assert!(!compiled.contains("var widgets = 1;"));
    assert!(dir.path().join("dist/widgets.js").exists());

    let manifest = fs::read_to_string(dir.path().join("dist/main.manifest")).unwrap();
    let mut lines = manifest.lines();
    assert!(lines.next().unwrap().ends_with("app.css"));
    assert_eq!(lines.next().unwrap(), "widgets.js");
}

#[test]
fn graph_prints_the_plan_without_writing() {
    let dir = fixture();

    baler(dir.path())
        .args(["graph", dir.path().join("src/main.js").to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("unit 1"))
        .stdout(predicate::str::contains("widgets.js"));

    assert!(!dir.path().join("dist").exists());
}

#[test]
fn graph_json_emits_dependency_sets() {
    let dir = fixture();

    baler(dir.path())
        .args(["graph", "--json", dir.path().join("src/main.js").to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"dependencies\""))
        .stdout(predicate::str::contains("\"noCompilePaths\""));
}

#[test]
fn check_validates_the_project() {
    let dir = fixture();

    baler(dir.path())
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains("all checks passed"));
}

#[test]
fn missing_dependency_fails_with_both_paths() {
    let dir = fixture();
    fs::write(
        dir.path().join("src/main.js"),
        "// @require heeper.js\n",
    )
    .unwrap();

    baler(dir.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("heeper.js"))
        .stderr(predicate::str::contains("main.js"));
}

#[test]
fn mute_missing_builds_past_broken_references() {
    let dir = fixture();
    fs::write(
        dir.path().join("src/main.js"),
        "// @require heeper.js\nvar main = 1;\n",
    )
    .unwrap();

    baler(dir.path())
        .args(["build", "--mute-missing"])
        .assert()
        .success();

    let compiled = fs::read_to_string(dir.path().join("dist/main.js")).unwrap();
    assert!(compiled.contains("var main = 1;"));
}

#[test]
fn dependency_cycle_is_reported_as_circular() {
    let dir = fixture();
    fs::write(dir.path().join("src/main.js"), "// @require a.js\n").unwrap();
    fs::write(dir.path().join("src/a.js"), "// @require main.js\n").unwrap();

    baler(dir.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Circular dependency"));
}

#[test]
fn expand_rewrites_a_manifest_to_page_urls() {
    let dir = fixture();
    baler(dir.path()).arg("build").assert().success();

    let pages = dir.path().join("pages");
    fs::create_dir_all(&pages).unwrap();

    baler(dir.path())
        .args([
            "expand",
            dir.path().join("dist/main.manifest").to_str().unwrap(),
            "--base",
            pages.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("../src/app.css"))
        .stdout(predicate::str::contains("widgets.js"));
}

#[test]
fn missing_config_is_a_clear_error() {
    let dir = tempfile::tempdir().unwrap();

    baler(dir.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("baler.config.json"));
}

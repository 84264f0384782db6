//! Integration tests driving the binary end to end.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn next_prune() -> Command {
    Command::cargo_bin("next-prune").unwrap()
}

fn dir_with_file(root: &Path, rel: &str) {
    let dir = root.join(rel);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("payload.bin"), "x".repeat(1000)).unwrap();
}

/// A small Next.js project with an artifact and a node_modules tree.
fn create_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("package.json"), r#"{"name": "site"}"#).unwrap();
    fs::write(tmp.path().join("next.config.js"), "module.exports = {};\n").unwrap();
    dir_with_file(tmp.path(), ".next");
    dir_with_file(tmp.path(), "node_modules/lodash");
    tmp
}

#[test]
fn default_run_reports_without_deleting() {
    let tmp = create_project();

    next_prune()
        .arg("--cwd")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(".next"))
        .stdout(predicate::str::contains("--yes"));

    assert!(tmp.path().join(".next").exists());
    assert!(tmp.path().join("node_modules").exists());
}

#[test]
fn dry_run_preserves_tree() {
    let tmp = create_project();

    next_prune()
        .arg("--dry-run")
        .arg("--cwd")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Would delete"))
        .stdout(predicate::str::contains(".next"));

    assert!(tmp.path().join(".next").exists());
    assert!(tmp.path().join(".next/payload.bin").exists());
}

#[test]
fn apply_refusal_for_protected_selection() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("package.json"), "{}").unwrap();
    dir_with_file(tmp.path(), "node_modules/dep");

    next_prune()
        .arg("--yes")
        .arg("--cwd")
        .arg(tmp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("--apply"));

    assert!(tmp.path().join("node_modules/dep/payload.bin").exists());
}

#[test]
fn yes_with_apply_deletes_protected() {
    let tmp = TempDir::new().unwrap();
    dir_with_file(tmp.path(), "node_modules/dep");

    next_prune()
        .arg("--yes")
        .arg("--apply")
        .arg("--cwd")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted"));

    assert!(!tmp.path().join("node_modules").exists());
}

#[test]
fn yes_deletes_unprotected_artifacts() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("package.json"), "{}").unwrap();
    dir_with_file(tmp.path(), ".next");
    dir_with_file(tmp.path(), "src");

    next_prune()
        .arg("--yes")
        .arg("--cwd")
        .arg(tmp.path())
        .assert()
        .success();

    assert!(!tmp.path().join(".next").exists());
    assert!(tmp.path().join("src/payload.bin").exists());
}

#[test]
fn no_node_modules_excludes_family() {
    let tmp = create_project();

    next_prune()
        .args(["--yes", "--no-node-modules"])
        .arg("--cwd")
        .arg(tmp.path())
        .assert()
        .success();

    assert!(!tmp.path().join(".next").exists());
    assert!(tmp.path().join("node_modules/lodash").exists());
}

#[test]
fn list_emits_table_without_deleting() {
    let tmp = create_project();

    next_prune()
        .arg("--list")
        .arg("--cwd")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("SIZE"))
        .stdout(predicate::str::contains("Total:"));

    assert!(tmp.path().join(".next").exists());
}

#[test]
fn json_listing_is_parseable() {
    let tmp = create_project();

    let output = next_prune()
        .arg("--json")
        .arg("--cwd")
        .arg(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let items = parsed["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items
        .iter()
        .any(|i| i["candidateType"] == "node_modules" && i["applyProtected"] == true));
    assert!(items
        .iter()
        .any(|i| i["candidateType"] == "artifact" && i["cleanupScope"] == "project"));
    assert!(parsed["totalSize"].as_u64().unwrap() > 0);

    assert!(tmp.path().join(".next").exists());
}

#[test]
fn invalid_max_depth_exits_one() {
    let tmp = TempDir::new().unwrap();

    next_prune()
        .args(["--max-depth=abc"])
        .arg("--cwd")
        .arg(tmp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("max-depth"));
}

#[test]
fn unknown_scope_token_exits_one() {
    let tmp = TempDir::new().unwrap();

    next_prune()
        .args(["--cleanup-scope=bogus"])
        .arg("--cwd")
        .arg(tmp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("bogus"));
}

#[test]
fn cleanup_scope_safe_skips_protected() {
    let tmp = create_project();

    next_prune()
        .args(["--yes", "--cleanup-scope=safe"])
        .arg("--cwd")
        .arg(tmp.path())
        .assert()
        .success();

    assert!(!tmp.path().join(".next").exists());
    assert!(tmp.path().join("node_modules").exists());
}

#[test]
fn never_delete_config_protects_paths() {
    let tmp = create_project();
    fs::write(
        tmp.path().join(".next-prunerc.json"),
        r#"{"neverDelete": [".next"]}"#,
    )
    .unwrap();

    next_prune()
        .args(["--yes", "--cleanup-scope=safe"])
        .arg("--cwd")
        .arg(tmp.path())
        .assert()
        .success();

    assert!(tmp.path().join(".next").exists());
}

#[test]
fn monorepo_flag_scans_workspaces() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("package.json"),
        r#"{"workspaces": ["apps/*"]}"#,
    )
    .unwrap();
    let site = tmp.path().join("apps/site");
    fs::create_dir_all(&site).unwrap();
    fs::write(site.join("package.json"), "{}").unwrap();
    dir_with_file(tmp.path(), "apps/site/.turbo");

    let output = next_prune()
        .args(["--json", "--monorepo"])
        .arg("--cwd")
        .arg(tmp.path())
        .output()
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    let items = parsed["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["cleanupScope"], "workspace");
}

#[test]
fn missing_cwd_exits_one() {
    next_prune()
        .args(["--cwd=/nonexistent/prune-cli"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error"));
}

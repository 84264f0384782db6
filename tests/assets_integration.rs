//! Integration tests for unused asset resolution.

use assert_cmd::Command;
use next_prune::assets::{find_unused_assets, AssetOptions};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn basename_fallback_is_bounded_by_uniqueness() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "public/images/a/logo.png", "a");
    write(tmp.path(), "public/images/b/logo.png", "b");
    write(tmp.path(), "public/icons/unique.png", "u");
    write(
        tmp.path(),
        "src/index.tsx",
        r#"
        const hero = "/images/a/logo.png";
        const icon = "unique.png";
        "#,
    );

    let unused = find_unused_assets(tmp.path(), &AssetOptions::default());

    assert_eq!(unused, vec![tmp.path().join("public/images/b/logo.png")]);
}

#[test]
fn references_found_across_source_kinds() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "public/bg.webp", "webp");
    write(tmp.path(), "public/title.svg", "svg");
    write(tmp.path(), "public/gone.gif", "gif");
    write(
        tmp.path(),
        "src/styles.scss",
        r#".hero { background: url("/bg.webp"); }"#,
    );
    write(tmp.path(), "pages/about.mdx", "![title](/title.svg)");

    let unused = find_unused_assets(tmp.path(), &AssetOptions::default());

    assert_eq!(unused, vec![tmp.path().join("public/gone.gif")]);
}

#[test]
fn unreadable_source_files_are_skipped() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "public/pic.png", "png");
    // Invalid UTF-8 in one source must not abort resolution
    fs::create_dir_all(tmp.path().join("src")).unwrap();
    fs::write(tmp.path().join("src/binary.js"), [0xff, 0xfe, 0x00]).unwrap();
    write(tmp.path(), "src/real.js", r#"import pic from "/pic.png";"#);

    let unused = find_unused_assets(tmp.path(), &AssetOptions::default());
    assert!(unused.is_empty());
}

#[test]
fn cli_deletes_unused_assets_when_enabled() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".next-prunerc.json"),
        r#"{"checkUnusedAssets": true}"#,
    )
    .unwrap();
    write(tmp.path(), "public/used.png", "u");
    write(tmp.path(), "public/orphan.png", "o");
    write(tmp.path(), "src/page.tsx", r#"<img src="/used.png" />"#);

    Command::cargo_bin("next-prune")
        .unwrap()
        .arg("--yes")
        .arg("--cwd")
        .arg(tmp.path())
        .assert()
        .success();

    assert!(tmp.path().join("public/used.png").exists());
    assert!(!tmp.path().join("public/orphan.png").exists());
    assert!(tmp.path().join("src/page.tsx").exists());
}

#[test]
fn cli_ignores_assets_when_disabled() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "public/orphan.png", "o");

    Command::cargo_bin("next-prune")
        .unwrap()
        .arg("--yes")
        .arg("--cwd")
        .arg(tmp.path())
        .assert()
        .success();

    assert!(tmp.path().join("public/orphan.png").exists());
}

//! Heuristic workspace discovery for repos without a usable manifest.

use crate::workspace::WORKSPACE_SKIP_DIRS;
use std::fs;
use std::path::{Path, PathBuf};

/// Conventional monorepo parent directories inspected first.
pub const HEURISTIC_PARENT_DIRS: &[&str] = &["apps", "packages", "services", "libs"];

/// Discover workspaces by convention: direct children of
/// `apps/ packages/ services/ libs/` that carry a `package.json` file.
/// When none of those parents yield anything, the root's own direct
/// subdirectories are inspected with the same rules, which keeps flat
/// repos working.
pub fn heuristic_workspaces(root: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for parent in HEURISTIC_PARENT_DIRS {
        found.extend(package_dirs_in(&root.join(parent)));
    }

    if found.is_empty() {
        found = package_dirs_in(root);
    }

    found
}

fn package_dirs_in(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    entries
        .flatten()
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter(|e| {
            let name = e.file_name();
            !WORKSPACE_SKIP_DIRS.contains(&name.to_string_lossy().as_ref())
        })
        .map(|e| e.path())
        .filter(|p| p.join("package.json").is_file())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn workspace(root: &Path, rel: &str) {
        let dir = root.join(rel);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("package.json"), "{}").unwrap();
    }

    #[test]
    fn test_heuristic_conventional_parents() {
        let tmp = TempDir::new().unwrap();
        workspace(tmp.path(), "apps/site");
        workspace(tmp.path(), "packages/ui");
        fs::create_dir_all(tmp.path().join("apps/empty")).unwrap();

        let mut dirs = heuristic_workspaces(tmp.path());
        dirs.sort();

        assert_eq!(
            dirs,
            vec![tmp.path().join("apps/site"), tmp.path().join("packages/ui")]
        );
    }

    #[test]
    fn test_heuristic_top_level_fallback() {
        let tmp = TempDir::new().unwrap();
        workspace(tmp.path(), "frontend");
        workspace(tmp.path(), "backend");
        fs::create_dir_all(tmp.path().join("docs")).unwrap();

        let mut dirs = heuristic_workspaces(tmp.path());
        dirs.sort();

        assert_eq!(
            dirs,
            vec![tmp.path().join("backend"), tmp.path().join("frontend")]
        );
    }

    #[test]
    fn test_heuristic_skip_dirs_excluded() {
        let tmp = TempDir::new().unwrap();
        workspace(tmp.path(), "node_modules");
        workspace(tmp.path(), ".git");
        workspace(tmp.path(), "real");

        let dirs = heuristic_workspaces(tmp.path());
        assert_eq!(dirs, vec![tmp.path().join("real")]);
    }

    #[test]
    fn test_heuristic_parents_suppress_fallback() {
        let tmp = TempDir::new().unwrap();
        workspace(tmp.path(), "apps/site");
        workspace(tmp.path(), "stray-sibling");

        let dirs = heuristic_workspaces(tmp.path());
        assert_eq!(dirs, vec![tmp.path().join("apps/site")]);
    }

    #[test]
    fn test_heuristic_empty_root() {
        let tmp = TempDir::new().unwrap();
        assert!(heuristic_workspaces(tmp.path()).is_empty());
    }
}

//! Workspace enumeration for monorepo roots.
//!
//! Workspaces come from manifest patterns (`package.json` workspaces,
//! `pnpm-workspace.yaml`, `lerna.json`) or, when those resolve to
//! nothing, from conventional directory layout. Every candidate is
//! containment-checked against the root's real path, deduplicated by
//! real path and sorted for determinism.

mod expand;
mod heuristic;
mod manifest;

pub use expand::expand_patterns;
pub use heuristic::{heuristic_workspaces, HEURISTIC_PARENT_DIRS};
pub use manifest::{collect_manifest_patterns, ManifestPatterns};

use crate::config::WorkspaceDiscoveryMode;
use crate::error::{PruneError, Result};
use crate::pattern::WorkspacePattern;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Directory names never considered workspace members and never
/// descended into while expanding patterns.
pub const WORKSPACE_SKIP_DIRS: &[&str] = &[
    ".git",
    ".svn",
    ".hg",
    "node_modules",
    ".next",
    ".turbo",
    ".vercel",
    "coverage",
    ".swc",
    ".docusaurus",
    "storybook-static",
];

/// How the workspace list was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceSource {
    Manifest,
    Heuristic,
    None,
}

/// Outcome of workspace discovery for one root.
#[derive(Debug, Clone)]
pub struct WorkspaceDiscoveryResult {
    pub root_realpath: PathBuf,
    /// Logical workspace directories, sorted lexicographically.
    pub workspace_directories: Vec<PathBuf>,
    pub source: WorkspaceSource,
    pub manifest_patterns: Vec<String>,
    pub has_manifest: bool,
}

/// Enumerate workspace directories under `root` according to `mode`.
pub fn discover_workspaces(
    root: &Path,
    mode: WorkspaceDiscoveryMode,
) -> Result<WorkspaceDiscoveryResult> {
    let root_realpath = root.canonicalize().map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => PruneError::PathNotFound(root.to_path_buf()),
        _ => PruneError::Io {
            path: root.to_path_buf(),
            source: e,
        },
    })?;

    let manifest = collect_manifest_patterns(root);
    let compiled: Vec<WorkspacePattern> = manifest
        .patterns
        .iter()
        .filter_map(|p| WorkspacePattern::parse(p))
        .collect();

    let (candidates, source) = match mode {
        WorkspaceDiscoveryMode::ManifestOnly => {
            let dirs = expand_patterns(root, &compiled);
            let source = if dirs.is_empty() {
                WorkspaceSource::None
            } else {
                WorkspaceSource::Manifest
            };
            (dirs, source)
        }
        WorkspaceDiscoveryMode::HeuristicOnly => {
            let dirs = heuristic_workspaces(root);
            let source = if dirs.is_empty() {
                WorkspaceSource::None
            } else {
                WorkspaceSource::Heuristic
            };
            (dirs, source)
        }
        WorkspaceDiscoveryMode::ManifestFallback => {
            let dirs = expand_patterns(root, &compiled);
            if !dirs.is_empty() {
                (dirs, WorkspaceSource::Manifest)
            } else {
                let dirs = heuristic_workspaces(root);
                let source = if dirs.is_empty() {
                    WorkspaceSource::None
                } else {
                    WorkspaceSource::Heuristic
                };
                (dirs, source)
            }
        }
    };

    let excludes: Vec<&WorkspacePattern> =
        compiled.iter().filter(|p| p.is_negated()).collect();

    let mut seen_real: HashSet<PathBuf> = HashSet::new();
    let mut workspace_directories: Vec<PathBuf> = Vec::new();

    for dir in candidates {
        if !excludes.is_empty() {
            if let Ok(rel) = dir.strip_prefix(root) {
                let rel = posix_relative(rel);
                // A negated pattern "matches" paths its body does not
                // name, so dropping means the body matched
                if excludes.iter().any(|p| !p.matches(&rel)) {
                    tracing::debug!(path = %dir.display(), "workspace excluded by negation");
                    continue;
                }
            }
        }

        let Ok(real) = dir.canonicalize() else {
            continue;
        };
        if real == root_realpath || !real.starts_with(&root_realpath) {
            tracing::debug!(path = %dir.display(), "workspace outside root dropped");
            continue;
        }
        if seen_real.insert(real) {
            workspace_directories.push(dir);
        }
    }

    workspace_directories.sort();

    Ok(WorkspaceDiscoveryResult {
        root_realpath,
        workspace_directories,
        source,
        manifest_patterns: manifest.patterns,
        has_manifest: manifest.has_manifest,
    })
}

/// Render a relative path with forward slashes for pattern matching.
pub fn posix_relative(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

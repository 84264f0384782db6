//! Concurrent candidate discovery.
//!
//! Each scan root is walked with fork-join parallelism per directory.
//! Every emission resolves the candidate's real path, enforces root
//! containment and deduplicates through a shared map where workspace
//! scope wins over project scope on collision.

use crate::config::MonorepoMode;
use crate::error::{PruneError, Result};
use crate::pattern::normalize_path_pattern;
use crate::scanner::{
    collect_stats, CleanupScope, CleanupType, ScanItem, ScanOptions, ARTIFACT_DIR_NAMES,
    PROJECT_LOCAL_PM_CACHE_DIRS,
};
use crate::workspace::discover_workspaces;
use rayon::prelude::*;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

/// Next.js config file names probed in each visited directory.
const NEXT_CONFIG_FILES: &[&str] = &[
    "next.config.js",
    "next.config.mjs",
    "next.config.cjs",
    "next.config.ts",
    "next.config.mts",
    "next.config.cts",
];

struct Candidate {
    path: PathBuf,
    scope: CleanupScope,
    cleanup_type: CleanupType,
}

struct ScanContext<'a> {
    root_realpath: PathBuf,
    options: &'a ScanOptions,
    workspace_realpaths: HashSet<PathBuf>,
    workspace_scope_active: bool,
    /// Keyed by real path; single writer at a time.
    discovered: Mutex<HashMap<PathBuf, Candidate>>,
}

/// Scan a root for deletion candidates.
///
/// Returns items sorted by size descending, then path ascending.
pub fn scan_artifacts(root: &Path, options: &ScanOptions) -> Result<Vec<ScanItem>> {
    let root_realpath = root.canonicalize().map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => PruneError::PathNotFound(root.to_path_buf()),
        _ => PruneError::Io {
            path: root.to_path_buf(),
            source: e,
        },
    })?;
    if !root_realpath.is_dir() {
        return Err(PruneError::NotADirectory(root.to_path_buf()));
    }

    let project_active = options.cleanup_scopes.contains(&CleanupScope::Project);
    let workspace_active = options.cleanup_scopes.contains(&CleanupScope::Workspace);

    let mut scan_roots: Vec<(PathBuf, CleanupScope)> = Vec::new();
    let mut workspace_realpaths: HashSet<PathBuf> = HashSet::new();

    if workspace_active && options.monorepo_mode != MonorepoMode::Off {
        let discovery = discover_workspaces(&root_realpath, options.workspace_discovery_mode)?;
        tracing::debug!(
            workspaces = discovery.workspace_directories.len(),
            source = ?discovery.source,
            "workspace discovery"
        );
        for dir in &discovery.workspace_directories {
            if let Ok(real) = dir.canonicalize() {
                workspace_realpaths.insert(real);
            }
        }
        scan_roots.extend(
            discovery
                .workspace_directories
                .into_iter()
                .map(|d| (d, CleanupScope::Workspace)),
        );
    }
    if project_active {
        scan_roots.insert(0, (root_realpath.clone(), CleanupScope::Project));
    }

    let ctx = ScanContext {
        root_realpath,
        options,
        workspace_realpaths,
        workspace_scope_active: workspace_active,
        discovered: Mutex::new(HashMap::new()),
    };

    if options.include_project_local_pm_caches {
        for (dir, scope) in &scan_roots {
            for cache in PROJECT_LOCAL_PM_CACHE_DIRS {
                let path = dir.join(cache);
                if path.is_dir() {
                    emit(&ctx, path, *scope, CleanupType::PmCache);
                }
            }
        }
    }

    scan_roots
        .par_iter()
        .for_each(|(dir, scope)| walk(&ctx, dir, 0, *scope));

    let candidates: Vec<Candidate> = ctx
        .discovered
        .into_inner()
        .unwrap()
        .into_values()
        .collect();

    let mut items: Vec<ScanItem> = candidates
        .par_iter()
        .map(|c| ScanItem {
            path: c.path.clone(),
            stats: collect_stats(&c.path),
            cleanup_scope: c.scope,
            cleanup_type: c.cleanup_type,
        })
        .collect();

    ScanItem::sort_items(&mut items);
    Ok(items)
}

fn walk(ctx: &ScanContext, dir: &Path, depth: u64, scope: CleanupScope) {
    detect_dist_dir(ctx, dir, scope);

    let entries = match fs::read_dir(dir) {
        Ok(rd) => rd.flatten().collect::<Vec<_>>(),
        Err(e) => {
            tracing::debug!(path = %dir.display(), %e, "unreadable directory skipped");
            return;
        }
    };

    let mut recurse: Vec<PathBuf> = Vec::new();

    for entry in entries {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if !file_type.is_dir() {
            continue;
        }

        let path = entry.path();
        let name_os = entry.file_name();
        let name = name_os.to_string_lossy();

        if ARTIFACT_DIR_NAMES.contains(&name.as_ref()) {
            emit(ctx, path, scope, CleanupType::Artifact);
            continue;
        }

        if name == "node_modules" {
            if ctx.options.include_node_modules {
                let cleanup_type = if scope == CleanupScope::Workspace {
                    CleanupType::WorkspaceNodeModules
                } else {
                    CleanupType::Artifact
                };
                emit(ctx, path, scope, cleanup_type);
            }
            continue;
        }

        if name == ".vercel" {
            let output = path.join("output");
            if output.is_dir() {
                emit(ctx, output, scope, CleanupType::Artifact);
            }
            continue;
        }

        if ctx.options.is_skipped_dir(&name) {
            continue;
        }

        // The depth limit gates descent; the emission rules above already ran
        if matches!(ctx.options.max_depth, Some(max) if depth >= max) {
            continue;
        }

        let Ok(real) = path.canonicalize() else {
            continue;
        };
        // Already-emitted candidates (pm caches, custom distDir targets)
        // own their whole subtree
        if ctx.discovered.lock().unwrap().contains_key(&real) {
            continue;
        }
        // Workspace roots re-enter through their own scan root
        if scope == CleanupScope::Project
            && ctx.workspace_scope_active
            && ctx.workspace_realpaths.contains(&real)
        {
            continue;
        }

        recurse.push(path);
    }

    recurse
        .par_iter()
        .for_each(|child| walk(ctx, child, depth + 1, scope));
}

fn emit(ctx: &ScanContext, path: PathBuf, scope: CleanupScope, cleanup_type: CleanupType) {
    let Ok(real) = path.canonicalize() else {
        return;
    };
    if real == ctx.root_realpath || !real.starts_with(&ctx.root_realpath) {
        tracing::debug!(path = %path.display(), "candidate escaping scan root dropped");
        return;
    }

    use std::collections::hash_map::Entry;
    let mut discovered = ctx.discovered.lock().unwrap();
    match discovered.entry(real) {
        Entry::Occupied(mut occupied) => {
            // Workspace beats project when the same real path is found twice
            if occupied.get().scope == CleanupScope::Project && scope == CleanupScope::Workspace {
                occupied.insert(Candidate {
                    path,
                    scope,
                    cleanup_type,
                });
            }
        }
        Entry::Vacant(vacant) => {
            tracing::debug!(path = %path.display(), ?cleanup_type, "candidate");
            vacant.insert(Candidate {
                path,
                scope,
                cleanup_type,
            });
        }
    }
}

fn dist_dir_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\bdistDir\s*:\s*(?:'([^'"`]+)'|"([^'"`]+)"|`([^'"`]+)`)"#)
            .expect("distDir regex")
    })
}

/// Probe a directory for a Next.js config declaring a custom `distDir`
/// and emit the referenced directory as an artifact candidate.
fn detect_dist_dir(ctx: &ScanContext, dir: &Path, scope: CleanupScope) {
    let Some(config_path) = NEXT_CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
    else {
        return;
    };
    let Ok(source) = fs::read_to_string(&config_path) else {
        return;
    };

    let stripped = strip_comments(&source);
    let Some(caps) = dist_dir_regex().captures(&stripped) else {
        return;
    };
    let value = caps
        .get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| m.as_str().trim())
        .unwrap_or("");

    // Absolute values never name a project-relative output directory
    if value.starts_with('/') || value.starts_with('\\') {
        return;
    }
    let Some(rel) = normalize_path_pattern(value) else {
        return;
    };

    let candidate = dir.join(&rel);
    if !candidate.is_dir() {
        return;
    }

    tracing::debug!(config = %config_path.display(), dist_dir = %rel, "custom distDir");
    emit(ctx, candidate, scope, CleanupType::Artifact);
}

/// Strip `/* ... */` and `// ...` comments so commented-out configuration
/// does not produce candidates.
fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '/' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('/') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            Some('*') => {
                chars.next();
                while let Some(next) = chars.next() {
                    if next == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        break;
                    }
                }
            }
            _ => out.push(c),
        }
    }

    out
}

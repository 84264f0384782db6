//! Unused public asset resolution.
//!
//! Correlates image files under `public/` against source file contents.
//! The match is substring-based and deliberately conservative: a basename
//! fallback only applies when the basename is globally unique, so shared
//! names like `logo.png` never mark each other as used.

use crate::scanner::{collect_stats, CleanupScope, CleanupType, ScanItem, DEFAULT_SKIP_DIRS};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions considered asset candidates under `public/`.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "webp", "avif", "ico", "bmp",
];

/// Extensions whose contents are searched for asset references.
pub const SOURCE_EXTENSIONS: &[&str] = &[
    "js", "jsx", "ts", "tsx", "css", "scss", "sass", "less", "html", "md", "mdx",
];

/// Directories searched recursively for source files, when present.
pub const DEFAULT_SOURCE_DIRS: &[&str] =
    &["src", "app", "pages", "components", "lib", "utils", "hooks"];

/// Directories never walked while collecting source files.
const ASSET_SKIP_DIRS: &[&str] = &["public", "dist", "build", "out"];

/// Options for asset resolution.
#[derive(Debug, Clone, Default)]
pub struct AssetOptions {
    /// Source directories to search instead of [`DEFAULT_SOURCE_DIRS`]
    pub source_directories: Option<Vec<String>>,
    /// Extra directory names to skip while walking sources
    pub extra_skip_dirs: Vec<String>,
}

struct AssetFile {
    full_path: PathBuf,
    filename: String,
    relative_path: String,
}

/// Find image files under `public/` that no source file references.
pub fn find_unused_assets(root: &Path, options: &AssetOptions) -> Vec<PathBuf> {
    let public_dir = root.join("public");
    if !public_dir.is_dir() {
        return Vec::new();
    }

    let assets = collect_assets(&public_dir);
    if assets.is_empty() {
        return Vec::new();
    }

    let mut basename_counts: HashMap<&str, usize> = HashMap::new();
    for asset in &assets {
        *basename_counts.entry(asset.filename.as_str()).or_insert(0) += 1;
    }

    let mut unresolved: HashSet<usize> = (0..assets.len()).collect();

    for source in collect_source_files(root, options) {
        if unresolved.is_empty() {
            break;
        }
        let Ok(content) = fs::read_to_string(&source) else {
            continue;
        };

        unresolved.retain(|&idx| {
            let asset = &assets[idx];
            if content.contains(&asset.relative_path) {
                return false;
            }
            if basename_counts[asset.filename.as_str()] == 1
                && content.contains(&asset.filename)
            {
                return false;
            }
            true
        });
    }

    let mut unused: Vec<PathBuf> = unresolved
        .into_iter()
        .map(|idx| assets[idx].full_path.clone())
        .collect();
    unused.sort();
    unused
}

/// Wrap unused asset paths as scan items so policy and deletion treat
/// them like any other candidate.
pub fn asset_items(paths: Vec<PathBuf>) -> Vec<ScanItem> {
    paths
        .into_iter()
        .map(|path| ScanItem {
            stats: collect_stats(&path),
            path,
            cleanup_scope: CleanupScope::Project,
            cleanup_type: CleanupType::Asset,
        })
        .collect()
}

fn collect_assets(public_dir: &Path) -> Vec<AssetFile> {
    let mut assets = Vec::new();

    for entry in WalkDir::new(public_dir).into_iter().flatten() {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !has_extension(path, IMAGE_EXTENSIONS) {
            continue;
        }
        let Ok(rel) = path.strip_prefix(public_dir) else {
            continue;
        };
        let relative_path = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        assets.push(AssetFile {
            full_path: path.to_path_buf(),
            filename,
            relative_path,
        });
    }

    assets
}

fn collect_source_files(root: &Path, options: &AssetOptions) -> Vec<PathBuf> {
    let mut sources = Vec::new();

    // Top-level source files, non-recursive
    if let Ok(entries) = fs::read_dir(root) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() && has_extension(&path, SOURCE_EXTENSIONS) {
                sources.push(path);
            }
        }
    }

    let source_dirs: Vec<String> = match &options.source_directories {
        Some(dirs) => dirs.clone(),
        None => DEFAULT_SOURCE_DIRS.iter().map(|d| d.to_string()).collect(),
    };

    for dir in source_dirs {
        let dir_path = root.join(&dir);
        if !dir_path.is_dir() {
            continue;
        }
        let walker = WalkDir::new(&dir_path).into_iter().filter_entry(|e| {
            if !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            !is_skipped(&name, &options.extra_skip_dirs)
        });
        for entry in walker.flatten() {
            let path = entry.path();
            if entry.file_type().is_file() && has_extension(path, SOURCE_EXTENSIONS) {
                sources.push(path.to_path_buf());
            }
        }
    }

    sources
}

fn is_skipped(name: &str, extra: &[String]) -> bool {
    DEFAULT_SKIP_DIRS.contains(&name)
        || ASSET_SKIP_DIRS.contains(&name)
        || extra.iter().any(|d| d == name)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            extensions.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

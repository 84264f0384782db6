//! Deletion engine with per-item outcome accounting.

use crate::scanner::ScanItem;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of deleting a single item.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub path: PathBuf,
    pub ok: bool,
    pub reclaimed_size: u64,
    pub error: Option<String>,
}

/// Aggregate outcome of a deletion batch.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSummary {
    pub results: Vec<DeleteResult>,
    pub deleted_count: usize,
    pub failure_count: usize,
    pub reclaimed_bytes: u64,
}

/// Remove a path recursively. A missing path counts as success; the
/// caller-provided size is reported as reclaimed on success.
pub fn delete_item(path: &Path, size: u64) -> DeleteResult {
    let outcome = match fs::symlink_metadata(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
        Ok(metadata) => {
            if metadata.is_dir() {
                fs::remove_dir_all(path)
            } else {
                fs::remove_file(path)
            }
        }
    };

    match outcome {
        Ok(()) => DeleteResult {
            path: path.to_path_buf(),
            ok: true,
            reclaimed_size: size,
            error: None,
        },
        Err(e) => DeleteResult {
            path: path.to_path_buf(),
            ok: false,
            reclaimed_size: size,
            error: Some(e.to_string()),
        },
    }
}

/// Delete a batch of scan items in parallel.
///
/// One failure never prevents the others from running; partial progress
/// is the explicit success mode.
pub fn delete_items(items: &[ScanItem]) -> DeleteSummary {
    let results: Vec<DeleteResult> = items
        .par_iter()
        .map(|item| {
            let result = delete_item(&item.path, item.stats.size);
            if result.ok {
                tracing::info!(path = %item.path.display(), size = item.stats.size, "deleted");
            } else {
                tracing::warn!(path = %item.path.display(), error = ?result.error, "delete failed");
            }
            result
        })
        .collect();

    summarize(results)
}

fn summarize(results: Vec<DeleteResult>) -> DeleteSummary {
    let deleted_count = results.iter().filter(|r| r.ok).count();
    let failure_count = results.len() - deleted_count;
    let reclaimed_bytes = results
        .iter()
        .filter(|r| r.ok)
        .map(|r| r.reclaimed_size)
        .sum();

    DeleteSummary {
        results,
        deleted_count,
        failure_count,
        reclaimed_bytes,
    }
}

//! Recursive statistics aggregation for discovered candidates.

use crate::scanner::ArtifactStats;
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// Gather recursive stats for a candidate path.
///
/// Symlinks are never followed; a symlink counts as a single file of its
/// own length. I/O failures annotate the result with an error message and
/// zeroed totals rather than propagating.
pub fn collect_stats(path: &Path) -> ArtifactStats {
    let metadata = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) => return ArtifactStats::error(e.to_string(), None, false),
    };

    if !metadata.is_dir() {
        return ArtifactStats {
            size: metadata.len(),
            mtime: metadata.modified().ok(),
            file_count: 1,
            is_directory: false,
            error: None,
        };
    }

    let self_mtime = metadata.modified().ok();
    let entries = match fs::read_dir(path) {
        Ok(rd) => rd.flatten().collect::<Vec<_>>(),
        Err(e) => return ArtifactStats::error(e.to_string(), self_mtime, true),
    };

    let children: Vec<ArtifactStats> = entries
        .par_iter()
        .map(|entry| collect_stats(&entry.path()))
        .collect();

    let mut size = 0u64;
    let mut file_count = 0u64;
    let mut mtime = self_mtime;

    for child in &children {
        size += child.size;
        file_count += child.file_count;
        mtime = max_mtime(mtime, child.mtime);
    }

    ArtifactStats {
        size,
        mtime,
        file_count,
        is_directory: true,
        error: None,
    }
}

fn max_mtime(a: Option<SystemTime>, b: Option<SystemTime>) -> Option<SystemTime> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

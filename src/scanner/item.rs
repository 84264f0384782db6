use serde::Serialize;
use std::path::PathBuf;
use std::time::SystemTime;

/// Whether a candidate was discovered inside the root project or a
/// workspace subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanupScope {
    Project,
    Workspace,
}

/// Fine-grained origin tag preserved from discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CleanupType {
    Artifact,
    Asset,
    PmCache,
    WorkspaceNodeModules,
}

/// Recursive statistics for a single candidate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactStats {
    /// Total size in bytes (recursive sum for directories)
    pub size: u64,

    /// Latest modification time in the subtree
    pub mtime: Option<SystemTime>,

    /// Number of files (1 for files, recursive count for directories)
    pub file_count: u64,

    /// True if the candidate is a directory
    pub is_directory: bool,

    /// Error message if stats could not be gathered
    pub error: Option<String>,
}

impl ArtifactStats {
    /// Zeroed stats carrying an error message.
    pub fn error(message: String, mtime: Option<SystemTime>, is_directory: bool) -> Self {
        Self {
            size: 0,
            mtime,
            file_count: 0,
            is_directory,
            error: Some(message),
        }
    }
}

/// A deletion candidate produced by the scanner.
///
/// `path` is the logical (un-followed) path so display stays stable;
/// containment and deduplication happen on real paths during discovery.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanItem {
    pub path: PathBuf,

    #[serde(flatten)]
    pub stats: ArtifactStats,

    pub cleanup_scope: CleanupScope,

    pub cleanup_type: CleanupType,
}

impl ScanItem {
    /// Sort key ordering: size descending, then path ascending.
    pub fn sort_items(items: &mut [ScanItem]) {
        items.sort_by(|a, b| {
            b.stats
                .size
                .cmp(&a.stats.size)
                .then_with(|| a.path.cmp(&b.path))
        });
    }
}

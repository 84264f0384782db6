use std::path::PathBuf;
use thiserror::Error;

/// Core library errors
#[derive(Error, Debug)]
pub enum PruneError {
    #[error("IO error at path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoSimple(#[from] std::io::Error),

    #[error("Path not found: {0}\n  Hint: Check if the path exists and is spelled correctly")]
    PathNotFound(PathBuf),

    #[error("Not a directory: {0}\n  Hint: Provide a directory path, not a file")]
    NotADirectory(PathBuf),

    #[error("Unknown cleanup scope token: '{0}'\n  Hint: Valid tokens include default, safe, node-modules, pm-caches")]
    UnknownScopeToken(String),

    #[error("Invalid --max-depth value: '{0}'\n  Hint: Provide a non-negative integer")]
    InvalidMaxDepth(String),

    #[error("Refusing to delete: {0} selected item(s) are node_modules or package-manager caches\n  Hint: Re-run with --apply to confirm")]
    ApplyRequired(usize),

    #[error("{0} deletion(s) failed")]
    DeletionFailures(usize),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl PruneError {
    /// Get exit code for this error type.
    ///
    /// Validation failures, deletion failures and apply-protection refusals
    /// all map to 1; success is 0.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, PruneError>;

//! Candidate classification and cleanup-scope token parsing.

use crate::error::{PruneError, Result};
use crate::scanner::{CleanupType, ScanItem};
use serde::Serialize;
use std::collections::HashSet;

/// Policy-facing candidate family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CandidateType {
    #[serde(rename = "artifact")]
    Artifact,
    #[serde(rename = "asset")]
    Asset,
    #[serde(rename = "node_modules")]
    NodeModules,
    #[serde(rename = "pm-cache")]
    PmCache,
}

impl CandidateType {
    pub const ALL: [CandidateType; 4] = [
        CandidateType::Artifact,
        CandidateType::Asset,
        CandidateType::NodeModules,
        CandidateType::PmCache,
    ];
}

/// Derive the candidate family of a scan item.
///
/// Discovery tags win; otherwise the path itself decides, so a
/// `node_modules` found as a plain artifact still lands in the protected
/// family.
pub fn candidate_type(item: &ScanItem) -> CandidateType {
    match item.cleanup_type {
        CleanupType::Asset => CandidateType::Asset,
        CleanupType::PmCache => CandidateType::PmCache,
        CleanupType::WorkspaceNodeModules => CandidateType::NodeModules,
        CleanupType::Artifact => classify_path(&item.path.to_string_lossy()),
    }
}

fn classify_path(path: &str) -> CandidateType {
    let normalized = path.replace('\\', "/").to_lowercase();
    let segments: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();

    if segments.contains(&"node_modules") {
        return CandidateType::NodeModules;
    }
    if segments
        .iter()
        .any(|s| matches!(*s, ".pnpm-store" | ".pnpm-cache" | ".npm"))
        || segments
            .windows(2)
            .any(|w| w[0] == ".yarn" && matches!(w[1], "cache" | "unplugged"))
    {
        return CandidateType::PmCache;
    }

    CandidateType::Artifact
}

/// Parse a comma-separated cleanup-scope selector into candidate families.
///
/// Empty or whitespace-only input allows every family; unknown tokens are
/// a hard error.
pub fn parse_scope_tokens(input: &str) -> Result<HashSet<CandidateType>> {
    if input.trim().is_empty() {
        return Ok(CandidateType::ALL.into_iter().collect());
    }

    let mut allowed = HashSet::new();
    for token in input.split(',') {
        let token = token.trim().to_lowercase();
        if token.is_empty() {
            continue;
        }
        match token.as_str() {
            "default" | "all" | "cold-storage" | "coldstorage" | "archive" | "project"
            | "workspace" => {
                allowed.extend(CandidateType::ALL);
            }
            "safe" | "artifacts" | "artifact" => {
                allowed.insert(CandidateType::Artifact);
                allowed.insert(CandidateType::Asset);
            }
            "node-modules" | "node_modules" | "nodemodules" => {
                allowed.insert(CandidateType::NodeModules);
            }
            "pm-caches" | "pm_caches" | "pmcaches" => {
                allowed.insert(CandidateType::PmCache);
            }
            _ => return Err(PruneError::UnknownScopeToken(token)),
        }
    }

    Ok(allowed)
}

/// Resolve the allowed families from an optional selector and the
/// node-modules / pm-caches inclusion flags.
pub fn allowed_candidate_types(
    selector: Option<&str>,
    include_node_modules: bool,
    include_pm_caches: bool,
) -> Result<HashSet<CandidateType>> {
    let mut allowed = parse_scope_tokens(selector.unwrap_or(""))?;
    if !include_node_modules {
        allowed.remove(&CandidateType::NodeModules);
    }
    if !include_pm_caches {
        allowed.remove(&CandidateType::PmCache);
    }
    Ok(allowed)
}

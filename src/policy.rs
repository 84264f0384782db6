//! Selection policy: protection patterns and apply-gating.

use crate::classify::{candidate_type, CandidateType};
use crate::pattern::matches_config_pattern;
use crate::scanner::ScanItem;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Drop items whose path relative to `cwd` matches any never-delete
/// pattern. An empty pattern list is the identity.
pub fn filter_never_delete(
    items: Vec<ScanItem>,
    cwd: &Path,
    patterns: &[String],
) -> Vec<ScanItem> {
    if patterns.is_empty() {
        return items;
    }

    items
        .into_iter()
        .filter(|item| match relative_to(&item.path, cwd) {
            Some(rel) => !patterns.iter().any(|p| matches_config_pattern(&rel, p)),
            // Items outside cwd cannot match a relative pattern
            None => true,
        })
        .collect()
}

/// Absolute paths of items whose relative path matches any always-delete
/// pattern.
pub fn select_always_delete_paths(
    items: &[ScanItem],
    cwd: &Path,
    patterns: &[String],
) -> HashSet<PathBuf> {
    if patterns.is_empty() {
        return HashSet::new();
    }

    items
        .iter()
        .filter(|item| match relative_to(&item.path, cwd) {
            Some(rel) => patterns.iter().any(|p| matches_config_pattern(&rel, p)),
            None => false,
        })
        .map(|item| item.path.clone())
        .collect()
}

/// Families that require an explicit apply step before non-interactive
/// deletion.
pub fn is_apply_protected(candidate: CandidateType) -> bool {
    matches!(
        candidate,
        CandidateType::NodeModules | CandidateType::PmCache
    )
}

/// True if any item in the selection belongs to an apply-protected family.
pub fn selection_has_protected(items: &[ScanItem]) -> bool {
    items
        .iter()
        .any(|item| is_apply_protected(candidate_type(item)))
}

fn relative_to(path: &Path, cwd: &Path) -> Option<String> {
    let rel = path.strip_prefix(cwd).ok()?;
    Some(
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
    )
}

//! Listing output: human-readable table and JSON document.

use crate::classify::{candidate_type, CandidateType};
use crate::format::{human_size, time_ago};
use crate::policy::is_apply_protected;
use crate::scanner::{CleanupScope, ScanItem};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Render scan items as an aligned table with a totals footer.
///
/// Paths display relative to `root`; rows matched by always-delete
/// patterns are marked with `*`.
pub fn render_table(
    items: &[ScanItem],
    root: &Path,
    selected: &HashSet<PathBuf>,
    now: SystemTime,
) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "  {:>10}  {:>8}  {:<9}  {:<14}  PATH\n",
        "SIZE", "AGE", "SCOPE", "TYPE"
    ));
    output.push_str(&format!("  {}\n", "-".repeat(72)));

    for item in items {
        let marker = if selected.contains(&item.path) { "*" } else { " " };
        let error_marker = if item.stats.error.is_some() { " [!]" } else { "" };
        output.push_str(&format!(
            "  {:>10}  {:>8}  {:<9}  {:<14} {}{}{}\n",
            human_size(Some(item.stats.size)),
            time_ago(item.stats.mtime, now),
            scope_label(item.cleanup_scope),
            type_label(candidate_type(item)),
            marker,
            display_relative(&item.path, root),
            error_marker,
        ));
    }

    let total: u64 = items.iter().map(|i| i.stats.size).sum();
    output.push_str(&format!(
        "\n  Total: {} in {} item{}\n",
        human_size(Some(total)),
        items.len(),
        if items.len() == 1 { "" } else { "s" }
    ));

    output
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportItem<'a> {
    #[serde(flatten)]
    item: &'a ScanItem,
    candidate_type: CandidateType,
    apply_protected: bool,
    selected: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    root: String,
    items: Vec<ReportItem<'a>>,
    item_count: usize,
    total_size: u64,
}

/// Render scan items as a machine-readable JSON document.
pub fn render_json(
    items: &[ScanItem],
    root: &Path,
    selected: &HashSet<PathBuf>,
) -> Result<String, serde_json::Error> {
    let report = JsonReport {
        root: root.display().to_string(),
        items: items
            .iter()
            .map(|item| {
                let family = candidate_type(item);
                ReportItem {
                    item,
                    candidate_type: family,
                    apply_protected: is_apply_protected(family),
                    selected: selected.contains(&item.path),
                }
            })
            .collect(),
        item_count: items.len(),
        total_size: items.iter().map(|i| i.stats.size).sum(),
    };

    serde_json::to_string_pretty(&report)
}

fn scope_label(scope: CleanupScope) -> &'static str {
    match scope {
        CleanupScope::Project => "project",
        CleanupScope::Workspace => "workspace",
    }
}

fn type_label(candidate: CandidateType) -> &'static str {
    match candidate {
        CandidateType::Artifact => "artifact",
        CandidateType::Asset => "asset",
        CandidateType::NodeModules => "node_modules",
        CandidateType::PmCache => "pm-cache",
    }
}

fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .map(|rel| rel.display().to_string())
        .unwrap_or_else(|_| path.display().to_string())
}

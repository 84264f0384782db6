//! Workspace manifest collection.
//!
//! Patterns accumulate from three optional sources in order:
//! `package.json` (`workspaces` array or `{packages}` object),
//! `pnpm-workspace.yaml` (narrow line-based subset), and `lerna.json`
//! (`packages` array). Per-source read or parse failures are silent.

use crate::pattern::normalize_workspace_pattern;
use regex::Regex;
use serde_json::Value;
use std::path::Path;
use std::sync::OnceLock;

/// Collected workspace patterns for a root.
#[derive(Debug, Clone, Default)]
pub struct ManifestPatterns {
    /// Normalized patterns, negations included.
    pub patterns: Vec<String>,
    /// True if any source yielded any candidate string, even if every
    /// candidate was rejected by normalization.
    pub has_manifest: bool,
}

pub fn collect_manifest_patterns(root: &Path) -> ManifestPatterns {
    let mut candidates: Vec<String> = Vec::new();

    candidates.extend(package_json_patterns(root));
    candidates.extend(pnpm_workspace_patterns(root));
    candidates.extend(lerna_patterns(root));

    let has_manifest = !candidates.is_empty();
    let mut patterns: Vec<String> = Vec::new();
    for pattern in candidates
        .iter()
        .filter_map(|c| normalize_workspace_pattern(c))
    {
        if !patterns.contains(&pattern) {
            patterns.push(pattern);
        }
    }

    ManifestPatterns {
        patterns,
        has_manifest,
    }
}

fn package_json_patterns(root: &Path) -> Vec<String> {
    let Some(value) = read_json(&root.join("package.json")) else {
        return Vec::new();
    };
    match value.get("workspaces") {
        Some(Value::Array(entries)) => string_entries(entries),
        Some(Value::Object(obj)) => match obj.get("packages") {
            Some(Value::Array(entries)) => string_entries(entries),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn lerna_patterns(root: &Path) -> Vec<String> {
    let Some(value) = read_json(&root.join("lerna.json")) else {
        return Vec::new();
    };
    match value.get("packages") {
        Some(Value::Array(entries)) => string_entries(entries),
        _ => Vec::new(),
    }
}

fn string_entries(entries: &[Value]) -> Vec<String> {
    entries
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}

fn read_json(path: &Path) -> Option<Value> {
    let contents = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&contents).ok()
}

fn list_item_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^-\s*["']?([^"']+?)["']?\s*$"#).expect("list item regex"))
}

fn top_level_key_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+\s*:").expect("top-level key regex"))
}

/// Narrow `pnpm-workspace.yaml` parser: finds the `packages:` key and
/// consumes `- item` lines until the next top-level key. Not a YAML
/// parser; exactly the subset pnpm workspace files use in practice.
fn pnpm_workspace_patterns(root: &Path) -> Vec<String> {
    let Ok(contents) = std::fs::read_to_string(root.join("pnpm-workspace.yaml")) else {
        return Vec::new();
    };
    parse_pnpm_packages(&contents)
}

pub(crate) fn parse_pnpm_packages(contents: &str) -> Vec<String> {
    let mut patterns = Vec::new();
    let mut in_packages = false;

    for line in contents.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if !in_packages {
            if trimmed.starts_with("packages") && top_level_key_regex().is_match(trimmed) {
                in_packages = true;
            }
            continue;
        }

        if let Some(caps) = list_item_regex().captures(trimmed) {
            patterns.push(caps[1].trim().to_string());
        } else if top_level_key_regex().is_match(trimmed) {
            break;
        }
    }

    patterns
}

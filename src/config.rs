//! Per-project configuration loading and normalization.
//!
//! Two optional JSON sources at the scan root: the `next-prune` key of
//! `package.json` and `.next-prunerc.json`. Both merge over defaults; the
//! rc file wins on key collisions. Read and parse failures are silent and
//! fall back to defaults.

use crate::pattern::normalize_path_pattern;
use crate::scanner::CleanupScope;
use serde_json::{Map, Value};
use std::path::Path;

/// Config key inside `package.json`.
pub const PACKAGE_JSON_KEY: &str = "next-prune";

/// Standalone rc file name at the scan root.
pub const RC_FILE_NAME: &str = ".next-prunerc.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonorepoMode {
    Auto,
    On,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceDiscoveryMode {
    /// Manifest patterns first, heuristic roots when none resolve.
    ManifestFallback,
    ManifestOnly,
    HeuristicOnly,
}

/// Fully-normalized project configuration.
#[derive(Debug, Clone)]
pub struct PruneConfig {
    pub always_delete: Vec<String>,
    pub never_delete: Vec<String>,
    pub check_unused_assets: bool,
    pub monorepo_mode: MonorepoMode,
    pub workspace_discovery_mode: WorkspaceDiscoveryMode,
    pub cleanup_scopes: Vec<CleanupScope>,
    pub include_node_modules: bool,
    pub include_project_local_pm_caches: bool,
    pub max_scan_depth: Option<u64>,
}

impl Default for PruneConfig {
    fn default() -> Self {
        Self {
            always_delete: Vec::new(),
            never_delete: Vec::new(),
            check_unused_assets: false,
            monorepo_mode: MonorepoMode::Auto,
            workspace_discovery_mode: WorkspaceDiscoveryMode::ManifestFallback,
            cleanup_scopes: vec![CleanupScope::Project, CleanupScope::Workspace],
            include_node_modules: true,
            include_project_local_pm_caches: true,
            max_scan_depth: None,
        }
    }
}

impl PruneConfig {
    /// Load and normalize configuration from the scan root.
    pub fn load(root: &Path) -> Self {
        let mut merged: Map<String, Value> = Map::new();

        if let Some(obj) = read_package_json_config(root) {
            merged.extend(obj);
        }
        if let Some(obj) = read_json_object(&root.join(RC_FILE_NAME)) {
            // rc file wins on key collision
            merged.extend(obj);
        }

        Self::from_raw(&merged)
    }

    /// Normalize a raw merged key/value map into a typed config.
    pub fn from_raw(raw: &Map<String, Value>) -> Self {
        let defaults = Self::default();

        Self {
            always_delete: normalize_pattern_list(raw.get("alwaysDelete")),
            never_delete: normalize_pattern_list(raw.get("neverDelete")),
            check_unused_assets: raw
                .get("checkUnusedAssets")
                .and_then(Value::as_bool)
                .unwrap_or(defaults.check_unused_assets),
            monorepo_mode: raw
                .get("monorepoMode")
                .and_then(Value::as_str)
                .and_then(parse_monorepo_mode)
                .unwrap_or(defaults.monorepo_mode),
            workspace_discovery_mode: raw
                .get("workspaceDiscoveryMode")
                .and_then(Value::as_str)
                .and_then(parse_discovery_mode)
                .unwrap_or(defaults.workspace_discovery_mode),
            cleanup_scopes: match raw.get("cleanupScopes").and_then(Value::as_array) {
                // An explicit empty array means "scan nothing"
                Some(values) => normalize_scope_list(values),
                None => defaults.cleanup_scopes,
            },
            include_node_modules: raw
                .get("includeNodeModules")
                .and_then(Value::as_bool)
                .unwrap_or(defaults.include_node_modules),
            include_project_local_pm_caches: raw
                .get("includeProjectLocalPmCaches")
                .and_then(Value::as_bool)
                .unwrap_or(defaults.include_project_local_pm_caches),
            max_scan_depth: raw.get("maxScanDepth").and_then(Value::as_u64),
        }
    }
}

fn read_package_json_config(root: &Path) -> Option<Map<String, Value>> {
    let value = read_json(&root.join("package.json"))?;
    match value.get(PACKAGE_JSON_KEY) {
        Some(Value::Object(obj)) => Some(obj.clone()),
        _ => None,
    }
}

fn read_json_object(path: &Path) -> Option<Map<String, Value>> {
    match read_json(path)? {
        Value::Object(obj) => Some(obj),
        _ => None,
    }
}

fn read_json(path: &Path) -> Option<Value> {
    let contents = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&contents) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::trace!(path = %path.display(), %err, "ignoring unparseable config");
            None
        }
    }
}

/// Filter to strings, normalize each, drop rejects, dedup keeping first.
fn normalize_pattern_list(value: Option<&Value>) -> Vec<String> {
    let mut seen = Vec::new();
    if let Some(values) = value.and_then(Value::as_array) {
        for pattern in values
            .iter()
            .filter_map(Value::as_str)
            .filter_map(normalize_path_pattern)
        {
            if !seen.contains(&pattern) {
                seen.push(pattern);
            }
        }
    }
    seen
}

fn normalize_scope_list(values: &[Value]) -> Vec<CleanupScope> {
    let mut scopes = Vec::new();
    for scope in values.iter().filter_map(Value::as_str) {
        let scope = match scope {
            "project" => CleanupScope::Project,
            "workspace" => CleanupScope::Workspace,
            _ => continue,
        };
        if !scopes.contains(&scope) {
            scopes.push(scope);
        }
    }
    scopes
}

fn parse_monorepo_mode(value: &str) -> Option<MonorepoMode> {
    match value {
        "auto" => Some(MonorepoMode::Auto),
        "on" => Some(MonorepoMode::On),
        "off" => Some(MonorepoMode::Off),
        _ => None,
    }
}

fn parse_discovery_mode(value: &str) -> Option<WorkspaceDiscoveryMode> {
    match value {
        // Canonical names plus legacy aliases
        "manifest-fallback" | "auto" => Some(WorkspaceDiscoveryMode::ManifestFallback),
        "manifest-only" | "manifest" => Some(WorkspaceDiscoveryMode::ManifestOnly),
        "heuristic-only" | "heuristic" => Some(WorkspaceDiscoveryMode::HeuristicOnly),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(obj) => obj,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn default_config() {
        let config = PruneConfig::default();
        assert!(config.always_delete.is_empty());
        assert!(!config.check_unused_assets);
        assert!(config.include_node_modules);
        assert_eq!(config.monorepo_mode, MonorepoMode::Auto);
        assert_eq!(
            config.cleanup_scopes,
            vec![CleanupScope::Project, CleanupScope::Workspace]
        );
        assert_eq!(config.max_scan_depth, None);
    }

    #[test]
    fn pattern_lists_filter_normalize_dedup() {
        let config = PruneConfig::from_raw(&raw(json!({
            "alwaysDelete": ["./dist/", 42, "dist", "../escape", "a\\b", null],
        })));
        assert_eq!(config.always_delete, vec!["dist", "a/b"]);
    }

    #[test]
    fn booleans_fall_back_on_wrong_type() {
        let config = PruneConfig::from_raw(&raw(json!({
            "checkUnusedAssets": "yes",
            "includeNodeModules": false,
        })));
        assert!(!config.check_unused_assets);
        assert!(!config.include_node_modules);
    }

    #[test]
    fn monorepo_mode_parsing() {
        let config = PruneConfig::from_raw(&raw(json!({ "monorepoMode": "off" })));
        assert_eq!(config.monorepo_mode, MonorepoMode::Off);

        let config = PruneConfig::from_raw(&raw(json!({ "monorepoMode": "sideways" })));
        assert_eq!(config.monorepo_mode, MonorepoMode::Auto);
    }

    #[test]
    fn discovery_mode_accepts_legacy_aliases() {
        for (input, expected) in [
            ("manifest-fallback", WorkspaceDiscoveryMode::ManifestFallback),
            ("auto", WorkspaceDiscoveryMode::ManifestFallback),
            ("manifest-only", WorkspaceDiscoveryMode::ManifestOnly),
            ("manifest", WorkspaceDiscoveryMode::ManifestOnly),
            ("heuristic-only", WorkspaceDiscoveryMode::HeuristicOnly),
            ("heuristic", WorkspaceDiscoveryMode::HeuristicOnly),
        ] {
            let config =
                PruneConfig::from_raw(&raw(json!({ "workspaceDiscoveryMode": input })));
            assert_eq!(config.workspace_discovery_mode, expected, "{input}");
        }
    }

    #[test]
    fn explicit_empty_scopes_preserved() {
        let config = PruneConfig::from_raw(&raw(json!({ "cleanupScopes": [] })));
        assert!(config.cleanup_scopes.is_empty());
    }

    #[test]
    fn scopes_filter_and_dedup() {
        let config = PruneConfig::from_raw(&raw(json!({
            "cleanupScopes": ["workspace", "bogus", "workspace", "project"],
        })));
        assert_eq!(
            config.cleanup_scopes,
            vec![CleanupScope::Workspace, CleanupScope::Project]
        );
    }

    #[test]
    fn max_scan_depth_rejects_negative_and_fractional() {
        let config = PruneConfig::from_raw(&raw(json!({ "maxScanDepth": 3 })));
        assert_eq!(config.max_scan_depth, Some(3));

        let config = PruneConfig::from_raw(&raw(json!({ "maxScanDepth": -1 })));
        assert_eq!(config.max_scan_depth, None);

        let config = PruneConfig::from_raw(&raw(json!({ "maxScanDepth": 2.5 })));
        assert_eq!(config.max_scan_depth, None);
    }

    #[test]
    fn load_returns_defaults_for_missing_root() {
        let config = PruneConfig::load(Path::new("/nonexistent/prune-test"));
        assert!(config.never_delete.is_empty());
        assert_eq!(config.monorepo_mode, MonorepoMode::Auto);
    }
}

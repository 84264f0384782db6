use crate::config::{MonorepoMode, PruneConfig, WorkspaceDiscoveryMode};
use crate::scanner::CleanupScope;

/// Directory names always treated as build-artifact candidates and never
/// recursed into.
pub const ARTIFACT_DIR_NAMES: &[&str] = &[
    ".next",
    "out",
    ".turbo",
    ".vercel_build_output",
    "coverage",
    ".swc",
    ".docusaurus",
    "storybook-static",
];

/// Directory names skipped outright: not recursed into, not emitted.
pub const DEFAULT_SKIP_DIRS: &[&str] = &[
    ".git",
    ".svn",
    ".hg",
    ".next",
    ".turbo",
    ".vercel",
    "node_modules",
    "coverage",
    ".swc",
    ".docusaurus",
    "storybook-static",
];

/// Package-manager cache paths probed directly under each scan root.
pub const PROJECT_LOCAL_PM_CACHE_DIRS: &[&str] = &[
    ".npm",
    ".pnpm-store",
    ".yarn/cache",
    ".yarn/unplugged",
    ".bun/install/cache",
];

/// Configuration options for artifact scanning.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Extra directory names to skip, added to [`DEFAULT_SKIP_DIRS`]
    pub skip_dirs: Vec<String>,

    pub monorepo_mode: MonorepoMode,

    pub workspace_discovery_mode: WorkspaceDiscoveryMode,

    /// Scopes to scan; an empty list scans nothing
    pub cleanup_scopes: Vec<CleanupScope>,

    /// Emit `node_modules` directories as candidates
    pub include_node_modules: bool,

    /// Probe for project-local package-manager caches
    pub include_project_local_pm_caches: bool,

    /// Maximum recursion depth past a scan root (None = unlimited);
    /// depth 0 is the root's immediate children
    pub max_depth: Option<u64>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            skip_dirs: Vec::new(),
            monorepo_mode: MonorepoMode::Auto,
            workspace_discovery_mode: WorkspaceDiscoveryMode::ManifestFallback,
            cleanup_scopes: vec![CleanupScope::Project, CleanupScope::Workspace],
            include_node_modules: true,
            include_project_local_pm_caches: true,
            max_depth: None,
        }
    }
}

impl ScanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive scan options from a normalized project config.
    pub fn from_config(config: &PruneConfig) -> Self {
        Self {
            skip_dirs: Vec::new(),
            monorepo_mode: config.monorepo_mode,
            workspace_discovery_mode: config.workspace_discovery_mode,
            cleanup_scopes: config.cleanup_scopes.clone(),
            include_node_modules: config.include_node_modules,
            include_project_local_pm_caches: config.include_project_local_pm_caches,
            max_depth: config.max_scan_depth,
        }
    }

    pub fn with_skip_dirs(mut self, dirs: Vec<String>) -> Self {
        self.skip_dirs = dirs;
        self
    }

    pub fn with_monorepo_mode(mut self, mode: MonorepoMode) -> Self {
        self.monorepo_mode = mode;
        self
    }

    pub fn with_cleanup_scopes(mut self, scopes: Vec<CleanupScope>) -> Self {
        self.cleanup_scopes = scopes;
        self
    }

    pub fn with_node_modules(mut self, include: bool) -> Self {
        self.include_node_modules = include;
        self
    }

    pub fn with_pm_caches(mut self, include: bool) -> Self {
        self.include_project_local_pm_caches = include;
        self
    }

    pub fn with_max_depth(mut self, depth: u64) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// True if `name` is skipped by default or by user configuration.
    pub fn is_skipped_dir(&self, name: &str) -> bool {
        DEFAULT_SKIP_DIRS.contains(&name) || self.skip_dirs.iter().any(|d| d == name)
    }
}

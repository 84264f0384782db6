use clap::Parser;
use std::path::PathBuf;

/// next-prune - reclaim disk space in JavaScript monorepos
///
/// Scans for build artifacts, package-manager caches and optionally
/// unused public assets, then deletes an approved subset. Without `--yes`
/// the tool only reports.
#[derive(Parser, Debug)]
#[command(name = "next-prune")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run non-interactively and delete the selected candidates
    #[arg(long)]
    pub yes: bool,

    /// Report what would be removed without deleting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Scan root directory
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub cwd: PathBuf,

    /// Emit a human-readable listing of candidates and exit
    #[arg(long)]
    pub list: bool,

    /// Emit a JSON listing (implies --list)
    #[arg(long)]
    pub json: bool,

    /// Force monorepo workspace scanning on
    #[arg(long)]
    pub monorepo: bool,

    /// Candidate families to include, comma-separated
    /// (default, safe, node-modules, pm-caches)
    #[arg(long, value_name = "TOKENS")]
    pub cleanup_scope: Option<String>,

    /// Exclude node_modules directories
    #[arg(long = "no-node-modules")]
    pub no_node_modules: bool,

    /// Exclude project-local package-manager caches
    #[arg(long = "no-pm-caches")]
    pub no_pm_caches: bool,

    /// Force manifest-based workspace discovery with heuristic fallback
    #[arg(long)]
    pub workspace_detect: bool,

    /// Maximum scan depth, a non-negative integer
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    pub max_depth: Option<String>,

    /// Allow deletion of protected families (node_modules, pm caches)
    #[arg(long)]
    pub apply: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        // Validates the CLI definition is correct
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_defaults() {
        let cli = Cli::parse_from(["next-prune"]);
        assert!(!cli.yes);
        assert!(!cli.dry_run);
        assert_eq!(cli.cwd, PathBuf::from("."));
        assert!(cli.max_depth.is_none());
    }

    #[test]
    fn parse_full_invocation() {
        let cli = Cli::parse_from([
            "next-prune",
            "--yes",
            "--apply",
            "--cwd=/projects/site",
            "--cleanup-scope=safe,pm-caches",
            "--max-depth=4",
            "--no-node-modules",
        ]);
        assert!(cli.yes);
        assert!(cli.apply);
        assert_eq!(cli.cwd, PathBuf::from("/projects/site"));
        assert_eq!(cli.cleanup_scope.as_deref(), Some("safe,pm-caches"));
        assert_eq!(cli.max_depth.as_deref(), Some("4"));
        assert!(cli.no_node_modules);
    }

    #[test]
    fn max_depth_stays_raw_for_validation() {
        // Accepted by clap; validated later so bad input exits 1, not 2
        let cli = Cli::parse_from(["next-prune", "--max-depth=oops"]);
        assert_eq!(cli.max_depth.as_deref(), Some("oops"));
    }

    #[test]
    fn verbose_counts() {
        let cli = Cli::parse_from(["next-prune", "-vv"]);
        assert_eq!(cli.verbose, 2);
    }
}

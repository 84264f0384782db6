//! The prune pipeline: scan, classify, filter, report or delete.

use crate::assets::{asset_items, find_unused_assets, AssetOptions};
use crate::classify::{allowed_candidate_types, candidate_type, CandidateType};
use crate::cli::Cli;
use crate::config::{MonorepoMode, PruneConfig, WorkspaceDiscoveryMode};
use crate::deleter::delete_items;
use crate::error::{PruneError, Result};
use crate::format::human_size;
use crate::policy::{
    filter_never_delete, is_apply_protected, select_always_delete_paths, selection_has_protected,
};
use crate::report::{render_json, render_table};
use crate::scanner::{scan_artifacts, ScanItem, ScanOptions};
use std::time::SystemTime;

/// Run the full pipeline for one invocation.
pub fn run(args: &Cli) -> Result<()> {
    let root = args.cwd.canonicalize().map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => PruneError::PathNotFound(args.cwd.clone()),
        _ => PruneError::Io {
            path: args.cwd.clone(),
            source: e,
        },
    })?;

    let mut config = PruneConfig::load(&root);
    apply_cli_overrides(&mut config, args)?;

    let allowed = allowed_candidate_types(
        args.cleanup_scope.as_deref(),
        config.include_node_modules,
        config.include_project_local_pm_caches,
    )?;

    let options = ScanOptions::from_config(&config);
    let mut items = scan_artifacts(&root, &options)?;
    items.retain(|item| allowed.contains(&candidate_type(item)));

    if config.check_unused_assets && allowed.contains(&CandidateType::Asset) {
        let unused = find_unused_assets(&root, &AssetOptions::default());
        tracing::debug!(count = unused.len(), "unused assets");
        items.extend(asset_items(unused));
    }

    let mut items = filter_never_delete(items, &root, &config.never_delete);
    ScanItem::sort_items(&mut items);

    let selected = select_always_delete_paths(&items, &root, &config.always_delete);

    if args.json {
        println!("{}", render_json(&items, &root, &selected)?);
        return Ok(());
    }
    if args.list {
        print!("{}", render_table(&items, &root, &selected, SystemTime::now()));
        return Ok(());
    }

    if items.is_empty() {
        if !args.quiet {
            println!("No cleanup candidates found in {}.", root.display());
        }
        return Ok(());
    }

    if args.dry_run {
        println!("[DRY RUN] Would delete:");
        for item in &items {
            println!(
                "  {:>10}  {}",
                human_size(Some(item.stats.size)),
                item.path.display()
            );
        }
        let total: u64 = items.iter().map(|i| i.stats.size).sum();
        println!(
            "\nWould reclaim {} across {} item{}.",
            human_size(Some(total)),
            items.len(),
            if items.len() == 1 { "" } else { "s" }
        );
        return Ok(());
    }

    if !args.yes {
        // Report-only default; the interactive prompt loop lives elsewhere
        print!("{}", render_table(&items, &root, &selected, SystemTime::now()));
        println!("\nRun again with --yes to delete, or --dry-run to preview.");
        return Ok(());
    }

    if selection_has_protected(&items) && !args.apply {
        let protected = items
            .iter()
            .filter(|i| is_apply_protected(candidate_type(i)))
            .count();
        return Err(PruneError::ApplyRequired(protected));
    }

    let summary = delete_items(&items);

    if !args.quiet {
        println!(
            "Deleted {} item{}, reclaimed {}.",
            summary.deleted_count,
            if summary.deleted_count == 1 { "" } else { "s" },
            human_size(Some(summary.reclaimed_bytes))
        );
    }
    for result in summary.results.iter().filter(|r| !r.ok) {
        eprintln!(
            "  Failed to delete {}: {}",
            result.path.display(),
            result.error.as_deref().unwrap_or("unknown error")
        );
    }

    if summary.failure_count > 0 {
        return Err(PruneError::DeletionFailures(summary.failure_count));
    }

    Ok(())
}

fn apply_cli_overrides(config: &mut PruneConfig, args: &Cli) -> Result<()> {
    if args.monorepo {
        config.monorepo_mode = MonorepoMode::On;
    }
    if args.workspace_detect {
        config.workspace_discovery_mode = WorkspaceDiscoveryMode::ManifestFallback;
    }
    if args.no_node_modules {
        config.include_node_modules = false;
    }
    if args.no_pm_caches {
        config.include_project_local_pm_caches = false;
    }
    if let Some(raw) = &args.max_depth {
        let depth = raw
            .trim()
            .parse::<u64>()
            .map_err(|_| PruneError::InvalidMaxDepth(raw.clone()))?;
        config.max_scan_depth = Some(depth);
    }
    Ok(())
}

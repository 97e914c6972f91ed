//! Cross-repository template commands: init, report and sync

use std::io;

use colored::Colorize;
use mirror_core::{
    DiffReporter, FileAction, MapMode, SyncOptions, SyncReport, TemplateSynchronizer,
};
use mirror_fs::{NormalizedPath, find_local_repositories};

use crate::context::RunContext;
use crate::error::Result;
use crate::interactive;

fn synchronizer(ctx: &RunContext, mode: MapMode) -> Result<TemplateSynchronizer> {
    let template_dir = ctx.template_dir()?.clone();
    Ok(TemplateSynchronizer::new(template_dir, ctx.config.engine()?, mode)?)
}

fn targets(ctx: &RunContext) -> Result<Vec<NormalizedPath>> {
    Ok(find_local_repositories(&ctx.target_dir)?)
}

/// Run the cross-repo-init command
///
/// Never halts: unmapped repositories get the configured default set.
pub fn run_cross_repo_init(ctx: &RunContext) -> Result<()> {
    let mut sync = synchronizer(ctx, ctx.default_mode())?;
    let paths = targets(ctx)?;
    let resolved = TemplateSynchronizer::resolve_targets(&paths)?;
    let added = sync.ensure_entries(&resolved)?;

    for name in &added {
        println!("  {} {}:{}", "+".green(), name, ctx.config.default_template);
    }
    println!(
        "{} Initialized template map for {} repositories ({} added).",
        "OK".green().bold(),
        resolved.len(),
        added.len()
    );
    println!("File is located at {}", sync.map().path());
    Ok(())
}

/// Run the cross-repo-report command
pub fn run_cross_repo_report(ctx: &RunContext, structure: bool) -> Result<()> {
    let mut sync = synchronizer(ctx, MapMode::Interactive)?;
    let paths = targets(ctx)?;

    let stdout = io::stdout();
    let mut reporter = DiffReporter::new(stdout.lock());
    if structure {
        reporter.report_structural(&mut sync, &paths)?;
    } else {
        reporter.report_content(&mut sync, &paths)?;
    }
    Ok(())
}

/// Run the cross-repo-sync command
///
/// Unmapped repositories get the configured default set, so the map never
/// halts a sync. The confirmation prompt comes after the map is complete.
pub fn run_cross_repo_sync(ctx: &RunContext, dry_run: bool) -> Result<()> {
    let mut sync = synchronizer(ctx, ctx.default_mode())?;
    let paths = targets(ctx)?;
    let resolved = TemplateSynchronizer::resolve_targets(&paths)?;
    for name in sync.ensure_entries(&resolved)? {
        println!("  {} {}:{}", "+".green(), name, ctx.config.default_template);
    }

    if ctx.prompt
        && !dry_run
        && !interactive::confirm("Are you sure you want to sync all repositories?")?
    {
        println!("Sync cancelled.");
        return Ok(());
    }

    let report = sync.sync(&paths, &SyncOptions { dry_run })?;
    print_sync_report(&report);
    Ok(())
}

fn print_sync_report(report: &SyncReport) {
    let prefix = if report.dry_run {
        format!("{} ", "[dry-run]".yellow())
    } else {
        String::new()
    };

    for target in &report.targets {
        println!(
            "{} {} ({})",
            "=>".blue().bold(),
            target.target,
            target.template_set.cyan()
        );
        for file in &target.files {
            match file.action {
                FileAction::Created => println!("   {}{} {}", prefix, "+".green(), file.path),
                FileAction::Updated => println!("   {}{} {}", prefix, "~".yellow(), file.path),
                FileAction::Unchanged => tracing::debug!(file = %file.path, "Unchanged"),
            }
        }
    }

    let verb = if report.dry_run { "Would synchronize" } else { "Synchronized" };
    println!(
        "{} {} {} repositories: {} created, {} updated, {} unchanged.",
        "OK".green().bold(),
        verb,
        report.targets.len(),
        report.count(FileAction::Created),
        report.count(FileAction::Updated),
        report.count(FileAction::Unchanged)
    );
}

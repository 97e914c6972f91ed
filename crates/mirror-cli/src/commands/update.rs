//! Merge the base branch into every local branch of every repository

use colored::Colorize;
use mirror_fs::find_local_repositories;
use mirror_git::{GitRepository, UpdateOutcome, VersionControl};

use crate::context::RunContext;
use crate::error::{CliError, Result};

/// Run the update-from-main command
///
/// Branches that would conflict are left untouched and reported. The command
/// fails if any repository errored or any branch conflicted.
pub fn run_update_from_main(ctx: &RunContext, base: &str, dry_run: bool) -> Result<()> {
    let repositories = find_local_repositories(&ctx.target_dir)?;
    println!(
        "{} Updating branches from '{}' in {} repositories.",
        "=>".blue().bold(),
        base,
        repositories.len()
    );

    let mut failed = 0;
    let mut conflicted = 0;
    for path in &repositories {
        if dry_run {
            println!(
                "{} Would have updated branches from '{}' in {}",
                "[dry-run]".yellow(),
                base,
                path
            );
            continue;
        }

        let result = GitRepository::open(path.clone()).and_then(|repo| repo.update_from(base));
        match result {
            Ok(updates) => {
                println!("{} {}", "OK".green().bold(), path);
                for update in &updates {
                    let outcome = match update.outcome {
                        UpdateOutcome::Conflicted => {
                            conflicted += 1;
                            update.outcome.to_string().red().to_string()
                        }
                        UpdateOutcome::UpToDate => update.outcome.to_string().dimmed().to_string(),
                        _ => update.outcome.to_string().green().to_string(),
                    };
                    println!("  {}: {}", update.branch, outcome);
                }
            }
            Err(e) => {
                failed += 1;
                tracing::warn!(path = %path, error = %e, "Update from base failed");
                println!("{} Failed to update repo at {}: {}", "FAILED".red().bold(), path, e);
            }
        }
    }

    if failed > 0 || conflicted > 0 {
        return Err(CliError::user(format!(
            "{} repositories failed and {} branches conflicted",
            failed, conflicted
        )));
    }
    Ok(())
}

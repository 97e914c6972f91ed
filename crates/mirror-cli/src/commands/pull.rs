//! Pull every local repository

use colored::Colorize;
use mirror_fs::find_local_repositories;
use mirror_git::{GitRepository, VersionControl};

use crate::context::RunContext;
use crate::error::{CliError, Result};

/// Run the pull-all command
///
/// Each repository is fast-forwarded from `origin` independently; failures
/// are reported and counted, and the command fails if any occurred.
pub fn run_pull_all(ctx: &RunContext, dry_run: bool) -> Result<()> {
    let repositories = find_local_repositories(&ctx.target_dir)?;
    println!("{} Pulling {} repositories.", "=>".blue().bold(), repositories.len());

    let mut failed = 0;
    for path in &repositories {
        if dry_run {
            println!("{} Would have pulled latest changes in {}", "[dry-run]".yellow(), path);
            continue;
        }

        let result = GitRepository::open(path.clone()).and_then(|repo| repo.pull(None, None));
        match result {
            Ok(()) => println!("{} Pulled latest changes in {}", "OK".green().bold(), path),
            Err(e) => {
                failed += 1;
                tracing::warn!(path = %path, error = %e, "Pull failed");
                println!("{} Failed to pull repo at {}: {}", "FAILED".red().bold(), path, e);
            }
        }
    }

    if failed > 0 {
        return Err(CliError::user(format!(
            "{} of {} repositories failed to pull",
            failed,
            repositories.len()
        )));
    }
    Ok(())
}

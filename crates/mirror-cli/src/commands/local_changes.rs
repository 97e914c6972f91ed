//! Uncommitted/unpushed changes report

use colored::Colorize;
use mirror_core::{Finding, audit_local_changes};
use mirror_fs::child_directories;

use crate::context::RunContext;
use crate::error::Result;

/// Run the local-changes command
pub fn run_local_changes(ctx: &RunContext) -> Result<()> {
    let dirs = child_directories(&ctx.target_dir)?;
    println!(
        "{} Checking {} directories for uncommitted changes and unpushed commits.",
        "=>".blue().bold(),
        dirs.len()
    );

    let audits = audit_local_changes(&dirs);
    let mut attention = 0;

    for audit in &audits {
        if audit.is_clean() {
            tracing::debug!(path = %audit.path, "No local changes");
            continue;
        }
        attention += 1;
        for finding in &audit.findings {
            let line = format!("{} {}", audit.path, finding);
            match finding {
                Finding::Uncommitted | Finding::Unpushed { .. } => println!("{}", line.red()),
                Finding::Untracked { .. } => println!("{}", line.yellow()),
                Finding::Invalid { .. } => println!("{}", line.dimmed()),
            }
        }
    }

    if attention == 0 {
        println!("{} No local changes found.", "OK".green().bold());
    } else {
        println!();
        println!("{} of {} directories need attention.", attention, audits.len());
    }

    Ok(())
}

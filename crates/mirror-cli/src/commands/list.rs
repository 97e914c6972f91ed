//! List local repositories

use colored::Colorize;
use mirror_fs::find_local_repositories;

use crate::context::RunContext;
use crate::error::Result;

/// Run the list-local command
pub fn run_list_local(ctx: &RunContext) -> Result<()> {
    let repositories = find_local_repositories(&ctx.target_dir)?;

    println!(
        "{} {} repositories in {}",
        "=>".blue().bold(),
        repositories.len(),
        ctx.target_dir
    );
    for repo in &repositories {
        match repo.relative_to(&ctx.target_dir) {
            Some(rel) if !rel.is_empty() => println!("  {}", rel.cyan()),
            _ => println!("  {}", repo.as_str().cyan()),
        }
    }

    Ok(())
}

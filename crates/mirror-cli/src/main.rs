//! git-mirror CLI
//!
//! Manage a directory full of local clones: audit local work, pull, and keep
//! shared files in step with template sets.

mod cli;
mod commands;
mod context;
mod error;
mod interactive;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use context::RunContext;
use error::{CliError, Result};

/// Exit status when the template map needs hand edits before continuing.
const EXIT_USER_ACTION: i32 = 2;

fn main() {
    match run() {
        Ok(()) => {}
        Err(CliError::Core(mirror_core::Error::UserActionRequired { map_path, projects })) => {
            println!(
                "Please fill in the template_map.txt file with the correct template for each project."
            );
            for project in &projects {
                println!("  {} {}:", "?".yellow().bold(), project);
            }
            println!("File is located at {}", map_path.display());
            std::process::exit(EXIT_USER_ACTION);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to initialise logging: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!("Verbose mode enabled");

    let Some(command) = cli.command.clone() else {
        // No command provided - show help hint
        println!("{} git-mirror CLI", "git-mirror".green().bold());
        println!();
        println!("Run {} for available commands.", "git-mirror --help".cyan());
        return Ok(());
    };

    let ctx = RunContext::from_cli(&cli)?;
    execute_command(&ctx, command)
}

fn execute_command(ctx: &RunContext, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::LocalChanges => commands::run_local_changes(ctx),
        Commands::ListLocal => commands::run_list_local(ctx),
        Commands::PullAll { dry_run } => commands::run_pull_all(ctx, dry_run),
        Commands::UpdateFromMain { base, dry_run } => {
            commands::run_update_from_main(ctx, &base, dry_run)
        }
        Commands::CrossRepoInit => commands::run_cross_repo_init(ctx),
        Commands::CrossRepoReport { structure } => commands::run_cross_repo_report(ctx, structure),
        Commands::CrossRepoSync { dry_run } => commands::run_cross_repo_sync(ctx, dry_run),
    }
}

//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// git-mirror - Keep many local repositories in step with shared templates
#[derive(Parser, Debug)]
#[command(name = "git-mirror")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the config file (default: ~/git_mirror.toml)
    #[arg(long, global = true, env = "GIT_MIRROR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the local clones
    #[arg(long, global = true)]
    pub target_dir: Option<PathBuf>,

    /// Template root for the cross-repo commands
    #[arg(long, global = true)]
    pub template_dir: Option<PathBuf>,

    /// Do not ask for confirmation before changing repositories
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Report uncommitted and unpushed changes in every local repository
    LocalChanges,

    /// List local repositories under the target directory
    ListLocal,

    /// Fast-forward every local repository from origin
    PullAll {
        /// Only print which repositories would be pulled
        #[arg(long)]
        dry_run: bool,
    },

    /// Merge the base branch into every local branch of every repository
    ///
    /// Branches that would conflict are left as they are.
    UpdateFromMain {
        /// Branch to merge from
        #[arg(long, default_value = "main")]
        base: String,

        /// Only print which repositories would be updated
        #[arg(long)]
        dry_run: bool,
    },

    /// Add every local repository to the template map with the default template set
    CrossRepoInit,

    /// Report how local repositories differ from their template sets
    ///
    /// Shows unified diffs by default.
    CrossRepoReport {
        /// List divergent files per repository instead of diffs
        #[arg(long)]
        structure: bool,
    },

    /// Copy template sets into every local repository
    CrossRepoSync {
        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "git-mirror",
            "cross-repo-sync",
            "--dry-run",
            "--template-dir",
            "/srv/templates",
            "--yes",
        ]);
        assert!(cli.yes);
        assert_eq!(cli.template_dir, Some(PathBuf::from("/srv/templates")));
        assert_eq!(cli.command, Some(Commands::CrossRepoSync { dry_run: true }));
    }

    #[test]
    fn parse_report_structure() {
        let cli = Cli::parse_from(["git-mirror", "cross-repo-report", "--structure"]);
        assert_eq!(cli.command, Some(Commands::CrossRepoReport { structure: true }));
    }

    #[test]
    fn parse_update_from_main_defaults_to_main() {
        let cli = Cli::parse_from(["git-mirror", "update-from-main"]);
        assert_eq!(
            cli.command,
            Some(Commands::UpdateFromMain {
                base: "main".into(),
                dry_run: false
            })
        );

        let cli = Cli::parse_from(["git-mirror", "update-from-main", "--base", "develop", "--dry-run"]);
        assert_eq!(
            cli.command,
            Some(Commands::UpdateFromMain {
                base: "develop".into(),
                dry_run: true
            })
        );
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

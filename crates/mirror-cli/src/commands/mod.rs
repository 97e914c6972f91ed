//! Command implementations for mirror-cli

pub mod list;
pub mod local_changes;
pub mod pull;
pub mod template;
pub mod update;

pub use list::run_list_local;
pub use local_changes::run_local_changes;
pub use pull::run_pull_all;
pub use template::{run_cross_repo_init, run_cross_repo_report, run_cross_repo_sync};
pub use update::run_update_from_main;

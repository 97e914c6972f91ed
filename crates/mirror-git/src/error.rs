//! Error types for mirror-git

use std::path::PathBuf;

/// Result type for mirror-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mirror-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] mirror_fs::Error),

    #[error("{path} is not a valid git repository")]
    NotARepository { path: PathBuf },

    #[error("Remote '{name}' not found")]
    RemoteNotFound { name: String },

    #[error("Pull failed: {message}")]
    PullFailed { message: String },

    #[error("{message}")]
    CannotFastForward { message: String },

    #[error("Local changes on '{branch}' would be overwritten: {message}")]
    CheckoutBlocked { branch: String, message: String },

    #[error("Branch '{name}' not found")]
    BranchNotFound { name: String },
}

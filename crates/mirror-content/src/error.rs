//! Error types for mirror-content

/// Result type for mirror-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mirror-content operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid project name token {token:?}: {reason}")]
    InvalidToken { token: String, reason: String },

    #[error(transparent)]
    Fs(#[from] mirror_fs::Error),
}

//! Errors surfaced by the git-mirror binary

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] mirror_core::Error),

    #[error(transparent)]
    Fs(#[from] mirror_fs::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Prompt failed: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// Message printed as is, without a source chain
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}

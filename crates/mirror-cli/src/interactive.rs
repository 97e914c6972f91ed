//! Interactive prompts for CLI commands
//!
//! Uses dialoguer for terminal confirmation.

use dialoguer::Confirm;

use crate::error::Result;

/// Ask a yes/no question, defaulting to no.
pub fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

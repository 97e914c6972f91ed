//! Run context: config file values merged with command-line flags

use std::path::{Path, PathBuf};

use mirror_core::{MapMode, MirrorConfig};
use mirror_fs::NormalizedPath;

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Settings every command works from.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub config: MirrorConfig,
    pub target_dir: NormalizedPath,
    template_dir: Option<NormalizedPath>,
    /// Ask before changing repositories
    pub prompt: bool,
}

impl RunContext {
    /// Load the config file and apply flag overrides.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config_path = cli.config.clone().unwrap_or_else(MirrorConfig::default_path);
        let config = MirrorConfig::load(&NormalizedPath::new(&config_path))?;
        tracing::debug!(path = %config_path.display(), "Loaded configuration");

        let target_dir = match cli.target_dir.as_ref().or(config.target_dir.as_ref()) {
            Some(dir) => expand_home(dir),
            None => std::env::current_dir()?,
        };
        let template_dir = cli
            .template_dir
            .as_ref()
            .or(config.global_template_dir.as_ref())
            .map(|dir| NormalizedPath::new(expand_home(dir)));

        Ok(Self {
            prompt: !cli.yes && config.prompt_for_changes,
            target_dir: NormalizedPath::new(target_dir),
            template_dir,
            config,
        })
    }

    /// The template root, required by the cross-repo commands.
    pub fn template_dir(&self) -> Result<&NormalizedPath> {
        self.template_dir.as_ref().ok_or_else(|| {
            CliError::user(
                "No template directory configured. Pass --template-dir or set global_template_dir.",
            )
        })
    }

    /// Map mode that writes the configured default template set.
    pub fn default_mode(&self) -> MapMode {
        MapMode::UseDefault(self.config.default_template.clone())
    }
}

/// Expand a leading `~` to the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

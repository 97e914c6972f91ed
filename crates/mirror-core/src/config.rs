//! Application configuration
//!
//! Loaded from `~/git_mirror.toml` (or an explicit path) through
//! [`ConfigStore`]; every field has a default so a missing file is valid.

use std::collections::BTreeMap;
use std::path::PathBuf;

use mirror_content::{DEFAULT_PROJECT_NAME_TOKEN, LightTemplateEngine};
use mirror_fs::{ConfigStore, MirrorPath, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::Result;

/// Kind of source-control host a section describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostType {
    Github,
    Gitlab,
    Selfhosted,
}

/// Per-host settings carried for the host layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    pub host_type: HostType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_url: Option<String>,
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pypi_owner_name: Option<String>,
    #[serde(default)]
    pub include_private: bool,
    #[serde(default)]
    pub include_forks: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u64>,
}

/// Top-level git-mirror configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    /// Directory holding the local clones
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_dir: Option<PathBuf>,
    /// Template root for the cross-repo commands
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_template_dir: Option<PathBuf>,
    /// Template set written by `cross-repo-init`
    pub default_template: String,
    pub project_name_token: String,
    /// Ask before writing into targets
    pub prompt_for_changes: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub hosts: BTreeMap<String, HostConfig>,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            target_dir: None,
            global_template_dir: None,
            default_template: "default".to_string(),
            project_name_token: DEFAULT_PROJECT_NAME_TOKEN.to_string(),
            prompt_for_changes: true,
            hosts: BTreeMap::new(),
        }
    }
}

impl MirrorConfig {
    /// `~/git_mirror.toml`, or `git_mirror.toml` in the working directory
    /// when no home directory is known.
    pub fn default_path() -> PathBuf {
        match dirs::home_dir() {
            Some(home) => home.join(MirrorPath::ConfigFile),
            None => PathBuf::from(MirrorPath::ConfigFile.as_str()),
        }
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        Ok(ConfigStore::new().load_or_default(path)?)
    }

    pub fn save(&self, path: &NormalizedPath) -> Result<()> {
        Ok(ConfigStore::new().save(path, self)?)
    }

    /// Rendering engine for the configured token.
    pub fn engine(&self) -> Result<LightTemplateEngine> {
        Ok(LightTemplateEngine::with_token(self.project_name_token.clone())?)
    }
}

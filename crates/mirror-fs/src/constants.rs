//! Well-known file and directory names.

use std::path::Path;

/// Paths git-mirror recognises on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorPath {
    /// The `.git` entry marking a local repository
    GitDir,
    /// The project-to-template-set table inside a template root
    TemplateMap,
    /// Default configuration file name in the user's home directory
    ConfigFile,
}

impl MirrorPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GitDir => ".git",
            Self::TemplateMap => "template_map.txt",
            Self::ConfigFile => "git_mirror.toml",
        }
    }
}

impl AsRef<Path> for MirrorPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for MirrorPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for MirrorPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! Project identity of a target path

use mirror_fs::NormalizedPath;

use crate::{Error, Result};

/// A target directory together with the project name derived from it.
///
/// When the supplied path is a file, its parent directory is the project:
/// both the template-map key and the substituted project name come from that
/// directory, and template paths are resolved under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTarget {
    dir: NormalizedPath,
    name: String,
}

impl ProjectTarget {
    pub fn resolve(path: &NormalizedPath) -> Result<Self> {
        let dir = if path.is_file() {
            path.parent().ok_or_else(|| Error::InvalidTarget {
                path: path.to_native(),
            })?
        } else {
            path.clone()
        };

        let name = dir
            .file_name()
            .filter(|name| *name != "." && *name != "..")
            .ok_or_else(|| Error::InvalidTarget {
                path: path.to_native(),
            })?
            .to_string();

        Ok(Self { dir, name })
    }

    /// Directory that receives template files.
    pub fn dir(&self) -> &NormalizedPath {
        &self.dir
    }

    /// Project name: map key and substitution value.
    pub fn name(&self) -> &str {
        &self.name
    }
}

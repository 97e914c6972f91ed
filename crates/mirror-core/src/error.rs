//! Error types for mirror-core

use std::path::PathBuf;

/// Result type for mirror-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mirror-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The template map has a line with no `project:template` separator
    #[error("Invalid line in {path}: {line:?}")]
    MalformedMap { path: PathBuf, line: String },

    /// A project has no entry in the template map
    #[error("Project {project} has no entry in the template map")]
    UnmappedProject { project: String },

    /// A project's map entry has an empty template-set name
    #[error("Project {project} has no template set assigned in {map_path}")]
    UnassignedTemplate { project: String, map_path: PathBuf },

    /// Placeholder entries were written and must be filled in by hand
    #[error(
        "Please fill in the template map with the correct template for each project ({}). File is located at {map_path}",
        .projects.join(", ")
    )]
    UserActionRequired {
        map_path: PathBuf,
        projects: Vec<String>,
    },

    /// The template root itself is absent
    #[error("Template directory {path} does not exist.")]
    TemplateRootNotFound { path: PathBuf },

    /// The template set resolved for a project does not exist on disk
    #[error("Template directory {path} for project {project} does not exist")]
    MissingTemplateDirectory { project: String, path: PathBuf },

    /// A target path has no usable directory name
    #[error("Cannot derive a project name from {path}")]
    InvalidTarget { path: PathBuf },

    /// Writing a template file into a target failed
    #[error("Failed to copy {file} into {target}: {source}")]
    FileCopy {
        target: PathBuf,
        file: String,
        #[source]
        source: mirror_fs::Error,
    },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from mirror-fs
    #[error(transparent)]
    Fs(#[from] mirror_fs::Error),

    /// Templating error from mirror-content
    #[error(transparent)]
    Content(#[from] mirror_content::Error),

    /// Git error from mirror-git
    #[error(transparent)]
    Git(#[from] mirror_git::Error),
}

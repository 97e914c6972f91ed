//! Sync report types

use std::fmt;

use mirror_fs::NormalizedPath;

/// What a sync did (or would do) to one target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    /// The file did not exist before
    Created,
    /// The file existed with different bytes
    Updated,
    /// The file already held the rendered template
    Unchanged,
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
        })
    }
}

/// One template file propagated into a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    /// Path relative to the target directory, forward slashes
    pub path: String,
    pub action: FileAction,
}

/// Outcome for a single target directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetReport {
    pub project: String,
    pub target: NormalizedPath,
    pub template_set: String,
    pub files: Vec<FileChange>,
}

impl TargetReport {
    pub fn count(&self, action: FileAction) -> usize {
        self.files.iter().filter(|f| f.action == action).count()
    }
}

/// Report from a sync run, targets in the order they were given.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SyncReport {
    /// No file was written
    pub dry_run: bool,
    pub targets: Vec<TargetReport>,
}

impl SyncReport {
    /// Number of files with `action` across every target.
    pub fn count(&self, action: FileAction) -> usize {
        self.targets.iter().map(|t| t.count(action)).sum()
    }

    /// True when no target file was created or updated.
    pub fn is_noop(&self) -> bool {
        self.count(FileAction::Created) == 0 && self.count(FileAction::Updated) == 0
    }
}

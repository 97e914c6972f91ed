//! The version-control capability consumed by the orchestration layer

use crate::Result;
use mirror_fs::NormalizedPath;

/// Tracking state of one local branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchStatus {
    /// Local branch name
    pub name: String,

    /// Upstream branch (e.g. `origin/main`), if the branch tracks one
    pub upstream: Option<String>,

    /// Commits on the local branch missing from the upstream
    pub ahead: usize,

    /// Commits on the upstream missing from the local branch
    pub behind: usize,
}

impl BranchStatus {
    /// True when the branch has commits that were never pushed.
    pub fn has_unpushed(&self) -> bool {
        self.upstream.is_some() && self.ahead > 0
    }
}

/// What updating one branch from the base branch did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Already contains the base branch
    UpToDate,
    FastForwarded,
    /// A merge commit was created
    Merged,
    /// Merging would conflict; the branch was not touched
    Conflicted,
}

impl std::fmt::Display for UpdateOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::UpToDate => "up to date",
            Self::FastForwarded => "fast-forwarded",
            Self::Merged => "merged",
            Self::Conflicted => "conflicted",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchUpdate {
    pub branch: String,
    pub outcome: UpdateOutcome,
}

/// Operations git-mirror needs from a local clone.
///
/// Implementations hide the underlying git library; callers only see
/// branch names and counts.
pub trait VersionControl {
    /// Root of the working tree
    fn root(&self) -> &NormalizedPath;

    /// Name of the checked-out branch, `"HEAD"` when detached
    fn current_branch(&self) -> Result<String>;

    /// Whether the index or working tree (untracked files included)
    /// differs from HEAD
    fn has_uncommitted_changes(&self) -> Result<bool>;

    /// Tracking state of every local branch
    fn branch_statuses(&self) -> Result<Vec<BranchStatus>>;

    /// Fetch `branch` from `remote` and fast-forward the local branch.
    ///
    /// * `remote` - Remote name (defaults to "origin" if None)
    /// * `branch` - Branch name (defaults to the current branch if None)
    ///
    /// Uncommitted edits that the incoming commit would overwrite stop the
    /// pull; nothing is discarded.
    fn pull(&self, remote: Option<&str>, branch: Option<&str>) -> Result<()>;

    /// Merge `base` (typically `main`) into every other local branch.
    fn update_from(&self, base: &str) -> Result<Vec<BranchUpdate>>;
}

//! git2-backed [`VersionControl`] implementation

use git2::Repository;
use mirror_fs::NormalizedPath;

use crate::{BranchStatus, BranchUpdate, Error, Result, VersionControl, helpers};

/// A local clone opened through git2.
pub struct GitRepository {
    root: NormalizedPath,
    repo: Repository,
}

impl GitRepository {
    /// Open the repository whose working tree is `root`.
    ///
    /// Fails with [`Error::NotARepository`] when `root` has no `.git` or git2
    /// cannot open it.
    pub fn open(root: NormalizedPath) -> Result<Self> {
        let repo = Repository::open(root.to_native()).map_err(|e| {
            tracing::debug!(path = %root, error = %e, "Failed to open repository");
            Error::NotARepository {
                path: root.to_native(),
            }
        })?;
        Ok(Self { root, repo })
    }
}

impl std::fmt::Debug for GitRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepository")
            .field("root", &self.root)
            .finish()
    }
}

impl VersionControl for GitRepository {
    fn root(&self) -> &NormalizedPath {
        &self.root
    }

    fn current_branch(&self) -> Result<String> {
        Ok(helpers::get_current_branch(&self.repo)?.unwrap_or_else(|| "HEAD".to_string()))
    }

    fn has_uncommitted_changes(&self) -> Result<bool> {
        helpers::working_tree_is_dirty(&self.repo)
    }

    fn branch_statuses(&self) -> Result<Vec<BranchStatus>> {
        helpers::branch_statuses(&self.repo)
    }

    fn pull(&self, remote: Option<&str>, branch: Option<&str>) -> Result<()> {
        helpers::pull(&self.repo, remote, branch)
    }

    fn update_from(&self, base: &str) -> Result<Vec<BranchUpdate>> {
        helpers::update_from(&self.repo, base)
    }
}

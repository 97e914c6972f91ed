//! Uncommitted and unpushed work across local clones

use std::fmt;

use mirror_fs::NormalizedPath;
use mirror_git::{GitRepository, VersionControl};

/// One problem found in a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// Index or working tree differs from HEAD
    Uncommitted,
    /// Local commits not on the tracked upstream
    Unpushed { branch: String, ahead: usize },
    /// Branch has no upstream at all
    Untracked { branch: String },
    /// Not a repository, or git failed while inspecting it
    Invalid { message: String },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uncommitted => write!(f, "has uncommitted changes"),
            Self::Unpushed { branch, ahead } => {
                write!(f, "has {ahead} unpushed commit(s) on branch {branch}")
            }
            Self::Untracked { branch } => write!(f, "branch {branch} does not track a remote"),
            Self::Invalid { message } => write!(f, "is not a valid Git repository: {message}"),
        }
    }
}

/// Audit result for one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoAudit {
    pub path: NormalizedPath,
    pub findings: Vec<Finding>,
}

impl RepoAudit {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn is_invalid(&self) -> bool {
        self.findings
            .iter()
            .any(|f| matches!(f, Finding::Invalid { .. }))
    }
}

/// Inspect one repository through the [`VersionControl`] capability.
pub fn audit_repository(repo: &dyn VersionControl) -> mirror_git::Result<Vec<Finding>> {
    let mut findings = Vec::new();

    if repo.has_uncommitted_changes()? {
        findings.push(Finding::Uncommitted);
    }

    for status in repo.branch_statuses()? {
        match status.upstream {
            Some(_) if status.ahead > 0 => findings.push(Finding::Unpushed {
                branch: status.name,
                ahead: status.ahead,
            }),
            Some(_) => {}
            None => findings.push(Finding::Untracked {
                branch: status.name,
            }),
        }
    }

    Ok(findings)
}

/// Audit every directory in `dirs`, in order.
///
/// A directory that cannot be opened or inspected yields an
/// [`Finding::Invalid`] entry; the others are still audited.
pub fn audit_local_changes(dirs: &[NormalizedPath]) -> Vec<RepoAudit> {
    dirs.iter()
        .map(|path| {
            let findings = match GitRepository::open(path.clone()) {
                Ok(repo) => audit_repository(&repo).unwrap_or_else(|e| {
                    tracing::error!(path = %path, error = %e, "Failed to audit repository");
                    vec![Finding::Invalid {
                        message: e.to_string(),
                    }]
                }),
                Err(e) => {
                    tracing::warn!(path = %path, "Not a valid Git repository");
                    vec![Finding::Invalid {
                        message: e.to_string(),
                    }]
                }
            };
            RepoAudit {
                path: path.clone(),
                findings,
            }
        })
        .collect()
}

//! Shared git2 helper functions

use git2::build::CheckoutBuilder;
use git2::{BranchType, Commit, ErrorCode, Oid, Repository, Signature, StatusOptions};

use crate::{BranchStatus, BranchUpdate, Error, Result, UpdateOutcome};

/// Get the current branch name from a repository.
///
/// Returns the branch name if HEAD points to a branch (born or unborn), or
/// `None` if HEAD is detached.
pub fn get_current_branch(repo: &Repository) -> Result<Option<String>> {
    match repo.head() {
        Ok(head) if head.is_branch() => Ok(Some(head.shorthand().unwrap_or("HEAD").to_string())),
        Ok(_) => Ok(None),
        Err(e) if e.code() == ErrorCode::UnbornBranch => {
            let head = repo.find_reference("HEAD")?;
            Ok(head
                .symbolic_target()
                .map(|target| target.trim_start_matches("refs/heads/").to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Whether anything in the index or working tree differs from HEAD.
///
/// Untracked files count; ignored files do not.
pub fn working_tree_is_dirty(repo: &Repository) -> Result<bool> {
    let mut opts = StatusOptions::new();
    opts.include_untracked(true)
        .include_ignored(false)
        .recurse_untracked_dirs(false);
    let statuses = repo.statuses(Some(&mut opts))?;
    Ok(!statuses.is_empty())
}

/// Collect ahead/behind counts for every local branch.
pub fn branch_statuses(repo: &Repository) -> Result<Vec<BranchStatus>> {
    let mut statuses = Vec::new();

    for entry in repo.branches(Some(BranchType::Local))? {
        let (branch, _) = entry?;
        let name = match branch.name()? {
            Some(name) => name.to_string(),
            None => continue,
        };

        let upstream = match branch.upstream() {
            Ok(upstream) => upstream,
            Err(e) if e.code() == ErrorCode::NotFound => {
                statuses.push(BranchStatus {
                    name,
                    upstream: None,
                    ahead: 0,
                    behind: 0,
                });
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let upstream_name = upstream.name()?.map(str::to_string);
        let (ahead, behind) = match (branch.get().target(), upstream.get().target()) {
            (Some(local), Some(remote)) => repo.graph_ahead_behind(local, remote)?,
            _ => (0, 0),
        };

        statuses.push(BranchStatus {
            name,
            upstream: upstream_name,
            ahead,
            behind,
        });
    }

    statuses.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(statuses)
}

/// Fetch `branch` (default: the current one) from `remote` (default:
/// `origin`) and fast-forward the local branch to it.
///
/// Diverged history is left untouched and reported as
/// [`Error::CannotFastForward`].
pub fn pull(repo: &Repository, remote: Option<&str>, branch: Option<&str>) -> Result<()> {
    let remote_name = remote.unwrap_or("origin");
    let current = get_current_branch(repo)?;
    let branch_name = branch
        .map(str::to_string)
        .or_else(|| current.clone())
        .ok_or_else(|| Error::PullFailed {
            message: "HEAD is detached; name a branch to pull".into(),
        })?;

    let fetched = fetch_branch(repo, remote_name, &branch_name)?;
    let checked_out = current.as_deref() == Some(branch_name.as_str());
    fast_forward(repo, &branch_name, fetched, checked_out)
}

fn fetch_branch(repo: &Repository, remote_name: &str, branch: &str) -> Result<Oid> {
    let mut remote = repo
        .find_remote(remote_name)
        .map_err(|_| Error::RemoteNotFound {
            name: remote_name.to_string(),
        })?;
    let failed = |what: &str, e: git2::Error| Error::PullFailed {
        message: format!("{what}: {}", e.message()),
    };

    remote
        .fetch(&[branch], None, None)
        .map_err(|e| failed("fetch failed", e))?;
    let commit = repo
        .find_reference("FETCH_HEAD")
        .and_then(|head| head.peel_to_commit())
        .map_err(|e| failed("cannot resolve FETCH_HEAD", e))?;
    Ok(commit.id())
}

fn fast_forward(repo: &Repository, branch: &str, to: Oid, checked_out: bool) -> Result<()> {
    let reference = repo.find_reference(&format!("refs/heads/{branch}"))?;
    let incoming = repo.find_annotated_commit(to)?;
    let (analysis, _) = repo.merge_analysis_for_ref(&reference, &[&incoming])?;

    if analysis.is_up_to_date() {
        tracing::debug!(branch, "Already up to date");
        return Ok(());
    }
    if !analysis.is_fast_forward() {
        let local = reference.peel_to_commit()?.id();
        return Err(Error::CannotFastForward {
            message: format!("{branch} is at {local}, remote is at {to}; merge manually"),
        });
    }

    advance_branch(repo, branch, to, checked_out, &format!("pull: fast-forward to {to}"))?;
    tracing::info!(branch, commit = %to, "Fast-forwarded");
    Ok(())
}

/// Point `branch` at `to`.
///
/// A checked-out branch has its working tree moved first with a safe
/// checkout, so uncommitted edits to files the new commit changes stop the
/// update with [`Error::CheckoutBlocked`] and the branch is left where it was.
fn advance_branch(
    repo: &Repository,
    branch: &str,
    to: Oid,
    checked_out: bool,
    reflog: &str,
) -> Result<()> {
    if checked_out {
        let commit = repo.find_commit(to)?;
        let mut checkout = CheckoutBuilder::new();
        checkout.safe();
        repo.checkout_tree(commit.as_object(), Some(&mut checkout))
            .map_err(|e| Error::CheckoutBlocked {
                branch: branch.to_string(),
                message: e.message().to_string(),
            })?;
    }
    repo.find_reference(&format!("refs/heads/{branch}"))?
        .set_target(to, reflog)?;
    Ok(())
}

/// Bring every local branch other than `base` up to date with `base`.
///
/// `origin` is fetched first when it exists; the remote-tracking
/// `origin/<base>` is preferred over the local `base` branch. Branches that
/// contain `base` are left alone, branches behind it are fast-forwarded and
/// diverged branches get a merge commit. A merge that would conflict is not
/// attempted and the branch is reported as [`UpdateOutcome::Conflicted`].
pub fn update_from(repo: &Repository, base: &str) -> Result<Vec<BranchUpdate>> {
    if let Ok(mut origin) = repo.find_remote("origin") {
        origin
            .fetch::<&str>(&[], None, None)
            .map_err(|e| Error::PullFailed {
                message: format!("fetch failed: {}", e.message()),
            })?;
    }

    let base_commit = repo
        .find_reference(&format!("refs/remotes/origin/{base}"))
        .or_else(|_| repo.find_reference(&format!("refs/heads/{base}")))
        .and_then(|reference| reference.peel_to_commit())
        .map_err(|_| Error::BranchNotFound {
            name: base.to_string(),
        })?;
    let current = get_current_branch(repo)?;

    let mut updates = Vec::new();
    for entry in repo.branches(Some(BranchType::Local))? {
        let (branch, _) = entry?;
        let Some(name) = branch.name()?.map(str::to_string) else {
            continue;
        };
        if name == base {
            continue;
        }

        let checked_out = current.as_deref() == Some(name.as_str());
        let outcome = merge_into(repo, &name, &base_commit, base, checked_out)?;
        tracing::info!(branch = %name, base, outcome = %outcome, "Updated branch");
        updates.push(BranchUpdate {
            branch: name,
            outcome,
        });
    }

    updates.sort_by(|a, b| a.branch.cmp(&b.branch));
    Ok(updates)
}

fn merge_into(
    repo: &Repository,
    branch: &str,
    base: &Commit<'_>,
    base_name: &str,
    checked_out: bool,
) -> Result<UpdateOutcome> {
    let reference = repo.find_reference(&format!("refs/heads/{branch}"))?;
    let incoming = repo.find_annotated_commit(base.id())?;
    let (analysis, _) = repo.merge_analysis_for_ref(&reference, &[&incoming])?;

    if analysis.is_up_to_date() {
        return Ok(UpdateOutcome::UpToDate);
    }
    if analysis.is_fast_forward() {
        let reflog = format!("update: fast-forward to {base_name}");
        advance_branch(repo, branch, base.id(), checked_out, &reflog)?;
        return Ok(UpdateOutcome::FastForwarded);
    }

    let ours = reference.peel_to_commit()?;
    let mut index = repo.merge_commits(&ours, base, None)?;
    if index.has_conflicts() {
        tracing::warn!(branch, base = base_name, "Merge would conflict, branch left unchanged");
        return Ok(UpdateOutcome::Conflicted);
    }

    let tree = repo.find_tree(index.write_tree_to(repo)?)?;
    let signature = repo
        .signature()
        .or_else(|_| Signature::now("git-mirror", "git-mirror@localhost"))?;
    let message = format!("Merge {base_name} into {branch}");
    let merged = repo.commit(None, &signature, &signature, &message, &tree, &[&ours, base])?;
    advance_branch(repo, branch, merged, checked_out, &message)?;
    Ok(UpdateOutcome::Merged)
}

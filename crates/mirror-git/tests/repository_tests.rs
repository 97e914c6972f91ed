use std::fs;

use mirror_fs::NormalizedPath;
use mirror_git::{BranchUpdate, Error, GitRepository, UpdateOutcome, VersionControl};
use mirror_test_utils::git::{clone_local, commit_file, real_git_repo, real_git_repo_with_commit};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn open(path: &std::path::Path) -> GitRepository {
    GitRepository::open(NormalizedPath::new(path)).unwrap()
}

/// origin repository with one commit plus a clone of it.
fn origin_and_clone() -> (TempDir, GitRepository, git2::Repository) {
    let temp = TempDir::new().unwrap();
    let origin_path = temp.path().join("origin");
    let clone_path = temp.path().join("clone");
    fs::create_dir_all(&origin_path).unwrap();

    let origin = real_git_repo_with_commit(&origin_path);
    clone_local(&origin_path, &clone_path);

    (temp, open(&clone_path), origin)
}

fn create_branch(repo: &git2::Repository, name: &str) {
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    repo.branch(name, &head, false).unwrap();
}

fn switch_to(repo: &git2::Repository, name: &str) {
    repo.set_head(&format!("refs/heads/{name}")).unwrap();
    repo.checkout_head(Some(git2::build::CheckoutBuilder::new().force()))
        .unwrap();
}

fn branch_tree_has(repo: &git2::Repository, branch: &str, file: &str) -> bool {
    let tree = repo
        .find_branch(branch, git2::BranchType::Local)
        .unwrap()
        .get()
        .peel_to_tree()
        .unwrap();
    tree.get_path(std::path::Path::new(file)).is_ok()
}

#[test]
fn test_open_non_repository_fails() {
    let temp = TempDir::new().unwrap();
    let err = GitRepository::open(NormalizedPath::new(temp.path())).unwrap_err();
    assert!(matches!(err, Error::NotARepository { .. }));
}

#[test]
fn test_fresh_repository_is_clean() {
    let temp = TempDir::new().unwrap();
    real_git_repo_with_commit(temp.path());
    let repo = open(temp.path());
    assert!(!repo.has_uncommitted_changes().unwrap());
}

#[test]
fn test_untracked_file_is_uncommitted_change() {
    let temp = TempDir::new().unwrap();
    real_git_repo_with_commit(temp.path());
    fs::write(temp.path().join("notes.txt"), "scratch\n").unwrap();

    let repo = open(temp.path());
    assert!(repo.has_uncommitted_changes().unwrap());
}

#[test]
fn test_modified_tracked_file_is_uncommitted_change() {
    let temp = TempDir::new().unwrap();
    real_git_repo_with_commit(temp.path());
    fs::write(temp.path().join("README.md"), "# Changed\n").unwrap();

    let repo = open(temp.path());
    assert!(repo.has_uncommitted_changes().unwrap());
}

#[test]
fn test_current_branch_on_unborn_repository() {
    let temp = TempDir::new().unwrap();
    real_git_repo(temp.path());
    let repo = open(temp.path());
    let branch = repo.current_branch().unwrap();
    assert!(branch == "main" || branch == "master", "got {branch}");
}

#[test]
fn test_branch_without_upstream() {
    let temp = TempDir::new().unwrap();
    real_git_repo_with_commit(temp.path());
    let repo = open(temp.path());

    let statuses = repo.branch_statuses().unwrap();
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].upstream, None);
    assert!(!statuses[0].has_unpushed());
}

#[test]
fn test_clone_tracks_upstream_and_counts_ahead() {
    let (temp, repo, _origin) = origin_and_clone();
    let statuses = repo.branch_statuses().unwrap();
    assert_eq!(statuses.len(), 1);
    assert!(statuses[0].upstream.is_some());
    assert_eq!(statuses[0].ahead, 0);

    let clone = git2::Repository::open(temp.path().join("clone")).unwrap();
    commit_file(&clone, "local.txt", "local work\n");

    let statuses = repo.branch_statuses().unwrap();
    assert_eq!(statuses[0].ahead, 1);
    assert_eq!(statuses[0].behind, 0);
    assert!(statuses[0].has_unpushed());
}

#[test]
fn test_pull_fast_forwards_current_branch() {
    let (temp, repo, origin) = origin_and_clone();
    commit_file(&origin, "upstream.txt", "from origin\n");

    repo.pull(None, None).unwrap();

    let pulled = temp.path().join("clone").join("upstream.txt");
    assert_eq!(fs::read_to_string(pulled).unwrap(), "from origin\n");
    assert!(!repo.has_uncommitted_changes().unwrap());
}

#[test]
fn test_pull_up_to_date_is_noop() {
    let (_temp, repo, _origin) = origin_and_clone();
    repo.pull(None, None).unwrap();
    assert!(!repo.has_uncommitted_changes().unwrap());
}

#[test]
fn test_pull_diverged_branch_cannot_fast_forward() {
    let (temp, repo, origin) = origin_and_clone();
    commit_file(&origin, "upstream.txt", "from origin\n");
    let clone = git2::Repository::open(temp.path().join("clone")).unwrap();
    commit_file(&clone, "local.txt", "local work\n");

    let err = repo.pull(None, None).unwrap_err();
    assert!(matches!(err, Error::CannotFastForward { .. }));
}

#[test]
fn test_pull_without_remote_fails() {
    let temp = TempDir::new().unwrap();
    real_git_repo_with_commit(temp.path());
    let repo = open(temp.path());

    let err = repo.pull(None, None).unwrap_err();
    match err {
        Error::RemoteNotFound { name } => assert_eq!(name, "origin"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_pull_keeps_conflicting_uncommitted_edits() {
    let (temp, repo, origin) = origin_and_clone();
    commit_file(&origin, "README.md", "# Upstream\n");
    let readme = temp.path().join("clone").join("README.md");
    fs::write(&readme, "# my local unsaved work\n").unwrap();
    let clone = git2::Repository::open(temp.path().join("clone")).unwrap();
    let before = clone.head().unwrap().peel_to_commit().unwrap().id();

    let err = repo.pull(None, None).unwrap_err();

    assert!(matches!(err, Error::CheckoutBlocked { .. }), "got {err}");
    assert_eq!(fs::read_to_string(&readme).unwrap(), "# my local unsaved work\n");
    let after = clone.head().unwrap().peel_to_commit().unwrap().id();
    assert_eq!(after, before);
}

#[test]
fn test_pull_keeps_unrelated_untracked_files() {
    let (temp, repo, origin) = origin_and_clone();
    commit_file(&origin, "upstream.txt", "from origin\n");
    let scratch = temp.path().join("clone").join("scratch.txt");
    fs::write(&scratch, "wip\n").unwrap();

    repo.pull(None, None).unwrap();

    assert_eq!(fs::read_to_string(&scratch).unwrap(), "wip\n");
    assert!(temp.path().join("clone").join("upstream.txt").exists());
}

#[test]
fn test_update_from_merges_and_fast_forwards_branches() {
    let (temp, repo, origin) = origin_and_clone();
    let base = repo.current_branch().unwrap();
    let clone = git2::Repository::open(temp.path().join("clone")).unwrap();

    create_branch(&clone, "stale");
    create_branch(&clone, "feature");
    switch_to(&clone, "feature");
    commit_file(&clone, "feature.txt", "feature work\n");
    switch_to(&clone, &base);
    commit_file(&origin, "upstream.txt", "from origin\n");

    let updates = repo.update_from(&base).unwrap();

    assert_eq!(
        updates,
        vec![
            BranchUpdate {
                branch: "feature".into(),
                outcome: UpdateOutcome::Merged,
            },
            BranchUpdate {
                branch: "stale".into(),
                outcome: UpdateOutcome::FastForwarded,
            },
        ]
    );
    assert!(branch_tree_has(&clone, "feature", "upstream.txt"));
    assert!(branch_tree_has(&clone, "feature", "feature.txt"));
    assert!(branch_tree_has(&clone, "stale", "upstream.txt"));
    assert!(!repo.has_uncommitted_changes().unwrap());
}

#[test]
fn test_update_from_leaves_conflicting_branch_untouched() {
    let (temp, repo, origin) = origin_and_clone();
    let base = repo.current_branch().unwrap();
    let clone = git2::Repository::open(temp.path().join("clone")).unwrap();

    create_branch(&clone, "feature");
    switch_to(&clone, "feature");
    let feature_head = commit_file(&clone, "README.md", "# Feature\n");
    switch_to(&clone, &base);
    commit_file(&origin, "README.md", "# Upstream\n");

    let updates = repo.update_from(&base).unwrap();

    assert_eq!(updates[0].outcome, UpdateOutcome::Conflicted);
    let tip = clone
        .find_branch("feature", git2::BranchType::Local)
        .unwrap()
        .get()
        .target()
        .unwrap();
    assert_eq!(tip, feature_head);
}

#[test]
fn test_update_from_moves_checked_out_working_tree() {
    let (temp, repo, origin) = origin_and_clone();
    let base = repo.current_branch().unwrap();
    let clone = git2::Repository::open(temp.path().join("clone")).unwrap();
    create_branch(&clone, "feature");
    switch_to(&clone, "feature");
    commit_file(&origin, "upstream.txt", "from origin\n");

    let updates = repo.update_from(&base).unwrap();

    assert_eq!(updates[0].outcome, UpdateOutcome::FastForwarded);
    let pulled = temp.path().join("clone").join("upstream.txt");
    assert_eq!(fs::read_to_string(pulled).unwrap(), "from origin\n");
    assert!(!repo.has_uncommitted_changes().unwrap());
}

#[test]
fn test_update_from_unknown_base_fails() {
    let (_temp, repo, _origin) = origin_and_clone();
    let err = repo.update_from("no-such-branch").unwrap_err();
    assert!(matches!(err, Error::BranchNotFound { .. }));
}

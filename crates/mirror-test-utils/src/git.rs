//! Git repository fixtures.
//!
//! Prefer [`fake_git_dir`] when a test only needs the `.git` marker.

use std::fs;
use std::path::Path;

use git2::{Oid, Repository, Signature};

/// Creates a minimal `.git` directory structure **without** initialising a real
/// git repository.
///
/// Use for: repository discovery tests that only need the `.git` marker.
///
/// # Panics
/// Panics if the filesystem operations fail.
pub fn fake_git_dir(path: &Path) {
    fs::create_dir_all(path.join(".git/refs/heads"))
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to create .git: {e}"));
    fs::write(path.join(".git/HEAD"), "ref: refs/heads/main\n")
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to write HEAD: {e}"));
}

/// Initialises a real git repository using `git2` (no commits).
///
/// # Panics
/// Panics if `git2::Repository::init` fails.
pub fn real_git_repo(path: &Path) -> Repository {
    Repository::init(path).unwrap_or_else(|e| {
        panic!(
            "real_git_repo: failed to init repository at {}: {e}",
            path.display()
        )
    })
}

/// Writes `name` with `content` into the working tree, stages it and commits
/// on top of HEAD (or as the root commit on an unborn branch).
///
/// Uses a fixed signature so no user git config is required.
///
/// # Panics
/// Panics if any git operation fails.
pub fn commit_file(repo: &Repository, name: &str, content: &str) -> Oid {
    let workdir = repo
        .workdir()
        .unwrap_or_else(|| panic!("commit_file: repository is bare"));
    let file_path = workdir.join(name);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file_path, content)
        .unwrap_or_else(|e| panic!("commit_file: failed to write {name}: {e}"));

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(name)).unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let sig = Signature::now("Test User", "test@test.com").unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, &format!("Add {name}"), &tree, &parents)
        .unwrap_or_else(|e| panic!("commit_file: commit failed: {e}"))
}

/// Creates a repository at `path` with one commit containing `README.md`.
///
/// # Panics
/// Panics if any git operation fails.
pub fn real_git_repo_with_commit(path: &Path) -> Repository {
    let repo = real_git_repo(path);
    commit_file(&repo, "README.md", "# Test\n");
    repo
}

/// Clones the repository at `origin` into `dest` using the local transport.
///
/// The checked-out branch tracks `origin/<branch>`.
///
/// # Panics
/// Panics if the clone fails.
pub fn clone_local(origin: &Path, dest: &Path) -> Repository {
    let url = origin.to_string_lossy().to_string();
    Repository::clone(&url, dest)
        .unwrap_or_else(|e| panic!("clone_local: failed to clone {url}: {e}"))
}

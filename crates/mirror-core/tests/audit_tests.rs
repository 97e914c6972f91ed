//! Tests for the local changes audit against real repositories

use std::fs;

use mirror_core::{Finding, audit_local_changes};
use mirror_fs::{NormalizedPath, child_directories};
use mirror_test_utils::git::{clone_local, commit_file, real_git_repo_with_commit};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn test_audit_classifies_each_directory() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("work");
    fs::create_dir_all(base.join("plain-folder")).unwrap();

    let origin = temp.path().join("origin");
    fs::create_dir_all(&origin).unwrap();
    real_git_repo_with_commit(&origin);

    clone_local(&origin, &base.join("clean"));
    let ahead = clone_local(&origin, &base.join("ahead"));
    commit_file(&ahead, "local.txt", "local work\n");
    clone_local(&origin, &base.join("dirty"));
    fs::write(base.join("dirty").join("scratch.txt"), "wip\n").unwrap();
    real_git_repo_with_commit(&base.join("local-only"));

    let dirs = child_directories(&NormalizedPath::new(&base)).unwrap();
    let audits = audit_local_changes(&dirs);

    let by_name = |name: &str| {
        audits
            .iter()
            .find(|a| a.path.file_name() == Some(name))
            .unwrap_or_else(|| panic!("no audit for {name}"))
    };

    assert_eq!(audits.len(), 5);
    assert!(by_name("clean").is_clean());
    assert!(matches!(
        by_name("ahead").findings.as_slice(),
        [Finding::Unpushed { ahead: 1, .. }]
    ));
    assert_eq!(by_name("dirty").findings, vec![Finding::Uncommitted]);
    assert!(matches!(
        by_name("local-only").findings.as_slice(),
        [Finding::Untracked { .. }]
    ));
    assert!(by_name("plain-folder").is_invalid());
}

#[test]
fn test_audit_preserves_input_order() {
    let temp = TempDir::new().unwrap();
    let dirs = vec![
        NormalizedPath::new(temp.path().join("zeta")),
        NormalizedPath::new(temp.path().join("alpha")),
    ];

    let audits = audit_local_changes(&dirs);

    let names: Vec<_> = audits.iter().filter_map(|a| a.path.file_name()).collect();
    assert_eq!(names, vec!["zeta", "alpha"]);
    assert!(audits.iter().all(|a| a.is_invalid()));
}

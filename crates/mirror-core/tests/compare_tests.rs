//! Tests for DirectoryComparator through the synchronizer facade

use mirror_content::LightTemplateEngine;
use mirror_core::{DifferenceKind, Error, MapMode, TemplateSynchronizer};
use mirror_fs::NormalizedPath;
use mirror_test_utils::TemplateWorkspace;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn synchronizer(ws: &TemplateWorkspace) -> TemplateSynchronizer {
    TemplateSynchronizer::new(
        NormalizedPath::new(ws.template_root()),
        LightTemplateEngine::new(),
        MapMode::Interactive,
    )
    .unwrap()
}

fn compare(ws: &TemplateWorkspace, project: &str) -> Vec<(String, DifferenceKind)> {
    let mut sync = synchronizer(ws);
    let results = sync
        .compare_all(&[NormalizedPath::new(ws.project(project))])
        .unwrap();
    assert_eq!(results.len(), 1);
    results
        .into_iter()
        .flat_map(|(_, records)| records)
        .map(|r| (r.path, r.kind))
        .collect()
}

/// `a.txt` with the token plus an empty `b.txt`, mapped for `widget`.
fn widget_workspace() -> TemplateWorkspace {
    let ws = TemplateWorkspace::new();
    ws.template_file("pypi", "a.txt", "{{{PROJECT_NAME}}} ok\n")
        .template_file("pypi", "b.txt", "")
        .write_map("widget:pypi\n");
    ws
}

#[test]
fn test_widget_matches_after_substitution() {
    let ws = widget_workspace();
    ws.project_file("widget", "a.txt", "widget ok\n");

    assert!(compare(&ws, "widget").is_empty());
}

#[test]
fn test_widget_different_contents() {
    let ws = widget_workspace();
    ws.project_file("widget", "a.txt", "widget NOT ok\n");

    assert_eq!(
        compare(&ws, "widget"),
        vec![("a.txt".to_string(), DifferenceKind::DifferentContents)]
    );
}

#[test]
fn test_missing_file_is_reported() {
    let ws = widget_workspace();
    ws.project("widget");

    assert_eq!(
        compare(&ws, "widget"),
        vec![("a.txt".to_string(), DifferenceKind::Missing)]
    );
}

#[test]
fn test_different_length() {
    let ws = widget_workspace();
    ws.project_file("widget", "a.txt", "widget ok\nextra\n");

    assert_eq!(
        compare(&ws, "widget"),
        vec![("a.txt".to_string(), DifferenceKind::DifferentLength)]
    );
}

#[rstest]
#[case("line one\nline two\n", "line one\r\nline two\r\n")]
#[case("line one\r\nline two\r\n", "line one\nline two\n")]
#[case("line one\rline two\r", "line one\nline two\n")]
fn test_line_endings_are_not_differences(#[case] template: &str, #[case] target: &str) {
    let ws = TemplateWorkspace::new();
    ws.template_file("pypi", "setup.cfg", template)
        .project_file("widget", "setup.cfg", target)
        .write_map("widget:pypi\n");

    assert!(compare(&ws, "widget").is_empty());
}

#[test]
fn test_empty_template_matches_any_target() {
    let ws = TemplateWorkspace::new();
    ws.template_file("pypi", "py.typed", "")
        .template_file("pypi", "docs/.gitkeep", "")
        .project_file("widget", "py.typed", "anything at all\n")
        .write_map("widget:pypi\n");
    std::fs::create_dir_all(ws.project("widget").join("docs")).unwrap();
    std::fs::write(ws.project("widget").join("docs/.gitkeep"), [0xff, 0x00]).unwrap();

    assert!(compare(&ws, "widget").is_empty());
}

#[test]
fn test_nested_paths_use_forward_slashes() {
    let ws = TemplateWorkspace::new();
    ws.template_file("pypi", ".github/workflows/build.yml", "name: {{{PROJECT_NAME}}}\n")
        .project("widget");
    ws.write_map("widget:pypi\n");

    assert_eq!(
        compare(&ws, "widget"),
        vec![(".github/workflows/build.yml".to_string(), DifferenceKind::Missing)]
    );
}

#[cfg(unix)]
#[test]
fn test_backslash_in_template_name_is_a_plain_character() {
    let ws = widget_workspace();
    ws.template_file("pypi", "we\\ird.txt", "odd name\n")
        .project_file("widget", "a.txt", "widget ok\n");

    assert_eq!(
        compare(&ws, "widget"),
        vec![("we\\ird.txt".to_string(), DifferenceKind::Missing)]
    );

    ws.project_file("widget", "we\\ird.txt", "odd name\n");
    assert!(compare(&ws, "widget").is_empty());
}

#[test]
fn test_target_only_files_are_ignored() {
    let ws = widget_workspace();
    ws.project_file("widget", "a.txt", "widget ok\n")
        .project_file("widget", "src/lib.rs", "pub fn widget() {}\n");

    assert!(compare(&ws, "widget").is_empty());
}

#[test]
fn test_file_target_uses_parent_project() {
    let ws = widget_workspace();
    ws.project_file("widget", "a.txt", "widget ok\n");

    let mut sync = synchronizer(&ws);
    let file_target = NormalizedPath::new(ws.project("widget").join("a.txt"));
    let results = sync.compare_all(&[file_target]).unwrap();

    assert_eq!(results[0].0.name(), "widget");
    assert!(results[0].1.is_empty());
}

#[test]
fn test_binary_templates_compare_bytes() {
    let ws = TemplateWorkspace::new();
    let logo = [0x89, b'P', b'N', b'G', 0xff, 0x00, 0xfe];
    ws.template_bytes("pypi", "logo.png", &logo)
        .template_bytes("pypi", "icon.png", &logo)
        .write_map("widget:pypi\n");
    let project = ws.project("widget");
    std::fs::write(project.join("logo.png"), logo).unwrap();
    std::fs::write(project.join("icon.png"), [0x00, 0x01]).unwrap();

    assert_eq!(
        compare(&ws, "widget"),
        vec![("icon.png".to_string(), DifferenceKind::DifferentContents)]
    );
}

#[test]
fn test_non_text_target_counts_as_different_contents() {
    let ws = widget_workspace();
    let project = ws.project("widget");
    std::fs::write(project.join("a.txt"), [0xff, 0xfe, 0x00]).unwrap();

    assert_eq!(
        compare(&ws, "widget"),
        vec![("a.txt".to_string(), DifferenceKind::DifferentContents)]
    );
}

#[test]
fn test_targets_reported_in_given_order() {
    let ws = TemplateWorkspace::new();
    ws.template_file("pypi", "a.txt", "x\n")
        .write_map("zeta:pypi\nalpha:pypi\n");

    let mut sync = synchronizer(&ws);
    let results = sync
        .compare_all(&[
            NormalizedPath::new(ws.project("zeta")),
            NormalizedPath::new(ws.project("alpha")),
        ])
        .unwrap();

    let names: Vec<&str> = results.iter().map(|(t, _)| t.name()).collect();
    assert_eq!(names, vec!["zeta", "alpha"]);
}

#[test]
fn test_unmapped_target_requires_user_action() {
    let ws = TemplateWorkspace::new();
    ws.template_file("pypi", "a.txt", "x\n");

    let mut sync = synchronizer(&ws);
    let err = sync
        .compare_all(&[NormalizedPath::new(ws.project("widget"))])
        .unwrap_err();

    assert!(matches!(err, Error::UserActionRequired { .. }));
    assert_eq!(ws.read_map(), "widget:\n");
}

#[test]
fn test_missing_template_set_fails() {
    let ws = TemplateWorkspace::new();
    ws.write_map("widget:nonexistent\n");

    let mut sync = synchronizer(&ws);
    let err = sync
        .compare_all(&[NormalizedPath::new(ws.project("widget"))])
        .unwrap_err();

    assert!(matches!(err, Error::MissingTemplateDirectory { .. }));
}

#[test]
fn test_missing_template_root_is_rejected() {
    let ws = TemplateWorkspace::new();
    let err = TemplateSynchronizer::new(
        NormalizedPath::new(ws.root().join("no-such-templates")),
        LightTemplateEngine::new(),
        MapMode::Interactive,
    )
    .unwrap_err();

    assert!(err.to_string().contains("does not exist"), "got: {err}");
}

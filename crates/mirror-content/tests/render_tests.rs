use mirror_content::{Error, LightTemplateEngine, read_lines, split_lines};
use mirror_fs::NormalizedPath;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_render_reads_both_files() {
    let temp = TempDir::new().unwrap();
    let template = temp.path().join("template.txt");
    let target = temp.path().join("target.txt");
    fs::write(&template, "Hello, {{{PROJECT_NAME}}}\r\nbye\r\n").unwrap();
    fs::write(&target, "Hello, World\nbye\n").unwrap();

    let pair = LightTemplateEngine::new()
        .render(
            &NormalizedPath::new(&template),
            &NormalizedPath::new(&target),
            "World",
        )
        .unwrap();

    assert_eq!(pair.template_lines, pair.target_lines);
    assert_eq!(pair.template_lines, vec!["Hello, World\n", "bye\n"]);
}

#[test]
fn test_render_missing_target_is_error() {
    let temp = TempDir::new().unwrap();
    let template = temp.path().join("template.txt");
    fs::write(&template, "x\n").unwrap();

    let result = LightTemplateEngine::new().render(
        &NormalizedPath::new(&template),
        &NormalizedPath::new(temp.path().join("absent.txt")),
        "widget",
    );
    assert!(matches!(result, Err(Error::Fs(mirror_fs::Error::Io { .. }))));
}

#[test]
fn test_read_lines_binary_is_not_text() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("blob.bin");
    fs::write(&path, [0xffu8, 0xfe, 0x00]).unwrap();

    let result = read_lines(&NormalizedPath::new(&path));
    assert!(matches!(result, Err(Error::Fs(mirror_fs::Error::NotText { .. }))));
}

proptest! {
    #[test]
    fn test_crlf_and_lf_split_identically(lines in prop::collection::vec("[a-zA-Z0-9 ]{0,20}", 0..10)) {
        let lf: String = lines.iter().map(|l| format!("{l}\n")).collect();
        let crlf: String = lines.iter().map(|l| format!("{l}\r\n")).collect();
        prop_assert_eq!(split_lines(&lf), split_lines(&crlf));
    }

    #[test]
    fn test_rendering_leaves_no_token(
        prefix in "[a-z ]{0,10}",
        middle in "[a-z ]{0,10}",
        project in "[a-z][a-z0-9_-]{0,15}",
    ) {
        let engine = LightTemplateEngine::new();
        let line = format!("{prefix}{}{middle}{}", engine.token(), engine.token());
        let rendered = engine.render_line(&line, &project);
        prop_assert!(!rendered.contains(engine.token()));
        prop_assert_eq!(rendered.matches(project.as_str()).count() >= 2, true);
    }
}

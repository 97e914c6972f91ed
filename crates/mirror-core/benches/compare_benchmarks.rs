use criterion::{Criterion, criterion_group, criterion_main};
use mirror_content::LightTemplateEngine;
use mirror_core::{MapMode, TemplateSynchronizer};
use mirror_fs::NormalizedPath;
use std::fs;
use tempfile::TempDir;

fn setup_workspace(files: usize) -> TempDir {
    let temp = TempDir::new().unwrap();
    let set = temp.path().join("templates/pypi");
    let project = temp.path().join("work/widget");
    for i in 0..files {
        let rel = format!("dir{}/file{}.txt", i % 10, i);
        let template = format!("# {{{{{{PROJECT_NAME}}}}}} {i}\nline two\nline three\n");
        let target = format!("# widget {i}\r\nline two\r\nline three\r\n");
        fs::create_dir_all(set.join(&rel).parent().unwrap()).unwrap();
        fs::create_dir_all(project.join(&rel).parent().unwrap()).unwrap();
        fs::write(set.join(&rel), template).unwrap();
        fs::write(project.join(&rel), target).unwrap();
    }
    fs::write(temp.path().join("templates/template_map.txt"), "widget:pypi\n").unwrap();
    temp
}

fn bench_compare(c: &mut Criterion) {
    let temp = setup_workspace(200);
    let mut sync = TemplateSynchronizer::new(
        NormalizedPath::new(temp.path().join("templates")),
        LightTemplateEngine::new(),
        MapMode::Interactive,
    )
    .unwrap();
    let targets = [NormalizedPath::new(temp.path().join("work/widget"))];

    c.bench_function("compare_200_files", |b| {
        b.iter(|| sync.compare_all(&targets).unwrap())
    });
}

criterion_group!(benches, bench_compare);
criterion_main!(benches);

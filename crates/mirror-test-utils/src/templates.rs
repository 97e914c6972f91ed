//! [`TemplateWorkspace`] builder for template-sync test scenarios.
//!
//! Lays out a temporary directory as:
//!
//! ```text
//! <root>/
//!   templates/<set>/...      template sets
//!   templates/template_map.txt
//!   work/<project>/...       target projects
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary template root plus project tree with helpers for setup and
/// assertion.
///
/// # Example
///
/// ```rust,no_run
/// use mirror_test_utils::TemplateWorkspace;
///
/// let ws = TemplateWorkspace::new();
/// ws.template_file("pypi", "README.md", "# {{{PROJECT_NAME}}}\n");
/// ws.project_file("widget", "README.md", "# widget\n");
/// ws.write_map("widget:pypi\n");
/// ws.assert_project_file_eq("widget", "README.md", "# widget\n");
/// ```
pub struct TemplateWorkspace {
    temp_dir: TempDir,
}

impl Default for TemplateWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateWorkspace {
    /// Create an empty workspace with `templates/` and `work/` directories.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("templates")).unwrap();
        fs::create_dir_all(temp_dir.path().join("work")).unwrap();
        Self { temp_dir }
    }

    /// Root of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The template root holding every template set and the map file.
    pub fn template_root(&self) -> PathBuf {
        self.root().join("templates")
    }

    /// Directory of the named template set.
    pub fn template_set(&self, set: &str) -> PathBuf {
        self.template_root().join(set)
    }

    /// Location of `template_map.txt`.
    pub fn map_path(&self) -> PathBuf {
        self.template_root().join("template_map.txt")
    }

    /// Parent directory of every project.
    pub fn work_dir(&self) -> PathBuf {
        self.root().join("work")
    }

    /// Directory of the named project, created on demand.
    pub fn project(&self, name: &str) -> PathBuf {
        let dir = self.work_dir().join(name);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Write `content` to `rel` inside template set `set`.
    pub fn template_file(&self, set: &str, rel: &str, content: &str) -> &Self {
        write_with_parents(&self.template_set(set).join(rel), content.as_bytes());
        self
    }

    /// Write raw bytes to `rel` inside template set `set`.
    pub fn template_bytes(&self, set: &str, rel: &str, content: &[u8]) -> &Self {
        write_with_parents(&self.template_set(set).join(rel), content);
        self
    }

    /// Write `content` to `rel` inside the named project.
    pub fn project_file(&self, project: &str, rel: &str, content: &str) -> &Self {
        write_with_parents(&self.project(project).join(rel), content.as_bytes());
        self
    }

    /// Overwrite `template_map.txt` with `content`.
    pub fn write_map(&self, content: &str) -> &Self {
        write_with_parents(&self.map_path(), content.as_bytes());
        self
    }

    /// Current contents of `template_map.txt`.
    ///
    /// # Panics
    /// Panics if the map file cannot be read.
    pub fn read_map(&self) -> String {
        fs::read_to_string(self.map_path())
            .unwrap_or_else(|e| panic!("Could not read template map: {e}"))
    }

    /// Contents of `rel` inside the named project.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read_project_file(&self, project: &str, rel: &str) -> String {
        let path = self.work_dir().join(project).join(rel);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Assert that `rel` inside the project equals `expected` exactly.
    ///
    /// # Panics
    /// Panics with a descriptive message on mismatch.
    pub fn assert_project_file_eq(&self, project: &str, rel: &str, expected: &str) {
        let actual = self.read_project_file(project, rel);
        assert_eq!(
            actual, expected,
            "Project file {project}/{rel} does not have the expected content"
        );
    }

    /// Assert that `rel` inside the project does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_project_file_missing(&self, project: &str, rel: &str) {
        let path = self.work_dir().join(project).join(rel);
        assert!(
            !path.exists(),
            "Expected file NOT to exist: {}",
            path.display()
        );
    }
}

fn write_with_parents(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap_or_else(|e| panic!("Could not write {}: {e}", path.display()));
}

//! Template set vs. target directory comparison

use std::fmt;

use mirror_content::{FileDiff, LightTemplateEngine};
use mirror_fs::{NormalizedPath, io, walk_files};

use crate::{ProjectTarget, Result, TemplateMap};

/// How a target file diverges from its template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifferenceKind {
    /// No file at the template's relative path
    Missing,
    /// Line counts differ
    DifferentLength,
    /// Same line count, different lines
    DifferentContents,
}

impl DifferenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::DifferentLength => "different length",
            Self::DifferentContents => "different contents",
        }
    }
}

impl fmt::Display for DifferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One divergent file of one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifferenceRecord {
    /// Path relative to the template set root, forward slashes
    pub path: String,
    pub kind: DifferenceKind,
    /// Template file the record was produced from
    pub template: NormalizedPath,
    /// Expected location in the target
    pub target: NormalizedPath,
}

/// Compares each target against the template set the map assigns to it.
#[derive(Debug, Clone, Copy)]
pub struct DirectoryComparator<'a> {
    map: &'a TemplateMap,
    engine: &'a LightTemplateEngine,
}

impl<'a> DirectoryComparator<'a> {
    pub fn new(map: &'a TemplateMap, engine: &'a LightTemplateEngine) -> Self {
        Self { map, engine }
    }

    /// Classify every template file against `target`.
    ///
    /// Matching files are omitted. A template that renders to nothing matches
    /// any target, including a missing one. Unreadable or non-text targets
    /// count as [`DifferenceKind::DifferentContents`].
    pub fn compare(&self, target: &ProjectTarget) -> Result<Vec<DifferenceRecord>> {
        let template_dir = self.map.template_dir_for(target.name())?;
        tracing::info!(project = %target.name(), template = %template_dir, dir = %target.dir(), "Comparing");

        let mut records = Vec::new();
        for template in walk_files(&template_dir)? {
            let Some(rel) = template.relative_to(&template_dir) else {
                continue;
            };
            let target_file = target.dir().join(&rel);

            if let Some(kind) = self.classify(&template, &target_file, target.name())? {
                tracing::debug!(file = %rel, kind = %kind, "Difference");
                records.push(DifferenceRecord {
                    path: rel,
                    kind,
                    template,
                    target: target_file,
                });
            }
        }

        Ok(records)
    }

    fn classify(
        &self,
        template: &NormalizedPath,
        target: &NormalizedPath,
        project_name: &str,
    ) -> Result<Option<DifferenceKind>> {
        let bytes = io::read_bytes(template)?;
        if std::str::from_utf8(&bytes).is_err() {
            return Ok(compare_binary(&bytes, target));
        }

        if !target.exists() {
            let template_lines = self.engine.render_file(template, project_name)?;
            return Ok((!template_lines.is_empty()).then_some(DifferenceKind::Missing));
        }

        match self.engine.render(template, target, project_name) {
            Ok(pair) => Ok(classify_lines(&pair.template_lines, &pair.target_lines)),
            Err(e) => {
                if self.engine.render_file(template, project_name)?.is_empty() {
                    return Ok(None);
                }
                tracing::warn!(file = %target, error = %e, "Could not read target file as text");
                Ok(Some(DifferenceKind::DifferentContents))
            }
        }
    }

    /// Unified diff of the rendered template against the target for a
    /// [`DifferenceKind::DifferentContents`] record.
    ///
    /// Uses the same rendering as [`compare`](Self::compare). `None` when
    /// either side is not readable text.
    pub fn diff(&self, target: &ProjectTarget, record: &DifferenceRecord) -> Option<FileDiff> {
        let pair = self
            .engine
            .render(&record.template, &record.target, target.name())
            .ok()?;

        Some(FileDiff::compute(
            record.template.as_str(),
            &pair.template_lines,
            record.target.as_str(),
            &pair.target_lines,
        ))
    }
}

/// An empty template matches anything.
fn classify_lines(template: &[String], target: &[String]) -> Option<DifferenceKind> {
    if template.is_empty() || template == target {
        None
    } else if template.len() != target.len() {
        Some(DifferenceKind::DifferentLength)
    } else {
        Some(DifferenceKind::DifferentContents)
    }
}

fn compare_binary(template: &[u8], target: &NormalizedPath) -> Option<DifferenceKind> {
    if !target.exists() {
        return Some(DifferenceKind::Missing);
    }
    match io::read_bytes(target) {
        Ok(bytes) if bytes == template => None,
        Ok(_) => Some(DifferenceKind::DifferentContents),
        Err(e) => {
            tracing::warn!(file = %target, error = %e, "Could not read target file");
            Some(DifferenceKind::DifferentContents)
        }
    }
}

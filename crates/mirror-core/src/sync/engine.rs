//! TemplateSynchronizer implementation
//!
//! The synchronizer owns the template map and the rendering engine, keeps the
//! map complete for the targets it is given, and is the only component that
//! writes into target directories.

use mirror_content::LightTemplateEngine;
use mirror_fs::checksum::{compute_checksum, compute_file_checksum};
use mirror_fs::{NormalizedPath, io, walk_files};

use crate::compare::{DifferenceRecord, DirectoryComparator};
use crate::template_map::{MapMode, TemplateMap};
use crate::{Error, ProjectTarget, Result};

use super::report::{FileAction, FileChange, SyncReport, TargetReport};

/// Options for sync operations
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// If true, classify every file but write nothing.
    pub dry_run: bool,
}

/// Facade over map upkeep, comparison and propagation.
#[derive(Debug)]
pub struct TemplateSynchronizer {
    map: TemplateMap,
    engine: LightTemplateEngine,
    mode: MapMode,
}

impl TemplateSynchronizer {
    /// Create a synchronizer for `template_root`, loading its template map.
    ///
    /// # Errors
    ///
    /// [`Error::TemplateRootNotFound`] when the directory is absent, or any
    /// error reading the map.
    pub fn new(template_root: NormalizedPath, engine: LightTemplateEngine, mode: MapMode) -> Result<Self> {
        if !template_root.is_dir() {
            return Err(Error::TemplateRootNotFound {
                path: template_root.to_native(),
            });
        }
        let map = TemplateMap::load(template_root)?;
        Ok(Self { map, engine, mode })
    }

    pub fn map(&self) -> &TemplateMap {
        &self.map
    }

    pub fn engine(&self) -> &LightTemplateEngine {
        &self.engine
    }

    pub fn mode(&self) -> &MapMode {
        &self.mode
    }

    /// Resolve project identities for `paths`, keeping their order.
    pub fn resolve_targets(paths: &[NormalizedPath]) -> Result<Vec<ProjectTarget>> {
        paths.iter().map(ProjectTarget::resolve).collect()
    }

    /// Append map entries for unmapped targets.
    ///
    /// See [`TemplateMap::ensure_entries`] for the interactive halt.
    pub fn ensure_entries(&mut self, targets: &[ProjectTarget]) -> Result<Vec<String>> {
        self.map.ensure_entries(targets, &self.mode)
    }

    pub fn comparator(&self) -> DirectoryComparator<'_> {
        DirectoryComparator::new(&self.map, &self.engine)
    }

    /// Ensure map entries, then compare every target in order.
    ///
    /// Fails fast: the first target whose template set is missing or
    /// unassigned ends the run with that error.
    pub fn compare_all(
        &mut self,
        paths: &[NormalizedPath],
    ) -> Result<Vec<(ProjectTarget, Vec<DifferenceRecord>)>> {
        let targets = Self::resolve_targets(paths)?;
        self.ensure_entries(&targets)?;

        let comparator = self.comparator();
        targets
            .into_iter()
            .map(|target| {
                let records = comparator.compare(&target)?;
                Ok((target, records))
            })
            .collect()
    }

    /// Copy every template file into each target, rendering text files.
    ///
    /// Every target's template set is resolved before anything is written,
    /// so a missing or unassigned set aborts the run untouched. A failed copy
    /// stops the run; files already written stay in place.
    pub fn sync(&mut self, paths: &[NormalizedPath], options: &SyncOptions) -> Result<SyncReport> {
        let targets = Self::resolve_targets(paths)?;
        self.ensure_entries(&targets)?;

        let mut plan = Vec::with_capacity(targets.len());
        for target in targets {
            let template_dir = self.map.template_dir_for(target.name())?;
            let template_set = self.map.template_set_for(target.name())?.to_string();
            plan.push((target, template_set, template_dir));
        }

        let mut report = SyncReport {
            dry_run: options.dry_run,
            targets: Vec::with_capacity(plan.len()),
        };

        for (target, template_set, template_dir) in plan {
            tracing::info!(project = %target.name(), template = %template_dir, dry_run = options.dry_run, "Syncing");

            let mut files = Vec::new();
            for template in walk_files(&template_dir)? {
                let Some(rel) = template.relative_to(&template_dir) else {
                    continue;
                };
                files.push(self.sync_file(&target, &template, rel, options.dry_run)?);
            }

            report.targets.push(TargetReport {
                project: target.name().to_string(),
                target: target.dir().clone(),
                template_set,
                files,
            });
        }

        Ok(report)
    }

    fn sync_file(
        &self,
        target: &ProjectTarget,
        template: &NormalizedPath,
        rel: String,
        dry_run: bool,
    ) -> Result<FileChange> {
        let copy_error = |source| Error::FileCopy {
            target: target.dir().to_native(),
            file: rel.clone(),
            source,
        };

        let bytes = io::read_bytes(template).map_err(copy_error)?;
        let content = match String::from_utf8(bytes) {
            Ok(text) => self.engine.render_text(&text, target.name()).into_bytes(),
            Err(binary) => binary.into_bytes(),
        };

        let dest = target.dir().join(&rel);
        let action = if !dest.exists() {
            FileAction::Created
        } else {
            let prior = compute_file_checksum(&dest).map_err(copy_error)?;
            if prior == compute_checksum(&content) {
                FileAction::Unchanged
            } else {
                FileAction::Updated
            }
        };

        if !dry_run {
            io::write_preserving_metadata(template, &dest, &content).map_err(copy_error)?;
            tracing::info!(from = %template, to = %dest, action = %action, "Copied");
        }

        Ok(FileChange { path: rel, action })
    }
}

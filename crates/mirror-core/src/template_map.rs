//! Project to template-set associations
//!
//! The map lives in `<template_root>/template_map.txt`, one
//! `project:template_set` entry per line. New projects are only ever
//! appended; existing lines are never rewritten.

use std::collections::BTreeMap;

use mirror_content::split_lines;
use mirror_fs::{MirrorPath, NormalizedPath, io};

use crate::{Error, ProjectTarget, Result};

/// How placeholder entries are written for unmapped projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapMode {
    /// Write `name:` and stop until a human fills in the template set.
    Interactive,
    /// Write `name:<default>` and carry on.
    UseDefault(String),
}

/// The persisted project to template-set mapping.
#[derive(Debug, Clone)]
pub struct TemplateMap {
    template_root: NormalizedPath,
    path: NormalizedPath,
    entries: BTreeMap<String, String>,
}

impl TemplateMap {
    /// Load the map stored under `template_root`.
    ///
    /// A missing map file yields an empty map.
    pub fn load(template_root: NormalizedPath) -> Result<Self> {
        let path = template_root.join(MirrorPath::TemplateMap.as_str());
        let entries = read_entries(&path)?;
        tracing::debug!(path = %path, entries = entries.len(), "Loaded template map");
        Ok(Self {
            template_root,
            path,
            entries,
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    pub fn template_root(&self) -> &NormalizedPath {
        &self.template_root
    }

    /// Entries as of the last load or append.
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    /// Re-read the backing file.
    pub fn read(&self) -> Result<BTreeMap<String, String>> {
        read_entries(&self.path)
    }

    /// Append placeholder entries for every target whose project is not yet
    /// mapped, returning the names that were added.
    ///
    /// In [`MapMode::Interactive`] any addition ends with
    /// [`Error::UserActionRequired`]; the entries are on disk by then.
    pub fn ensure_entries(&mut self, targets: &[ProjectTarget], mode: &MapMode) -> Result<Vec<String>> {
        self.entries = self.read()?;

        let mut missing: Vec<String> = Vec::new();
        for target in targets {
            let name = target.name();
            if !self.entries.contains_key(name) && !missing.iter().any(|m| m == name) {
                missing.push(name.to_string());
            }
        }

        if missing.is_empty() {
            return Ok(missing);
        }

        let value = match mode {
            MapMode::Interactive => "",
            MapMode::UseDefault(default) => default.as_str(),
        };
        let lines: String = missing
            .iter()
            .map(|name| format!("{name}:{value}\n"))
            .collect();
        io::append_text(&self.path, &lines)?;

        for name in &missing {
            self.entries.insert(name.clone(), value.to_string());
        }
        tracing::info!(path = %self.path, added = missing.len(), "Appended template map entries");

        match mode {
            MapMode::Interactive => Err(Error::UserActionRequired {
                map_path: self.path.to_native(),
                projects: missing,
            }),
            MapMode::UseDefault(_) => Ok(missing),
        }
    }

    /// Template-set name for `project`.
    pub fn template_set_for(&self, project: &str) -> Result<&str> {
        self.entries
            .get(project)
            .map(String::as_str)
            .ok_or_else(|| Error::UnmappedProject {
                project: project.to_string(),
            })
    }

    /// Root of the template set assigned to `project`.
    ///
    /// Fails when the entry is still a placeholder or the directory is absent.
    pub fn template_dir_for(&self, project: &str) -> Result<NormalizedPath> {
        let set = self.template_set_for(project)?;
        if set.is_empty() {
            return Err(Error::UnassignedTemplate {
                project: project.to_string(),
                map_path: self.path.to_native(),
            });
        }

        let dir = self.template_root.join(set);
        if !dir.is_dir() {
            return Err(Error::MissingTemplateDirectory {
                project: project.to_string(),
                path: dir.to_native(),
            });
        }
        Ok(dir)
    }
}

fn read_entries(path: &NormalizedPath) -> Result<BTreeMap<String, String>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let text = io::read_text(path)?;
    parse_entries(path, &text)
}

/// Parse `project:template_set` lines. Whitespace-only lines are skipped and
/// everything after the first `:` is the template-set name.
fn parse_entries(path: &NormalizedPath, text: &str) -> Result<BTreeMap<String, String>> {
    let mut entries = BTreeMap::new();
    for line in split_lines(text) {
        if line.trim().is_empty() {
            continue;
        }
        let (project, set) = line.split_once(':').ok_or_else(|| Error::MalformedMap {
            path: path.to_native(),
            line: line.trim_end().to_string(),
        })?;
        entries.insert(project.trim().to_string(), set.trim().to_string());
    }
    Ok(entries)
}

//! Human-readable difference reports
//!
//! Reports are written to the sink passed at construction. Nothing here is
//! returned for programmatic use beyond I/O errors.

use std::io::Write;

use mirror_fs::NormalizedPath;

use crate::compare::DifferenceKind;
use crate::sync::TemplateSynchronizer;
use crate::Result;

/// Renders comparison results for a set of targets.
#[derive(Debug)]
pub struct DiffReporter<W: Write> {
    out: W,
}

impl<W: Write> DiffReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the reporter and return its sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print, per target, either "No differences" or its divergent files.
    ///
    /// Unmapped targets are added to the map first. Every target is compared
    /// before anything is printed; a missing or unassigned template set fails
    /// the whole report.
    pub fn report_structural(
        &mut self,
        synchronizer: &mut TemplateSynchronizer,
        targets: &[NormalizedPath],
    ) -> Result<()> {
        for (target, records) in synchronizer.compare_all(targets)? {
            if records.is_empty() {
                writeln!(self.out, "No differences in {}", target.dir()).map_err(sink_error)?;
                continue;
            }
            writeln!(self.out, "Differences in {}:", target.dir()).map_err(sink_error)?;
            for record in &records {
                writeln!(self.out, "  {}: {}", record.path, record.kind).map_err(sink_error)?;
            }
        }
        Ok(())
    }

    /// Print a unified diff for every file with different contents and a
    /// one-line notice for missing files and length mismatches.
    pub fn report_content(
        &mut self,
        synchronizer: &mut TemplateSynchronizer,
        targets: &[NormalizedPath],
    ) -> Result<()> {
        let results = synchronizer.compare_all(targets)?;
        let comparator = synchronizer.comparator();

        for (target, records) in &results {
            for record in records {
                match record.kind {
                    DifferenceKind::DifferentContents => match comparator.diff(target, record) {
                        Some(diff) => write!(self.out, "{}", diff.unified()).map_err(sink_error)?,
                        None => writeln!(
                            self.out,
                            "Files {} and {} differ.",
                            record.template, record.target
                        )
                        .map_err(sink_error)?,
                    },
                    DifferenceKind::DifferentLength => writeln!(
                        self.out,
                        "Files {} and {} have different lengths.",
                        record.template, record.target
                    )
                    .map_err(sink_error)?,
                    DifferenceKind::Missing => writeln!(
                        self.out,
                        "File {} is missing in {}.",
                        record.template, record.target
                    )
                    .map_err(sink_error)?,
                }
            }
        }
        Ok(())
    }
}

fn sink_error(e: std::io::Error) -> crate::Error {
    mirror_fs::Error::io("<report output>", e).into()
}

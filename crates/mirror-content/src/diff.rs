//! Line diffs between a rendered template and a target file

use similar::{ChangeTag, TextDiff};

/// Lines of context shown around each hunk.
const CONTEXT_RADIUS: usize = 3;

/// Line-based diff of two files, rendered in unified format.
#[derive(Debug, Clone, PartialEq)]
pub struct FileDiff {
    /// Number of lines present only in the target
    pub inserted: usize,
    /// Number of lines present only in the template
    pub deleted: usize,
    /// Similarity ratio (0.0 to 1.0)
    pub similarity: f32,
    unified: String,
}

impl FileDiff {
    /// Diff `from_lines` (labelled `from_label`) against `to_lines`.
    ///
    /// Lines are compared verbatim, so callers normalize line endings first.
    pub fn compute(
        from_label: &str,
        from_lines: &[String],
        to_label: &str,
        to_lines: &[String],
    ) -> Self {
        let old: Vec<&str> = from_lines.iter().map(String::as_str).collect();
        let new: Vec<&str> = to_lines.iter().map(String::as_str).collect();

        let text_diff = TextDiff::from_slices(&old, &new);

        let mut inserted = 0;
        let mut deleted = 0;
        for change in text_diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Insert => inserted += 1,
                ChangeTag::Delete => deleted += 1,
                ChangeTag::Equal => {}
            }
        }

        tracing::trace!(from = from_label, to = to_label, inserted, deleted, "Computed line diff");

        let unified = if inserted == 0 && deleted == 0 {
            String::new()
        } else {
            text_diff
                .unified_diff()
                .context_radius(CONTEXT_RADIUS)
                .header(from_label, to_label)
                .to_string()
        };

        Self {
            inserted,
            deleted,
            similarity: text_diff.ratio(),
            unified,
        }
    }

    /// True when both sides have identical lines.
    pub fn is_identical(&self) -> bool {
        self.inserted == 0 && self.deleted == 0
    }

    /// Unified diff text; empty when the files are identical.
    pub fn unified(&self) -> &str {
        &self.unified
    }
}

//! Template propagation into target directories
//!
//! This module provides:
//! - **engine**: the [`TemplateSynchronizer`] facade (map upkeep, comparison, sync)
//! - **report**: per-target outcome of a sync run

mod engine;
mod report;

pub use engine::{SyncOptions, TemplateSynchronizer};
pub use report::{FileAction, FileChange, SyncReport, TargetReport};

//! Cross-repository template synchronization for git-mirror
//!
//! This crate ties the Layer 0 crates together:
//!
//! - **Template map**: which template set each project follows
//! - **Comparator**: structural and content comparison of a project against its template set
//! - **Reporter**: human-readable difference reports written to an explicit sink
//! - **Synchronizer**: facade that validates the map and propagates template files
//! - **Audit**: uncommitted and unpushed work across local clones
//!
//! # Architecture
//!
//! ```text
//!                  mirror-cli
//!                      |
//!                 mirror-core
//!                      |
//!     +----------------+----------------+
//!     |                |                |
//! mirror-fs     mirror-content     mirror-git
//! ```

pub mod audit;
pub mod compare;
pub mod config;
pub mod error;
pub mod report;
pub mod sync;
pub mod target;
pub mod template_map;

pub use audit::{Finding, RepoAudit, audit_local_changes, audit_repository};
pub use compare::{DifferenceKind, DifferenceRecord, DirectoryComparator};
pub use config::{HostConfig, HostType, MirrorConfig};
pub use error::{Error, Result};
pub use report::DiffReporter;
pub use sync::{FileAction, FileChange, SyncOptions, SyncReport, TargetReport, TemplateSynchronizer};
pub use target::ProjectTarget;
pub use template_map::{MapMode, TemplateMap};

//! Local git plumbing for git-mirror
//!
//! Exposes the [`VersionControl`] capability used by the orchestration layer
//! and its `git2`-backed implementation.

pub mod error;
pub mod helpers;
pub mod provider;
pub mod repository;

pub use error::{Error, Result};
pub use provider::{BranchStatus, BranchUpdate, UpdateOutcome, VersionControl};
pub use repository::GitRepository;

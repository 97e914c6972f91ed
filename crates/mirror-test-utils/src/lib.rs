//! Shared test utilities for the git-mirror workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: git repository fixtures
//! - [`templates`]: [`TemplateWorkspace`] builder for template-sync scenarios

pub mod git;
pub mod templates;

pub use templates::TemplateWorkspace;

//! Light templating and line diffing for git-mirror
//!
//! Template files are rendered with a single project-name substitution pass
//! before they are compared with, diffed against, or written into a target.

pub mod diff;
pub mod error;
pub mod render;

pub use diff::FileDiff;
pub use error::{Error, Result};
pub use render::{
    DEFAULT_PROJECT_NAME_TOKEN, LightTemplateEngine, RenderedPair, read_lines, split_lines,
};

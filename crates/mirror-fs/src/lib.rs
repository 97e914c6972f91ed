//! Filesystem primitives for git-mirror
//!
//! Provides normalized paths, safe I/O, configuration loading and
//! discovery of local repositories.

pub mod checksum;
pub mod config;
pub mod constants;
pub mod discovery;
pub mod error;
pub mod io;
pub mod path;

pub use config::{ConfigFormat, ConfigStore};
pub use constants::MirrorPath;
pub use discovery::{child_directories, find_local_repositories, walk_files};
pub use error::{Error, Result};
pub use path::NormalizedPath;

//! Forward-slash paths for project and template files

use std::fmt;
use std::path::{Path, PathBuf};

/// A filesystem path stored with `/` separators.
///
/// Built from UTF-8 text; [`walk_files`](crate::walk_files) never hands out
/// paths whose names are not valid UTF-8.
///
/// Template-relative paths are reported the same way on every platform.
/// The native form is produced only when touching the filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    inner: String,
}

/// `\` is a separator only on Windows; elsewhere it is a legal file name
/// character and is kept.
fn slashes(text: &str) -> String {
    if cfg!(windows) {
        text.replace('\\', "/")
    } else {
        text.to_owned()
    }
}

impl NormalizedPath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            inner: slashes(&path.as_ref().to_string_lossy()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Append a relative path, which may contain several segments.
    pub fn join(&self, relative: &str) -> Self {
        let relative = slashes(relative);
        let inner = match self.inner.as_str() {
            "" => relative,
            base if base.ends_with('/') => base.to_owned() + &relative,
            base => format!("{base}/{relative}"),
        };
        Self { inner }
    }

    /// The containing directory. `None` for a bare name.
    pub fn parent(&self) -> Option<Self> {
        let (head, _) = self.trimmed().rsplit_once('/')?;
        let inner = if head.is_empty() { "/" } else { head };
        Some(Self {
            inner: inner.to_owned(),
        })
    }

    /// Final component; trailing slashes are ignored.
    pub fn file_name(&self) -> Option<&str> {
        let last = match self.trimmed().rsplit_once('/') {
            Some((_, last)) => last,
            None => self.trimmed(),
        };
        (!last.is_empty()).then_some(last)
    }

    /// The part of this path below `base`, or `None` if `base` does not
    /// contain it. Matching is by whole components.
    pub fn relative_to(&self, base: &NormalizedPath) -> Option<String> {
        match self.inner.strip_prefix(base.trimmed())? {
            "" => Some(String::new()),
            rest => rest.strip_prefix('/').map(str::to_owned),
        }
    }

    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    /// Extension of the final component. Dotfiles such as `.gitignore` have none.
    pub fn extension(&self) -> Option<&str> {
        match self.file_name()?.rsplit_once('.')? {
            ("", _) => None,
            (_, ext) => Some(ext),
        }
    }

    fn trimmed(&self) -> &str {
        self.inner.trim_end_matches('/')
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

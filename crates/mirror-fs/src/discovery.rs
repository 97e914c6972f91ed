//! Directory walks: local repository discovery and recursive file listing

use walkdir::WalkDir;

use crate::{Error, MirrorPath, NormalizedPath, Result};

/// Find every local git repository under `base`.
///
/// A directory counts as a repository when it contains a `.git` entry.
/// The walk does not descend into a repository once found, so nested
/// submodules are not reported separately. Results are sorted by path.
pub fn find_local_repositories(base: &NormalizedPath) -> Result<Vec<NormalizedPath>> {
    let root = base.to_native();
    if !root.is_dir() {
        return Err(Error::io(
            &root,
            std::io::Error::new(std::io::ErrorKind::NotFound, "base directory not found"),
        ));
    }

    let mut repositories = Vec::new();
    let mut walker = WalkDir::new(&root).sort_by_file_name().into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry.map_err(|e| Error::walk(&root, e))?;
        if !entry.file_type().is_dir() {
            continue;
        }
        if entry.file_name() == MirrorPath::GitDir.as_str() {
            walker.skip_current_dir();
            continue;
        }
        if entry.path().join(MirrorPath::GitDir).exists() {
            tracing::debug!(path = %entry.path().display(), "Found local repository");
            repositories.push(NormalizedPath::new(entry.path()));
            walker.skip_current_dir();
        }
    }

    Ok(repositories)
}

/// List the immediate subdirectories of `base`, sorted by name.
///
/// Hidden directories (leading `.`) are skipped.
pub fn child_directories(base: &NormalizedPath) -> Result<Vec<NormalizedPath>> {
    let root = base.to_native();
    let mut dirs = Vec::new();

    for entry in WalkDir::new(&root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| Error::walk(&root, e))?;
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if entry.file_type().is_dir() && !hidden {
            dirs.push(NormalizedPath::new(entry.path()));
        }
    }

    Ok(dirs)
}

/// List every regular file below `root`, recursively, sorted by path.
///
/// Directories themselves are not returned. Symbolic links are followed.
/// Files whose names are not valid UTF-8 cannot be named by a
/// [`NormalizedPath`]; they are skipped with a warning.
pub fn walk_files(root: &NormalizedPath) -> Result<Vec<NormalizedPath>> {
    let native_root = root.to_native();
    let mut files = Vec::new();

    for entry in WalkDir::new(&native_root)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| Error::walk(&native_root, e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        match entry.path().to_str() {
            Some(path) => files.push(NormalizedPath::new(path)),
            None => tracing::warn!(path = %entry.path().display(), "Skipping file with a non UTF-8 name"),
        }
    }

    Ok(files)
}

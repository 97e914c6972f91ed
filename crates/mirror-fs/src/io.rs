//! Atomic and locked I/O operations

use std::fs::{self, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};

use filetime::FileTime;
use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename so readers never observe a partial file.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Temp file lives next to the target so the rename stays on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;

    FileExt::unlock(&temp_file).map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;
    drop(temp_file);

    fs::rename(&temp_path, &native_path).map_err(|e| Error::io(&native_path, e))?;

    Ok(())
}

/// Append text to a file under an exclusive lock, creating it if needed.
///
/// Existing content is never rewritten. If the file does not end with a
/// newline, one is inserted before `content` so appended lines stay separate.
pub fn append_text(path: &NormalizedPath, content: &str) -> Result<()> {
    let native_path = path.to_native();

    let mut file = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(&native_path)
        .map_err(|e| Error::io(&native_path, e))?;

    file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    let len = file
        .metadata()
        .map_err(|e| Error::io(&native_path, e))?
        .len();
    let needs_separator = if len == 0 {
        false
    } else {
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1))
            .and_then(|_| file.read_exact(&mut last))
            .map_err(|e| Error::io(&native_path, e))?;
        last[0] != b'\n'
    };

    if needs_separator {
        file.write_all(b"\n")
            .map_err(|e| Error::io(&native_path, e))?;
    }
    file.write_all(content.as_bytes())
        .map_err(|e| Error::io(&native_path, e))?;
    file.sync_all().map_err(|e| Error::io(&native_path, e))?;

    FileExt::unlock(&file).map_err(|_| Error::LockFailed { path: native_path })?;

    Ok(())
}

/// Read a file as UTF-8 text.
///
/// Returns [`Error::NotText`] when the bytes are not valid UTF-8.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    let bytes = fs::read(&native_path).map_err(|e| Error::io(&native_path, e))?;
    String::from_utf8(bytes).map_err(|_| Error::NotText { path: native_path })
}

/// Read a file's raw bytes.
pub fn read_bytes(path: &NormalizedPath) -> Result<Vec<u8>> {
    let native_path = path.to_native();
    fs::read(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write `content` to `dest`, carrying over `source`'s permissions and
/// access/modification times.
///
/// Missing parent directories of `dest` are created. The destination is
/// always overwritten.
pub fn write_preserving_metadata(
    source: &NormalizedPath,
    dest: &NormalizedPath,
    content: &[u8],
) -> Result<()> {
    let source_native = source.to_native();
    let dest_native = dest.to_native();

    let metadata = fs::metadata(&source_native).map_err(|e| Error::io(&source_native, e))?;

    write_atomic(dest, content)?;

    fs::set_permissions(&dest_native, metadata.permissions())
        .map_err(|e| Error::io(&dest_native, e))?;

    let atime = FileTime::from_last_access_time(&metadata);
    let mtime = FileTime::from_last_modification_time(&metadata);
    filetime::set_file_times(&dest_native, atime, mtime)
        .map_err(|e| Error::io(&dest_native, e))?;

    Ok(())
}

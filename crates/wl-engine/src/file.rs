//! Whole-file reads and atomic replacement.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::LogError;

fn access_error(path: &Path) -> impl FnOnce(std::io::Error) -> LogError + '_ {
    move |source| LogError::FileAccess {
        path: path.to_path_buf(),
        source,
    }
}

/// Reads the file at `path`, creating it empty if it does not exist.
pub fn read_or_create(path: &Path) -> Result<String, LogError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(contents),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = ?path, "creating empty log file");
            fs::write(path, "").map_err(access_error(path))?;
            Ok(String::new())
        }
        Err(e) => Err(access_error(path)(e)),
    }
}

/// Replaces the file at `path` with `contents`.
///
/// The contents go to a temporary file in the same directory, which is synced
/// and renamed over `path`. Readers see either the old or the new file.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), LogError> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir).map_err(access_error(path))?;
    tmp.write_all(contents.as_bytes())
        .map_err(access_error(path))?;
    tmp.as_file().sync_all().map_err(access_error(path))?;
    tmp.persist(path)
        .map_err(|e| access_error(path)(e.error))?;

    Ok(())
}

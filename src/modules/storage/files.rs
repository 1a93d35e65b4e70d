use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use super::StorageError;

/// Read and parse a JSON file. A missing file is `Ok(None)`, anything else unreadable is an error.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StorageError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StorageError::io(path, e)),
    };

    serde_json::from_str(&data)
        .map(Some)
        .map_err(|e| StorageError::invalid_data(path, e))
}

/// Serialize `value` as pretty JSON and replace `path` with it atomically.
///
/// The data is written to a temporary file in the destination directory,
/// flushed to disk and then renamed over the target, so readers see either
/// the old record or the new one, never a partial write.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;

    let data = serde_json::to_string_pretty(value).map_err(|e| StorageError::invalid_data(path, e))?;

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| StorageError::io(dir, e))?;
    if let Err(e) = temp.write_all(data.as_bytes()) {
        return Err(StorageError::io(temp.path(), e));
    }
    if let Err(e) = temp.as_file().sync_all() {
        return Err(StorageError::io(temp.path(), e));
    }

    temp.persist(path)
        .map_err(|e| StorageError::io(path, e.error))?;
    Ok(())
}

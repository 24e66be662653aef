use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use super::StorageError;

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Writes `bytes` to `path` through a sibling `.tmp` file and a rename, so
/// readers see either the old contents or the new ones.
///
/// The temp file is removed if any step fails.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
    }

    let temp = temp_path(path);
    let result = write_then_rename(&temp, path, bytes);
    if result.is_err() && temp.exists() {
        let _ = fs::remove_file(&temp);
    }
    result
}

fn write_then_rename(temp: &Path, path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let mut file = fs::File::create(temp).map_err(|e| StorageError::io(temp, e))?;
    file.write_all(bytes).map_err(|e| StorageError::io(temp, e))?;
    file.sync_all().map_err(|e| StorageError::io(temp, e))?;
    drop(file);
    fs::rename(temp, path).map_err(|e| StorageError::io(path, e))
}

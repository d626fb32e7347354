//! JSON file-based storage implementation.
//!
//! Each key is stored as a separate file: `input-history-ses_1` ->
//! `<base>/input-history-ses_1.json`. Characters that can't appear in a
//! file name are percent-escaped. The file holds the stored string
//! verbatim, which for history lists is already a JSON document.

use crate::{KeyValueStore, StorageError, StorageResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File-backed key/value store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    base_path: PathBuf,
}

impl JsonFileStore {
    /// Create a new store rooted at the given directory.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Directory holding the stored files.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get the file path for a key.
    ///
    /// Keys may carry arbitrary session ids, so path separators are
    /// escaped rather than rejected.
    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty() {
            return Err(StorageError::invalid_key("Key cannot be empty"));
        }

        Ok(self.base_path.join(format!("{}.json", file_stem(key))))
    }
}

/// Percent-escape the characters that can't appear in a single file name.
///
/// `%` itself is escaped so distinct keys never share a file, and a leading
/// `.` is escaped so no key names a hidden file or `..`.
fn file_stem(key: &str) -> String {
    let mut stem = String::with_capacity(key.len());
    for (i, c) in key.char_indices() {
        match c {
            '%' => stem.push_str("%25"),
            '/' => stem.push_str("%2F"),
            '\\' => stem.push_str("%5C"),
            '\0' => stem.push_str("%00"),
            '.' if i == 0 => stem.push_str("%2E"),
            c => stem.push(c),
        }
    }
    stem
}

impl KeyValueStore for JsonFileStore {
    fn get_string(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.key_to_path(key)?;
        debug!(path = %path.display(), "Reading from storage");

        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.key_to_path(key)?;
        debug!(path = %path.display(), bytes = value.len(), "Writing to storage");

        fs::create_dir_all(&self.base_path)?;

        // Write atomically (write to temp file, then rename)
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, value)?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.key_to_path(key)?;
        debug!(path = %path.display(), "Removing from storage");

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn contains(&self, key: &str) -> StorageResult<bool> {
        Ok(self.key_to_path(key)?.exists())
    }
}

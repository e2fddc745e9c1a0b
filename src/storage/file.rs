//! File-based key-value storage for microskill.
//!
//! Each key is stored in its own file, `<data_dir>/<key>.val`.
//! Atomic writes are achieved via temp file + rename pattern.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::data_dir;
use crate::error::{MicroskillError, Result};
use crate::storage::traits::validate_key;
use crate::storage::KeyValueStore;

/// File-based key-value storage.
///
/// One file per key in a configurable directory, written atomically.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    /// Directory where value files are stored.
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Create a new file store with the default directory.
    ///
    /// Uses `~/.microskill/data/` or `$MICROSKILL_HOME/data/`.
    pub fn new() -> Result<Self> {
        let dir = data_dir().ok_or_else(|| {
            MicroskillError::config("Could not determine data directory (no home directory)")
        })?;
        Self::with_dir(dir)
    }

    /// Create a new file store with a custom directory.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();

        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| MicroskillError::storage(&dir, e))?;
        }

        Ok(Self { dir })
    }

    /// The directory holding the value files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.val", key))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!(".{}.val.tmp", key))
    }

    /// Write a value atomically using temp file + rename.
    fn atomic_write(&self, key: &str, value: &str) -> Result<()> {
        let final_path = self.value_path(key);
        let temp_path = self.temp_path(key);

        {
            let mut file = fs::File::create(&temp_path)
                .map_err(|e| MicroskillError::storage(&temp_path, e))?;
            file.write_all(value.as_bytes())
                .map_err(|e| MicroskillError::storage(&temp_path, e))?;
            file.sync_all()
                .map_err(|e| MicroskillError::storage(&temp_path, e))?;
        }

        // Rename temp file to final path (atomic on POSIX)
        fs::rename(&temp_path, &final_path)
            .map_err(|e| MicroskillError::storage(&final_path, e))?;

        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let path = self.value_path(key);

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).map_err(|e| MicroskillError::storage(&path, e))?;
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.atomic_write(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        let path = self.value_path(key);

        if path.exists() {
            fs::remove_file(&path).map_err(|e| MicroskillError::storage(&path, e))?;
        }

        let temp_path = self.temp_path(key);
        if temp_path.exists() {
            let _ = fs::remove_file(&temp_path);
        }

        Ok(())
    }
}

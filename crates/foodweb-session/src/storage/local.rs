//! Local filesystem storage
//!
//! Stores each key as a file in the user's home directory.

use super::{LocalStorage, StorageError, StorageResult, validate_key};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Local filesystem storage
///
/// Values are stored one file per key in:
/// - `~/.foodweb/storage/` (default)
/// - Custom path if specified
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    /// Directory holding one file per key
    base_path: PathBuf,
}

impl LocalFileStorage {
    /// Create storage with default path (~/.foodweb/storage)
    pub fn new() -> StorageResult<Self> {
        let base_path = dirs::home_dir()
            .ok_or(StorageError::PathUnavailable)?
            .join(".foodweb")
            .join("storage");

        Ok(Self { base_path })
    }

    /// Create storage with custom base path
    pub fn with_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Directory the values live in
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    async fn ensure_dir(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    fn item_path(&self, key: &str) -> PathBuf {
        self.base_path.join(key)
    }
}

#[async_trait]
impl LocalStorage for LocalFileStorage {
    async fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        validate_key(key)?;

        match fs::read_to_string(self.item_path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.ensure_dir().await?;

        let path = self.item_path(key);
        let tmp_path = self.base_path.join(format!("{}.tmp", key));
        fs::write(&tmp_path, value).await?;
        fs::rename(&tmp_path, &path).await?;
        debug!("Stored '{}' at {:?}", key, path);

        Ok(())
    }

    async fn remove_item(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;

        match fs::remove_file(self.item_path(key)).await {
            Ok(()) => {
                debug!("Removed '{}' from {:?}", key, self.base_path);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

//! Durable client storage abstraction and implementations
//!
//! Provides a small key/value store with the same surface as browser
//! local storage, backed by the filesystem or by memory.

mod local;
mod memory;

pub use local::LocalFileStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;
use thiserror::Error;

/// Storage key holding the bearer token
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the serialized user summary
pub const USER_INFO_KEY: &str = "userInfo";

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage path not available")]
    PathUnavailable,
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Key/value storage that survives process restarts
#[async_trait]
pub trait LocalStorage: Send + Sync {
    /// Read the value stored under `key`
    async fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`; removing a missing key is not an error
    async fn remove_item(&self, key: &str) -> StorageResult<()>;

    /// Check whether a value is stored under `key`
    async fn contains(&self, key: &str) -> StorageResult<bool> {
        Ok(self.get_item(key).await?.is_some())
    }
}

/// Keys become file names, so only a conservative character set is allowed.
pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

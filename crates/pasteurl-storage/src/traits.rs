//! Storage abstraction trait

use async_trait::async_trait;
use pasteurl_core::AppError;
use std::path::Path;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    /// The file was never written or has been removed from disk.
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => AppError::FileMissing(key),
            StorageError::InvalidKey(msg) => AppError::BadRequest(msg),
            StorageError::IoError(e) => AppError::Storage(format!("IO error: {}", e)),
            StorageError::UploadFailed(msg)
            | StorageError::DownloadFailed(msg)
            | StorageError::DeleteFailed(msg)
            | StorageError::ConfigError(msg) => AppError::Storage(msg),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Content store keyed by hash-derived filename.
///
/// Filenames are deterministic for identical content, so callers consult the
/// catalog before calling [`Storage::put`]. Two concurrent puts of the same
/// filename carry the same bytes and must both succeed.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` under `filename`, creating the storage root if needed.
    async fn put(&self, filename: &str, data: &[u8]) -> StorageResult<()>;

    /// Read the bytes stored under `filename`.
    ///
    /// Returns [`StorageError::NotFound`] when the file does not exist, and
    /// another variant for permission or I/O failures.
    async fn get(&self, filename: &str) -> StorageResult<Vec<u8>>;

    /// Check whether `filename` exists without reading it.
    async fn exists(&self, filename: &str) -> StorageResult<bool>;

    /// Remove `filename`. Removing a missing file succeeds.
    async fn delete(&self, filename: &str) -> StorageResult<()>;

    /// Root directory of the store.
    fn root(&self) -> &Path;
}

//! Catalog abstraction over the `images` table

use async_trait::async_trait;
use pasteurl_core::models::{ImageRecord, NewImageRecord};
use pasteurl_core::AppError;

/// Failure of an [`ImageCatalog`] operation.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Another record already holds this hash. Only `insert` returns it.
    #[error("Image with hash {0} already exists")]
    DuplicateKey(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl CatalogError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, CatalogError::DuplicateKey(_))
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Database(e) => AppError::Database(e),
            CatalogError::DuplicateKey(hash) => {
                AppError::Internal(format!("Unexpected duplicate catalog entry for {}", hash))
            }
        }
    }
}

/// Persistent mapping from content fingerprint to image metadata.
#[async_trait]
pub trait ImageCatalog: Send + Sync {
    async fn find_by_hash(&self, hash: &str) -> Result<Option<ImageRecord>, CatalogError>;

    /// Insert a new record and return it with its assigned id.
    ///
    /// Fails with [`CatalogError::DuplicateKey`] when the hash is already
    /// catalogued; the existing record is left untouched.
    async fn insert(&self, record: NewImageRecord) -> Result<ImageRecord, CatalogError>;

    /// All records, most recently uploaded first.
    async fn list_all(&self) -> Result<Vec<ImageRecord>, CatalogError>;

    /// Round-trip to the database, used by readiness checks.
    async fn ping(&self) -> Result<(), CatalogError>;
}

//! Upload and retrieval of content-addressed images.
//!
//! The catalog's unique constraint on `hash` is the only synchronisation
//! between concurrent uploads. The file is always written before the catalog
//! row, so a failure can leave an orphaned file but never an orphaned record.

use std::sync::Arc;

use chrono::Utc;
use pasteurl_core::models::{CheckResponse, ImageRecord, ImageSummary, NewImageRecord};
use pasteurl_core::{fingerprint, is_fingerprint, retrieval_url, stored_filename, AppError, Config};
use pasteurl_db::{CatalogError, ImageCatalog};
use pasteurl_storage::{Storage, StorageError};

/// Result of a successful upload.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub hash: String,
    pub url: String,
    /// False when the content was already catalogued.
    pub is_new_upload: bool,
    pub record: ImageRecord,
}

/// Bytes and metadata of a stored image.
#[derive(Debug, Clone)]
pub struct RetrievedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub record: ImageRecord,
}

#[derive(Clone)]
pub struct ImageService {
    storage: Arc<dyn Storage>,
    catalog: Arc<dyn ImageCatalog>,
    max_file_size: usize,
    public_base_url: String,
}

impl ImageService {
    pub fn new(
        storage: Arc<dyn Storage>,
        catalog: Arc<dyn ImageCatalog>,
        max_file_size: usize,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            catalog,
            max_file_size,
            public_base_url: public_base_url.into(),
        }
    }

    pub fn from_config(
        config: &Config,
        storage: Arc<dyn Storage>,
        catalog: Arc<dyn ImageCatalog>,
    ) -> Self {
        Self::new(
            storage,
            catalog,
            config.max_file_size_bytes(),
            config.public_base_url(),
        )
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    pub fn url_for(&self, hash: &str) -> String {
        retrieval_url(&self.public_base_url, hash)
    }

    /// Store `content` unless identical content is already catalogued.
    ///
    /// # Errors
    /// - `AppError::PayloadTooLarge` - content exceeds the configured maximum
    /// - `AppError::NoContent` - content is empty
    /// - `AppError::Storage` - the file could not be written
    /// - `AppError::Database` - the catalog lookup or insert failed
    #[tracing::instrument(skip(self, content), fields(size_bytes = content.len(), hash))]
    pub async fn upload(
        &self,
        content: &[u8],
        original_name: Option<&str>,
        mime_type: Option<&str>,
    ) -> Result<UploadOutcome, AppError> {
        if content.len() > self.max_file_size {
            return Err(AppError::PayloadTooLarge(format!(
                "File size {} bytes exceeds maximum allowed size of {} bytes",
                content.len(),
                self.max_file_size
            )));
        }
        if content.is_empty() {
            return Err(AppError::NoContent("No file uploaded".to_string()));
        }

        let hash = fingerprint(content);
        tracing::Span::current().record("hash", hash.as_str());

        if let Some(existing) = self.catalog.find_by_hash(&hash).await? {
            tracing::debug!(hash = %hash, "Content already stored, skipping write");
            return Ok(self.existing_outcome(existing));
        }

        let filename = stored_filename(&hash, original_name);
        self.storage.put(&filename, content).await?;

        let new_record = NewImageRecord {
            hash: hash.clone(),
            stored_filename: filename.clone(),
            original_name: original_name.map(str::to_string),
            mime_type: mime_type.map(str::to_string),
            size_bytes: content.len() as i64,
            uploaded_at: Utc::now(),
        };

        match self.catalog.insert(new_record).await {
            Ok(record) => {
                tracing::info!(
                    hash = %hash,
                    filename = %filename,
                    size_bytes = content.len(),
                    "Image uploaded"
                );
                Ok(UploadOutcome {
                    url: self.url_for(&hash),
                    hash,
                    is_new_upload: true,
                    record,
                })
            }
            Err(CatalogError::DuplicateKey(_)) => {
                // A concurrent upload of the same content committed first.
                tracing::debug!(hash = %hash, "Lost insert race to identical upload");
                let existing = self.catalog.find_by_hash(&hash).await?.ok_or_else(|| {
                    AppError::Internal(format!(
                        "Catalog reported duplicate hash {} but has no record for it",
                        hash
                    ))
                })?;
                // Same name means same bytes as the winner's file; any other
                // name is unreferenced.
                if existing.stored_filename != filename {
                    self.remove_unreferenced(&filename).await;
                }
                Ok(self.existing_outcome(existing))
            }
            Err(err) => {
                self.remove_unreferenced(&filename).await;
                Err(err.into())
            }
        }
    }

    /// Load the bytes stored for `hash`.
    ///
    /// # Errors
    /// - `AppError::NotFound` - the hash is not catalogued
    /// - `AppError::FileMissing` - the hash is catalogued but its file is gone
    #[tracing::instrument(skip(self))]
    pub async fn retrieve(&self, hash: &str) -> Result<RetrievedImage, AppError> {
        let record = self
            .find(hash)
            .await?
            .ok_or_else(|| AppError::NotFound("Image not found".to_string()))?;

        if !self.storage.exists(&record.stored_filename).await? {
            tracing::warn!(
                hash = %hash,
                filename = %record.stored_filename,
                "Catalogued image has no file on disk"
            );
            return Err(AppError::FileMissing("File not found on disk".to_string()));
        }

        let bytes = match self.storage.get(&record.stored_filename).await {
            Ok(bytes) => bytes,
            Err(StorageError::NotFound(_)) => {
                return Err(AppError::FileMissing("File not found on disk".to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(RetrievedImage {
            bytes,
            mime_type: record.effective_mime_type().to_string(),
            record,
        })
    }

    /// All catalogued images, newest first.
    pub async fn list(&self) -> Result<Vec<ImageSummary>, AppError> {
        let records = self.catalog.list_all().await?;
        Ok(records
            .iter()
            .map(|r| r.to_summary(&self.public_base_url))
            .collect())
    }

    /// Whether content with `hash` is already stored.
    pub async fn check(&self, hash: &str) -> Result<CheckResponse, AppError> {
        Ok(match self.find(hash).await? {
            Some(record) => CheckResponse::found(&record, &self.public_base_url),
            None => CheckResponse::missing(),
        })
    }

    /// Catalog lookup that treats anything that is not a fingerprint as unknown.
    async fn find(&self, hash: &str) -> Result<Option<ImageRecord>, AppError> {
        if !is_fingerprint(hash) {
            return Ok(None);
        }
        Ok(self.catalog.find_by_hash(hash).await?)
    }

    fn existing_outcome(&self, record: ImageRecord) -> UploadOutcome {
        UploadOutcome {
            hash: record.hash.clone(),
            url: self.url_for(&record.hash),
            is_new_upload: false,
            record,
        }
    }

    /// Best-effort removal of a file this upload wrote but no record points to.
    async fn remove_unreferenced(&self, filename: &str) {
        if let Err(e) = self.storage.delete(filename).await {
            tracing::warn!(
                error = %e,
                filename = %filename,
                "Failed to remove unreferenced upload file"
            );
        }
    }
}

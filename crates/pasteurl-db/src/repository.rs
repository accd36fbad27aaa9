//! Image repository: SQLite implementation of [`ImageCatalog`].

use async_trait::async_trait;
use pasteurl_core::models::{ImageRecord, NewImageRecord};
use sqlx::{Sqlite, SqlitePool};

use crate::catalog::{CatalogError, ImageCatalog};

const IMAGE_COLUMNS: &str = "id, hash, filename, original_name, mime_type, size, uploaded_at";

/// Repository for the `images` table.
#[derive(Clone)]
pub struct ImageRepository {
    pool: SqlitePool,
}

impl ImageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl ImageCatalog for ImageRepository {
    #[tracing::instrument(skip(self), fields(db.table = "images"))]
    async fn find_by_hash(&self, hash: &str) -> Result<Option<ImageRecord>, CatalogError> {
        let record = sqlx::query_as::<Sqlite, ImageRecord>(&format!(
            "SELECT {} FROM images WHERE hash = ?",
            IMAGE_COLUMNS
        ))
        .bind(hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    #[tracing::instrument(skip(self, record), fields(db.table = "images", hash = %record.hash))]
    async fn insert(&self, record: NewImageRecord) -> Result<ImageRecord, CatalogError> {
        let result = sqlx::query_as::<Sqlite, ImageRecord>(&format!(
            r#"
            INSERT INTO images (hash, filename, original_name, mime_type, size, uploaded_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            IMAGE_COLUMNS
        ))
        .bind(&record.hash)
        .bind(&record.stored_filename)
        .bind(&record.original_name)
        .bind(&record.mime_type)
        .bind(record.size_bytes)
        .bind(record.uploaded_at)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(inserted) => Ok(inserted),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                tracing::debug!(hash = %record.hash, "Hash already catalogued");
                Err(CatalogError::DuplicateKey(record.hash))
            }
            Err(e) => Err(CatalogError::Database(e)),
        }
    }

    #[tracing::instrument(skip(self), fields(db.table = "images"))]
    async fn list_all(&self) -> Result<Vec<ImageRecord>, CatalogError> {
        let records = sqlx::query_as::<Sqlite, ImageRecord>(&format!(
            "SELECT {} FROM images ORDER BY uploaded_at DESC, id DESC",
            IMAGE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn ping(&self) -> Result<(), CatalogError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

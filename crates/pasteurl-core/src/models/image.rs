use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::naming::{retrieval_url, DEFAULT_MIME_TYPE};

/// Catalog entry for one unique piece of content.
///
/// Created once on the first successful upload of its content and never
/// updated afterwards. Column names follow the `images` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ImageRecord {
    pub id: i64,
    pub hash: String,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "filename"))]
    pub stored_filename: String,
    pub original_name: Option<String>,
    pub mime_type: Option<String>,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "size"))]
    pub size_bytes: i64,
    pub uploaded_at: DateTime<Utc>,
}

impl ImageRecord {
    /// MIME type to serve, falling back to a generic image type.
    pub fn effective_mime_type(&self) -> &str {
        self.mime_type
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(DEFAULT_MIME_TYPE)
    }

    pub fn url(&self, base_url: &str) -> String {
        retrieval_url(base_url, &self.hash)
    }

    pub fn to_summary(&self, base_url: &str) -> ImageSummary {
        ImageSummary {
            hash: self.hash.clone(),
            original_name: self.original_name.clone(),
            size: self.size_bytes,
            uploaded_at: self.uploaded_at,
            url: self.url(base_url),
        }
    }
}

/// Fields supplied when registering new content in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImageRecord {
    pub hash: String,
    pub stored_filename: String,
    pub original_name: Option<String>,
    pub mime_type: Option<String>,
    pub size_bytes: i64,
    pub uploaded_at: DateTime<Utc>,
}

/// Listing projection returned by `GET /images`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImageSummary {
    pub hash: String,
    pub original_name: Option<String>,
    pub size: i64,
    pub uploaded_at: DateTime<Utc>,
    pub url: String,
}

/// Response of `GET /check/{hash}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CheckResponse {
    pub exists: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl CheckResponse {
    pub fn missing() -> Self {
        Self {
            exists: false,
            url: None,
            filename: None,
            uploaded_at: None,
        }
    }

    pub fn found(record: &ImageRecord, base_url: &str) -> Self {
        Self {
            exists: true,
            url: Some(record.url(base_url)),
            filename: Some(record.stored_filename.clone()),
            uploaded_at: Some(record.uploaded_at),
        }
    }
}

/// Response of `POST /upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    /// True when the content was already stored (dedup hit).
    pub exists: bool,
    pub hash: String,
    pub url: String,
    pub message: String,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(mime_type: Option<&str>) -> ImageRecord {
        ImageRecord {
            id: 1,
            hash: "900150983cd24fb0d6963f7d28e17f72".to_string(),
            stored_filename: "900150983cd24fb0d6963f7d28e17f72.txt".to_string(),
            original_name: Some("a.txt".to_string()),
            mime_type: mime_type.map(String::from),
            size_bytes: 3,
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn test_effective_mime_type_defaults() {
        assert_eq!(record(None).effective_mime_type(), "image/jpeg");
        assert_eq!(record(Some("")).effective_mime_type(), "image/jpeg");
        assert_eq!(record(Some("image/png")).effective_mime_type(), "image/png");
    }

    #[test]
    fn test_summary_projection() {
        let rec = record(Some("text/plain"));
        let summary = rec.to_summary("http://localhost:3000/");
        assert_eq!(summary.hash, rec.hash);
        assert_eq!(summary.size, 3);
        assert_eq!(summary.original_name.as_deref(), Some("a.txt"));
        assert_eq!(
            summary.url,
            "http://localhost:3000/image/900150983cd24fb0d6963f7d28e17f72"
        );
    }

    #[test]
    fn test_check_response_serialization() {
        let missing = serde_json::to_value(CheckResponse::missing()).unwrap();
        assert_eq!(missing, serde_json::json!({ "exists": false }));

        let rec = record(None);
        let found = serde_json::to_value(CheckResponse::found(&rec, "http://h")).unwrap();
        assert_eq!(found["exists"], true);
        assert_eq!(found["filename"], "900150983cd24fb0d6963f7d28e17f72.txt");
        assert_eq!(
            found["url"],
            "http://h/image/900150983cd24fb0d6963f7d28e17f72"
        );
        assert!(found["uploaded_at"].is_string());
    }
}

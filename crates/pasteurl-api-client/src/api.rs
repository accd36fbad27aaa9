//! Domain methods for the pasteurl API client.

use crate::ApiClient;
use anyhow::{Context, Result};
use pasteurl_core::fingerprint;
use pasteurl_core::models::{CheckResponse, HealthResponse, ImageSummary, UploadResponse};
use std::path::Path;

/// Result of [`ApiClient::share`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareOutcome {
    pub hash: String,
    pub url: String,
    /// True when the server already had the content and no upload was sent.
    pub already_stored: bool,
}

/// MIME type guessed from a file extension, for uploads from disk.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("svg") => "image/svg+xml",
        Some("txt") => "text/plain",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

impl ApiClient {
    /// Liveness probe.
    pub async fn health(&self) -> Result<HealthResponse> {
        self.get("/health").await
    }

    /// Ask whether content with `hash` is already stored.
    pub async fn check(&self, hash: &str) -> Result<CheckResponse> {
        self.get(&format!("/check/{}", hash)).await
    }

    /// Upload `data` in the `image` field.
    pub async fn upload(
        &self,
        data: Vec<u8>,
        filename: &str,
        mime_type: &str,
    ) -> Result<UploadResponse> {
        let part = reqwest::multipart::Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str(mime_type)
            .with_context(|| format!("Invalid MIME type: {}", mime_type))?;
        let form = reqwest::multipart::Form::new().part("image", part);

        self.post_multipart("/upload", form).await
    }

    /// All stored images, newest first.
    pub async fn list(&self) -> Result<Vec<ImageSummary>> {
        self.get("/images").await
    }

    /// Raw bytes stored under `hash`.
    pub async fn download(&self, hash: &str) -> Result<Vec<u8>> {
        self.get_bytes(&format!("/image/{}", hash)).await
    }

    /// Fingerprint `data` locally, and upload it only if the server does not
    /// already have it.
    pub async fn share(&self, data: Vec<u8>, filename: &str, mime_type: &str) -> Result<ShareOutcome> {
        let hash = fingerprint(&data);

        let check = self.check(&hash).await?;
        if check.exists {
            if let Some(url) = check.url {
                tracing::debug!(hash = %hash, "Content already on server, skipping upload");
                return Ok(ShareOutcome {
                    hash,
                    url,
                    already_stored: true,
                });
            }
        }

        let uploaded = self.upload(data, filename, mime_type).await?;
        Ok(ShareOutcome {
            hash: uploaded.hash,
            url: uploaded.url,
            already_stored: uploaded.exists,
        })
    }

    /// Read a local file and [`share`](Self::share) it.
    pub async fn share_file(&self, path: &Path) -> Result<ShareOutcome> {
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.jpg");
        self.share(data, filename, mime_for_path(path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(Path::new("shot.PNG")), "image/png");
        assert_eq!(mime_for_path(Path::new("a/b/photo.jpeg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("notes.txt")), "text/plain");
        assert_eq!(mime_for_path(Path::new("archive")), "application/octet-stream");
    }
}

//! Multipart upload extraction

use axum::extract::Multipart;
use pasteurl_core::AppError;

use crate::error::HttpAppError;

/// Name of the multipart field carrying the file.
pub const UPLOAD_FIELD: &str = "image";

/// File part extracted from an upload request.
#[derive(Debug)]
pub struct UploadedFile {
    pub data: Vec<u8>,
    pub filename: Option<String>,
    pub content_type: Option<String>,
}

/// Extract the file sent in the `image` field.
///
/// Reading stops as soon as the part exceeds `max_size`, so oversized uploads
/// are rejected without buffering them entirely. Other fields are ignored;
/// more than one `image` field is rejected.
pub async fn extract_multipart_file(
    mut multipart: Multipart,
    max_size: usize,
) -> Result<UploadedFile, HttpAppError> {
    let mut file: Option<UploadedFile> = None;

    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        if file.is_some() {
            return Err(AppError::BadRequest(format!(
                "Multiple file fields are not allowed; send exactly one field named '{}'",
                UPLOAD_FIELD
            ))
            .into());
        }

        let filename = field
            .file_name()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let content_type = field
            .content_type()
            .map(normalize_mime_type)
            .filter(|s| !s.is_empty());

        let mut data = Vec::new();
        while let Some(chunk) = field.chunk().await? {
            if data.len() + chunk.len() > max_size {
                return Err(AppError::PayloadTooLarge(format!(
                    "File size exceeds maximum allowed size of {} bytes",
                    max_size
                ))
                .into());
            }
            data.extend_from_slice(&chunk);
        }

        file = Some(UploadedFile {
            data,
            filename,
            content_type,
        });
    }

    file.ok_or_else(|| AppError::NoContent("No file uploaded".to_string()).into())
}

/// Strip MIME parameters (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_lowercase()
}

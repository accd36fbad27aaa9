use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use pasteurl_core::models::UploadResponse;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::extract_multipart_file;

const MESSAGE_UPLOADED: &str = "File uploaded successfully";
const MESSAGE_EXISTS: &str = "File already exists";

/// Upload image handler
///
/// Stores the file sent in the multipart field `image` under its content
/// fingerprint. Uploading content that is already stored returns the existing
/// URL with `exists: true` and writes nothing.
///
/// # Errors
/// - `AppError::NoContent` - no `image` field, or an empty one
/// - `AppError::PayloadTooLarge` - file exceeds the configured limit
/// - `AppError::Storage` / `AppError::Database` - the file or record could not be written
#[utoipa::path(
    post,
    path = "/upload",
    tag = "images",
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "Multipart form with the file in field `image`"),
    responses(
        (status = 200, description = "Image stored or already present", body = UploadResponse),
        (status = 400, description = "No file uploaded", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_image"))]
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let file = extract_multipart_file(multipart, state.images.max_file_size()).await?;

    let outcome = state
        .images
        .upload(
            &file.data,
            file.filename.as_deref(),
            file.content_type.as_deref(),
        )
        .await?;

    let message = if outcome.is_new_upload {
        MESSAGE_UPLOADED
    } else {
        MESSAGE_EXISTS
    };

    Ok(Json(UploadResponse {
        success: true,
        exists: !outcome.is_new_upload,
        hash: outcome.hash,
        url: outcome.url,
        message: message.to_string(),
    }))
}

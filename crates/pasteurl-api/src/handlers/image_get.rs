use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use pasteurl_core::models::ImageSummary;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Stored content never changes for a given hash.
const IMMUTABLE_CACHE_CONTROL: &str = "public, max-age=31536000";

/// Serve the stored bytes for a fingerprint
#[utoipa::path(
    get,
    path = "/image/{hash}",
    tag = "images",
    params(
        ("hash" = String, Path, description = "MD5 fingerprint of the content")
    ),
    responses(
        (status = 200, description = "Image bytes", content_type = "application/octet-stream"),
        (status = 404, description = "Unknown hash or missing file", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_image"))]
pub async fn get_image(
    State(state): State<Arc<AppState>>,
    Path(hash): Path<String>,
) -> Result<Response, HttpAppError> {
    let image = state.images.retrieve(&hash).await?;

    let content_type = HeaderValue::from_str(&image.mime_type)
        .unwrap_or_else(|_| HeaderValue::from_static(pasteurl_core::DEFAULT_MIME_TYPE));

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::CACHE_CONTROL,
                HeaderValue::from_static(IMMUTABLE_CACHE_CONTROL),
            ),
        ],
        image.bytes,
    )
        .into_response())
}

/// List all stored images, most recent first
#[utoipa::path(
    get,
    path = "/images",
    tag = "images",
    responses(
        (status = 200, description = "Stored images", body = Vec<ImageSummary>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_images"))]
pub async fn list_images(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ImageSummary>>, HttpAppError> {
    let images = state.images.list().await?;
    Ok(Json(images))
}

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use pasteurl_core::models::CheckResponse;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Check whether content with the given fingerprint is already stored
///
/// Lets clients skip the upload when the hash they computed locally is known.
/// Anything that is not a 32-character lowercase hex string reports
/// `exists: false`.
#[utoipa::path(
    get,
    path = "/check/{hash}",
    tag = "images",
    params(
        ("hash" = String, Path, description = "MD5 fingerprint of the content (32 lowercase hex characters)")
    ),
    responses(
        (status = 200, description = "Lookup result", body = CheckResponse),
        (status = 500, description = "Catalog failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "check_image"))]
pub async fn check_image(
    State(state): State<Arc<AppState>>,
    Path(hash): Path<String>,
) -> Result<Json<CheckResponse>, HttpAppError> {
    let response = state.images.check(&hash).await?;
    Ok(Json(response))
}

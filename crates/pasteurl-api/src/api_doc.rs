//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use crate::setup::routes::health;
use pasteurl_core::models;

/// Returns the OpenAPI document served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "pasteurl API",
        version = "0.1.0",
        description = "Content-addressed image hosting. Uploads are stored once per MD5 fingerprint and served from a stable URL."
    ),
    paths(
        handlers::check::check_image,
        handlers::image_upload::upload_image,
        handlers::image_get::get_image,
        handlers::image_get::list_images,
        health::health_check,
        health::readiness_check,
    ),
    components(
        schemas(
            models::CheckResponse,
            models::UploadResponse,
            models::ImageSummary,
            models::HealthResponse,
            health::ReadinessResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "images", description = "Upload, lookup and retrieval of stored images"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_all_routes() {
        let spec = get_openapi_spec();
        for path in [
            "/check/{hash}",
            "/upload",
            "/image/{hash}",
            "/images",
            "/health",
            "/health/ready",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing path {}", path);
        }
    }
}

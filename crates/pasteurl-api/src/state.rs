//! Application state shared by all handlers.

use pasteurl_core::Config;
use pasteurl_db::ImageCatalog;
use pasteurl_storage::Storage;
use std::sync::Arc;

use crate::services::ImageService;

/// Built once at startup and shared as `Arc<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub images: ImageService,
    /// Catalog handle, also used directly by readiness checks.
    pub catalog: Arc<dyn ImageCatalog>,
    /// Content store handle, also used directly by readiness checks.
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn Storage>, catalog: Arc<dyn ImageCatalog>) -> Self {
        let images = ImageService::from_config(&config, storage.clone(), catalog.clone());
        Self {
            config,
            images,
            catalog,
            storage,
        }
    }
}

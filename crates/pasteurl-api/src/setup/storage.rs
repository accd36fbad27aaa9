//! Storage setup and initialization

use anyhow::Result;
use pasteurl_core::Config;
use pasteurl_storage::{create_storage, Storage};
use std::sync::Arc;

/// Setup the content store rooted at `UPLOAD_DIR`.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage...");
    let storage = create_storage(config).await?;
    tracing::info!(
        root = %storage.root().display(),
        "Storage initialized successfully"
    );
    Ok(storage)
}

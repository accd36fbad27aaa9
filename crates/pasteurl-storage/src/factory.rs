use crate::{LocalStorage, Storage, StorageResult};
use pasteurl_core::Config;
use std::sync::Arc;

/// Create the content store described by the configuration.
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let storage = LocalStorage::new(config.upload_dir()).await?;
    Ok(Arc::new(storage))
}

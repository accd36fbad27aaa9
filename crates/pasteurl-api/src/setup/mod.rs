//! Application setup and initialization
//!
//! Builds the catalog, the content store and the router from a [`Config`].

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use pasteurl_core::Config;
use pasteurl_db::ImageRepository;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.is_production())
        .context("Failed to initialize telemetry")?;

    tracing::info!(
        environment = %config.environment,
        "Configuration loaded and validated successfully"
    );

    let pool = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config).await?;

    let catalog = Arc::new(ImageRepository::new(pool));
    let state = Arc::new(AppState::new(config.clone(), storage, catalog));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}

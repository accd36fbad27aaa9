//! Database setup and initialization

use anyhow::Result;
use pasteurl_core::Config;
use pasteurl_db::{connect_pool, run_migrations};
use sqlx::SqlitePool;
use std::time::Duration;

/// Setup database connection pool and run migrations
pub async fn setup_database(config: &Config) -> Result<SqlitePool> {
    tracing::info!("Connecting to database...");
    let pool = connect_pool(
        config.database_url(),
        config.db_max_connections,
        Duration::from_secs(config.db_timeout_seconds),
    )
    .await?;

    tracing::info!(
        max_connections = config.db_max_connections,
        "Database connected successfully"
    );

    run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}

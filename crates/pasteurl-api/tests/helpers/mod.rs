//! Test helpers: build AppState and router for integration tests.
//!
//! Each test app gets its own in-memory catalog and temporary upload
//! directory, so tests run in parallel without Docker.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::TestServer;
use pasteurl_api::setup::database::setup_database;
use pasteurl_api::setup::routes::setup_routes;
use pasteurl_api::setup::storage::setup_storage;
use pasteurl_api::AppState;
use pasteurl_core::Config;
use pasteurl_db::ImageRepository;
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub const TEST_BASE_URL: &str = "http://localhost:3000";

/// Test application: server, pool, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub pool: SqlitePool,
    pub state: Arc<AppState>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn upload_dir(&self) -> PathBuf {
        PathBuf::from(&self.state.config.upload_dir)
    }
}

pub fn create_test_config(upload_dir: &std::path::Path, max_file_size_bytes: usize) -> Config {
    Config {
        public_base_url: TEST_BASE_URL.to_string(),
        database_url: "sqlite::memory:".to_string(),
        upload_dir: upload_dir.to_string_lossy().into_owned(),
        max_file_size_bytes,
        ..Config::default()
    }
}

/// Setup test app with the default 10 MiB upload limit.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with_limit(10 * 1024 * 1024).await
}

/// Setup test app with isolated catalog and local storage.
pub async fn setup_test_app_with_limit(max_file_size_bytes: usize) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = create_test_config(&temp_dir.path().join("uploads"), max_file_size_bytes);

    let pool = setup_database(&config)
        .await
        .expect("Failed to set up test database");
    let storage = setup_storage(&config)
        .await
        .expect("Failed to create local storage");
    let catalog = Arc::new(ImageRepository::new(pool.clone()));

    let state = Arc::new(AppState::new(config.clone(), storage, catalog));
    let app = setup_routes(&config, state.clone()).expect("Failed to build router");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        pool,
        state,
        _temp_dir: temp_dir,
    }
}

//! Client tests against a live server on an ephemeral port.

use pasteurl_api::setup::routes::setup_routes;
use pasteurl_api::AppState;
use pasteurl_api_client::ApiClient;
use pasteurl_core::Config;
use pasteurl_db::{connect_pool, run_migrations, ImageRepository};
use pasteurl_storage::LocalStorage;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

const ABC_HASH: &str = "900150983cd24fb0d6963f7d28e17f72";

async fn spawn_server() -> (ApiClient, TempDir) {
    let temp_dir = tempfile::tempdir().unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let config = Config {
        public_base_url: base_url.clone(),
        database_url: "sqlite::memory:".to_string(),
        upload_dir: temp_dir.path().to_string_lossy().into_owned(),
        ..Config::default()
    };

    let pool = connect_pool(config.database_url(), 1, Duration::from_secs(5))
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();
    let storage = Arc::new(LocalStorage::new(temp_dir.path()).await.unwrap());
    let catalog = Arc::new(ImageRepository::new(pool));
    let state = Arc::new(AppState::new(config.clone(), storage, catalog));
    let app = setup_routes(&config, state).unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (ApiClient::new(base_url).unwrap(), temp_dir)
}

#[tokio::test]
async fn test_health() {
    let (client, _dir) = spawn_server().await;
    let health = client.health().await.unwrap();
    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn test_share_uploads_then_reuses() {
    let (client, _dir) = spawn_server().await;

    let first = client
        .share(b"abc".to_vec(), "a.txt", "text/plain")
        .await
        .unwrap();
    assert_eq!(first.hash, ABC_HASH);
    assert!(!first.already_stored);
    assert!(first.url.ends_with(&format!("/image/{}", ABC_HASH)));

    let second = client
        .share(b"abc".to_vec(), "again.txt", "text/plain")
        .await
        .unwrap();
    assert!(second.already_stored);
    assert_eq!(second.url, first.url);

    let check = client.check(ABC_HASH).await.unwrap();
    assert!(check.exists);
}

#[tokio::test]
async fn test_upload_list_download() {
    let (client, _dir) = spawn_server().await;

    let uploaded = client
        .upload(vec![1, 2, 3, 4], "bytes.png", "image/png")
        .await
        .unwrap();
    assert!(uploaded.success);
    assert!(!uploaded.exists);

    let listed = client.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].hash, uploaded.hash);
    assert_eq!(listed[0].original_name.as_deref(), Some("bytes.png"));

    let bytes = client.download(&uploaded.hash).await.unwrap();
    assert_eq!(bytes, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_download_unknown_hash_fails_with_status() {
    let (client, _dir) = spawn_server().await;

    let err = client
        .download("ffffffffffffffffffffffffffffffff")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn test_share_file_from_disk() {
    let (client, _dir) = spawn_server().await;
    let files = tempfile::tempdir().unwrap();
    let path = files.path().join("clip.png");
    std::fs::write(&path, b"not really a png").unwrap();

    let shared = client.share_file(&path).await.unwrap();
    assert!(!shared.already_stored);

    let check = client.check(&shared.hash).await.unwrap();
    assert!(check.exists);
    assert!(check.filename.unwrap().ends_with(".png"));
}

#[tokio::test]
async fn test_share_file_missing_path_is_error() {
    let (client, _dir) = spawn_server().await;
    let files = tempfile::tempdir().unwrap();
    let path = files.path().join("absent.png");

    let err = client.share_file(&path).await.unwrap_err();
    assert!(err.to_string().contains("Failed to read file"));
    assert!(client.list().await.unwrap().is_empty());
}

//! Integration tests for offline downloads and disk usage reporting.

mod common;

use bytes::Bytes;
use common::*;
use folio::adapters::mock::{InMemoryCredentials, MockResponse};
use folio::storage::StorageManager;
use folio::store::ToastKind;
use folio::traits::Response;
use tempfile::TempDir;

#[tokio::test]
async fn test_download_then_report_and_remove() {
    let http = library_http();
    http.set_response(
        "http://cdn.test/m1.pdf",
        MockResponse::Success(Response::new(200, Bytes::from(vec![7u8; 2048]))),
    );
    let mut app = test_app(&http, InMemoryCredentials::new());
    app.refresh_library(None).await.unwrap();
    let dir = TempDir::new().unwrap();
    let storage = StorageManager::under(dir.path());

    let path = app.download("m1", &storage).await.unwrap();

    assert_eq!(path, storage.document_path("m1"));
    assert_eq!(std::fs::read(&path).unwrap().len(), 2048);
    assert_eq!(app.store().toasts.latest().map(|t| t.kind), Some(ToastKind::Success));

    let report = storage.report();
    assert_eq!(report.document_count, 1);
    assert_eq!(report.documents_bytes, 2048);
    assert_eq!(report.total_bytes(), 2048);

    assert!(storage.remove_document("m1").unwrap());
    assert!(!storage.has_document("m1"));
    assert!(!storage.remove_document("m1").unwrap());
}

#[tokio::test]
async fn test_download_without_file_is_not_found_with_context() {
    let http = library_http();
    http.set_response(
        &format!("{}/magazines/a1", BASE),
        json_response(200, &serde_json::json!({"data": {"_id": "a1", "name": "Rust in Production"}})),
    );
    let mut app = test_app(&http, InMemoryCredentials::new());
    app.refresh_library(None).await.unwrap();
    let dir = TempDir::new().unwrap();
    let storage = StorageManager::under(dir.path());

    let err = app.download("a1", &storage).await.unwrap_err();

    assert!(matches!(err.inner(), folio::error::FolioError::NotFound { .. }));
    assert_eq!(err.context().map(|c| c.operation.as_str()), Some("download"));
    assert_eq!(storage.report().document_count, 0);
}

#[tokio::test]
async fn test_failed_download_leaves_no_file() {
    let http = library_http();
    http.set_response(
        "http://cdn.test/m1.pdf",
        json_response(404, &serde_json::json!({"message": "File missing"})),
    );
    let mut app = test_app(&http, InMemoryCredentials::new());
    app.refresh_library(None).await.unwrap();
    let dir = TempDir::new().unwrap();
    let storage = StorageManager::under(dir.path());

    let err = app.download("m1", &storage).await.unwrap_err();

    assert_eq!(err.user_message(), "File missing");
    assert!(!storage.has_document("m1"));
}

#[test]
fn test_clear_cache_keeps_downloads() {
    let dir = TempDir::new().unwrap();
    let storage = StorageManager::under(dir.path());
    std::fs::create_dir_all(storage.cache_dir().join("pages")).unwrap();
    std::fs::write(storage.cache_dir().join("pages/1.png"), vec![0u8; 512]).unwrap();
    std::fs::write(storage.cache_dir().join("index.json"), b"{}").unwrap();
    storage.save_document("m1", b"%PDF").unwrap();

    let freed = storage.clear_cache().unwrap();

    assert_eq!(freed, 514);
    assert!(storage.cache_dir().exists());
    let report = storage.report();
    assert_eq!(report.cache_bytes, 0);
    assert_eq!(report.document_count, 1);
}

#[test]
fn test_unsafe_ids_stay_inside_documents_dir() {
    let dir = TempDir::new().unwrap();
    let storage = StorageManager::under(dir.path());

    let path = storage.save_document("../../etc/passwd", b"x").unwrap();

    assert!(path.starts_with(storage.documents_dir()));
}

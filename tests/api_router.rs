mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use parking_lot::Mutex;
use tempfile::TempDir;
use tower::ServiceExt;

use docdesk::api::{build_router, ApiServer, ApiState, BlobEvent, BlobListener, LocalBlobStore};
use docdesk::config::AppConfig;
use docdesk::shutdown::Shutdown;

const BOUNDARY: &str = "docdesk-test-boundary";

#[derive(Default)]
struct RecordingListener {
    events: Mutex<Vec<BlobEvent>>,
}

#[async_trait]
impl BlobListener for RecordingListener {
    async fn blob_written(&self, event: &BlobEvent) {
        self.events.lock().push(event.clone());
    }
}

fn test_state(max_file_size: u64) -> (TempDir, ApiState, Arc<RecordingListener>) {
    let dir = tempfile::tempdir().unwrap();
    let listener = Arc::new(RecordingListener::default());
    let state = ApiState {
        blobs: Arc::new(LocalBlobStore::new(dir.path(), "http://localhost:5000/blobs")),
        listener: listener.clone(),
        container: "documents".to_string(),
        max_file_size,
    };
    (dir, state, listener)
}

fn multipart_body(field: &str, file_name: &str, content: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(file_type: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/api/upload/{file_type}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_heartbeat_reports_healthy() {
    let (_dir, state, _) = test_state(1024);

    for path in ["/heartbeat", "/health"] {
        let response = build_router(state.clone())
            .oneshot(Request::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "Healthy");
        assert!(body["timestamp"].is_string());
    }
}

#[tokio::test]
async fn test_upload_writes_blob_and_returns_url() {
    let (dir, state, listener) = test_state(1024);

    let response = build_router(state)
        .oneshot(upload_request(
            "pdf",
            multipart_body("file", "report.pdf", b"%PDF-1.4"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(
        body["blobUrl"],
        "http://localhost:5000/blobs/documents/pdf/report.pdf"
    );

    let written = std::fs::read(dir.path().join("documents/pdf/report.pdf")).unwrap();
    assert_eq!(written, b"%PDF-1.4");

    let events = listener.events.lock();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "pdf/report.pdf");
    assert_eq!(events[0].size, 8);
    assert_eq!(
        events[0].content_type.as_deref(),
        Some("application/octet-stream")
    );
}

#[tokio::test]
async fn test_upload_rejects_non_alphabetic_file_type() {
    let (_dir, state, listener) = test_state(1024);

    let response = build_router(state)
        .oneshot(upload_request("p1f", multipart_body("file", "a.pdf", b"x")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["type"], "bad_request");
    assert!(listener.events.lock().is_empty());
}

#[tokio::test]
async fn test_upload_rejects_empty_file() {
    let (_dir, state, _) = test_state(1024);

    let response = build_router(state)
        .oneshot(upload_request("txt", multipart_body("file", "empty.txt", b"")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["message"], "No file uploaded.");
}

#[tokio::test]
async fn test_upload_ignores_other_fields() {
    let (_dir, state, _) = test_state(1024);

    let response = build_router(state)
        .oneshot(upload_request(
            "txt",
            multipart_body("attachment", "notes.txt", b"hello"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_rejects_oversize_file() {
    let (dir, state, listener) = test_state(16);

    let response = build_router(state)
        .oneshot(upload_request(
            "txt",
            multipart_body("file", "big.txt", &[b'a'; 100]),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body = json_body(response).await;
    assert_eq!(body["error"]["type"], "payload_too_large");
    assert!(!dir.path().join("documents/txt/big.txt").exists());
    assert!(listener.events.lock().is_empty());
}

#[tokio::test]
async fn test_server_stops_on_shutdown() {
    let port = common::free_port();
    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.server.bind_addr = format!("127.0.0.1:{port}");
    config.server.blob_root = dir.path().to_string_lossy().into_owned();

    let shutdown = Shutdown::new();
    let server = ApiServer::new(&config, ApiState::from_config(&config), shutdown.clone()).unwrap();
    let handle = tokio::spawn(async move { server.run().await });

    let url = format!("http://127.0.0.1:{port}/heartbeat");
    let client = reqwest::Client::new();
    let mut status = None;
    for _ in 0..50 {
        if let Ok(response) = client.get(&url).send().await {
            status = Some(response.status());
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(status, Some(reqwest::StatusCode::OK));

    shutdown.signal();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}

#[test]
fn test_server_rejects_bad_bind_addr() {
    let mut config = AppConfig::default();
    config.server.bind_addr = "not an address".to_string();
    let result = ApiServer::new(&config, ApiState::from_config(&config), Shutdown::new());
    assert!(result.is_err());
}

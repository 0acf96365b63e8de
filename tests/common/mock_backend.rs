//! In-process REST backend for client tests.
//!
//! Every request is recorded. Responses come from a FIFO queue; when the
//! queue is empty the backend answers `200 []`.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use parking_lot::Mutex;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

const MAX_CAPTURED_BODY: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find_map(|(k, v)| k.eq_ignore_ascii_case(name).then_some(v.as_str()))
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }
}

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub body: Vec<u8>,
    pub delay: Duration,
}

impl Default for MockResponse {
    fn default() -> Self {
        Self::json("[]")
    }
}

impl MockResponse {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            content_type: Some("application/json"),
            body: body.as_bytes().to_vec(),
            delay: Duration::ZERO,
        }
    }

    /// Non-2xx with an `{"error": message}` body.
    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            ..Self::json(&serde_json::json!({ "error": message }).to_string())
        }
    }

    pub fn empty(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: Vec::new(),
            delay: Duration::ZERO,
        }
    }

    pub fn bytes(body: &[u8]) -> Self {
        Self {
            content_type: Some("application/octet-stream"),
            body: body.to_vec(),
            ..Self::empty(200)
        }
    }

    pub fn with_delay(self, ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(ms),
            ..self
        }
    }
}

impl IntoResponse for MockResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut headers = HeaderMap::new();
        if let Some(content_type) = self.content_type {
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
        (status, headers, self.body).into_response()
    }
}

#[derive(Default)]
struct Recorder {
    requests: Vec<CapturedRequest>,
    queue: VecDeque<MockResponse>,
}

type Shared = Arc<Mutex<Recorder>>;

pub struct MockBackend {
    pub addr: SocketAddr,
    recorder: Shared,
    stop: Option<oneshot::Sender<()>>,
}

impl MockBackend {
    /// Binds an ephemeral port and starts serving.
    pub async fn start() -> Self {
        let recorder: Shared = Arc::default();
        let app = Router::new()
            .fallback(record_and_reply)
            .with_state(Arc::clone(&recorder));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("mock backend has no address");

        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = stop_rx.await;
                })
                .await;
        });

        Self {
            addr,
            recorder,
            stop: Some(stop_tx),
        }
    }

    pub async fn enqueue_response(&self, response: MockResponse) {
        self.recorder.lock().queue.push_back(response);
    }

    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.recorder.lock().requests.clone()
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// `<server>/api`, the REST root the client is configured with.
    pub fn api_url(&self) -> String {
        format!("{}/api", self.base_url())
    }

    pub async fn clear(&self) {
        *self.recorder.lock() = Recorder::default();
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}

async fn record_and_reply(State(recorder): State<Shared>, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();
    let body = to_bytes(body, MAX_CAPTURED_BODY)
        .await
        .map(|bytes| bytes.to_vec())
        .unwrap_or_default();

    let reply = {
        let mut recorder = recorder.lock();
        recorder.requests.push(CapturedRequest {
            method: parts.method.to_string(),
            path: parts.uri.path().to_string(),
            query: parts.uri.query().map(str::to_string),
            headers: parts
                .headers
                .iter()
                .map(|(name, value)| {
                    (
                        name.to_string(),
                        value.to_str().unwrap_or_default().to_string(),
                    )
                })
                .collect(),
            body,
        });
        recorder.queue.pop_front().unwrap_or_default()
    };

    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }
    reply.into_response()
}

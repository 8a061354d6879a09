//! Shared fakes for integration testing.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A target whose response status can be flipped between runs.
pub struct Target {
    pub addr: SocketAddr,
    status: Arc<AtomicU16>,
    hits: Arc<AtomicUsize>,
}

impl Target {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn set_status(&self, status: u16) {
        self.status.store(status, Ordering::SeqCst);
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "200 OK",
        404 => "404 Not Found",
        500 => "500 Internal Server Error",
        502 => "502 Bad Gateway",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    }
}

/// Start a raw HTTP/1.1 target answering every request with the current status.
pub async fn start_target(initial: u16) -> Target {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let status = Arc::new(AtomicU16::new(initial));
    let hits = Arc::new(AtomicUsize::new(0));

    let (s, h) = (status.clone(), hits.clone());
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let status = s.load(Ordering::SeqCst);
                    h.fetch_add(1, Ordering::SeqCst);
                    tokio::spawn(async move {
                        // Drain the request head before answering.
                        let mut buf = Vec::new();
                        let mut chunk = [0u8; 1024];
                        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                            match socket.read(&mut chunk).await {
                                Ok(0) | Err(_) => return,
                                Ok(n) => buf.extend_from_slice(&chunk[..n]),
                            }
                        }

                        let body = status_text(status);
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text(status),
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    Target { addr, status, hits }
}

/// The loopback discard port, which refuses connections.
pub fn closed_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9))
}

/// Everything the fake Google/Slack endpoints received.
#[derive(Clone, Default)]
pub struct Recorded {
    pub slack: Arc<Mutex<Vec<Value>>>,
    pub slack_auth: Arc<Mutex<Vec<Option<String>>>>,
    pub objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    pub storage_auth: Arc<Mutex<Vec<Option<String>>>>,
    pub published: Arc<Mutex<Vec<(String, Value)>>>,
    pub metadata_hits: Arc<AtomicUsize>,
    pub slack_error: Arc<Mutex<Option<String>>>,
    pub download_status: Arc<Mutex<Option<u16>>>,
    pub upload_status: Arc<Mutex<Option<u16>>>,
    pub publish_status: Arc<Mutex<Option<u16>>>,
}

impl Recorded {
    pub fn slack_posts(&self) -> Vec<Value> {
        self.slack.lock().unwrap().clone()
    }

    pub fn object(&self, name: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(name).cloned()
    }

    pub fn published(&self) -> Vec<(String, Value)> {
        self.published.lock().unwrap().clone()
    }

    /// Make `chat.postMessage` answer `{"ok": false, "error": code}`.
    pub fn fail_slack_with(&self, code: &str) {
        *self.slack_error.lock().unwrap() = Some(code.to_string());
    }

    /// Make object downloads answer with `status`.
    pub fn fail_downloads_with(&self, status: u16) {
        *self.download_status.lock().unwrap() = Some(status);
    }

    /// Make object uploads answer with `status`.
    pub fn fail_uploads_with(&self, status: u16) {
        *self.upload_status.lock().unwrap() = Some(status);
    }

    /// Make topic publishes answer with `status`.
    pub fn fail_publishes_with(&self, status: u16) {
        *self.publish_status.lock().unwrap() = Some(status);
    }
}

fn injected(status: &Mutex<Option<u16>>) -> Option<StatusCode> {
    let code = *status.lock().unwrap();
    code.and_then(|code| StatusCode::from_u16(code).ok())
}

fn authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn post_message(
    State(rec): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    rec.slack_auth.lock().unwrap().push(authorization(&headers));
    if let Some(code) = rec.slack_error.lock().unwrap().clone() {
        return Json(json!({ "ok": false, "error": code }));
    }
    let channel = body["channel"].clone();
    rec.slack.lock().unwrap().push(body);
    Json(json!({ "ok": true, "channel": channel, "ts": "1700000000.000100" }))
}

async fn download_object(
    State(rec): State<Recorded>,
    Path((_bucket, object)): Path<(String, String)>,
    headers: HeaderMap,
) -> impl IntoResponse {
    rec.storage_auth.lock().unwrap().push(authorization(&headers));
    if let Some(status) = injected(&rec.download_status) {
        return (status, b"backend error".to_vec());
    }
    match rec.objects.lock().unwrap().get(&object) {
        Some(bytes) => (StatusCode::OK, bytes.clone()),
        None => (StatusCode::NOT_FOUND, b"No such object".to_vec()),
    }
}

async fn upload_object(
    State(rec): State<Recorded>,
    Path(_bucket): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    rec.storage_auth.lock().unwrap().push(authorization(&headers));
    if let Some(status) = injected(&rec.upload_status) {
        return (status, Json(json!({ "error": "backend error" })));
    }
    let Some(name) = params.get("name") else {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "missing name" })));
    };
    rec.objects.lock().unwrap().insert(name.clone(), body.to_vec());
    (StatusCode::OK, Json(json!({ "name": name })))
}

async fn publish(
    State(rec): State<Recorded>,
    Path((_project, topic)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    if !topic.ends_with(":publish") {
        return (StatusCode::NOT_FOUND, Json(json!({})));
    }
    if let Some(status) = injected(&rec.publish_status) {
        return (status, Json(json!({ "error": { "code": status.as_u16() } })));
    }
    let mut published = rec.published.lock().unwrap();
    published.push((topic, body));
    let id = published.len().to_string();
    (StatusCode::OK, Json(json!({ "messageIds": [id] })))
}

async fn metadata_token(State(rec): State<Recorded>, headers: HeaderMap) -> impl IntoResponse {
    if headers.get("metadata-flavor").and_then(|v| v.to_str().ok()) != Some("Google") {
        return (StatusCode::FORBIDDEN, Json(json!({})));
    }
    rec.metadata_hits.fetch_add(1, Ordering::SeqCst);
    (
        StatusCode::OK,
        Json(json!({ "access_token": "ya29.fake", "expires_in": 3599, "token_type": "Bearer" })),
    )
}

/// Start one server standing in for Slack, Cloud Storage, Pub/Sub and the
/// metadata server.
pub async fn start_fake_apis() -> (SocketAddr, Recorded) {
    let recorded = Recorded::default();
    let app = Router::new()
        .route("/api/chat.postMessage", post(post_message))
        .route("/storage/v1/b/{bucket}/o/{object}", get(download_object))
        .route("/upload/storage/v1/b/{bucket}/o", post(upload_object))
        .route("/v1/projects/{project}/topics/{topic}", post(publish))
        .route(
            "/computeMetadata/v1/instance/service-accounts/default/token",
            get(metadata_token),
        )
        .with_state(recorded.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, recorded)
}

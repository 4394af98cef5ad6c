#![allow(dead_code)] // Test helpers appear unused when compiled independently

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use flate2::read::GzDecoder;
use serde_json::Value;
use std::io::Read;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;

/// One request as seen by the mock ingest endpoint
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub token: Option<String>,
    pub content_encoding: Option<String>,
    pub content_type: Option<String>,
    pub events: Value,
}

#[derive(Clone)]
struct IngestState {
    requests: Arc<Mutex<Vec<ReceivedRequest>>>,
    status: StatusCode,
    reply: Vec<u8>,
}

pub struct MockIngest {
    shutdown_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
    requests: Arc<Mutex<Vec<ReceivedRequest>>>,
}

impl MockIngest {
    pub async fn requests(&self) -> Vec<ReceivedRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(());
        let _ = self.handle.await;
    }
}

/// Best-effort check for whether binding to loopback is permitted in the current sandbox.
pub async fn can_bind_loopback() -> bool {
    match TcpListener::bind("127.0.0.1:0").await {
        Ok(listener) => {
            drop(listener);
            true
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => false,
        Err(_) => true, // treat other errors as non-fatal for skipping
    }
}

/// Spawn a mock ingest endpoint replying with `status` and `reply`,
/// return (handle, base URL)
pub async fn spawn_mock_ingest(
    status: StatusCode,
    reply: impl Into<Vec<u8>>,
) -> (MockIngest, String) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = IngestState {
        requests: requests.clone(),
        status,
        reply: reply.into(),
    };

    let app = Router::new()
        .route("/v2/event", post(ingest))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind mock ingest listener");
    let port = listener.local_addr().unwrap().port();

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let handle = tokio::spawn(async move {
        let server = axum::serve(listener, app).with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        });
        if let Err(err) = server.await {
            eprintln!("mock ingest server error: {}", err);
        }
    });

    (
        MockIngest {
            shutdown_tx,
            handle,
            requests,
        },
        format!("http://127.0.0.1:{}", port),
    )
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

async fn ingest(
    State(state): State<IngestState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Vec<u8>), StatusCode> {
    let mut json = String::new();
    GzDecoder::new(body.as_ref())
        .read_to_string(&mut json)
        .map_err(|_| StatusCode::BAD_REQUEST)?;
    let events: Value = serde_json::from_str(&json).map_err(|_| StatusCode::BAD_REQUEST)?;

    state.requests.lock().await.push(ReceivedRequest {
        token: header(&headers, "x-sf-token"),
        content_encoding: header(&headers, "content-encoding"),
        content_type: header(&headers, "content-type"),
        events,
    });

    Ok((state.status, state.reply.clone()))
}

// src/sender/client.rs
use bytes::Bytes;
use flate2::write::GzEncoder;
use flate2::Compression;
use reqwest::Client;
use std::io::Write;
use tracing::{debug, info, warn};

use crate::event::MappedEvent;
use crate::sender::{EventSender, SendResponse};

/// Header carrying the SignalFx org access token
pub const TOKEN_HEADER: &str = "X-SF-TOKEN";

/// Errors that can occur before a response is received
#[derive(Debug)]
pub enum SendError {
    Serialize(String),
    Compress(String),
    Network(String),
    Client(String),
}

impl std::fmt::Display for SendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SendError::Serialize(msg) => write!(f, "serialization error: {}", msg),
            SendError::Compress(msg) => write!(f, "compression error: {}", msg),
            SendError::Network(msg) => write!(f, "network error: {}", msg),
            SendError::Client(msg) => write!(f, "failed to build HTTP client: {}", msg),
        }
    }
}

impl std::error::Error for SendError {}

/// Serialize events as a JSON array and gzip the result
pub fn encode_payload(payload: &[MappedEvent]) -> Result<Bytes, SendError> {
    let json = serde_json::to_vec(payload).map_err(|e| SendError::Serialize(e.to_string()))?;

    let mut encoder = GzEncoder::new(Vec::with_capacity(json.len() / 4), Compression::default());
    encoder
        .write_all(&json)
        .map_err(|e| SendError::Compress(e.to_string()))?;
    let compressed = encoder
        .finish()
        .map_err(|e| SendError::Compress(e.to_string()))?;

    debug!(
        json_size = json.len(),
        compressed_size = compressed.len(),
        "encoded event payload"
    );
    Ok(Bytes::from(compressed))
}

/// HTTP client for the SignalFx event ingest API
pub struct IngestClient {
    client: Client,
}

impl IngestClient {
    /// Uses the transport's default timeouts.
    pub fn new() -> Result<Self, SendError> {
        let client = Client::builder()
            .build()
            .map_err(|e| SendError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    /// POST the gzipped payload once and return status and body
    #[tracing::instrument(
        name = "ingest_send",
        skip(self, payload, token),
        fields(event_count = payload.len())
    )]
    async fn post_events(
        &self,
        payload: &[MappedEvent],
        target_url: &str,
        token: &str,
    ) -> Result<SendResponse, SendError> {
        let body = encode_payload(payload)?;

        let response = self
            .client
            .post(target_url)
            .header(TOKEN_HEADER, token)
            .header("Content-Encoding", "gzip")
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| SendError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        // invalid UTF-8 in the body becomes U+FFFD
        let raw = response
            .bytes()
            .await
            .map_err(|e| SendError::Network(e.to_string()))?;
        let body = String::from_utf8_lossy(&raw).into_owned();

        if status == 200 {
            info!(status, "events accepted");
        } else {
            warn!(status, response_body = %body, "ingest returned error status");
        }

        Ok(SendResponse { status, body })
    }
}

#[async_trait::async_trait]
impl EventSender for IngestClient {
    async fn send(
        &self,
        payload: &[MappedEvent],
        target_url: &str,
        token: &str,
    ) -> Result<SendResponse, SendError> {
        self.post_events(payload, target_url, token).await
    }
}

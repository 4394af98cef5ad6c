// src/sender/mod.rs
pub mod client;

pub use client::{encode_payload, IngestClient, SendError, TOKEN_HEADER};

use crate::event::MappedEvent;

/// Status and raw body returned by the ingest endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendResponse {
    pub status: u16,
    pub body: String,
}

impl SendResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Trait for delivering a payload of events (abstracts HTTP client)
#[async_trait::async_trait]
pub trait EventSender {
    /// Deliver all events in one request. A non-success status is returned
    /// as data, only transport failures are errors.
    async fn send(
        &self,
        payload: &[MappedEvent],
        target_url: &str,
        token: &str,
    ) -> Result<SendResponse, SendError>;
}

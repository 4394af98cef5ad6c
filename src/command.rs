// src/command.rs
use serde_json::Value;
use tracing::{debug, info};

use crate::config::Settings;
use crate::event::MappedEvent;
use crate::mapper::map_record;
use crate::record::Record;
use crate::sender::{EventSender, SendError, SendResponse};

pub const ENDPOINT_FIELD: &str = "endpoint";
pub const STATUS_FIELD: &str = "status";
pub const RESPONSE_ERROR_FIELD: &str = "response_error";

#[derive(Debug)]
pub enum TransformError {
    MissingIngestUrl,
    MissingAccessToken,
    Send(SendError),
}

impl std::fmt::Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformError::MissingIngestUrl => {
                write!(f, "no ingest URL: set signalfx_realm or ingest_url")
            }
            TransformError::MissingAccessToken => write!(f, "no access token available"),
            TransformError::Send(e) => write!(f, "send failed: {}", e),
        }
    }
}

impl std::error::Error for TransformError {}

impl From<SendError> for TransformError {
    fn from(e: SendError) -> Self {
        TransformError::Send(e)
    }
}

/// Map every record, post the events once, and annotate the records with
/// the outcome. Records come back in input order.
///
/// A transport failure aborts the run and no records are returned.
#[tracing::instrument(
    name = "tosfx",
    skip_all,
    fields(records = records.len(), dry_run = settings.dry_run)
)]
pub async fn transform<S: EventSender>(
    mut records: Vec<Record>,
    settings: &Settings,
    sender: &S,
) -> Result<Vec<Record>, TransformError> {
    let target_url = settings.target_url();

    let mut payload: Vec<MappedEvent> = Vec::with_capacity(records.len());
    for record in records.iter_mut() {
        payload.push(map_record(record));

        if settings.debug {
            if let Some(url) = &target_url {
                record.insert(ENDPOINT_FIELD.to_string(), Value::String(url.clone()));
            }
        }
    }
    debug!(events = payload.len(), "mapped records");

    if settings.dry_run {
        info!("dry run, not sending");
        return Ok(records);
    }

    let target_url = target_url.ok_or(TransformError::MissingIngestUrl)?;
    let token = settings
        .access_token
        .as_deref()
        .ok_or(TransformError::MissingAccessToken)?;

    let response = sender.send(&payload, &target_url, token).await?;
    annotate(&mut records, &response);

    Ok(records)
}

/// Attach the send outcome to every record
pub fn annotate(records: &mut [Record], response: &SendResponse) {
    for record in records.iter_mut() {
        record.insert(STATUS_FIELD.to_string(), Value::from(response.status));
        if !response.is_ok() {
            record.insert(
                RESPONSE_ERROR_FIELD.to_string(),
                Value::String(response.body.clone()),
            );
        }
    }
}

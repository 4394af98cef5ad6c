// src/event.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category attached to every event we emit
pub const USER_DEFINED_CATEGORY: &str = "USER_DEFINED";

/// A custom event in the shape accepted by the SignalFx `/v2/event` endpoint.
///
/// `timestamp` and `eventType` serialize as `null` when the source record
/// did not supply them; the ingest API fills in defaults for those.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedEvent {
    pub category: String,
    pub dimensions: BTreeMap<String, String>,
    pub properties: BTreeMap<String, String>,
    /// Milliseconds since the Unix epoch
    pub timestamp: Option<i64>,
    #[serde(rename = "eventType")]
    pub event_type: Option<String>,
}

impl Default for MappedEvent {
    fn default() -> Self {
        Self {
            category: USER_DEFINED_CATEGORY.to_string(),
            dimensions: BTreeMap::new(),
            properties: BTreeMap::new(),
            timestamp: None,
            event_type: None,
        }
    }
}

impl MappedEvent {
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
            && self.properties.is_empty()
            && self.timestamp.is_none()
            && self.event_type.is_none()
    }
}

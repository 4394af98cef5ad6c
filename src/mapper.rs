// src/mapper.rs
use tracing::{debug, trace, warn};

use crate::event::MappedEvent;
use crate::record::{field_text, Record};

const EVENT_TYPE_PREFIX: &str = "event_";
const PROPERTY_PREFIX: &str = "property_";
const TIME_FIELD: &str = "_time";

/// Values at or above this many characters are dropped
const MAX_VALUE_CHARS: usize = 256;

/// How a single field contributes to the mapped event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule<'a> {
    EventType,
    /// Carries the property name with the prefix stripped
    Property(&'a str),
    Timestamp,
    Dimension,
    Ignored,
}

/// Classify a field name. Rules are checked in priority order.
pub fn classify(name: &str) -> FieldRule<'_> {
    if name.starts_with(EVENT_TYPE_PREFIX) {
        FieldRule::EventType
    } else if let Some(rest) = name.strip_prefix(PROPERTY_PREFIX) {
        FieldRule::Property(rest)
    } else if name == TIME_FIELD {
        FieldRule::Timestamp
    } else if name.starts_with('_') || name == "punct" || name.starts_with("date_") {
        FieldRule::Ignored
    } else {
        FieldRule::Dimension
    }
}

/// Whether a dimension or property value may be sent
pub fn is_retainable(value: &str) -> bool {
    !value.starts_with('_') && value.chars().count() < MAX_VALUE_CHARS
}

/// SignalFx rejects dots in dimension and property keys
pub fn sanitize_key(key: &str) -> String {
    key.replace('.', "_")
}

/// Convert float epoch seconds to integer milliseconds, truncating.
///
/// Returns `None` for anything that does not parse or would not fit an i64.
pub fn epoch_to_millis(value: &str) -> Option<i64> {
    let seconds: f64 = value.trim().parse().ok()?;
    if !seconds.is_finite() {
        return None;
    }

    let millis = (seconds * 1000.0).trunc();
    if millis > i64::MAX as f64 || millis < i64::MIN as f64 {
        return None;
    }
    Some(millis as i64)
}

/// Map one search result record onto a SignalFx custom event.
///
/// Never fails: unusable values are dropped and logged.
pub fn map_record(record: &Record) -> MappedEvent {
    let mut event = MappedEvent::default();

    for (name, value) in record {
        let Some(text) = field_text(value) else {
            continue;
        };
        let rule = classify(name);
        trace!(field = %name, value = %text, ?rule, "classified field");

        match rule {
            FieldRule::EventType => event.event_type = Some(text.into_owned()),
            FieldRule::Property(key) => {
                if is_retainable(&text) {
                    event.properties.insert(sanitize_key(key), text.into_owned());
                } else {
                    debug!(field = %name, "dropping property value");
                }
            }
            FieldRule::Timestamp => match epoch_to_millis(&text) {
                Some(ms) => event.timestamp = Some(ms),
                None => warn!(value = %text, "ignoring unparseable _time"),
            },
            FieldRule::Dimension => {
                if is_retainable(&text) {
                    event.dimensions.insert(sanitize_key(name), text.into_owned());
                } else {
                    debug!(field = %name, "dropping dimension value");
                }
            }
            FieldRule::Ignored => {}
        }
    }

    event
}

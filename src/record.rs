// src/record.rs
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::io::{BufRead, Write};

/// One search result row. Field order follows the input.
pub type Record = Map<String, Value>;

#[derive(Debug)]
pub enum RecordError {
    Decode { index: usize, message: String },
    Encode(String),
    Io(std::io::Error),
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordError::Decode { index, message } => {
                write!(f, "record {} is not a JSON object: {}", index, message)
            }
            RecordError::Encode(msg) => write!(f, "failed to encode record: {}", msg),
            RecordError::Io(e) => write!(f, "i/o error: {}", e),
        }
    }
}

impl std::error::Error for RecordError {}

impl From<std::io::Error> for RecordError {
    fn from(e: std::io::Error) -> Self {
        RecordError::Io(e)
    }
}

/// Text form of a field value. `None` means the field counts as empty.
pub fn field_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        other => Some(Cow::Owned(other.to_string())),
    }
}

/// Decode a stream of JSON objects (NDJSON or whitespace separated)
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<Record>, RecordError> {
    let stream = serde_json::Deserializer::from_reader(reader).into_iter::<Record>();

    let mut records = Vec::new();
    for (index, item) in stream.enumerate() {
        let record = item.map_err(|e| {
            if e.is_io() {
                RecordError::Io(e.into())
            } else {
                RecordError::Decode {
                    index,
                    message: e.to_string(),
                }
            }
        })?;
        records.push(record);
    }

    tracing::debug!(count = records.len(), "read input records");
    Ok(records)
}

/// Write records as NDJSON, one compact object per line
pub fn write_records<W: Write>(mut writer: W, records: &[Record]) -> Result<(), RecordError> {
    for record in records {
        serde_json::to_writer(&mut writer, record)
            .map_err(|e| RecordError::Encode(e.to_string()))?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

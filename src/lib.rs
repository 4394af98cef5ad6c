// src/lib.rs
pub mod cli;
pub mod command;
pub mod config;
pub mod event;
pub mod mapper;
pub mod record;
pub mod sender;
pub mod url;

// Re-export tracing for use in other modules
pub use tracing;

pub use command::{annotate, transform, TransformError};
pub use config::{FileConfig, Options, Settings};
pub use event::MappedEvent;
pub use mapper::map_record;
pub use record::Record;
pub use sender::{EventSender, IngestClient, SendError, SendResponse};
pub use url::compose_ingest_url;

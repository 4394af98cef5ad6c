// src/cli.rs
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{Options, DEFAULT_CONFIG_PATH};
use crate::url::DEFAULT_EVENT_ENDPOINT;

#[derive(Parser, Debug)]
#[command(name = "tosfx")]
#[command(about = "Send search result events to SignalFx as custom events")]
#[command(version)]
pub struct Cli {
    /// SignalFx org access token (falls back to token_file in the config)
    #[arg(long, env = "SFX_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Add the target endpoint to every output record
    #[arg(long)]
    pub debug: bool,

    /// Map records without sending anything
    #[arg(long)]
    pub dry_run: bool,

    /// SignalFx realm, e.g. us1 (overrides --ingest-url)
    #[arg(long, env = "SFX_REALM")]
    pub signalfx_realm: Option<String>,

    /// Ingest base URL
    #[arg(long)]
    pub ingest_url: Option<String>,

    /// Event endpoint path appended to the ingest URL
    #[arg(long, default_value = DEFAULT_EVENT_ENDPOINT)]
    pub dp_endpoint: String,

    /// Path to the local config file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Read NDJSON records from a file instead of stdin
    #[arg(long)]
    pub input: Option<PathBuf>,
}

impl Cli {
    pub fn options(&self) -> Options {
        Options {
            access_token: self.access_token.clone(),
            debug: self.debug,
            dry_run: self.dry_run,
            signalfx_realm: self.signalfx_realm.clone(),
            ingest_url: self.ingest_url.clone(),
            dp_endpoint: Some(self.dp_endpoint.clone()),
        }
    }
}

/// Initialize tracing on stderr; stdout carries output records.
/// Uses RUST_LOG env var for filtering (defaults to info).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_ansi(false))
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["tosfx"]).unwrap();
        assert!(!cli.debug);
        assert!(!cli.dry_run);
        assert_eq!(cli.dp_endpoint, "/v2/event");
        assert_eq!(cli.config, PathBuf::from("../local/sfx.conf"));
        assert!(cli.input.is_none());
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "tosfx",
            "--access-token",
            "abc",
            "--debug",
            "--dry-run",
            "--signalfx-realm",
            "us1",
            "--ingest-url",
            "https://ingest.example.com",
            "--dp-endpoint",
            "/v2/custom",
        ])
        .unwrap();

        let options = cli.options();
        assert_eq!(options.access_token.as_deref(), Some("abc"));
        assert!(options.debug);
        assert!(options.dry_run);
        assert_eq!(options.signalfx_realm.as_deref(), Some("us1"));
        assert_eq!(
            options.ingest_url.as_deref(),
            Some("https://ingest.example.com")
        );
        assert_eq!(options.dp_endpoint.as_deref(), Some("/v2/custom"));
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["tosfx", "--retry"]).is_err());
    }
}

// src/config.rs
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

use crate::url::{compose_ingest_url, DEFAULT_EVENT_ENDPOINT};

/// Local config path, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "../local/sfx.conf";

/// Section of the config file holding our settings
pub const CONFIG_SECTION: &str = "setupentity";

/// Contents of the local config file
#[derive(Debug, Clone, Default)]
pub struct FileConfig {
    pub setupentity: SetupEntity,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupEntity {
    pub signalfx_realm: Option<String>,
    pub ingest_url: Option<String>,
    /// File holding the org access token
    pub token_file: Option<PathBuf>,
}

impl FileConfig {
    /// Load the config file. A missing file yields empty defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no local config file");
            return Ok(Self::default());
        }
        load_config_from_path(path)
    }
}

pub fn load_config_from_path(path: impl AsRef<Path>) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read {}", path.as_ref().display()))?;
    parse_config(&content).with_context(|| format!("Failed to parse {}", path.as_ref().display()))
}

/// Parse an INI-style `.conf` file.
///
/// Keys are matched case-insensitively and may use `=` or `:`. A key with
/// no value, or an empty value, resolves to `None`. Other sections and
/// unknown keys are ignored.
pub fn parse_config(content: &str) -> Result<FileConfig> {
    let mut entity = SetupEntity::default();
    let mut in_section = false;

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let Some(name) = header.strip_suffix(']') else {
                bail!("line {}: unterminated section header", idx + 1);
            };
            in_section = name.trim() == CONFIG_SECTION;
            continue;
        }

        if !in_section {
            continue;
        }

        let (key, value) = match line.find(|c| c == '=' || c == ':') {
            Some(pos) => (&line[..pos], Some(line[pos + 1..].trim())),
            None => (line, None),
        };
        let value = value.filter(|v| !v.is_empty()).map(str::to_string);

        match key.trim().to_lowercase().as_str() {
            "signalfx_realm" => entity.signalfx_realm = value,
            "ingest_url" => entity.ingest_url = value,
            "token_file" => entity.token_file = value.map(PathBuf::from),
            other => tracing::trace!(key = other, "ignoring config key"),
        }
    }

    Ok(FileConfig { setupentity: entity })
}

/// Options supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub access_token: Option<String>,
    pub debug: bool,
    pub dry_run: bool,
    pub signalfx_realm: Option<String>,
    pub ingest_url: Option<String>,
    pub dp_endpoint: Option<String>,
}

/// Resolved, read-only settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub signalfx_realm: Option<String>,
    pub ingest_url: Option<String>,
    pub dp_endpoint: String,
    pub access_token: Option<String>,
    pub debug: bool,
    pub dry_run: bool,
}

impl Settings {
    /// Merge options over the config file. The token file is only read
    /// when no token was supplied.
    pub fn resolve(options: Options, file: &FileConfig) -> Result<Self> {
        let entity = &file.setupentity;

        let signalfx_realm = non_empty(options.signalfx_realm)
            .or_else(|| non_empty(entity.signalfx_realm.clone()));
        let ingest_url =
            non_empty(options.ingest_url).or_else(|| non_empty(entity.ingest_url.clone()));

        let access_token = match non_empty(options.access_token) {
            Some(token) => Some(token),
            None => match &entity.token_file {
                Some(path) => fetch_access_token(path)?,
                None => None,
            },
        };

        Ok(Self {
            signalfx_realm,
            ingest_url,
            dp_endpoint: options
                .dp_endpoint
                .unwrap_or_else(|| DEFAULT_EVENT_ENDPOINT.to_string()),
            access_token,
            debug: options.debug,
            dry_run: options.dry_run,
        })
    }

    pub fn target_url(&self) -> Option<String> {
        compose_ingest_url(
            self.signalfx_realm.as_deref(),
            self.ingest_url.as_deref(),
            &self.dp_endpoint,
        )
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Read an access token from a file, trimming surrounding whitespace
pub fn fetch_access_token(path: &Path) -> Result<Option<String>> {
    tracing::info!(path = %path.display(), "reading access token");
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read token file {}", path.display()))?;
    Ok(non_empty(Some(content.trim().to_string())))
}

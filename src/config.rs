use crate::extraction::FormatTag;
use std::collections::BTreeSet;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Snippet budget used when no override is configured.
pub const DEFAULT_SNIPPET_CHARS: usize = 500;
/// Upload body limit enforced by the HTTP surface when no override is configured.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;
/// Upload root used when `UNREDACTOR_UPLOAD_DIR` is not set.
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the Unredactor server and CLI.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory where the HTTP surface persists uploaded documents.
    pub upload_dir: PathBuf,
    /// Largest accepted request body in bytes.
    pub max_upload_bytes: usize,
    /// Optional override for the HTTP server port.
    pub server_port: Option<u16>,
    /// Settings consumed by the extraction core.
    pub extraction: ExtractionConfig,
}

/// Settings passed explicitly into the extraction core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Maximum number of characters kept per snippet.
    pub snippet_chars: usize,
    /// Size of the bounded worker pool used for a batch.
    pub max_workers: usize,
    /// Formats that are routed to an extractor; everything else is reported as unsupported.
    pub allowed_formats: BTreeSet<FormatTag>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            snippet_chars: DEFAULT_SNIPPET_CHARS,
            max_workers: default_workers(),
            allowed_formats: FormatTag::SUPPORTED.into_iter().collect(),
        }
    }
}

impl ExtractionConfig {
    /// Read only the extraction settings from the environment.
    ///
    /// Server variables such as `SERVER_PORT` are neither read nor validated, so command-line
    /// runs work regardless of how the HTTP surface is configured.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            snippet_chars: parse_positive("UNREDACTOR_SNIPPET_CHARS")?
                .unwrap_or(defaults.snippet_chars),
            max_workers: parse_positive("UNREDACTOR_MAX_WORKERS")?.unwrap_or(defaults.max_workers),
            allowed_formats: load_env_optional("UNREDACTOR_ALLOWED_FORMATS")
                .map(|value| parse_formats(&value))
                .transpose()?
                .unwrap_or(defaults.allowed_formats),
        })
    }

    /// Load `.env` (when present) and then read the extraction settings.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Whether documents tagged with `format` should be handed to an extractor.
    pub fn allows(&self, format: FormatTag) -> bool {
        self.allowed_formats.contains(&format)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            server_port: None,
            extraction: ExtractionConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            upload_dir: load_env_optional("UNREDACTOR_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR)),
            max_upload_bytes: parse_positive("UNREDACTOR_MAX_UPLOAD_BYTES")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            server_port: load_env_optional("SERVER_PORT")
                .map(|value| {
                    value
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".into()))
                })
                .transpose()?,
            extraction: ExtractionConfig::from_env()?,
        })
    }

    /// Load `.env` (when present) and then read the environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let config = Self::from_env()?;
        tracing::debug!(
            upload_dir = %config.upload_dir.display(),
            snippet_chars = config.extraction.snippet_chars,
            max_workers = config.extraction.max_workers,
            allowed_formats = ?config.extraction.allowed_formats,
            server_port = ?config.server_port,
            "Loaded configuration"
        );
        Ok(config)
    }
}

/// Parse a comma-separated list of format names (`pdf,docx,txt,csv,xlsx`).
pub fn parse_formats(value: &str) -> Result<BTreeSet<FormatTag>, ConfigError> {
    let mut formats = BTreeSet::new();
    for name in value.split(',').map(str::trim).filter(|name| !name.is_empty()) {
        match FormatTag::from_extension(name) {
            FormatTag::Unsupported => {
                return Err(ConfigError::InvalidValue(
                    "UNREDACTOR_ALLOWED_FORMATS".to_string(),
                ));
            }
            tag => {
                formats.insert(tag);
            }
        }
    }
    Ok(formats)
}

fn parse_positive(key: &str) -> Result<Option<usize>, ConfigError> {
    load_env_optional(key)
        .map(|value| match value.parse::<usize>() {
            Ok(parsed) if parsed > 0 => Ok(parsed),
            _ => Err(ConfigError::InvalidValue(key.to_string())),
        })
        .transpose()
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|count| count.get())
        .unwrap_or(4)
}

//! Error types for the dashboard. None of these are fatal to the page; each
//! caller degrades to an inert panel or default value.

use thiserror::Error;

/// The embedded metrics payload could not be decoded.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("metadata payload is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("metadata source unavailable: {0}")]
    Unavailable(String),
}

/// Configuration sources that exist but cannot be used.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("failed to parse embedded config: {0}")]
    ParseJson(#[source] serde_json::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Failures while constructing or driving a chart instance.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    #[error("chart library is not loaded")]
    LibraryUnavailable,

    #[error("chart target `{0}` not found")]
    MissingTarget(String),

    #[error("chart construction failed: {0}")]
    Construct(String),
}

/// Failures while preparing or delivering an export.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to serialise export: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("no chart is rendered")]
    NoChart,

    #[error("snapshot failed: {0}")]
    Snapshot(String),

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("delivery failed: {0}")]
    Delivery(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

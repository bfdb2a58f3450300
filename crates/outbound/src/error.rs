use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutboundError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] crate::pipeline::PipelineError),

    #[error("Logging setup failed: {0}")]
    Telemetry(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Failed to parse config YAML: {0}")]
    ParseYaml(#[from] serde_yaml::Error),

    #[error("Unsupported config file extension: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

/// Table-level feed failures. Any of these means the source is unavailable
/// and no dashboard data can be produced for this pull.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to '{url}' failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Feed '{url}' answered with HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to read feed file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode feed as CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Feed has no header row")]
    MissingHeader,

    #[error("Feed contains no data rows")]
    Empty,

    /// Another caller's fetch of the same feed failed while this one waited.
    #[error("Shared feed fetch failed: {0}")]
    SharedFetch(String),
}

pub type Result<T> = std::result::Result<T, OutboundError>;

use serde::{Deserialize, Serialize};

/// Dashboard configuration: where the feed lives and how it is refreshed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub version: String,
    pub feed_url: String,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Length of the product and customer rankings.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Divisor turning summed `Total Weight` into the displayed unit (kg → t).
    #[serde(default = "default_weight_unit_divisor")]
    pub weight_unit_divisor: f64,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_refresh_interval_secs() -> u64 {
    240
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_top_n() -> usize {
    10
}

fn default_weight_unit_divisor() -> f64 {
    1000.0
}

impl DashboardConfig {
    /// Config with every optional field at its default.
    pub fn with_feed_url(feed_url: impl Into<String>) -> Self {
        Self {
            version: "1.0".to_string(),
            feed_url: feed_url.into(),
            cache_ttl_secs: default_cache_ttl_secs(),
            refresh_interval_secs: default_refresh_interval_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            top_n: default_top_n(),
            weight_unit_divisor: default_weight_unit_divisor(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

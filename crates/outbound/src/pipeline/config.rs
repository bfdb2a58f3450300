use std::time::Duration;

use crate::config::DashboardConfig;

/// The subset of [`DashboardConfig`] one pipeline run needs.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub feed_url: String,
    pub cache_ttl: Duration,
    pub request_timeout: Duration,
    pub refresh_interval: Duration,
    pub top_n: usize,
    pub weight_unit_divisor: f64,
}

impl PipelineConfig {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            feed_url: config.feed_url.clone(),
            cache_ttl: Duration::from_secs(config.cache_ttl_secs),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            refresh_interval: Duration::from_secs(config.refresh_interval_secs),
            top_n: config.top_n,
            weight_unit_divisor: config.weight_unit_divisor,
        }
    }
}

use std::path::{Path, PathBuf};

use crate::config::schema::DashboardConfig;
use crate::error::ConfigError;

/// Environment variable that replaces `feed_url` after the file is parsed.
pub const FEED_URL_ENV: &str = "OUTBOUND_FEED_URL";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(ConfigFormat::Json),
            Some("yaml") | Some("yml") => Some(ConfigFormat::Yaml),
            _ => None,
        }
    }
}

/// `<platform config dir>/outbound/config.json`, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("outbound").join("config.json"))
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DashboardConfig, ConfigError> {
    let path = path.as_ref();
    let format =
        ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat(path.into()))?;
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content, format)
}

pub fn load_config_from_str(
    content: &str,
    format: ConfigFormat,
) -> Result<DashboardConfig, ConfigError> {
    let mut config: DashboardConfig = match format {
        ConfigFormat::Json => serde_json::from_str(content)?,
        ConfigFormat::Yaml => serde_yaml::from_str(content)?,
    };

    if let Ok(url) = std::env::var(FEED_URL_ENV) {
        if !url.trim().is_empty() {
            log::debug!("feed_url overridden by {}", FEED_URL_ENV);
            config.feed_url = url.trim().to_string();
        }
    }

    validate_config(&config)?;

    Ok(config)
}

pub fn validate_config(config: &DashboardConfig) -> Result<(), ConfigError> {
    if config.version != "1.0" {
        return Err(invalid(format!(
            "Unsupported config version: {}",
            config.version
        )));
    }

    let url = config.feed_url.trim();
    if url.is_empty() {
        return Err(invalid("feed_url must not be empty".to_string()));
    }
    if let Some(scheme_end) = url.find("://") {
        let scheme = &url[..scheme_end];
        if !matches!(scheme, "http" | "https" | "file") {
            return Err(invalid(format!("Unsupported feed_url scheme: {}", scheme)));
        }
    }

    if config.cache_ttl_secs == 0 {
        return Err(invalid("cache_ttl_secs must be greater than 0".to_string()));
    }
    if config.refresh_interval_secs == 0 {
        return Err(invalid(
            "refresh_interval_secs must be greater than 0".to_string(),
        ));
    }
    if config.request_timeout_secs == 0 {
        return Err(invalid(
            "request_timeout_secs must be greater than 0".to_string(),
        ));
    }
    if config.top_n == 0 {
        return Err(invalid("top_n must be greater than 0".to_string()));
    }
    if !(config.weight_unit_divisor.is_finite() && config.weight_unit_divisor > 0.0) {
        return Err(invalid(
            "weight_unit_divisor must be a positive number".to_string(),
        ));
    }

    Ok(())
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Validation { message }
}

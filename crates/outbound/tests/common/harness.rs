//! Test harness running the pipeline against a feed file in a temp directory.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use outbound::{DashboardConfig, Pipeline, PipelineConfig};

pub struct FeedHarness {
    /// Keeps the feed file alive for the harness lifetime.
    _temp_dir: TempDir,
    pub feed_path: PathBuf,
    pub config: DashboardConfig,
}

impl FeedHarness {
    /// Writes `csv` to a temp file and points a default config at it.
    pub fn new(csv: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let feed_path = temp_dir.path().join("outbound.csv");
        std::fs::write(&feed_path, csv).expect("Failed to write feed");

        let config = DashboardConfig::with_feed_url(format!("file://{}", feed_path.display()));
        Self {
            _temp_dir: temp_dir,
            feed_path,
            config,
        }
    }

    /// Replaces the feed content in place.
    pub fn rewrite(&self, csv: &str) {
        std::fs::write(&self.feed_path, csv).expect("Failed to rewrite feed");
    }

    pub fn pipeline(&self) -> Pipeline {
        let config = Arc::new(PipelineConfig::from_config(&self.config));
        Pipeline::from_config(config).expect("Failed to build pipeline")
    }
}

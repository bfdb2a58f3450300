//! Outbound dashboard core: turns a published warehouse shipment feed into a
//! clean line-item table, classifies every row, and aggregates the buckets,
//! KPIs and reports an outbound dashboard displays.

pub mod classifier;
pub mod config;
pub mod error;
pub mod feed;
pub mod filter;
pub mod normalizer;
pub mod pipeline;
pub mod report;
pub mod sanitize;
pub mod telemetry;

pub use classifier::{Bucket, BucketStats, ClassifiedItem, JobStatus, Kpis};
pub use config::{load_config, DashboardConfig};
pub use error::{ConfigError, FeedError, OutboundError, Result};
pub use feed::{FeedCache, FeedSource, RawTable, RefreshEvent, RefreshScheduler};
pub use filter::{DateRange, FilterOptions, TableFilter};
pub use normalizer::{normalize, LineItem, NormalizedTable, Status};
pub use pipeline::{DashboardSnapshot, Dataset, Pipeline, PipelineConfig, PipelineError};
pub use report::DetailView;
pub use telemetry::init_logging;

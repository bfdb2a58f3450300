use std::sync::Arc;

use tracing::{debug, info_span, warn};

use crate::classifier::classify_rows;
use crate::feed::{FeedCache, FeedSource, LocationFeedSource, RefreshScheduler};
use crate::filter::TableFilter;
use crate::normalizer::normalize;
use crate::sanitize;

use super::config::PipelineConfig;
use super::context::PipelineContext;
use super::error::PipelineError;
use super::snapshot::{DashboardSnapshot, Dataset};

pub struct Pipeline {
    config: Arc<PipelineConfig>,
    cache: Arc<FeedCache>,
}

impl Pipeline {
    /// Production constructor: HTTP or file feed behind a TTL cache.
    pub fn from_config(config: Arc<PipelineConfig>) -> Result<Self, PipelineError> {
        let source = LocationFeedSource::new(config.request_timeout)?;
        let cache = Arc::new(FeedCache::new(Box::new(source), config.cache_ttl));
        Ok(Self { config, cache })
    }

    /// Constructor with an injected feed source.
    pub fn with_source(config: Arc<PipelineConfig>, source: Box<dyn FeedSource>) -> Self {
        let cache = Arc::new(FeedCache::new(source, config.cache_ttl));
        Self { config, cache }
    }

    /// Constructor sharing an existing cache, e.g. one a scheduler refreshes.
    pub fn new(config: Arc<PipelineConfig>, cache: Arc<FeedCache>) -> Self {
        Self { config, cache }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<FeedCache> {
        &self.cache
    }

    /// Fetches (through the cache), normalizes and classifies the feed.
    pub fn load(&self) -> Result<Dataset, PipelineError> {
        let mut ctx = PipelineContext::new(self.config.feed_url.as_str());
        let _pipeline_span = info_span!("pipeline",
            feed = %sanitize::redact_url(&ctx.location),
        )
        .entered();

        // Step 1: Fetch
        {
            let _step = info_span!("fetch").entered();
            if let Err(e) = self.step_fetch(&mut ctx) {
                warn!("Feed unavailable: {}", e);
                return Err(e);
            }
        }

        // Step 2: Normalize
        {
            let _step = info_span!("normalize").entered();
            self.step_normalize(&mut ctx)?;
        }

        // Step 3: Row-level status
        {
            let _step = info_span!("classify").entered();
            self.step_classify(&mut ctx)?;
        }

        let normalized = ctx.normalized.take().ok_or(PipelineError::StepSkipped("normalize"))?;
        Ok(Dataset::new(
            ctx.classified,
            normalized.columns().clone(),
            normalized.volume_column(),
            ctx.fetched_at,
        ))
    }

    /// Loads the feed and builds the snapshot for `filter`.
    pub fn run(&self, filter: &TableFilter) -> Result<DashboardSnapshot, PipelineError> {
        let dataset = self.load()?;
        let _step = info_span!("aggregate").entered();
        let snapshot = dataset.snapshot(filter, self.config.top_n, self.config.weight_unit_divisor);
        debug!(
            rows = snapshot.rows.len(),
            total_jobs = snapshot.kpis.total_jobs,
            "snapshot built"
        );
        Ok(snapshot)
    }

    /// Drops cached tables and loads afresh.
    pub fn refresh(&self) -> Result<Dataset, PipelineError> {
        self.cache.invalidate();
        self.load()
    }

    /// A scheduler that keeps this pipeline's cache warm.
    pub fn scheduler(&self) -> RefreshScheduler {
        RefreshScheduler::new(
            Arc::clone(&self.cache),
            self.config.feed_url.clone(),
            self.config.refresh_interval,
        )
    }

    fn step_fetch(&self, ctx: &mut PipelineContext) -> Result<(), PipelineError> {
        let raw = self.cache.fetch(&ctx.location)?;
        ctx.fetched_at = self.cache.fetched_at(&ctx.location);
        debug!(rows = raw.len(), columns = raw.headers().len(), "feed fetched");
        ctx.raw = Some(raw);
        Ok(())
    }

    fn step_normalize(&self, ctx: &mut PipelineContext) -> Result<(), PipelineError> {
        let raw = ctx.raw.as_ref().ok_or(PipelineError::StepSkipped("fetch"))?;
        ctx.normalized = Some(normalize(raw));
        Ok(())
    }

    fn step_classify(&self, ctx: &mut PipelineContext) -> Result<(), PipelineError> {
        let normalized = ctx
            .normalized
            .as_ref()
            .ok_or(PipelineError::StepSkipped("normalize"))?;
        ctx.classified = classify_rows(normalized.items().to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::classifier::{Bucket, JobStatus};
    use crate::error::FeedError;
    use crate::feed::RawTable;
    use crate::normalizer::VolumeColumn;

    struct StaticSource {
        csv: &'static str,
        calls: Arc<AtomicUsize>,
    }

    impl FeedSource for StaticSource {
        fn fetch(&self, _location: &str) -> Result<RawTable, FeedError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            crate::feed::decode_csv(self.csv.as_bytes())
        }
    }

    struct FailingSource;

    impl FeedSource for FailingSource {
        fn fetch(&self, _location: &str) -> Result<RawTable, FeedError> {
            Err(FeedError::HttpStatus {
                url: "docs.example.com/****".to_string(),
                status: 503,
            })
        }
    }

    const FEED: &str = "\
JOB Num,Order No,TP Full Name,Create Date,Tgl_loading,Qty_Loading,\
Total M3,Total Weight,Status_Packing,Status_Loading
J1,O1,ACME,01/05/2024,01/06/2024,10,1.5,1200,PACKING DONE,LOADING DONE
J1,O2,ACME,01/05/2024,,0,2.5,800,PACKING DONE,PENDING
J2,O3,Globex,01/07/2024,,0,1,500,COMPLETE,OVERLOAD 2%
J3,O4,Initech,01/08/2024,,0,1,500,PACKING DONE,nan
J4,O5,Initech,nan,,0,0,0,nan,
";

    fn config() -> Arc<PipelineConfig> {
        Arc::new(PipelineConfig {
            feed_url: "https://docs.example.com/sheet?output=csv".to_string(),
            cache_ttl: Duration::from_secs(300),
            request_timeout: Duration::from_secs(5),
            refresh_interval: Duration::from_secs(240),
            top_n: 10,
            weight_unit_divisor: 1000.0,
        })
    }

    fn pipeline(csv: &'static str) -> (Pipeline, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = StaticSource {
            csv,
            calls: Arc::clone(&calls),
        };
        (Pipeline::with_source(config(), Box::new(source)), calls)
    }

    #[test]
    fn test_run_builds_buckets_and_kpis() {
        let (pipeline, _) = pipeline(FEED);
        let snapshot = pipeline.run(&TableFilter::new()).unwrap();

        assert_eq!(snapshot.rows.len(), 5);
        let sizes: Vec<usize> = snapshot.buckets.iter().map(|b| b.rows).collect();
        // Loaded, Overload, PendingInProgress, ReadyNotStarted, NotPacked
        assert_eq!(sizes, vec![1, 1, 1, 1, 1]);
        assert_eq!(snapshot.bucket_stats(Bucket::Loaded).orders, 1);

        assert_eq!(snapshot.kpis.total_jobs, 4);
        assert_eq!(snapshot.kpis.total_orders, 5);
        assert_eq!(snapshot.kpis.completion_rate, 0.0);
        assert_eq!(snapshot.kpis.total_weight, 3000.0);
        assert_eq!(snapshot.tonnage, 3.0);
        assert_eq!(snapshot.volume_column, VolumeColumn::TotalM3);
        assert_eq!(snapshot.kpis.total_volume, 6.0);
        assert_eq!(snapshot.daily_flow.len(), 1);
    }

    #[test]
    fn test_filter_applies_before_partition() {
        let (pipeline, _) = pipeline(FEED);
        let filter = TableFilter::new().with_job_status(JobStatus::Overload);
        let snapshot = pipeline.run(&filter).unwrap();

        assert_eq!(snapshot.rows.len(), 1);
        assert_eq!(snapshot.bucket(Bucket::Overload).1, 1);
        assert_eq!(snapshot.bucket(Bucket::Loaded), (Vec::new(), 0, 0));
    }

    #[test]
    fn test_empty_filter_result_is_not_an_error() {
        let (pipeline, _) = pipeline(FEED);
        let snapshot = pipeline
            .run(&TableFilter::new().with_customer("Nobody"))
            .unwrap();
        assert!(snapshot.is_empty());
        assert!(snapshot.buckets.iter().all(|b| b.rows == 0 && b.jobs == 0));
        assert_eq!(snapshot.kpis.completion_rate, 0.0);
    }

    #[test]
    fn test_cache_serves_repeat_loads_until_refresh() {
        let (pipeline, calls) = pipeline(FEED);
        pipeline.load().unwrap();
        pipeline.load().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        pipeline.refresh().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failed_fetch_is_source_unavailable() {
        let pipeline = Pipeline::with_source(config(), Box::new(FailingSource));
        let err = pipeline.run(&TableFilter::new()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::SourceUnavailable(FeedError::HttpStatus { status: 503, .. })
        ));
    }

    #[test]
    fn test_header_only_feed_is_source_unavailable() {
        let (pipeline, _) = pipeline("JOB Num,Status_Loading\n");
        let err = pipeline.load().unwrap_err();
        assert!(matches!(
            err,
            PipelineError::SourceUnavailable(FeedError::Empty)
        ));
    }

    #[test]
    fn test_load_is_idempotent() {
        let (pipeline, _) = pipeline(FEED);
        let first = pipeline.load().unwrap();
        let second = pipeline.refresh().unwrap();
        assert_eq!(first.rows(), second.rows());
        assert_eq!(first.columns(), second.columns());
    }
}

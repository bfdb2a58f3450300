use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::classifier::{partition, Bucket, BucketPartition, BucketStats, ClassifiedItem, Kpis};
use crate::filter::{FilterOptions, TableFilter};
use crate::normalizer::VolumeColumn;
use crate::report::{
    daily_flow, status_breakdown, DailyFlow, DetailView, LoadingSummary, PackingSummary,
    StatusCount,
};

/// The full classified table of one feed pull, before any filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    rows: Vec<ClassifiedItem>,
    columns: BTreeSet<String>,
    volume_column: VolumeColumn,
    fetched_at: Option<DateTime<Utc>>,
}

impl Dataset {
    pub fn new(
        rows: Vec<ClassifiedItem>,
        columns: BTreeSet<String>,
        volume_column: VolumeColumn,
        fetched_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            rows,
            columns,
            volume_column,
            fetched_at,
        }
    }

    pub fn rows(&self) -> &[ClassifiedItem] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &BTreeSet<String> {
        &self.columns
    }

    pub fn volume_column(&self) -> VolumeColumn {
        self.volume_column
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::from_rows(&self.rows)
    }

    /// Filters, partitions and aggregates. Every figure in the result is
    /// computed over the filtered rows only.
    pub fn snapshot(
        &self,
        filter: &TableFilter,
        top_n: usize,
        weight_unit_divisor: f64,
    ) -> DashboardSnapshot {
        let rows = filter.apply(&self.rows);
        DashboardSnapshot::build(
            rows,
            self.columns.clone(),
            self.volume_column,
            self.fetched_at,
            top_n,
            weight_unit_divisor,
        )
    }
}

/// Per-bucket figures as shown on the bucket cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BucketSummary {
    pub bucket: Bucket,
    pub label: &'static str,
    pub rows: usize,
    pub jobs: usize,
    pub orders: usize,
}

/// Everything the dashboard shows for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub fetched_at: Option<DateTime<Utc>>,
    pub kpis: Kpis,
    /// `kpis.total_weight` in display units.
    pub tonnage: f64,
    pub volume_column: VolumeColumn,
    /// In [`Bucket::ALL`] order.
    pub buckets: Vec<BucketSummary>,
    pub daily_flow: Vec<DailyFlow>,
    pub status_breakdown: Vec<StatusCount>,
    pub packing: PackingSummary,
    pub loading: LoadingSummary,
    /// Filtered rows with their row-level status.
    pub rows: Vec<ClassifiedItem>,
    #[serde(skip)]
    columns: BTreeSet<String>,
    #[serde(skip)]
    partition: BucketPartition,
}

impl DashboardSnapshot {
    pub fn build(
        rows: Vec<ClassifiedItem>,
        columns: BTreeSet<String>,
        volume_column: VolumeColumn,
        fetched_at: Option<DateTime<Utc>>,
        top_n: usize,
        weight_unit_divisor: f64,
    ) -> Self {
        let partition = partition(&rows);
        let buckets = Bucket::ALL
            .into_iter()
            .map(|bucket| {
                let stats = partition.stats(bucket, &rows);
                BucketSummary {
                    bucket,
                    label: bucket.label(),
                    rows: partition.len(bucket),
                    jobs: stats.jobs,
                    orders: stats.orders,
                }
            })
            .collect();
        let kpis = Kpis::compute(&rows, volume_column);

        Self {
            fetched_at,
            kpis,
            tonnage: kpis.tonnage(weight_unit_divisor),
            volume_column,
            buckets,
            daily_flow: daily_flow(&rows),
            status_breakdown: status_breakdown(&rows),
            packing: PackingSummary::compute(&rows, top_n),
            loading: LoadingSummary::compute(&rows, top_n),
            rows,
            columns,
            partition,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows of one bucket, in table order.
    pub fn bucket_rows(&self, bucket: Bucket) -> Vec<&ClassifiedItem> {
        self.partition.rows(bucket, &self.rows).collect()
    }

    pub fn bucket_stats(&self, bucket: Bucket) -> BucketStats {
        self.partition.stats(bucket, &self.rows)
    }

    /// `(rows, distinct jobs, distinct orders)` for one bucket.
    pub fn bucket(&self, bucket: Bucket) -> (Vec<&ClassifiedItem>, usize, usize) {
        let stats = self.bucket_stats(bucket);
        (self.bucket_rows(bucket), stats.jobs, stats.orders)
    }

    /// Rows and visible columns of a drill-down table.
    pub fn detail(&self, view: DetailView) -> (Vec<&ClassifiedItem>, Vec<&'static str>) {
        let rows = match view {
            DetailView::All => self.rows.iter().collect(),
            DetailView::Bucket(bucket) => self.bucket_rows(bucket),
        };
        (rows, view.columns(&self.columns))
    }
}

//! Derived views beyond the bucket partition: daily flow, status breakdown,
//! packing and loading operations, and drill-down column sets.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::classifier::{Bucket, ClassifiedItem, JobStatus};
use crate::normalizer::columns;
use crate::normalizer::LineItem;

/// Packed and loaded quantity for one loading day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyFlow {
    pub day: NaiveDate,
    pub packed_qty: f64,
    pub loaded_qty: f64,
}

/// Sums quantities per `load_date` calendar day, ascending. Rows without a
/// load date are left out rather than lumped onto some earliest day.
pub fn daily_flow<T: AsRef<LineItem>>(rows: &[T]) -> Vec<DailyFlow> {
    let mut days: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
    for item in rows.iter().map(|row| row.as_ref()) {
        let Some(loaded_at) = item.load_date else {
            continue;
        };
        let entry = days.entry(loaded_at.date()).or_default();
        entry.0 += item.packed_qty;
        entry.1 += item.loaded_qty;
    }
    days.into_iter()
        .map(|(day, (packed_qty, loaded_qty))| DailyFlow {
            day,
            packed_qty,
            loaded_qty,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: JobStatus,
    pub rows: usize,
}

/// Row count per job status, for the statuses that occur.
pub fn status_breakdown(rows: &[ClassifiedItem]) -> Vec<StatusCount> {
    JobStatus::ALL
        .into_iter()
        .map(|status| StatusCount {
            status,
            rows: rows.iter().filter(|row| row.job_status == status).count(),
        })
        .filter(|count| count.rows > 0)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTotal {
    pub name: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCount {
    pub name: String,
    pub rows: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PackingSummary {
    pub total_packed: f64,
    /// Sum of `volume`.
    pub total_volume: f64,
    /// Products (by description) with the largest summed `volume`.
    pub top_products: Vec<RankedTotal>,
}

impl PackingSummary {
    pub fn compute<T: AsRef<LineItem>>(rows: &[T], top_n: usize) -> Self {
        let mut summary = PackingSummary::default();
        let mut by_product: BTreeMap<&str, f64> = BTreeMap::new();
        for item in rows.iter().map(|row| row.as_ref()) {
            summary.total_packed += item.packed_qty;
            summary.total_volume += item.volume;
            if !item.product_desc.is_empty() {
                *by_product.entry(item.product_desc.as_str()).or_default() += item.volume;
            }
        }

        let mut ranked: Vec<RankedTotal> = by_product
            .into_iter()
            .map(|(name, total)| RankedTotal {
                name: name.to_string(),
                total,
            })
            .collect();
        // BTreeMap order makes the sort stable on name for equal totals.
        ranked.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));
        ranked.truncate(top_n);
        summary.top_products = ranked;
        summary
    }
}

/// One loaded row as listed in the loading manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestEntry {
    pub job_id: Option<String>,
    pub customer_name: String,
    pub load_date: Option<NaiveDateTime>,
    pub loaded_qty: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadingSummary {
    pub total_loaded: f64,
    /// Rows whose loading status is done. Counts rows, not jobs.
    pub loaded_rows: usize,
    /// Customers with the most loaded rows.
    pub top_customers: Vec<RankedCount>,
    pub manifest: Vec<ManifestEntry>,
}

impl LoadingSummary {
    pub fn compute<T: AsRef<LineItem>>(rows: &[T], top_n: usize) -> Self {
        let mut summary = LoadingSummary::default();
        let mut by_customer: BTreeMap<&str, usize> = BTreeMap::new();
        for item in rows.iter().map(|row| row.as_ref()) {
            summary.total_loaded += item.loaded_qty;
            if !item.is_loading_done() {
                continue;
            }
            summary.loaded_rows += 1;
            if !item.customer_name.is_empty() {
                *by_customer.entry(item.customer_name.as_str()).or_default() += 1;
            }
            summary.manifest.push(ManifestEntry {
                job_id: item.job_id.clone(),
                customer_name: item.customer_name.clone(),
                load_date: item.load_date,
                loaded_qty: item.loaded_qty,
            });
        }

        let mut ranked: Vec<RankedCount> = by_customer
            .into_iter()
            .map(|(name, rows)| RankedCount {
                name: name.to_string(),
                rows,
            })
            .collect();
        ranked.sort_by(|a, b| b.rows.cmp(&a.rows));
        ranked.truncate(top_n);
        summary.top_customers = ranked;
        summary
    }
}

/// Which row set a detail table is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DetailView {
    All,
    Bucket(Bucket),
}

const BASE_COLUMNS: [&str; 4] = [
    columns::JOB_NUM,
    columns::ORDER_NO,
    columns::PROD_CODE,
    columns::CUSTOMER,
];

impl DetailView {
    fn specific_columns(self) -> &'static [&'static str] {
        match self {
            DetailView::Bucket(Bucket::Loaded) => &[
                columns::STATUS_LOADING,
                columns::DP_QTY,
                columns::QTY_LOADING,
                columns::TOTAL_M3,
                columns::TOTAL_WEIGHT,
            ],
            DetailView::Bucket(Bucket::PendingInProgress | Bucket::Overload) => &[
                columns::STATUS_LOADING,
                columns::DP_QTY,
                columns::QTY_LOADING,
                columns::TOTAL_M3,
            ],
            DetailView::Bucket(Bucket::ReadyNotStarted) => &[
                columns::STATUS_PACKING,
                columns::DP_QTY,
                columns::QTY_PACKING,
                columns::TOTAL_M3,
            ],
            DetailView::Bucket(Bucket::NotPacked) => {
                &[columns::STATUS_PACKING, columns::DP_QTY, columns::TOTAL_M3]
            }
            DetailView::All => &[
                columns::STATUS_PACKING,
                columns::STATUS_LOADING,
                columns::DP_QTY,
                columns::QTY_LOADING,
                columns::TOTAL_M3,
            ],
        }
    }

    /// Columns the detail table shows for this view, restricted to those the
    /// source carried.
    pub fn columns(self, available: &BTreeSet<String>) -> Vec<&'static str> {
        BASE_COLUMNS
            .iter()
            .chain(self.specific_columns())
            .copied()
            .filter(|name| available.contains(*name))
            .collect()
    }
}

use serde::Serialize;

use super::groups::{all_per_job, distinct_jobs, distinct_orders};
use crate::normalizer::{LineItem, VolumeColumn};

/// Top-line figures over a (filtered) table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Kpis {
    pub total_jobs: usize,
    pub total_orders: usize,
    /// Percentage of jobs whose every row is loaded, 0 to 100.
    pub completion_rate: f64,
    /// Sum of `Total Weight`.
    pub total_weight: f64,
    pub total_volume: f64,
}

impl Kpis {
    pub fn compute<T: AsRef<LineItem>>(rows: &[T], volume: VolumeColumn) -> Self {
        let (total_weight, total_volume) = rows.iter().map(|row| row.as_ref()).fold(
            (0.0, 0.0),
            |(weight, vol), item| (weight + item.total_weight, vol + volume.value(item)),
        );

        Kpis {
            total_jobs: distinct_jobs(rows),
            total_orders: distinct_orders(rows),
            completion_rate: strict_completion_rate(rows),
            total_weight,
            total_volume,
        }
    }

    /// Total weight expressed in a larger unit, e.g. kilograms to tonnes with
    /// a divisor of 1000.
    pub fn tonnage(&self, divisor: f64) -> f64 {
        if divisor > 0.0 {
            self.total_weight / divisor
        } else {
            0.0
        }
    }
}

/// Share of jobs, as a percentage, whose rows are all `LOADING DONE` or
/// `COMPLETE`. One row that is not disqualifies its whole job. 0 when the
/// table has no jobs.
pub fn strict_completion_rate<T: AsRef<LineItem>>(rows: &[T]) -> f64 {
    let jobs = all_per_job(rows, LineItem::is_loading_done);
    if jobs.is_empty() {
        return 0.0;
    }
    let done = jobs.values().filter(|&&done| done).count();
    done as f64 / jobs.len() as f64 * 100.0
}

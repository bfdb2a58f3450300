use std::collections::BTreeSet;

use serde::Serialize;

use super::groups::{distinct_jobs, distinct_orders, jobs_where_any};
use crate::normalizer::LineItem;

/// Loading-progress bucket of a line item. Every row is in exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Bucket {
    /// Loading status is `LOADING DONE` or `COMPLETE`.
    Loaded,
    /// Not loaded, and the loading status mentions `OVERLOAD`.
    Overload,
    /// Neither of the above, but another row of the same job is loaded.
    PendingInProgress,
    /// Job not started and this row is packed.
    ReadyNotStarted,
    /// Job not started and this row is not packed (or has no packing status).
    NotPacked,
}

impl Bucket {
    pub const ALL: [Bucket; 5] = [
        Bucket::Loaded,
        Bucket::Overload,
        Bucket::PendingInProgress,
        Bucket::ReadyNotStarted,
        Bucket::NotPacked,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Bucket::Loaded => "Loading Complete",
            Bucket::Overload => "Overload",
            Bucket::PendingInProgress => "In Progress",
            Bucket::ReadyNotStarted => "Ready to Load",
            Bucket::NotPacked => "Not Packed",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketStats {
    pub jobs: usize,
    pub orders: usize,
}

/// Row indices of a table split into the five buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketPartition {
    members: [Vec<usize>; 5],
    assignment: Vec<Bucket>,
}

impl BucketPartition {
    /// Indices (into the partitioned table) of the rows in `bucket`, ascending.
    pub fn indices(&self, bucket: Bucket) -> &[usize] {
        &self.members[bucket.index()]
    }

    pub fn len(&self, bucket: Bucket) -> usize {
        self.members[bucket.index()].len()
    }

    pub fn bucket_of(&self, row: usize) -> Option<Bucket> {
        self.assignment.get(row).copied()
    }

    /// Number of rows partitioned.
    pub fn total(&self) -> usize {
        self.assignment.len()
    }

    pub fn rows<'a, T>(
        &'a self,
        bucket: Bucket,
        table: &'a [T],
    ) -> impl Iterator<Item = &'a T> + 'a {
        self.indices(bucket).iter().filter_map(move |&i| table.get(i))
    }

    /// Distinct job and order counts over the rows of `bucket`.
    pub fn stats<T: AsRef<LineItem>>(&self, bucket: Bucket, table: &[T]) -> BucketStats {
        BucketStats {
            jobs: distinct_jobs(self.rows(bucket, table)),
            orders: distinct_orders(self.rows(bucket, table)),
        }
    }
}

/// Splits `rows` into the five buckets, in order of precedence:
///
/// 1. `Loaded`: loading done.
/// 2. `Overload`: of the rest, loading status mentions `OVERLOAD`. A row
///    that passes both tests stays `Loaded`.
/// 3. Of what remains, `PendingInProgress` when the row's job has any Loaded
///    row (the job has started), otherwise `ReadyNotStarted` when packed and
///    `NotPacked` when not.
pub fn partition<T: AsRef<LineItem>>(rows: &[T]) -> BucketPartition {
    let started_jobs = jobs_where_any(rows, LineItem::is_loading_done);

    let mut partition = BucketPartition {
        members: Default::default(),
        assignment: Vec::with_capacity(rows.len()),
    };
    for (i, row) in rows.iter().enumerate() {
        let bucket = assign(row.as_ref(), &started_jobs);
        partition.members[bucket.index()].push(i);
        partition.assignment.push(bucket);
    }
    partition
}

fn assign(item: &LineItem, started_jobs: &BTreeSet<&str>) -> Bucket {
    if item.is_loading_done() {
        return Bucket::Loaded;
    }
    if item.is_overloaded() {
        return Bucket::Overload;
    }

    let started = item
        .job_id
        .as_deref()
        .is_some_and(|job| started_jobs.contains(job));
    if started {
        Bucket::PendingInProgress
    } else if item.is_packing_done() {
        Bucket::ReadyNotStarted
    } else {
        Bucket::NotPacked
    }
}

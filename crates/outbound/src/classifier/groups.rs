//! Reductions over job groups.
//!
//! A job has no row of its own; everything known about it is folded from its
//! line items. Two folds are used with different semantics and must not be
//! swapped: strict completion is an ALL over the job's rows, "has the job
//! started loading" is an ANY. Rows without a `job_id` belong to no job.

use std::collections::{BTreeMap, BTreeSet};

use crate::normalizer::LineItem;

/// AND-folds `predicate` over each job's rows: `true` only when every row of
/// that job satisfies it.
pub fn all_per_job<'a, T, F>(
    rows: impl IntoIterator<Item = &'a T>,
    predicate: F,
) -> BTreeMap<&'a str, bool>
where
    T: AsRef<LineItem> + 'a,
    F: Fn(&LineItem) -> bool,
{
    let mut jobs: BTreeMap<&'a str, bool> = BTreeMap::new();
    for row in rows {
        let item = row.as_ref();
        let Some(job) = item.job_id.as_deref() else {
            continue;
        };
        let holds = predicate(item);
        jobs.entry(job)
            .and_modify(|all| *all = *all && holds)
            .or_insert(holds);
    }
    jobs
}

/// Jobs whose every row satisfies `predicate`.
pub fn jobs_where_all<'a, T, F>(
    rows: impl IntoIterator<Item = &'a T>,
    predicate: F,
) -> BTreeSet<&'a str>
where
    T: AsRef<LineItem> + 'a,
    F: Fn(&LineItem) -> bool,
{
    all_per_job(rows, predicate)
        .into_iter()
        .filter_map(|(job, all)| all.then_some(job))
        .collect()
}

/// Jobs with at least one row satisfying `predicate`.
pub fn jobs_where_any<'a, T, F>(
    rows: impl IntoIterator<Item = &'a T>,
    predicate: F,
) -> BTreeSet<&'a str>
where
    T: AsRef<LineItem> + 'a,
    F: Fn(&LineItem) -> bool,
{
    rows.into_iter()
        .map(|row| -> &'a LineItem { row.as_ref() })
        .filter(|item| predicate(item))
        .filter_map(|item| item.job_id.as_deref())
        .collect()
}

/// Number of distinct present `job_id`s.
pub fn distinct_jobs<'a, T>(rows: impl IntoIterator<Item = &'a T>) -> usize
where
    T: AsRef<LineItem> + 'a,
{
    rows.into_iter()
        .filter_map(|row| row.as_ref().job_id.as_deref())
        .collect::<BTreeSet<_>>()
        .len()
}

/// Number of distinct present `order_id`s.
pub fn distinct_orders<'a, T>(rows: impl IntoIterator<Item = &'a T>) -> usize
where
    T: AsRef<LineItem> + 'a,
{
    rows.into_iter()
        .filter_map(|row| row.as_ref().order_id.as_deref())
        .collect::<BTreeSet<_>>()
        .len()
}

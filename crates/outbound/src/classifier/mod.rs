//! Status classification over normalized line items.
//!
//! Two independent rules read the same packing/loading fields:
//! - [`job_status`] is row-local: it looks only at one row's own pair.
//! - [`partition`] assigns every row to one of five loading-progress buckets,
//!   which depends on the other rows of the same job.
//!
//! They are kept apart; a row can be `InProgress` while sitting
//! in the `Loaded` bucket.

pub mod buckets;
pub mod groups;
pub mod kpi;
pub mod status;

pub use buckets::{partition, Bucket, BucketPartition, BucketStats};
pub use groups::{all_per_job, distinct_jobs, distinct_orders, jobs_where_all, jobs_where_any};
pub use kpi::{strict_completion_rate, Kpis};
pub use status::{classify_rows, job_status, ClassifiedItem, JobStatus};

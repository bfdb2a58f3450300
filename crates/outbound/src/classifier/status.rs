use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::normalizer::{LineItem, Status};

/// Row-level status of a single line item's own pack/load pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum JobStatus {
    Complete,
    #[serde(rename = "In Progress")]
    InProgress,
    Overload,
}

impl JobStatus {
    pub const ALL: [JobStatus; 3] = [
        JobStatus::Complete,
        JobStatus::InProgress,
        JobStatus::Overload,
    ];

    pub fn label(self) -> &'static str {
        match self {
            JobStatus::Complete => "Complete",
            JobStatus::InProgress => "In Progress",
            JobStatus::Overload => "Overload",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Overload when the loading status mentions `OVERLOAD`; Complete when packing
/// and loading are both done; InProgress otherwise.
pub fn job_status(packing: Option<&Status>, loading: Option<&Status>) -> JobStatus {
    if loading.is_some_and(Status::is_overload) {
        return JobStatus::Overload;
    }

    let packed = packing.is_some_and(Status::is_packing_done);
    let loaded = loading.is_some_and(Status::is_loading_done);
    if packed && loaded {
        JobStatus::Complete
    } else {
        JobStatus::InProgress
    }
}

/// A line item with its row-level status attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedItem {
    #[serde(flatten)]
    pub item: LineItem,
    pub job_status: JobStatus,
}

impl ClassifiedItem {
    pub fn new(item: LineItem) -> Self {
        let job_status = job_status(item.packing_status.as_ref(), item.loading_status.as_ref());
        Self { item, job_status }
    }
}

impl Deref for ClassifiedItem {
    type Target = LineItem;

    fn deref(&self) -> &LineItem {
        &self.item
    }
}

impl AsRef<LineItem> for ClassifiedItem {
    fn as_ref(&self) -> &LineItem {
        &self.item
    }
}

pub fn classify_rows(items: Vec<LineItem>) -> Vec<ClassifiedItem> {
    items.into_iter().map(ClassifiedItem::new).collect()
}

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::classifier::ClassifiedItem;
use crate::feed::RawTable;
use crate::normalizer::NormalizedTable;

/// State threaded through the load steps of one pipeline run.
pub struct PipelineContext {
    // Input
    pub location: String,

    // Fetch result, guaranteed Some after step_fetch
    pub raw: Option<Arc<RawTable>>,
    pub fetched_at: Option<DateTime<Utc>>,

    // Normalize result, guaranteed Some after step_normalize
    pub normalized: Option<NormalizedTable>,

    // Row-level status, filled by step_classify
    pub classified: Vec<ClassifiedItem>,
}

impl PipelineContext {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            raw: None,
            fetched_at: None,
            normalized: None,
            classified: Vec::new(),
        }
    }
}

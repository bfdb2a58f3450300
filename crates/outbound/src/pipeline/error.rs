use thiserror::Error;

use crate::error::FeedError;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// The feed could not be fetched or decoded, or had no data rows. No
    /// snapshot is built from a partial table.
    #[error("Data source unavailable: {0}")]
    SourceUnavailable(#[from] FeedError),

    #[error("Pipeline step '{0}' has not run")]
    StepSkipped(&'static str),
}

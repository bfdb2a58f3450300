//! Shared test utilities for outbound integration tests.
//!
//! This module provides:
//! - `FeedHarness` for pipelines over a temp-file feed
//! - Builders for line items and CSV feeds

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::FeedHarness;

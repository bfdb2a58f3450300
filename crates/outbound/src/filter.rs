//! Row filters applied between classification and partitioning.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::classifier::{ClassifiedItem, JobStatus};

/// Inclusive calendar-day range over `create_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Swaps the bounds when given in reverse.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

/// Conjunction of optional row predicates. The default filter keeps every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableFilter {
    /// Rows without a create date never match a date range.
    pub date_range: Option<DateRange>,
    /// Exact customer name.
    pub customer: Option<String>,
    pub job_status: Option<JobStatus>,
}

impl TableFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_range = Some(DateRange::new(start, end));
        self
    }

    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    pub fn with_job_status(mut self, status: JobStatus) -> Self {
        self.job_status = Some(status);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.date_range.is_none() && self.customer.is_none() && self.job_status.is_none()
    }

    pub fn matches(&self, row: &ClassifiedItem) -> bool {
        if let Some(range) = &self.date_range {
            match row.create_date {
                Some(created) if range.contains(created.date()) => {}
                _ => return false,
            }
        }
        if let Some(customer) = &self.customer {
            if row.customer_name != *customer {
                return false;
            }
        }
        if let Some(status) = self.job_status {
            if row.job_status != status {
                return false;
            }
        }
        true
    }

    /// Keeps matching rows in their original order. An empty result is valid.
    pub fn apply(&self, rows: &[ClassifiedItem]) -> Vec<ClassifiedItem> {
        if self.is_empty() {
            return rows.to_vec();
        }
        rows.iter().filter(|row| self.matches(row)).cloned().collect()
    }
}

/// Choices a filter control can offer for the unfiltered table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Distinct non-empty customer names, sorted.
    pub customers: Vec<String>,
    /// Distinct job-status labels present, sorted.
    pub statuses: Vec<String>,
    /// Earliest and latest create day; `None` when no row has one.
    pub date_bounds: Option<DateRange>,
}

impl FilterOptions {
    pub fn from_rows(rows: &[ClassifiedItem]) -> Self {
        let customers: BTreeSet<&str> = rows
            .iter()
            .map(|row| row.customer_name.as_str())
            .filter(|name| !name.is_empty())
            .collect();
        let statuses: BTreeSet<&str> = rows.iter().map(|row| row.job_status.label()).collect();

        let mut days = rows.iter().filter_map(|row| row.create_date).map(|dt| dt.date());
        let date_bounds = days.next().map(|first| {
            let (start, end) = days.fold((first, first), |(lo, hi), day| {
                (lo.min(day), hi.max(day))
            });
            DateRange { start, end }
        });

        FilterOptions {
            customers: customers.into_iter().map(str::to_string).collect(),
            statuses: statuses.into_iter().map(str::to_string).collect(),
            date_bounds,
        }
    }
}

//! Reporting window model.
//!
//! This module contains the [`ReportingWindow`] type that bounds one
//! reconciliation run. Entries and tickets outside the window are ignored
//! rather than trusted to have been pre-filtered by the caller.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An inclusive date range over which one reconciliation report is built.
///
/// # Example
///
/// ```
/// use recon_engine::models::ReportingWindow;
/// use chrono::NaiveDate;
///
/// let window = ReportingWindow::new(
///     NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2023, 1, 31).unwrap(),
/// ).unwrap();
///
/// assert!(window.contains_date(NaiveDate::from_ymd_opt(2023, 1, 5).unwrap()));
/// assert!(!window.contains_date(NaiveDate::from_ymd_opt(2023, 2, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingWindow {
    /// The start date of the window (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the window (inclusive).
    pub end_date: NaiveDate,
}

impl ReportingWindow {
    /// Creates a reporting window, rejecting an inverted date range.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        if start_date > end_date {
            return Err(EngineError::InvalidWindow {
                start_date,
                end_date,
            });
        }
        Ok(ReportingWindow {
            start_date,
            end_date,
        })
    }

    /// Checks if a given date falls within this window, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

//! Error types for the reconciliation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! By design the reconciliation pipeline itself never fails: missing or
//! malformed rate configuration degrades to documented fallbacks and is
//! reported as a [`crate::models::ReportWarning`]. The errors here cover
//! only input-contract violations that are detectable before the pipeline
//! runs.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the reconciliation engine.
///
/// # Example
///
/// ```
/// use recon_engine::error::EngineError;
/// use chrono::NaiveDate;
///
/// let error = EngineError::InvalidWindow {
///     start_date: NaiveDate::from_ymd_opt(2023, 2, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid reporting window: start 2023-02-01 is after end 2023-01-01"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The reporting window's start date is after its end date.
    #[error("Invalid reporting window: start {start_date} is after end {end_date}")]
    InvalidWindow {
        /// The start date of the rejected window.
        start_date: NaiveDate,
        /// The end date of the rejected window.
        end_date: NaiveDate,
    },

    /// A rate profile was structurally invalid (e.g. duplicate user id).
    #[error("Invalid rate profile for user '{user_id}': {message}")]
    InvalidProfile {
        /// The user id of the offending profile.
        user_id: String,
        /// A description of what made the profile invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

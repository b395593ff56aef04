//! Core data models for the reconciliation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod metrics;
mod rate_profile;
mod ticket;
mod time_entry;
mod window;

pub use metrics::{
    CustomerBreakdown, DailyPoint, EmployeeMetrics, ProjectBreakdown, RateTypeBreakdown,
    RateTypeBucket, ReconciliationOutcome, ReconciliationReport, ReportTotals, ReportWarning,
};
pub use rate_profile::{Department, EmployeeRateProfile, OVERTIME_MULTIPLIER};
pub use ticket::{ServiceTicketRecord, UNASSIGNED_KEY, coerce_hours};
pub use time_entry::{BucketKind, RateType, TimeEntry, classify_rate_label};
pub use window::ReportingWindow;

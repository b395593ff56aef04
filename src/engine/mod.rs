//! Reconciliation logic for the engine.
//!
//! This module contains the full pipeline for turning raw time entries and
//! service tickets into reconciled financial metrics: rate resolution with
//! department-specific precedence tables, ticket deduplication,
//! ticket-to-entry hour allocation, per-day bucket accumulation, unbilled
//! time reconciliation, and the rounding and aggregation layer.

mod allocation;
mod breakdown;
mod dedupe;
mod rate_resolver;
mod reconcile;
mod report;
mod rounding;

pub use allocation::{AllocationResult, AllocationSlice, allocate_tickets};
pub use breakdown::{DayLedger, build_day_ledger, slice_revenue};
pub use dedupe::dedupe_tickets;
pub use rate_resolver::{DEFAULT_SHOP_BILLABLE_RATE, ResolvedRates, resolve_rates};
pub use reconcile::reconcile_day;
pub use report::{generate_report, reconcile_window};
pub use rounding::{round_breakdown_hours, round_up_tenth};

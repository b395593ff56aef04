//! Per-day bucket accumulation.
//!
//! For one employee and one day, this module accumulates three independent
//! views of the work: internal (non-billable) contributions taken directly
//! from time entries, billable payroll hours per rate type, and
//! ticket-allocated billable hours and revenue per rate type. The unbilled
//! reconciler then folds these views into the final six buckets.
//!
//! Revenue and cost deliberately have different bases: revenue comes from
//! ticket-allocated hours (what was billed), cost from raw payroll hours
//! (what must be paid). Collapsing the two bases would produce materially
//! wrong profit figures.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{EmployeeRateProfile, RateType, RateTypeBucket, TimeEntry};

use super::allocation::AllocationSlice;
use super::rate_resolver::resolve_rates;

/// The accumulated state for one employee-day, prior to reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayLedger {
    /// Direct internal contributions from non-billable entries.
    pub internal: RateTypeBucket,
    /// Clamped billable payroll hours per rate type.
    pub payroll_billable: BTreeMap<RateType, Decimal>,
    /// Ticket-allocated billable hours per rate type.
    pub ticket_hours: BTreeMap<RateType, Decimal>,
    /// Ticket-allocated billed revenue per rate type.
    pub ticket_revenue: BTreeMap<RateType, Decimal>,
    /// Total clamped payroll hours for the day, billable and internal.
    pub payroll_total: Decimal,
}

/// Revenue earned by one allocated slice: hours times the resolved billable
/// rate, with the slice's legacy entry rate as a resolution fallback.
pub fn slice_revenue(profile: Option<&EmployeeRateProfile>, slice: &AllocationSlice) -> Decimal {
    slice.hours * resolve_rates(profile, slice.rate_type, slice.entry_rate).billable
}

/// Accumulates one employee-day's entries and allocation slices.
///
/// Internal-time entries contribute hours, revenue (at the profile's
/// internal rate), and cost (at the resolved pay rate for the entry's rate
/// type) directly; they never flow through tickets. Billable entries
/// contribute payroll hours only, since their revenue comes from the
/// ticket-allocated slices.
pub fn build_day_ledger(
    profile: Option<&EmployeeRateProfile>,
    entries: &[&TimeEntry],
    slices: &[&AllocationSlice],
) -> DayLedger {
    let mut ledger = DayLedger::default();
    let internal_rate = profile.map_or(Decimal::ZERO, |p| p.internal_rate);

    for entry in entries {
        let hours = entry.clamped_hours();
        ledger.payroll_total += hours;

        if entry.billable {
            *ledger
                .payroll_billable
                .entry(entry.rate_type)
                .or_insert(Decimal::ZERO) += hours;
        } else {
            let pay = resolve_rates(profile, entry.rate_type, entry.rate).pay;
            ledger.internal.hours += hours;
            ledger.internal.revenue += hours * internal_rate;
            ledger.internal.cost += hours * pay;
        }
    }

    for slice in slices {
        *ledger
            .ticket_hours
            .entry(slice.rate_type)
            .or_insert(Decimal::ZERO) += slice.hours;
        *ledger
            .ticket_revenue
            .entry(slice.rate_type)
            .or_insert(Decimal::ZERO) += slice_revenue(profile, slice);
    }

    ledger
}

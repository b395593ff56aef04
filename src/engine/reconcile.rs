//! Unbilled-time reconciliation.
//!
//! Payroll hours and ticket-billed hours for the same day rarely agree
//! exactly. Any payroll surplus per rate type is unbilled work: it must
//! still be counted as cost (payroll pays for clocked time regardless of
//! what gets billed) but earns no billable revenue, so it moves into the
//! internal bucket. Omitting this step either double-counts hours or
//! silently drops them.

use rust_decimal::Decimal;

use crate::models::{EmployeeRateProfile, RateType, RateTypeBreakdown};

use super::breakdown::DayLedger;
use super::rate_resolver::resolve_rates;

/// Folds one employee-day's ledger into the final six buckets.
///
/// Per rate type: `unbilled = max(0, payroll - ticket_billable)` moves into
/// the internal bucket, valued at the profile's internal rate for revenue
/// and at the originating type's pay rate for cost; the billable bucket
/// keeps the ticket-derived hours and revenue, and carries the cost of the
/// payroll hours that remained billed. Total hours across all buckets
/// therefore still equal the day's total payroll hours.
pub fn reconcile_day(
    profile: Option<&EmployeeRateProfile>,
    ledger: &DayLedger,
) -> RateTypeBreakdown {
    let internal_rate = profile.map_or(Decimal::ZERO, |p| p.internal_rate);
    let mut breakdown = RateTypeBreakdown {
        internal: ledger.internal,
        ..RateTypeBreakdown::default()
    };

    for rate_type in RateType::ALL {
        let payroll = ledger
            .payroll_billable
            .get(&rate_type)
            .copied()
            .unwrap_or(Decimal::ZERO);
        let ticket_hours = ledger
            .ticket_hours
            .get(&rate_type)
            .copied()
            .unwrap_or(Decimal::ZERO);
        let ticket_revenue = ledger
            .ticket_revenue
            .get(&rate_type)
            .copied()
            .unwrap_or(Decimal::ZERO);

        let pay = resolve_rates(profile, rate_type, None).pay;
        let unbilled = (payroll - ticket_hours).max(Decimal::ZERO);
        let billed_payroll = payroll - unbilled;

        let bucket = breakdown.bucket_mut(rate_type.into());
        bucket.hours += ticket_hours;
        bucket.revenue += ticket_revenue;
        bucket.cost += billed_payroll * pay;

        if !unbilled.is_zero() {
            breakdown.internal.hours += unbilled;
            breakdown.internal.revenue += unbilled * internal_rate;
            breakdown.internal.cost += unbilled * pay;
        }
    }

    breakdown
}

//! Rounding functionality.
//!
//! Hour totals are rounded up to the nearest 0.1 exactly once, after all
//! summation across entries and tickets for the full window, never per
//! entry. Rounding always goes up, never down: this is a payroll-favorable
//! rule and must not regress to round-nearest or round-down.

use rust_decimal::Decimal;

use crate::models::RateTypeBreakdown;

const TEN: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Rounds a summed hour total up to the nearest 0.1.
///
/// # Example
///
/// ```
/// use recon_engine::engine::round_up_tenth;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let raw = Decimal::from_str("7.0333333").unwrap();
/// assert_eq!(round_up_tenth(raw), Decimal::from_str("7.1").unwrap());
///
/// // Exact tenths are left untouched
/// let exact = Decimal::from_str("7.1").unwrap();
/// assert_eq!(round_up_tenth(exact), exact);
/// ```
pub fn round_up_tenth(hours: Decimal) -> Decimal {
    (hours * TEN).ceil() / TEN
}

/// Rounds every bucket's hours in place, once, after full-window summation.
pub fn round_breakdown_hours(breakdown: &mut RateTypeBreakdown) {
    breakdown.internal.hours = round_up_tenth(breakdown.internal.hours);
    breakdown.shop.hours = round_up_tenth(breakdown.shop.hours);
    breakdown.field.hours = round_up_tenth(breakdown.field.hours);
    breakdown.travel.hours = round_up_tenth(breakdown.travel.hours);
    breakdown.shop_overtime.hours = round_up_tenth(breakdown.shop_overtime.hours);
    breakdown.field_overtime.hours = round_up_tenth(breakdown.field_overtime.hours);
}

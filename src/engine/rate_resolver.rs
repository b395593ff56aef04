//! Rate resolution functionality.
//!
//! Given an employee's configured rates, department, and a rate type, this
//! module resolves the applicable billable rate and pay rate. The fallback
//! policy is expressed as an explicit ordered precedence table per
//! `(Department, RateType)` pair rather than branch-by-branch logic, so the
//! policy itself is independently testable.

use rust_decimal::Decimal;

use crate::models::{Department, EmployeeRateProfile, RateType};

/// Last-resort billable rate when no configured rate and no legacy entry
/// rate is available. This is a documented fallback, not a business rule:
/// no rate configuration should legitimately be absent for an active
/// employee.
pub const DEFAULT_SHOP_BILLABLE_RATE: Decimal = Decimal::from_parts(110, 0, 0, false, 0);

/// The billable and pay rate resolved for one slice of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRates {
    /// The rate charged to the customer per hour.
    pub billable: Decimal,
    /// The rate paid to the employee per hour.
    pub pay: Decimal,
}

impl ResolvedRates {
    /// The zero-rate pair used for employees with no profile.
    pub const ZERO: ResolvedRates = ResolvedRates {
        billable: Decimal::ZERO,
        pay: Decimal::ZERO,
    };
}

/// One source consulted when resolving a billable rate. Sources are tried
/// in table order; an unset or zero rate falls through to the next source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BillableSource {
    /// The profile's shop rate.
    Shop,
    /// The profile's travel rate.
    Travel,
    /// The profile's field rate.
    Field,
    /// The profile's shop overtime rate (1.5x shop after normalization).
    ShopOvertime,
    /// The profile's field overtime rate (1.5x field after normalization).
    FieldOvertime,
    /// The legacy per-entry rate carried on old time entries.
    EntryRate,
    /// The hard default of [`DEFAULT_SHOP_BILLABLE_RATE`].
    Default,
}

/// One source consulted when resolving a pay rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PaySource {
    ShopPay,
    FieldPay,
    ShopOvertimePay,
    FieldOvertimePay,
}

/// Billable-rate precedence per `(Department, RateType)`.
///
/// Panel Shop has no separate billable field rate: field work bills through
/// the shop chain, and field overtime through the shop overtime chain.
fn billable_precedence(department: Department, rate_type: RateType) -> &'static [BillableSource] {
    use BillableSource::*;
    match (department, rate_type) {
        (_, RateType::ShopTime) => &[Shop, EntryRate, Default],
        (_, RateType::TravelTime) => &[Travel, EntryRate, Default],
        (Department::PanelShop, RateType::FieldTime) => &[Shop, EntryRate, Default],
        (Department::Standard, RateType::FieldTime) => &[Field, EntryRate, Default],
        (_, RateType::ShopOvertime) => &[ShopOvertime, EntryRate, Default],
        (Department::PanelShop, RateType::FieldOvertime) => &[ShopOvertime, EntryRate, Default],
        (Department::Standard, RateType::FieldOvertime) => &[FieldOvertime, EntryRate, Default],
    }
}

/// Pay-rate precedence per `(Department, RateType)`.
///
/// Travel is always paid at the shop pay rate (no separate travel pay rate
/// exists), and field pay falls back to shop pay in every department.
fn pay_precedence(_department: Department, rate_type: RateType) -> &'static [PaySource] {
    use PaySource::*;
    match rate_type {
        RateType::ShopTime | RateType::TravelTime => &[ShopPay],
        RateType::FieldTime => &[FieldPay, ShopPay],
        RateType::ShopOvertime => &[ShopOvertimePay, ShopPay],
        RateType::FieldOvertime => &[FieldOvertimePay, ShopOvertimePay, ShopPay],
    }
}

fn billable_candidate(
    source: BillableSource,
    profile: &EmployeeRateProfile,
    entry_rate: Option<Decimal>,
) -> Option<Decimal> {
    match source {
        BillableSource::Shop => profile.shop_rate,
        BillableSource::Travel => profile.travel_rate,
        BillableSource::Field => profile.field_rate,
        BillableSource::ShopOvertime => profile.shop_overtime_rate,
        BillableSource::FieldOvertime => profile.field_overtime_rate,
        BillableSource::EntryRate => entry_rate,
        BillableSource::Default => Some(DEFAULT_SHOP_BILLABLE_RATE),
    }
}

fn pay_candidate(source: PaySource, profile: &EmployeeRateProfile) -> Option<Decimal> {
    match source {
        PaySource::ShopPay => profile.shop_pay_rate,
        PaySource::FieldPay => profile.field_pay_rate,
        PaySource::ShopOvertimePay => profile.shop_overtime_pay_rate,
        PaySource::FieldOvertimePay => profile.field_overtime_pay_rate,
    }
}

fn first_usable(candidates: impl Iterator<Item = Option<Decimal>>) -> Option<Decimal> {
    candidates.flatten().find(|rate| !rate.is_zero())
}

/// Resolves the billable and pay rate for one slice of work.
///
/// An entirely absent profile resolves to [`ResolvedRates::ZERO`]; callers
/// treat that as "unconfigured" rather than erroring, so unconfigured
/// employees still appear in totals with zero revenue and cost.
///
/// `entry_rate` is the legacy per-entry billable rate, consulted only after
/// the profile's own rates. Unset and zero rates are equivalent for
/// fallback purposes.
///
/// # Example
///
/// ```
/// use recon_engine::engine::{resolve_rates, DEFAULT_SHOP_BILLABLE_RATE};
/// use recon_engine::models::{EmployeeRateProfile, RateType};
///
/// // No profile at all: zero rates, never an error.
/// let rates = resolve_rates(None, RateType::ShopTime, None);
/// assert!(rates.billable.is_zero());
/// assert!(rates.pay.is_zero());
///
/// // Empty profile: billable falls to the documented last resort.
/// let profile = EmployeeRateProfile::empty("user_001");
/// let rates = resolve_rates(Some(&profile), RateType::ShopTime, None);
/// assert_eq!(rates.billable, DEFAULT_SHOP_BILLABLE_RATE);
/// ```
pub fn resolve_rates(
    profile: Option<&EmployeeRateProfile>,
    rate_type: RateType,
    entry_rate: Option<Decimal>,
) -> ResolvedRates {
    let Some(profile) = profile else {
        return ResolvedRates::ZERO;
    };

    let billable = first_usable(
        billable_precedence(profile.department, rate_type)
            .iter()
            .map(|&source| billable_candidate(source, profile, entry_rate)),
    )
    .unwrap_or(DEFAULT_SHOP_BILLABLE_RATE);

    let pay = first_usable(
        pay_precedence(profile.department, rate_type)
            .iter()
            .map(|&source| pay_candidate(source, profile)),
    )
    .unwrap_or(Decimal::ZERO);

    ResolvedRates { billable, pay }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn standard_profile() -> EmployeeRateProfile {
        let profile = EmployeeRateProfile {
            user_id: "user_001".to_string(),
            department: Department::Standard,
            shop_rate: Some(dec("110")),
            travel_rate: Some(dec("90")),
            field_rate: Some(dec("130")),
            shop_overtime_rate: None,
            field_overtime_rate: None,
            internal_rate: Decimal::ZERO,
            shop_pay_rate: Some(dec("30")),
            field_pay_rate: Some(dec("34")),
            shop_overtime_pay_rate: None,
            field_overtime_pay_rate: None,
        };
        profile.normalize().0
    }

    fn panel_shop_profile() -> EmployeeRateProfile {
        let mut profile = standard_profile();
        profile.department = Department::PanelShop;
        // Panel Shop carries no billable field rate and no field pay rate
        profile.field_rate = None;
        profile.field_overtime_rate = None;
        profile.field_pay_rate = None;
        profile.field_overtime_pay_rate = None;
        profile.normalize().0
    }

    #[test]
    fn test_default_rate_value() {
        assert_eq!(DEFAULT_SHOP_BILLABLE_RATE, dec("110"));
    }

    #[test]
    fn test_standard_shop_rates() {
        let profile = standard_profile();
        let rates = resolve_rates(Some(&profile), RateType::ShopTime, None);
        assert_eq!(rates.billable, dec("110"));
        assert_eq!(rates.pay, dec("30"));
    }

    #[test]
    fn test_standard_field_rates() {
        let profile = standard_profile();
        let rates = resolve_rates(Some(&profile), RateType::FieldTime, None);
        assert_eq!(rates.billable, dec("130"));
        assert_eq!(rates.pay, dec("34"));
    }

    #[test]
    fn test_travel_bills_travel_rate_but_pays_shop_rate() {
        let profile = standard_profile();
        let rates = resolve_rates(Some(&profile), RateType::TravelTime, None);
        assert_eq!(rates.billable, dec("90"));
        assert_eq!(rates.pay, dec("30"));
    }

    #[test]
    fn test_overtime_rates_are_1_5x_base() {
        let profile = standard_profile();

        let shop_ot = resolve_rates(Some(&profile), RateType::ShopOvertime, None);
        assert_eq!(shop_ot.billable, dec("165.0"));
        assert_eq!(shop_ot.pay, dec("45.0"));

        let field_ot = resolve_rates(Some(&profile), RateType::FieldOvertime, None);
        assert_eq!(field_ot.billable, dec("195.0"));
        assert_eq!(field_ot.pay, dec("51.0"));
    }

    #[test]
    fn test_panel_shop_field_bills_shop_rate() {
        let profile = panel_shop_profile();
        let rates = resolve_rates(Some(&profile), RateType::FieldTime, None);
        assert_eq!(rates.billable, dec("110"));
        // Field pay falls back to shop pay for Panel Shop
        assert_eq!(rates.pay, dec("30"));
    }

    #[test]
    fn test_panel_shop_field_overtime_bills_shop_overtime() {
        let profile = panel_shop_profile();
        let rates = resolve_rates(Some(&profile), RateType::FieldOvertime, None);
        assert_eq!(rates.billable, dec("165.0"));
        assert_eq!(rates.pay, dec("45.0"));
    }

    #[test]
    fn test_unset_billable_falls_back_to_entry_rate() {
        let mut profile = standard_profile();
        profile.field_rate = None;
        let rates = resolve_rates(Some(&profile), RateType::FieldTime, Some(dec("125")));
        assert_eq!(rates.billable, dec("125"));
    }

    #[test]
    fn test_zero_entry_rate_falls_back_to_default() {
        let mut profile = standard_profile();
        profile.field_rate = None;
        let rates = resolve_rates(Some(&profile), RateType::FieldTime, Some(Decimal::ZERO));
        assert_eq!(rates.billable, DEFAULT_SHOP_BILLABLE_RATE);
    }

    #[test]
    fn test_zero_configured_rate_is_treated_as_unset() {
        let mut profile = standard_profile();
        profile.field_rate = Some(Decimal::ZERO);
        let rates = resolve_rates(Some(&profile), RateType::FieldTime, Some(dec("125")));
        assert_eq!(rates.billable, dec("125"));
    }

    #[test]
    fn test_empty_profile_bills_default_pays_zero() {
        let profile = EmployeeRateProfile::empty("user_001");
        let rates = resolve_rates(Some(&profile), RateType::ShopTime, None);
        assert_eq!(rates.billable, DEFAULT_SHOP_BILLABLE_RATE);
        assert_eq!(rates.pay, Decimal::ZERO);
    }

    #[test]
    fn test_missing_profile_resolves_to_zero_rates() {
        for rate_type in RateType::ALL {
            let rates = resolve_rates(None, rate_type, Some(dec("125")));
            assert_eq!(rates, ResolvedRates::ZERO);
        }
    }

    #[test]
    fn test_overtime_pay_falls_back_to_base_pay_chain() {
        let mut profile = standard_profile();
        profile.field_overtime_pay_rate = None;
        profile.shop_overtime_pay_rate = None;
        let rates = resolve_rates(Some(&profile), RateType::FieldOvertime, None);
        assert_eq!(rates.pay, dec("30"));
    }

    #[test]
    fn test_precedence_tables_cover_all_pairs() {
        for department in [Department::PanelShop, Department::Standard] {
            for rate_type in RateType::ALL {
                assert!(!billable_precedence(department, rate_type).is_empty());
                assert!(!pay_precedence(department, rate_type).is_empty());
                // Every billable chain terminates in the documented default
                assert_eq!(
                    *billable_precedence(department, rate_type).last().unwrap(),
                    BillableSource::Default
                );
            }
        }
    }
}

//! Employee rate profile and department models.
//!
//! A rate profile carries an employee's configured billable and pay rates
//! per rate type. Overtime rates are always 1.5x the corresponding base
//! rate; [`EmployeeRateProfile::normalize`] re-derives them at ingestion so
//! inconsistent stored data cannot leak into the calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::ReportWarning;

/// The 1.5x multiplier applied to base rates for overtime work.
pub const OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Department classification controlling the rate fallback policy.
///
/// Panel Shop employees have no separate billable field rate and their field
/// pay rates fall back to the shop pay rate; all other departments resolve
/// field and travel rates independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    /// The Panel Shop department.
    PanelShop,
    /// Any other department.
    Standard,
}

impl Default for Department {
    fn default() -> Self {
        Department::Standard
    }
}

impl Department {
    /// Parses a stored department label, case-insensitively.
    ///
    /// # Example
    ///
    /// ```
    /// use recon_engine::models::Department;
    ///
    /// assert_eq!(Department::from_label("Panel Shop"), Department::PanelShop);
    /// assert_eq!(Department::from_label("Controls"), Department::Standard);
    /// ```
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("panel shop") {
            Department::PanelShop
        } else {
            Department::Standard
        }
    }
}

/// An employee's configured billable and pay rates.
///
/// Every rate is optional: resolution falls through the documented
/// precedence chain when a rate is unset, and an entirely absent profile
/// resolves to zero rates so unconfigured employees still appear in totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRateProfile {
    /// The employee this profile belongs to.
    pub user_id: String,
    /// The employee's department.
    #[serde(default)]
    pub department: Department,
    /// Billable rate for shop time.
    #[serde(default)]
    pub shop_rate: Option<Decimal>,
    /// Billable rate for travel time.
    #[serde(default)]
    pub travel_rate: Option<Decimal>,
    /// Billable rate for field time. `None` for Panel Shop employees.
    #[serde(default)]
    pub field_rate: Option<Decimal>,
    /// Billable rate for shop overtime; re-derived as 1.5x `shop_rate`.
    #[serde(default)]
    pub shop_overtime_rate: Option<Decimal>,
    /// Billable rate for field overtime; re-derived as 1.5x `field_rate`.
    #[serde(default)]
    pub field_overtime_rate: Option<Decimal>,
    /// Revenue rate applied to internal (non-billable) work. Often zero.
    #[serde(default)]
    pub internal_rate: Decimal,
    /// Pay rate for shop time. Also pays travel and internal time.
    #[serde(default)]
    pub shop_pay_rate: Option<Decimal>,
    /// Pay rate for field time.
    #[serde(default)]
    pub field_pay_rate: Option<Decimal>,
    /// Pay rate for shop overtime; re-derived as 1.5x `shop_pay_rate`.
    #[serde(default)]
    pub shop_overtime_pay_rate: Option<Decimal>,
    /// Pay rate for field overtime; re-derived as 1.5x `field_pay_rate`.
    #[serde(default)]
    pub field_overtime_pay_rate: Option<Decimal>,
}

impl EmployeeRateProfile {
    /// Creates an empty profile for the given user, with every rate unset.
    pub fn empty(user_id: impl Into<String>) -> Self {
        EmployeeRateProfile {
            user_id: user_id.into(),
            department: Department::Standard,
            shop_rate: None,
            travel_rate: None,
            field_rate: None,
            shop_overtime_rate: None,
            field_overtime_rate: None,
            internal_rate: Decimal::ZERO,
            shop_pay_rate: None,
            field_pay_rate: None,
            shop_overtime_pay_rate: None,
            field_overtime_pay_rate: None,
        }
    }

    /// Re-derives every overtime rate as 1.5x its base rate.
    ///
    /// Stored overtime values are not trusted: whenever a base rate is
    /// present, the overtime rate becomes exactly 1.5x that base, and a
    /// warning records any stored value that disagreed. A stored overtime
    /// rate with no corresponding base rate is kept as-is, since there is
    /// nothing to derive it from.
    pub fn normalize(&self) -> (EmployeeRateProfile, Vec<ReportWarning>) {
        let mut normalized = self.clone();
        let mut warnings = Vec::new();

        let mut derive = |label: &str, base: Option<Decimal>, stored: &mut Option<Decimal>| {
            if let Some(base) = base {
                let derived = base * OVERTIME_MULTIPLIER;
                if let Some(previous) = *stored {
                    if previous != derived {
                        warn!(
                            user_id = %self.user_id,
                            rate = label,
                            stored = %previous,
                            derived = %derived,
                            "Stored overtime rate disagrees with 1.5x base; using derived value"
                        );
                        warnings.push(ReportWarning::overtime_rate_corrected(
                            &self.user_id,
                            label,
                            previous,
                            derived,
                        ));
                    }
                }
                *stored = Some(derived);
            }
        };

        derive(
            "shop_overtime_rate",
            self.shop_rate,
            &mut normalized.shop_overtime_rate,
        );
        derive(
            "field_overtime_rate",
            self.field_rate,
            &mut normalized.field_overtime_rate,
        );
        derive(
            "shop_overtime_pay_rate",
            self.shop_pay_rate,
            &mut normalized.shop_overtime_pay_rate,
        );
        derive(
            "field_overtime_pay_rate",
            self.field_pay_rate,
            &mut normalized.field_overtime_pay_rate,
        );

        (normalized, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_profile() -> EmployeeRateProfile {
        EmployeeRateProfile {
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
        }
    }

    #[test]
    fn test_overtime_multiplier_value() {
        assert_eq!(OVERTIME_MULTIPLIER, dec("1.5"));
    }

    #[test]
    fn test_department_from_label() {
        assert_eq!(Department::from_label("Panel Shop"), Department::PanelShop);
        assert_eq!(Department::from_label("panel shop"), Department::PanelShop);
        assert_eq!(Department::from_label(" PANEL SHOP "), Department::PanelShop);
        assert_eq!(Department::from_label("Field Service"), Department::Standard);
        assert_eq!(Department::from_label(""), Department::Standard);
    }

    #[test]
    fn test_normalize_derives_missing_overtime_rates() {
        let profile = create_test_profile();
        let (normalized, warnings) = profile.normalize();

        assert_eq!(normalized.shop_overtime_rate, Some(dec("165.0")));
        assert_eq!(normalized.field_overtime_rate, Some(dec("195.0")));
        assert_eq!(normalized.shop_overtime_pay_rate, Some(dec("45.0")));
        assert_eq!(normalized.field_overtime_pay_rate, Some(dec("51.0")));
        // Deriving a missing rate is not a correction
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_normalize_corrects_inconsistent_stored_rate() {
        let mut profile = create_test_profile();
        profile.shop_overtime_rate = Some(dec("150"));

        let (normalized, warnings) = profile.normalize();

        assert_eq!(normalized.shop_overtime_rate, Some(dec("165.0")));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, "OVERTIME_RATE_CORRECTED");
        assert!(warnings[0].message.contains("user_001"));
        assert!(warnings[0].message.contains("shop_overtime_rate"));
    }

    #[test]
    fn test_normalize_keeps_consistent_stored_rate_silently() {
        let mut profile = create_test_profile();
        profile.shop_overtime_rate = Some(dec("165.0"));

        let (normalized, warnings) = profile.normalize();

        assert_eq!(normalized.shop_overtime_rate, Some(dec("165.0")));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_normalize_keeps_orphan_overtime_rate() {
        let mut profile = EmployeeRateProfile::empty("user_001");
        profile.field_overtime_rate = Some(dec("200"));

        let (normalized, warnings) = profile.normalize();

        assert_eq!(normalized.field_overtime_rate, Some(dec("200")));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_empty_profile_has_no_rates() {
        let profile = EmployeeRateProfile::empty("user_042");
        assert_eq!(profile.user_id, "user_042");
        assert!(profile.shop_rate.is_none());
        assert!(profile.shop_pay_rate.is_none());
        assert_eq!(profile.internal_rate, Decimal::ZERO);
    }

    #[test]
    fn test_deserialize_profile_with_defaults() {
        let json = r#"{
            "user_id": "user_001",
            "shop_rate": "110",
            "shop_pay_rate": "30"
        }"#;

        let profile: EmployeeRateProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.department, Department::Standard);
        assert_eq!(profile.shop_rate, Some(dec("110")));
        assert_eq!(profile.internal_rate, Decimal::ZERO);
        assert!(profile.field_rate.is_none());
    }

    #[test]
    fn test_profile_round_trip() {
        let profile = create_test_profile();
        let json = serde_json::to_string(&profile).unwrap();
        let deserialized: EmployeeRateProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(profile, deserialized);
    }
}

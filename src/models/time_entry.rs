//! Time entry model and rate-type classification.
//!
//! This module defines the [`TimeEntry`] struct, the closed [`RateType`]
//! enumeration, and the label classification function that replaces the
//! free-text substring matching used by legacy data.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Classification of worked hours, driving both the billable and pay rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateType {
    /// Standard shop-floor work.
    ShopTime,
    /// Shop work beyond ordinary hours, billed and paid at 1.5x shop rates.
    ShopOvertime,
    /// Travel to/from a job site; paid at the shop pay rate.
    TravelTime,
    /// On-site field work.
    FieldTime,
    /// Field work beyond ordinary hours, billed and paid at 1.5x field rates.
    FieldOvertime,
}

impl Default for RateType {
    fn default() -> Self {
        RateType::ShopTime
    }
}

impl RateType {
    /// All rate types in canonical order.
    pub const ALL: [RateType; 5] = [
        RateType::ShopTime,
        RateType::ShopOvertime,
        RateType::TravelTime,
        RateType::FieldTime,
        RateType::FieldOvertime,
    ];

    /// Returns true for the overtime variants.
    pub fn is_overtime(self) -> bool {
        matches!(self, RateType::ShopOvertime | RateType::FieldOvertime)
    }
}

/// Classifies a free-text rate-type label into a [`RateType`].
///
/// Ticket edit maps key their hours by human-entered labels such as
/// `"Field Time"` or `"Shop OT"`. Classification is case-insensitive:
/// a label mentioning overtime ("overtime" or the abbreviation "ot" as a
/// word) combined with "field" maps to [`RateType::FieldOvertime`], and so
/// on. Labels that match nothing classify as [`RateType::ShopTime`], the
/// documented default class.
///
/// # Example
///
/// ```
/// use recon_engine::models::{classify_rate_label, RateType};
///
/// assert_eq!(classify_rate_label("Field Time"), RateType::FieldTime);
/// assert_eq!(classify_rate_label("field overtime"), RateType::FieldOvertime);
/// assert_eq!(classify_rate_label("Shop OT"), RateType::ShopOvertime);
/// assert_eq!(classify_rate_label("Travel"), RateType::TravelTime);
/// assert_eq!(classify_rate_label("misc"), RateType::ShopTime);
/// ```
pub fn classify_rate_label(label: &str) -> RateType {
    let lower = label.to_ascii_lowercase();
    let overtime = lower.contains("overtime")
        || lower
            .split(|c: char| !c.is_ascii_alphanumeric())
            .any(|word| word == "ot");

    if lower.contains("travel") {
        RateType::TravelTime
    } else if lower.contains("field") {
        if overtime {
            RateType::FieldOvertime
        } else {
            RateType::FieldTime
        }
    } else if overtime {
        RateType::ShopOvertime
    } else {
        RateType::ShopTime
    }
}

/// One of the six canonical buckets metrics accumulate into.
///
/// The five [`RateType`] classes each have a bucket, plus [`Internal`] for
/// non-billable work. Internal work never earns a billable rate; it only
/// ever earns the employee's internal rate (which may be zero).
///
/// [`Internal`]: BucketKind::Internal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketKind {
    /// Non-billable (internal) work.
    Internal,
    /// Billable shop time.
    Shop,
    /// Billable field time.
    Field,
    /// Billable travel time.
    Travel,
    /// Billable shop overtime.
    ShopOvertime,
    /// Billable field overtime.
    FieldOvertime,
}

impl From<RateType> for BucketKind {
    fn from(rate_type: RateType) -> Self {
        match rate_type {
            RateType::ShopTime => BucketKind::Shop,
            RateType::ShopOvertime => BucketKind::ShopOvertime,
            RateType::TravelTime => BucketKind::Travel,
            RateType::FieldTime => BucketKind::Field,
            RateType::FieldOvertime => BucketKind::FieldOvertime,
        }
    }
}

/// A raw clock-time record logged by an employee.
///
/// Entries are read-only snapshots supplied by the persistence collaborator
/// for a fixed reporting window; the engine never creates, mutates, or
/// destroys them.
///
/// # Example
///
/// ```
/// use recon_engine::models::{RateType, TimeEntry};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let entry = TimeEntry {
///     id: "entry_001".to_string(),
///     user_id: "user_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(),
///     hours: Decimal::new(40, 1),
///     billable: true,
///     rate_type: RateType::ShopTime,
///     project_id: Some("proj_001".to_string()),
///     customer_id: Some("cust_001".to_string()),
///     rate: None,
/// };
/// assert_eq!(entry.clamped_hours(), Decimal::new(40, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Unique identifier for the entry.
    pub id: String,
    /// The employee who logged this entry.
    pub user_id: String,
    /// The date the work was performed.
    pub date: NaiveDate,
    /// Hours worked. Negative values are treated as zero at the point of use.
    pub hours: Decimal,
    /// Whether the hours are chargeable to a customer.
    pub billable: bool,
    /// The rate-type classification of the hours.
    #[serde(default)]
    pub rate_type: RateType,
    /// The project the work was logged against, if any.
    #[serde(default)]
    pub project_id: Option<String>,
    /// The customer, derived from the project by the persistence layer.
    #[serde(default)]
    pub customer_id: Option<String>,
    /// Legacy per-entry billable rate; a last-resort rate-resolution source.
    #[serde(default)]
    pub rate: Option<Decimal>,
}

impl TimeEntry {
    /// Returns the entry's hours, with negative values clamped to zero.
    pub fn clamped_hours(&self) -> Decimal {
        if self.hours.is_sign_negative() {
            Decimal::ZERO
        } else {
            self.hours
        }
    }
}

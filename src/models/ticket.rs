//! Service ticket model and lenient edited-hours coercion.
//!
//! A service ticket is the customer-facing record of billed hours for one
//! job. Tickets may be derived automatically from time-entry aggregation and
//! later hand-corrected by an admin; a hand-edited ticket carries an
//! `edited_hours` override map whose values arrive as loosely-typed data
//! (a number, a numeric string, or a sequence of numbers summed together).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The grouping key under which customer-less tickets are deduplicated and
/// customer breakdowns are keyed.
pub const UNASSIGNED_KEY: &str = "unassigned";

/// The customer-facing billed-hours record for one ticket.
///
/// # Example
///
/// ```
/// use recon_engine::models::ServiceTicketRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let ticket = ServiceTicketRecord {
///     date: NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(),
///     user_id: "user_001".to_string(),
///     customer_id: Some("cust_001".to_string()),
///     project_id: None,
///     total_hours: Decimal::new(60, 1),
///     is_edited: false,
///     edited_hours: None,
/// };
/// assert_eq!(ticket.dedupe_key(), ("2023-01-05".to_string(), "cust_001".to_string(), "user_001".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTicketRecord {
    /// The date the ticketed work was performed.
    pub date: NaiveDate,
    /// The employee the ticket belongs to.
    pub user_id: String,
    /// The customer billed, if assigned.
    #[serde(default)]
    pub customer_id: Option<String>,
    /// The project the ticket was raised against, if assigned.
    #[serde(default)]
    pub project_id: Option<String>,
    /// The authoritative billed total for the ticket.
    pub total_hours: Decimal,
    /// Whether an admin hand-edited the ticket after the fact.
    #[serde(default)]
    pub is_edited: bool,
    /// Hand-entered hours per rate-type label; present only on edited
    /// tickets. Values are loosely typed and coerced via [`coerce_hours`].
    #[serde(default)]
    pub edited_hours: Option<BTreeMap<String, serde_json::Value>>,
}

impl ServiceTicketRecord {
    /// The deduplication grouping key: `(date, customer ?? "unassigned", user)`.
    pub fn dedupe_key(&self) -> (String, String, String) {
        (
            self.date.to_string(),
            self.customer_id
                .clone()
                .unwrap_or_else(|| UNASSIGNED_KEY.to_string()),
            self.user_id.clone(),
        )
    }

    /// Returns the ticket's billed total, with negative values clamped to zero.
    pub fn clamped_total_hours(&self) -> Decimal {
        if self.total_hours.is_sign_negative() {
            Decimal::ZERO
        } else {
            self.total_hours
        }
    }
}

/// Coerces a loosely-typed edited-hours value to a non-negative hour count.
///
/// Accepted shapes:
/// - a JSON number (`4`, `2.5`)
/// - a numeric string (`"3.5"`)
/// - a sequence of either, summed together (`[2, 1]`)
///
/// Negative results clamp to zero. Returns `None` when the value is not
/// coercible at all, in which case the caller skips the key.
///
/// # Example
///
/// ```
/// use recon_engine::models::coerce_hours;
/// use rust_decimal::Decimal;
/// use serde_json::json;
///
/// assert_eq!(coerce_hours(&json!(2.5)), Some(Decimal::new(25, 1)));
/// assert_eq!(coerce_hours(&json!([2, 1])), Some(Decimal::from(3)));
/// assert_eq!(coerce_hours(&json!("bogus")), None);
/// ```
pub fn coerce_hours(value: &serde_json::Value) -> Option<Decimal> {
    let coerced = match value {
        serde_json::Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        serde_json::Value::String(s) => Decimal::from_str(s.trim()).ok(),
        serde_json::Value::Array(items) => {
            let parts: Vec<Decimal> = items.iter().filter_map(coerce_single).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.into_iter().sum())
            }
        }
        _ => None,
    };

    coerced.map(|hours| {
        if hours.is_sign_negative() {
            Decimal::ZERO
        } else {
            hours
        }
    })
}

// Scalar-only coercion for sequence elements; nested sequences are malformed.
fn coerce_single(value: &serde_json::Value) -> Option<Decimal> {
    match value {
        serde_json::Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        serde_json::Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

//! Ticket deduplication functionality.
//!
//! Service tickets for the same `(date, customer, employee)` can appear more
//! than once when an automatically-derived record and a hand-edited record
//! both survive in storage. This module collapses each group to a single
//! record, preferring the hand-edited version.

use std::collections::HashMap;

use crate::models::ServiceTicketRecord;

/// Collapses duplicate service tickets to one record per
/// `(date, customer ?? "unassigned", user)` key.
///
/// Tie-break: when two records share a key, the one with `is_edited = true`
/// wins; when both or neither are edited, the first encountered wins. Output
/// order follows first encounter of each key, so a stable, deterministic
/// input order yields a stable, deterministic output.
///
/// # Example
///
/// ```
/// use recon_engine::engine::dedupe_tickets;
/// use recon_engine::models::ServiceTicketRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let auto = ServiceTicketRecord {
///     date: NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(),
///     user_id: "user_001".to_string(),
///     customer_id: Some("cust_001".to_string()),
///     project_id: None,
///     total_hours: Decimal::from(6),
///     is_edited: false,
///     edited_hours: None,
/// };
/// let mut edited = auto.clone();
/// edited.is_edited = true;
/// edited.total_hours = Decimal::from(5);
///
/// let deduped = dedupe_tickets(&[auto, edited]);
/// assert_eq!(deduped.len(), 1);
/// assert!(deduped[0].is_edited);
/// assert_eq!(deduped[0].total_hours, Decimal::from(5));
/// ```
pub fn dedupe_tickets(tickets: &[ServiceTicketRecord]) -> Vec<ServiceTicketRecord> {
    let mut index_by_key: HashMap<(String, String, String), usize> = HashMap::new();
    let mut deduped: Vec<ServiceTicketRecord> = Vec::new();

    for ticket in tickets {
        let key = ticket.dedupe_key();
        match index_by_key.get(&key) {
            Some(&position) => {
                if ticket.is_edited && !deduped[position].is_edited {
                    deduped[position] = ticket.clone();
                }
            }
            None => {
                index_by_key.insert(key, deduped.len());
                deduped.push(ticket.clone());
            }
        }
    }

    deduped
}

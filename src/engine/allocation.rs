//! Ticket-to-entry hour allocation.
//!
//! Each deduplicated ticket is matched to the time entries that produced it,
//! and its authoritative billed-hours total is distributed across rate-type
//! slices: directly from the edit map when an admin hand-corrected the
//! ticket, proportionally over the matching entries otherwise. The ticket
//! total is trusted over the entry total, because tickets reflect approved
//! billed reality while entries reflect raw clock time.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{
    RateType, ReportWarning, ServiceTicketRecord, TimeEntry, classify_rate_label, coerce_hours,
};

/// One allocated slice of billed hours for a single rate type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationSlice {
    /// The employee the hours belong to.
    pub user_id: String,
    /// The date of the ticketed work.
    pub date: NaiveDate,
    /// The rate type the hours are billed under.
    pub rate_type: RateType,
    /// The allocated billed hours.
    pub hours: Decimal,
    /// The legacy rate of the matched entry, for rate-resolution fallback.
    pub entry_rate: Option<Decimal>,
    /// Project attribution, from the matched entry or the ticket.
    pub project_id: Option<String>,
    /// Customer attribution, from the matched entry or the ticket.
    pub customer_id: Option<String>,
}

/// The result of allocating one window's tickets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocationResult {
    /// Allocated slices, in ticket order.
    pub slices: Vec<AllocationSlice>,
    /// Warnings for tickets and edit entries that needed a fallback.
    pub warnings: Vec<ReportWarning>,
}

/// Distributes each ticket's billed total across rate-type slices.
///
/// For a hand-edited ticket the edit map is authoritative: each key is
/// classified into a rate type and its hours allocated straight to that
/// type, with no proportional split. For an unedited ticket the matching
/// billable entries (same date and user; customer and project matched only
/// when the ticket specifies them) supply the proportions, and the ticket's
/// total is redistributed over them. A ticket with no matching entries
/// falls back to one shop-time slice for the whole total and is flagged for
/// operator visibility, since it may indicate entries that were deleted or
/// moved after the ticket was raised.
pub fn allocate_tickets(
    tickets: &[ServiceTicketRecord],
    entries: &[TimeEntry],
) -> AllocationResult {
    let mut result = AllocationResult::default();

    for ticket in tickets {
        if ticket.is_edited {
            allocate_edited(ticket, &mut result);
        } else {
            allocate_proportional(ticket, entries, &mut result);
        }
    }

    result
}

fn allocate_edited(ticket: &ServiceTicketRecord, result: &mut AllocationResult) {
    let Some(edited_hours) = &ticket.edited_hours else {
        // Flagged edited but carrying no edit map; nothing to allocate
        return;
    };

    for (label, value) in edited_hours {
        let Some(hours) = coerce_hours(value) else {
            warn!(
                user_id = %ticket.user_id,
                date = %ticket.date,
                key = %label,
                "Edited hours value is not coercible to a number; skipping key"
            );
            result.warnings.push(ReportWarning::edited_hours_skipped(
                &ticket.user_id,
                ticket.date,
                label,
            ));
            continue;
        };

        result.slices.push(AllocationSlice {
            user_id: ticket.user_id.clone(),
            date: ticket.date,
            rate_type: classify_rate_label(label),
            hours,
            entry_rate: None,
            project_id: ticket.project_id.clone(),
            customer_id: ticket.customer_id.clone(),
        });
    }
}

fn allocate_proportional(
    ticket: &ServiceTicketRecord,
    entries: &[TimeEntry],
    result: &mut AllocationResult,
) {
    let matching: Vec<&TimeEntry> = entries
        .iter()
        .filter(|entry| entry_matches_ticket(entry, ticket))
        .collect();

    let total_entry_hours: Decimal = matching.iter().map(|entry| entry.clamped_hours()).sum();
    let ticket_total = ticket.clamped_total_hours();

    if total_entry_hours > Decimal::ZERO {
        for entry in matching {
            let entry_hours = entry.clamped_hours();
            if entry_hours.is_zero() {
                continue;
            }
            result.slices.push(AllocationSlice {
                user_id: ticket.user_id.clone(),
                date: ticket.date,
                rate_type: entry.rate_type,
                hours: ticket_total * entry_hours / total_entry_hours,
                entry_rate: entry.rate,
                project_id: entry.project_id.clone().or_else(|| ticket.project_id.clone()),
                customer_id: entry
                    .customer_id
                    .clone()
                    .or_else(|| ticket.customer_id.clone()),
            });
        }
    } else if ticket_total > Decimal::ZERO {
        warn!(
            user_id = %ticket.user_id,
            date = %ticket.date,
            hours = %ticket_total,
            "Ticket matched no time entries; allocating total to shop time"
        );
        result.warnings.push(ReportWarning::unmatched_ticket(
            &ticket.user_id,
            ticket.date,
            ticket_total,
        ));
        result.slices.push(AllocationSlice {
            user_id: ticket.user_id.clone(),
            date: ticket.date,
            rate_type: RateType::ShopTime,
            hours: ticket_total,
            entry_rate: None,
            project_id: ticket.project_id.clone(),
            customer_id: ticket.customer_id.clone(),
        });
    }
}

// Entries billable on the ticket's date for the ticket's user; customer and
// project narrow the match only when the ticket specifies them.
fn entry_matches_ticket(entry: &TimeEntry, ticket: &ServiceTicketRecord) -> bool {
    if !entry.billable || entry.user_id != ticket.user_id || entry.date != ticket.date {
        return false;
    }
    if ticket.customer_id.is_some() && entry.customer_id != ticket.customer_id {
        return false;
    }
    if ticket.project_id.is_some() && entry.project_id != ticket.project_id {
        return false;
    }
    true
}

//! The reconciliation pipeline entry point.
//!
//! [`reconcile_window`] is a pure, synchronous function over already
//! materialized in-memory snapshots: raw time entries, raw service tickets,
//! and rate profiles for one reporting window. It performs no I/O, holds no
//! state between invocations, and produces a deterministic outcome, so
//! concurrent report generations need no coordination.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    CustomerBreakdown, DailyPoint, EmployeeMetrics, EmployeeRateProfile, ProjectBreakdown,
    RateTypeBreakdown, ReconciliationOutcome, ReconciliationReport, ReportTotals, ReportWarning,
    ReportingWindow, ServiceTicketRecord, TimeEntry, UNASSIGNED_KEY,
};

use super::allocation::{AllocationSlice, allocate_tickets};
use super::breakdown::{build_day_ledger, slice_revenue};
use super::dedupe::dedupe_tickets;
use super::reconcile::reconcile_day;
use super::rounding::{round_breakdown_hours, round_up_tenth};

/// Reconciles one reporting window into per-employee metrics and totals.
///
/// The full pipeline: filter to the window, deduplicate tickets, allocate
/// ticket totals across rate-type slices, accumulate and reconcile per
/// employee-day, then round once and roll up. Identical input snapshots
/// always produce an identical outcome.
///
/// Missing or malformed rate configuration never fails the run; it degrades
/// to documented fallbacks recorded in the outcome's warnings. The only
/// errors are input-contract violations: an inverted window or duplicate
/// profiles for one user.
pub fn reconcile_window(
    window: ReportingWindow,
    entries: &[TimeEntry],
    tickets: &[ServiceTicketRecord],
    profiles: &[EmployeeRateProfile],
) -> EngineResult<ReconciliationOutcome> {
    // Re-validate: the window's fields are public and may not have come
    // through the checked constructor.
    let window = ReportingWindow::new(window.start_date, window.end_date)?;

    let mut warnings = Vec::new();
    let profiles = normalize_profiles(profiles, &mut warnings)?;

    let entries: Vec<TimeEntry> = entries
        .iter()
        .filter(|entry| window.contains_date(entry.date))
        .cloned()
        .collect();
    let tickets: Vec<ServiceTicketRecord> = tickets
        .iter()
        .filter(|ticket| window.contains_date(ticket.date))
        .cloned()
        .collect();

    let deduped = dedupe_tickets(&tickets);
    let allocation = allocate_tickets(&deduped, &entries);

    let mut user_ids: BTreeSet<&str> = BTreeSet::new();
    user_ids.extend(entries.iter().map(|entry| entry.user_id.as_str()));
    user_ids.extend(deduped.iter().map(|ticket| ticket.user_id.as_str()));

    for user_id in &user_ids {
        if !profiles.contains_key(*user_id) {
            warn!(user_id = %user_id, "No rate profile; using zero rates");
            warnings.push(ReportWarning::missing_profile(user_id));
        }
    }
    warnings.extend(allocation.warnings.iter().cloned());

    let mut employees = Vec::with_capacity(user_ids.len());
    for user_id in &user_ids {
        let profile = profiles.get(*user_id);
        let user_entries: Vec<&TimeEntry> = entries
            .iter()
            .filter(|entry| entry.user_id == *user_id)
            .collect();
        let user_slices: Vec<&AllocationSlice> = allocation
            .slices
            .iter()
            .filter(|slice| slice.user_id == *user_id)
            .collect();
        let ticket_count = deduped
            .iter()
            .filter(|ticket| ticket.user_id == *user_id)
            .count();

        employees.push(build_employee_metrics(
            user_id,
            profile,
            &user_entries,
            &user_slices,
            ticket_count,
        ));
    }

    let totals = roll_up_totals(&employees);
    debug!(
        employees = employees.len(),
        tickets = deduped.len(),
        warnings = warnings.len(),
        "Reconciliation complete"
    );

    Ok(ReconciliationOutcome {
        window,
        employees,
        totals,
        warnings,
    })
}

/// Runs [`reconcile_window`] and stamps the outcome with run metadata.
pub fn generate_report(
    window: ReportingWindow,
    entries: &[TimeEntry],
    tickets: &[ServiceTicketRecord],
    profiles: &[EmployeeRateProfile],
) -> EngineResult<ReconciliationReport> {
    let outcome = reconcile_window(window, entries, tickets, profiles)?;
    Ok(ReconciliationReport::from_outcome(outcome))
}

fn normalize_profiles(
    profiles: &[EmployeeRateProfile],
    warnings: &mut Vec<ReportWarning>,
) -> EngineResult<BTreeMap<String, EmployeeRateProfile>> {
    let mut normalized = BTreeMap::new();
    for profile in profiles {
        let (profile, profile_warnings) = profile.normalize();
        warnings.extend(profile_warnings);
        if normalized
            .insert(profile.user_id.clone(), profile.clone())
            .is_some()
        {
            return Err(EngineError::InvalidProfile {
                user_id: profile.user_id,
                message: "duplicate profile for user".to_string(),
            });
        }
    }
    Ok(normalized)
}

fn build_employee_metrics(
    user_id: &str,
    profile: Option<&EmployeeRateProfile>,
    entries: &[&TimeEntry],
    slices: &[&AllocationSlice],
    ticket_count: usize,
) -> EmployeeMetrics {
    let mut entries_by_date: BTreeMap<NaiveDate, Vec<&TimeEntry>> = BTreeMap::new();
    for entry in entries {
        entries_by_date.entry(entry.date).or_default().push(entry);
    }
    let mut slices_by_date: BTreeMap<NaiveDate, Vec<&AllocationSlice>> = BTreeMap::new();
    for slice in slices {
        slices_by_date.entry(slice.date).or_default().push(slice);
    }

    let dates: BTreeSet<NaiveDate> = entries_by_date
        .keys()
        .chain(slices_by_date.keys())
        .copied()
        .collect();

    let mut buckets = RateTypeBreakdown::default();
    let mut daily = Vec::with_capacity(dates.len());
    for date in dates {
        let day_entries = entries_by_date.get(&date).map_or(&[][..], Vec::as_slice);
        let day_slices = slices_by_date.get(&date).map_or(&[][..], Vec::as_slice);

        let ledger = build_day_ledger(profile, day_entries, day_slices);
        let day_breakdown = reconcile_day(profile, &ledger);

        daily.push(DailyPoint {
            date,
            hours: ledger.payroll_total,
            revenue: day_breakdown.total_revenue(),
        });
        accumulate_breakdown(&mut buckets, &day_breakdown);
    }

    // Raw summaries before the single rounding pass
    let raw_total = buckets.total_hours();
    let raw_internal = buckets.internal.hours;
    let raw_billable = raw_total - raw_internal;
    let revenue = buckets.total_revenue();
    let cost = buckets.total_cost();

    round_breakdown_hours(&mut buckets);

    EmployeeMetrics {
        user_id: user_id.to_string(),
        buckets,
        total_hours: round_up_tenth(raw_total),
        billable_hours: round_up_tenth(raw_billable),
        non_billable_hours: round_up_tenth(raw_internal),
        revenue,
        cost,
        profit: revenue - cost,
        ticket_count,
        by_project: project_breakdown(profile, entries, slices),
        by_customer: customer_breakdown(profile, entries, slices),
        daily,
    }
}

fn accumulate_breakdown(acc: &mut RateTypeBreakdown, day: &RateTypeBreakdown) {
    for (kind, bucket) in day.iter() {
        let target = acc.bucket_mut(kind);
        target.hours += bucket.hours;
        target.revenue += bucket.revenue;
        target.cost += bucket.cost;
    }
}

fn project_breakdown(
    profile: Option<&EmployeeRateProfile>,
    entries: &[&TimeEntry],
    slices: &[&AllocationSlice],
) -> Vec<ProjectBreakdown> {
    let rows = keyed_breakdown(
        profile,
        entries,
        slices,
        |entry| entry.project_id.as_deref(),
        |slice| slice.project_id.as_deref(),
    );
    rows.into_iter()
        .map(|(project_id, (hours, revenue))| ProjectBreakdown {
            project_id,
            hours,
            revenue,
        })
        .collect()
}

fn customer_breakdown(
    profile: Option<&EmployeeRateProfile>,
    entries: &[&TimeEntry],
    slices: &[&AllocationSlice],
) -> Vec<CustomerBreakdown> {
    let rows = keyed_breakdown(
        profile,
        entries,
        slices,
        |entry| entry.customer_id.as_deref(),
        |slice| slice.customer_id.as_deref(),
    );
    rows.into_iter()
        .map(|(customer_id, (hours, revenue))| CustomerBreakdown {
            customer_id,
            hours,
            revenue,
        })
        .collect()
}

// Payroll hours keyed from entries, billed revenue keyed from slices.
fn keyed_breakdown(
    profile: Option<&EmployeeRateProfile>,
    entries: &[&TimeEntry],
    slices: &[&AllocationSlice],
    entry_key: impl Fn(&TimeEntry) -> Option<&str>,
    slice_key: impl Fn(&AllocationSlice) -> Option<&str>,
) -> BTreeMap<String, (Decimal, Decimal)> {
    let mut rows: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for entry in entries {
        let key = entry_key(entry).unwrap_or(UNASSIGNED_KEY).to_string();
        rows.entry(key).or_default().0 += entry.clamped_hours();
    }
    for slice in slices {
        let key = slice_key(slice).unwrap_or(UNASSIGNED_KEY).to_string();
        rows.entry(key).or_default().1 += slice_revenue(profile, slice);
    }
    rows
}

fn roll_up_totals(employees: &[EmployeeMetrics]) -> ReportTotals {
    let mut totals = ReportTotals::default();
    for employee in employees {
        totals.hours += employee.total_hours;
        totals.billable_hours += employee.billable_hours;
        totals.non_billable_hours += employee.non_billable_hours;
        totals.revenue += employee.revenue;
        totals.cost += employee.cost;
        totals.profit += employee.profit;
        totals.ticket_count += employee.ticket_count;
    }
    totals
}

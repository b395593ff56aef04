//! Output models for the reconciliation engine.
//!
//! This module contains the [`RateTypeBucket`] and [`EmployeeMetrics`] types
//! and their associated structures that capture all outputs from a
//! reconciliation run, including per-employee breakdowns, grand totals, and
//! warnings.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BucketKind, ReportingWindow};

/// Accumulated hours, billed revenue, and payroll cost for one bucket.
///
/// Profit is always `revenue - cost`, recomputed via [`RateTypeBucket::profit`]
/// and never stored independently.
///
/// # Example
///
/// ```
/// use recon_engine::models::RateTypeBucket;
/// use rust_decimal::Decimal;
///
/// let bucket = RateTypeBucket {
///     hours: Decimal::new(40, 1),
///     revenue: Decimal::from(440),
///     cost: Decimal::from(120),
/// };
/// assert_eq!(bucket.profit(), Decimal::from(320));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTypeBucket {
    /// Hours attributed to this bucket.
    pub hours: Decimal,
    /// Billed revenue attributed to this bucket.
    pub revenue: Decimal,
    /// Payroll cost attributed to this bucket.
    pub cost: Decimal,
}

impl RateTypeBucket {
    /// Returns the bucket's profit: `revenue - cost`.
    pub fn profit(&self) -> Decimal {
        self.revenue - self.cost
    }
}

/// The six canonical buckets for one employee over one reporting window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTypeBreakdown {
    /// Non-billable (internal) work, including reconciled unbilled time.
    pub internal: RateTypeBucket,
    /// Billable shop time.
    pub shop: RateTypeBucket,
    /// Billable field time.
    pub field: RateTypeBucket,
    /// Billable travel time.
    pub travel: RateTypeBucket,
    /// Billable shop overtime.
    pub shop_overtime: RateTypeBucket,
    /// Billable field overtime.
    pub field_overtime: RateTypeBucket,
}

impl RateTypeBreakdown {
    /// Returns a shared reference to the bucket for `kind`.
    pub fn bucket(&self, kind: BucketKind) -> &RateTypeBucket {
        match kind {
            BucketKind::Internal => &self.internal,
            BucketKind::Shop => &self.shop,
            BucketKind::Field => &self.field,
            BucketKind::Travel => &self.travel,
            BucketKind::ShopOvertime => &self.shop_overtime,
            BucketKind::FieldOvertime => &self.field_overtime,
        }
    }

    /// Returns a mutable reference to the bucket for `kind`.
    pub fn bucket_mut(&mut self, kind: BucketKind) -> &mut RateTypeBucket {
        match kind {
            BucketKind::Internal => &mut self.internal,
            BucketKind::Shop => &mut self.shop,
            BucketKind::Field => &mut self.field,
            BucketKind::Travel => &mut self.travel,
            BucketKind::ShopOvertime => &mut self.shop_overtime,
            BucketKind::FieldOvertime => &mut self.field_overtime,
        }
    }

    /// Iterates the six buckets in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (BucketKind, &RateTypeBucket)> {
        [
            BucketKind::Internal,
            BucketKind::Shop,
            BucketKind::Field,
            BucketKind::Travel,
            BucketKind::ShopOvertime,
            BucketKind::FieldOvertime,
        ]
        .into_iter()
        .map(move |kind| (kind, self.bucket(kind)))
    }

    /// Sums hours across all six buckets.
    pub fn total_hours(&self) -> Decimal {
        self.iter().map(|(_, bucket)| bucket.hours).sum()
    }

    /// Sums revenue across all six buckets.
    pub fn total_revenue(&self) -> Decimal {
        self.iter().map(|(_, bucket)| bucket.revenue).sum()
    }

    /// Sums cost across all six buckets.
    pub fn total_cost(&self) -> Decimal {
        self.iter().map(|(_, bucket)| bucket.cost).sum()
    }
}

/// Hours and revenue attributed to one project for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectBreakdown {
    /// The project id, or `"unassigned"` for entries without a project.
    pub project_id: String,
    /// Payroll hours logged against the project.
    pub hours: Decimal,
    /// Billed revenue allocated to the project.
    pub revenue: Decimal,
}

/// Hours and revenue attributed to one customer for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerBreakdown {
    /// The customer id, or `"unassigned"` for entries without a customer.
    pub customer_id: String,
    /// Payroll hours logged against the customer.
    pub hours: Decimal,
    /// Billed revenue allocated to the customer.
    pub revenue: Decimal,
}

/// One point in an employee's daily trend series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPoint {
    /// The date of the point.
    pub date: NaiveDate,
    /// Payroll hours logged on the date.
    pub hours: Decimal,
    /// Billed revenue allocated to the date.
    pub revenue: Decimal,
}

/// The full set of reconciled metrics for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeMetrics {
    /// The employee these metrics belong to.
    pub user_id: String,
    /// The six-bucket rate-type breakdown.
    pub buckets: RateTypeBreakdown,
    /// Total hours across all buckets, rounded up to the nearest 0.1.
    pub total_hours: Decimal,
    /// Billable hours (all buckets except internal), rounded up.
    pub billable_hours: Decimal,
    /// Non-billable (internal) hours, rounded up.
    pub non_billable_hours: Decimal,
    /// Total billed revenue.
    pub revenue: Decimal,
    /// Total payroll cost.
    pub cost: Decimal,
    /// Total profit: `revenue - cost`.
    pub profit: Decimal,
    /// Number of deduplicated service tickets attributed to the employee.
    pub ticket_count: usize,
    /// Per-project sub-breakdown, sorted by project id.
    pub by_project: Vec<ProjectBreakdown>,
    /// Per-customer sub-breakdown, sorted by customer id.
    pub by_customer: Vec<CustomerBreakdown>,
    /// Daily trend series, sorted by date.
    pub daily: Vec<DailyPoint>,
}

/// Grand totals rolled up over the employee set.
///
/// Grand totals sum the already-rounded per-employee figures without
/// re-rounding, consistent with payroll reporting conventions where
/// employee-level rounding is authoritative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotals {
    /// Total hours across all employees.
    pub hours: Decimal,
    /// Total billable hours across all employees.
    pub billable_hours: Decimal,
    /// Total non-billable hours across all employees.
    pub non_billable_hours: Decimal,
    /// Total billed revenue across all employees.
    pub revenue: Decimal,
    /// Total payroll cost across all employees.
    pub cost: Decimal,
    /// Total profit across all employees.
    pub profit: Decimal,
    /// Total deduplicated service tickets across all employees.
    pub ticket_count: usize,
}

/// A warning generated while building a report.
///
/// Warnings record the documented fallbacks the pipeline took instead of
/// failing, so operators can spot data-integrity issues that would otherwise
/// be silently absorbed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium", "high").
    pub severity: String,
}

impl ReportWarning {
    /// A stored overtime rate disagreed with 1.5x its base and was corrected.
    pub fn overtime_rate_corrected(
        user_id: &str,
        rate_label: &str,
        stored: Decimal,
        derived: Decimal,
    ) -> Self {
        ReportWarning {
            code: "OVERTIME_RATE_CORRECTED".to_string(),
            message: format!(
                "Stored {} of {} for user '{}' disagrees with 1.5x base; using {}",
                rate_label, stored, user_id, derived
            ),
            severity: "low".to_string(),
        }
    }

    /// A ticket matched no time entries and fell back to shop-time
    /// classification. Possible data-integrity issue: the entries may have
    /// been deleted or moved after the ticket was raised.
    pub fn unmatched_ticket(user_id: &str, date: NaiveDate, hours: Decimal) -> Self {
        ReportWarning {
            code: "UNMATCHED_TICKET".to_string(),
            message: format!(
                "Ticket for user '{}' on {} ({} hours) matched no time entries; \
                 allocated to shop time at the default rate",
                user_id, date, hours
            ),
            severity: "medium".to_string(),
        }
    }

    /// An employee in scope has no rate profile; zero rates were used.
    pub fn missing_profile(user_id: &str) -> Self {
        ReportWarning {
            code: "MISSING_RATE_PROFILE".to_string(),
            message: format!(
                "No rate profile for user '{}'; hours counted with zero revenue and cost",
                user_id
            ),
            severity: "medium".to_string(),
        }
    }

    /// An edited-hours value could not be coerced to a number and was skipped.
    pub fn edited_hours_skipped(user_id: &str, date: NaiveDate, key: &str) -> Self {
        ReportWarning {
            code: "EDITED_HOURS_SKIPPED".to_string(),
            message: format!(
                "Edited hours entry '{}' on ticket for user '{}' on {} is not numeric; skipped",
                key, user_id, date
            ),
            severity: "low".to_string(),
        }
    }
}

/// The deterministic output of one reconciliation run.
///
/// Identical input snapshots always produce an identical outcome, which is
/// what makes report generation idempotent and trivially testable. Run
/// metadata (id, timestamp) lives on [`ReconciliationReport`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationOutcome {
    /// The reporting window the outcome covers.
    pub window: ReportingWindow,
    /// Per-employee metrics, sorted by user id.
    pub employees: Vec<EmployeeMetrics>,
    /// Grand totals over the employee set.
    pub totals: ReportTotals,
    /// Warnings recorded during the run.
    pub warnings: Vec<ReportWarning>,
}

/// A reconciliation outcome stamped with run metadata for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Unique identifier for this report run.
    pub report_id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that produced the report.
    pub engine_version: String,
    /// The reporting window the report covers.
    pub window: ReportingWindow,
    /// Per-employee metrics, sorted by user id.
    pub employees: Vec<EmployeeMetrics>,
    /// Grand totals over the employee set.
    pub totals: ReportTotals,
    /// Warnings recorded during the run.
    pub warnings: Vec<ReportWarning>,
}

impl ReconciliationReport {
    /// Stamps a deterministic outcome with a fresh run id and timestamp.
    pub fn from_outcome(outcome: ReconciliationOutcome) -> Self {
        ReconciliationReport {
            report_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            window: outcome.window,
            employees: outcome.employees,
            totals: outcome.totals,
            warnings: outcome.warnings,
        }
    }
}

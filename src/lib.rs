//! Revenue/Cost Reconciliation Engine
//!
//! This crate reconciles two independently-edited records of the same work,
//! raw clock-time entries and customer-facing service tickets, into
//! per-employee, per-rate-type financial metrics (hours, billed revenue,
//! payroll cost, profit) over a reporting window.

#![warn(missing_docs)]

pub mod engine;
pub mod error;
pub mod models;

//! Payroll Reconciliation Engine
//!
//! This crate compares an HR compensation export against a payroll export,
//! classifies every employee as matched, mismatched, missing in HR or missing in
//! payroll, and summarizes the discrepancies by department.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod reconciliation;
pub mod report;

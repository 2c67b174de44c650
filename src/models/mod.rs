//! Core data models for the reconciliation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit_report;
mod employee_record;
mod outcome;
mod raw_row;
mod summary;
mod validation;

pub use audit_report::{AuditReport, RunParameters};
pub use employee_record::{EmployeeRecord, SourceDataset, SourceKind};
pub use outcome::{ComparedField, FieldDifference, OutcomeCategory, ReconciliationOutcome};
pub use raw_row::{REQUIRED_COLUMNS, RawRow};
pub use summary::{AuditStatistics, DepartmentSummary};
pub use validation::{SkippedRow, ValidationReport};

//! Employee compensation records and the datasets that hold them.
//!
//! This module defines the canonical [`EmployeeRecord`] produced by the normalizer,
//! the [`SourceKind`] provenance tag, and the immutable [`SourceDataset`].

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which system a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// The HR system of record.
    Hr,
    /// The payroll system.
    Payroll,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Hr => write!(f, "HR"),
            SourceKind::Payroll => write!(f, "Payroll"),
        }
    }
}

/// A validated compensation record for one employee in one source.
///
/// `employee_id` together with `pay_period_end` identifies one logical pay event.
///
/// # Examples
///
/// ```
/// use payroll_recon::models::EmployeeRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let record = EmployeeRecord {
///     employee_id: "EMP001".to_string(),
///     pay: Decimal::new(5_000_000, 2),
///     position: "Lecturer".to_string(),
///     department: "Physics".to_string(),
///     pay_period_end: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
///     row_index: 0,
/// };
/// assert_eq!(record.pay.to_string(), "50000.00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Unique identifier for the employee within its source.
    pub employee_id: String,
    /// The pay amount for the period.
    pub pay: Decimal,
    /// The employee's position title.
    pub position: String,
    /// The department the employee belongs to.
    pub department: String,
    /// The last day of the pay period.
    pub pay_period_end: NaiveDate,
    /// 0-based index of the input row this record was built from.
    pub row_index: usize,
}

/// An ordered, immutable collection of records from one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceDataset {
    source: SourceKind,
    records: Vec<EmployeeRecord>,
}

impl SourceDataset {
    /// Creates a dataset from already-normalized records, preserving their order.
    pub fn new(source: SourceKind, records: Vec<EmployeeRecord>) -> Self {
        Self { source, records }
    }

    /// Returns the provenance tag.
    pub fn source(&self) -> SourceKind {
        self.source
    }

    /// Returns the records in source order.
    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

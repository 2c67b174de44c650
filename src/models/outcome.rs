//! Reconciliation outcome models.
//!
//! This module contains the [`ReconciliationOutcome`] type, which classifies every
//! employee key seen in either source, and the [`FieldDifference`] entries that
//! describe a mismatch.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EmployeeRecord;

/// A record field that takes part in the comparison of matched keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparedField {
    /// Pay amount, compared with the configured tolerance.
    Pay,
    /// Position title, compared exactly.
    Position,
    /// Department, compared exactly.
    Department,
    /// Pay period end date, compared exactly.
    PayPeriodEnd,
}

impl ComparedField {
    /// The input column this field is read from.
    pub fn column_name(&self) -> &'static str {
        match self {
            ComparedField::Pay => "Pay",
            ComparedField::Position => "Position",
            ComparedField::Department => "Department",
            ComparedField::PayPeriodEnd => "PayPeriodEnd",
        }
    }
}

impl fmt::Display for ComparedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// One field that disagrees between the HR and payroll record.
///
/// # Example
///
/// ```
/// use payroll_recon::models::{ComparedField, FieldDifference};
/// use rust_decimal::Decimal;
///
/// let diff = FieldDifference {
///     field: ComparedField::Pay,
///     hr_value: "50000".to_string(),
///     payroll_value: "50500".to_string(),
///     delta: Some(Decimal::new(500, 0)),
/// };
/// assert!(diff.delta.unwrap().is_sign_positive());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDifference {
    /// The field that differs.
    pub field: ComparedField,
    /// The value held by HR.
    pub hr_value: String,
    /// The value held by payroll.
    pub payroll_value: String,
    /// Signed `payroll - hr` difference; only set for pay.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<Decimal>,
}

/// The category an outcome falls into, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeCategory {
    /// Present in payroll only.
    MissingInHr,
    /// Present in HR only.
    MissingInPayroll,
    /// Present in both with at least one differing field.
    Mismatched,
    /// Present in both and in agreement.
    Matched,
}

impl fmt::Display for OutcomeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeCategory::MissingInHr => write!(f, "missing_in_hr"),
            OutcomeCategory::MissingInPayroll => write!(f, "missing_in_payroll"),
            OutcomeCategory::Mismatched => write!(f, "mismatched"),
            OutcomeCategory::Matched => write!(f, "matched"),
        }
    }
}

/// The classification of a single employee key after reconciliation.
///
/// Serialized with a `status` tag, e.g. `{"status": "missing_in_hr", ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReconciliationOutcome {
    /// Both sources agree on every compared field.
    Matched {
        /// The reconciled employee.
        employee_id: String,
        /// The HR record.
        hr: EmployeeRecord,
        /// The payroll record.
        payroll: EmployeeRecord,
    },
    /// Both sources have the employee but disagree.
    Mismatched {
        /// The reconciled employee.
        employee_id: String,
        /// The HR record.
        hr: EmployeeRecord,
        /// The payroll record.
        payroll: EmployeeRecord,
        /// Only the fields that differ.
        differences: Vec<FieldDifference>,
    },
    /// Payroll pays an employee HR does not know about.
    MissingInHr {
        /// The unmatched employee.
        employee_id: String,
        /// The payroll record.
        payroll: EmployeeRecord,
    },
    /// HR lists an employee payroll does not pay.
    MissingInPayroll {
        /// The unmatched employee.
        employee_id: String,
        /// The HR record.
        hr: EmployeeRecord,
    },
}

impl ReconciliationOutcome {
    /// Returns the employee key of this outcome.
    pub fn employee_id(&self) -> &str {
        match self {
            ReconciliationOutcome::Matched { employee_id, .. }
            | ReconciliationOutcome::Mismatched { employee_id, .. }
            | ReconciliationOutcome::MissingInHr { employee_id, .. }
            | ReconciliationOutcome::MissingInPayroll { employee_id, .. } => employee_id,
        }
    }

    /// Returns the outcome category.
    pub fn category(&self) -> OutcomeCategory {
        match self {
            ReconciliationOutcome::Matched { .. } => OutcomeCategory::Matched,
            ReconciliationOutcome::Mismatched { .. } => OutcomeCategory::Mismatched,
            ReconciliationOutcome::MissingInHr { .. } => OutcomeCategory::MissingInHr,
            ReconciliationOutcome::MissingInPayroll { .. } => OutcomeCategory::MissingInPayroll,
        }
    }

    /// Returns the HR record, when HR has one.
    pub fn hr(&self) -> Option<&EmployeeRecord> {
        match self {
            ReconciliationOutcome::Matched { hr, .. }
            | ReconciliationOutcome::Mismatched { hr, .. }
            | ReconciliationOutcome::MissingInPayroll { hr, .. } => Some(hr),
            ReconciliationOutcome::MissingInHr { .. } => None,
        }
    }

    /// Returns the payroll record, when payroll has one.
    pub fn payroll(&self) -> Option<&EmployeeRecord> {
        match self {
            ReconciliationOutcome::Matched { payroll, .. }
            | ReconciliationOutcome::Mismatched { payroll, .. }
            | ReconciliationOutcome::MissingInHr { payroll, .. } => Some(payroll),
            ReconciliationOutcome::MissingInPayroll { .. } => None,
        }
    }

    /// Returns the field differences; empty for every category but `Mismatched`.
    pub fn differences(&self) -> &[FieldDifference] {
        match self {
            ReconciliationOutcome::Mismatched { differences, .. } => differences,
            _ => &[],
        }
    }

    /// Returns the signed pay delta (`payroll - hr`) if pay is among the differences.
    pub fn pay_delta(&self) -> Option<Decimal> {
        self.differences()
            .iter()
            .find(|d| d.field == ComparedField::Pay)
            .and_then(|d| d.delta)
    }

    /// The department this outcome is attributed to.
    ///
    /// HR is the source of truth for org attribution whenever it has a record;
    /// payroll-only outcomes fall back to the payroll department.
    pub fn attributed_department(&self) -> &str {
        match self {
            ReconciliationOutcome::Matched { hr, .. }
            | ReconciliationOutcome::Mismatched { hr, .. }
            | ReconciliationOutcome::MissingInPayroll { hr, .. } => &hr.department,
            ReconciliationOutcome::MissingInHr { payroll, .. } => &payroll.department,
        }
    }

    /// Returns true for every category other than `Matched`.
    pub fn is_discrepancy(&self) -> bool {
        self.category() != OutcomeCategory::Matched
    }
}

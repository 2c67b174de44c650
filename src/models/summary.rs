//! Derived summaries of a reconciliation run.
//!
//! Both types here are recomputed on every run and carry no identity of their own
//! beyond the run that produced them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-department discrepancy tallies.
///
/// # Example
///
/// ```
/// use payroll_recon::models::DepartmentSummary;
///
/// let summary = DepartmentSummary::new("Physics");
/// assert_eq!(summary.total_employees_considered, 0);
/// assert!(!summary.has_discrepancies());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentSummary {
    /// The attributed department.
    pub department: String,
    /// Keys in agreement.
    pub matched_count: usize,
    /// Keys present in both sources that disagree.
    pub mismatched_count: usize,
    /// Keys present in payroll only.
    pub missing_in_hr_count: usize,
    /// Keys present in HR only.
    pub missing_in_payroll_count: usize,
    /// Every key attributed to the department.
    pub total_employees_considered: usize,
    /// Sum of HR pay over attributed records that HR holds.
    pub hr_pay_total: Decimal,
    /// Sum of payroll pay over attributed records that payroll holds.
    pub payroll_pay_total: Decimal,
    /// Sum of absolute pay deltas over mismatched keys.
    pub pay_discrepancy: Decimal,
    /// `pay_discrepancy` as a percentage of `hr_pay_total`.
    pub discrepancy_percentage: Option<Decimal>,
}

impl DepartmentSummary {
    /// Creates an empty summary for a department.
    pub fn new(department: impl Into<String>) -> Self {
        Self {
            department: department.into(),
            matched_count: 0,
            mismatched_count: 0,
            missing_in_hr_count: 0,
            missing_in_payroll_count: 0,
            total_employees_considered: 0,
            hr_pay_total: Decimal::ZERO,
            payroll_pay_total: Decimal::ZERO,
            pay_discrepancy: Decimal::ZERO,
            discrepancy_percentage: None,
        }
    }

    /// Number of keys in any non-matched category.
    pub fn discrepancy_count(&self) -> usize {
        self.mismatched_count + self.missing_in_hr_count + self.missing_in_payroll_count
    }

    /// Returns true if the department has any non-matched key.
    pub fn has_discrepancies(&self) -> bool {
        self.discrepancy_count() > 0
    }
}

/// Headline statistics for one run, exported as the JSON summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStatistics {
    /// Identifier of the run.
    pub run_id: Uuid,
    /// When the run started.
    pub run_timestamp: DateTime<Utc>,
    /// Valid HR records reconciled.
    pub total_hr_records: usize,
    /// Valid payroll records reconciled.
    pub total_payroll_records: usize,
    /// Distinct keys across both sources.
    pub total_records: usize,
    /// Keys in agreement.
    pub match_count: usize,
    /// Keys in both sources that disagree.
    pub mismatch_count: usize,
    /// Keys present in payroll only.
    pub missing_in_hr_count: usize,
    /// Keys present in HR only.
    pub missing_in_payroll_count: usize,
    /// Sum of absolute pay deltas over mismatched keys.
    pub total_discrepancy_amount: Decimal,
    /// Percentage of keys with any discrepancy, rounded to two places.
    pub issue_rate: Decimal,
    /// Departments with at least one non-matched key.
    pub departments_with_discrepancies: usize,
    /// The department with the largest pay discrepancy, if any is non-zero.
    pub highest_discrepancy_department: Option<String>,
}

impl AuditStatistics {
    /// Total keys with a discrepancy of any kind.
    pub fn discrepancy_count(&self) -> usize {
        self.mismatch_count + self.missing_in_hr_count + self.missing_in_payroll_count
    }
}

//! Headline statistics for a reconciliation run.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{AuditStatistics, DepartmentSummary, OutcomeCategory};

use super::reconciler::ReconciliationSet;

/// Identity of a run: its id and start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStamp {
    /// Identifier of the run.
    pub run_id: Uuid,
    /// When the run started.
    pub run_timestamp: DateTime<Utc>,
}

impl RunStamp {
    /// Stamps a run starting now.
    pub fn now() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            run_timestamp: Utc::now(),
        }
    }
}

/// Computes run statistics from the outcome set and department summaries.
///
/// `total_hr_records` and `total_payroll_records` count valid (normalized) records.
pub fn compute_statistics(
    stamp: RunStamp,
    total_hr_records: usize,
    total_payroll_records: usize,
    set: &ReconciliationSet,
    departments: &[DepartmentSummary],
) -> AuditStatistics {
    let match_count = set.count(OutcomeCategory::Matched);
    let mismatch_count = set.count(OutcomeCategory::Mismatched);
    let missing_in_hr_count = set.count(OutcomeCategory::MissingInHr);
    let missing_in_payroll_count = set.count(OutcomeCategory::MissingInPayroll);
    let total_records = set.len();

    let discrepancies = mismatch_count + missing_in_hr_count + missing_in_payroll_count;
    let issue_rate = if total_records == 0 {
        Decimal::ZERO
    } else {
        (Decimal::from(discrepancies) / Decimal::from(total_records) * Decimal::ONE_HUNDRED)
            .round_dp(2)
    };

    AuditStatistics {
        run_id: stamp.run_id,
        run_timestamp: stamp.run_timestamp,
        total_hr_records,
        total_payroll_records,
        total_records,
        match_count,
        mismatch_count,
        missing_in_hr_count,
        missing_in_payroll_count,
        total_discrepancy_amount: set.total_pay_discrepancy(),
        issue_rate,
        departments_with_discrepancies: departments
            .iter()
            .filter(|d| d.has_discrepancies())
            .count(),
        highest_discrepancy_department: highest_discrepancy_department(departments),
    }
}

/// The department with the largest non-zero pay discrepancy.
///
/// Ties go to the department that sorts first by name.
fn highest_discrepancy_department(departments: &[DepartmentSummary]) -> Option<String> {
    let mut best: Option<&DepartmentSummary> = None;
    for summary in departments.iter().filter(|d| !d.pay_discrepancy.is_zero()) {
        let replace = match best {
            None => true,
            Some(current) => {
                summary.pay_discrepancy > current.pay_discrepancy
                    || (summary.pay_discrepancy == current.pay_discrepancy
                        && summary.department < current.department)
            }
        };
        if replace {
            best = Some(summary);
        }
    }
    best.map(|d| d.department.clone())
}

//! The complete result of one reconciliation run.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    AuditStatistics, ComparedField, DepartmentSummary, OutcomeCategory, ReconciliationOutcome,
    ValidationReport,
};

/// The comparison settings a run was performed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunParameters {
    /// Maximum pay difference still treated as equal.
    pub pay_tolerance: Decimal,
    /// Fields compared for keys present in both sources.
    pub compared_fields: Vec<ComparedField>,
    /// Accepted pay period end date format.
    pub date_format: String,
}

/// Everything a run produces, handed to the report writers.
///
/// Outcomes are held in reporting order: missing in HR, missing in payroll,
/// mismatched, matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    /// Headline statistics.
    pub statistics: AuditStatistics,
    /// The settings the run used.
    pub parameters: RunParameters,
    /// One entry per distinct employee key.
    pub outcomes: Vec<ReconciliationOutcome>,
    /// One entry per attributed department, sorted by name.
    pub departments: Vec<DepartmentSummary>,
    /// Normalization accounting for the HR source.
    pub hr_validation: ValidationReport,
    /// Normalization accounting for the payroll source.
    pub payroll_validation: ValidationReport,
}

impl AuditReport {
    /// Iterates the outcomes of a single category, in reporting order.
    pub fn outcomes_in(
        &self,
        category: OutcomeCategory,
    ) -> impl Iterator<Item = &ReconciliationOutcome> {
        self.outcomes
            .iter()
            .filter(move |o| o.category() == category)
    }

    /// Outcomes to surface in reports; `Matched` entries only when asked for.
    pub fn reportable_outcomes(&self, include_matched: bool) -> Vec<&ReconciliationOutcome> {
        self.outcomes
            .iter()
            .filter(|o| include_matched || o.is_discrepancy())
            .collect()
    }

    /// Total rows dropped across both sources.
    pub fn skipped_rows(&self) -> usize {
        self.hr_validation.skipped_rows() + self.payroll_validation.skipped_rows()
    }

    /// Returns a copy with `Matched` outcomes removed.
    pub fn without_matched(&self) -> Self {
        let mut report = self.clone();
        report.outcomes.retain(ReconciliationOutcome::is_discrepancy);
        report
    }
}

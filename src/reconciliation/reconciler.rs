//! The reconciliation algorithm.
//!
//! Given the HR and payroll indexes, every employee key lands in exactly one
//! [`OutcomeCategory`]. Keys present in both sources are compared field by field:
//! pay with an absolute tolerance, text fields exactly and case-sensitively.

use rust_decimal::Decimal;

use crate::config::ReconConfig;
use crate::models::{
    ComparedField, EmployeeRecord, FieldDifference, OutcomeCategory, ReconciliationOutcome,
};

use super::indexer::KeyIndex;

/// Returns true when two pay amounts differ by strictly more than `tolerance`.
///
/// A difference of exactly `tolerance` is not a mismatch.
///
/// # Examples
///
/// ```
/// use payroll_recon::reconciliation::pay_differs;
/// use rust_decimal::Decimal;
///
/// let tolerance = Decimal::new(1, 2); // 0.01
/// assert!(!pay_differs(Decimal::new(10000, 2), Decimal::new(10001, 2), tolerance));
/// assert!(pay_differs(Decimal::new(100000, 3), Decimal::new(100011, 3), tolerance));
/// ```
pub fn pay_differs(hr_pay: Decimal, payroll_pay: Decimal, tolerance: Decimal) -> bool {
    (payroll_pay - hr_pay).abs() > tolerance
}

/// All outcomes of one reconciliation, in reporting order.
///
/// Order: missing in HR (payroll source order), missing in payroll (HR source
/// order), mismatched (HR source order), matched (HR source order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationSet {
    outcomes: Vec<ReconciliationOutcome>,
}

impl ReconciliationSet {
    /// Returns every outcome in reporting order.
    pub fn outcomes(&self) -> &[ReconciliationOutcome] {
        &self.outcomes
    }

    /// Consumes the set, returning the outcomes.
    pub fn into_outcomes(self) -> Vec<ReconciliationOutcome> {
        self.outcomes
    }

    /// Number of outcomes in a category.
    pub fn count(&self, category: OutcomeCategory) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.category() == category)
            .count()
    }

    /// Number of keys present in both sources.
    pub fn both_keys_count(&self) -> usize {
        self.count(OutcomeCategory::Matched) + self.count(OutcomeCategory::Mismatched)
    }

    /// Every field-level mismatch, paired with its employee id.
    pub fn field_mismatches(&self) -> impl Iterator<Item = (&str, &FieldDifference)> {
        self.outcomes
            .iter()
            .flat_map(|o| o.differences().iter().map(move |d| (o.employee_id(), d)))
    }

    /// Sum of absolute pay deltas over mismatched keys.
    pub fn total_pay_discrepancy(&self) -> Decimal {
        self.outcomes
            .iter()
            .filter_map(ReconciliationOutcome::pay_delta)
            .map(|d| d.abs())
            .sum()
    }

    /// Number of outcomes.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns true if there are no outcomes.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Compares HR and payroll indexes and classifies every key.
#[derive(Debug, Clone)]
pub struct Reconciler {
    pay_tolerance: Decimal,
    compared_fields: Vec<ComparedField>,
}

impl Reconciler {
    /// Creates a reconciler with an explicit tolerance and field list.
    pub fn new(pay_tolerance: Decimal, compared_fields: Vec<ComparedField>) -> Self {
        Self {
            pay_tolerance,
            compared_fields,
        }
    }

    /// Creates a reconciler from run configuration.
    pub fn from_config(config: &ReconConfig) -> Self {
        Self::new(config.pay_tolerance, config.compared_fields.clone())
    }

    /// The absolute pay tolerance in use.
    pub fn pay_tolerance(&self) -> Decimal {
        self.pay_tolerance
    }

    /// Classifies every key of both indexes.
    ///
    /// Never fails: each key in `hr ∪ payroll` yields exactly one outcome.
    pub fn reconcile(&self, hr: &KeyIndex<'_>, payroll: &KeyIndex<'_>) -> ReconciliationSet {
        let mut outcomes = Vec::with_capacity(hr.len().max(payroll.len()));

        for record in payroll.iter().filter(|r| !hr.contains(&r.employee_id)) {
            outcomes.push(ReconciliationOutcome::MissingInHr {
                employee_id: record.employee_id.clone(),
                payroll: record.clone(),
            });
        }

        for record in hr.iter().filter(|r| !payroll.contains(&r.employee_id)) {
            outcomes.push(ReconciliationOutcome::MissingInPayroll {
                employee_id: record.employee_id.clone(),
                hr: record.clone(),
            });
        }

        let mut matched = Vec::new();
        for hr_record in hr.iter() {
            let Some(payroll_record) = payroll.get(&hr_record.employee_id) else {
                continue;
            };

            let differences = self.compare(hr_record, payroll_record);
            let employee_id = hr_record.employee_id.clone();
            if differences.is_empty() {
                matched.push(ReconciliationOutcome::Matched {
                    employee_id,
                    hr: hr_record.clone(),
                    payroll: payroll_record.clone(),
                });
            } else {
                outcomes.push(ReconciliationOutcome::Mismatched {
                    employee_id,
                    hr: hr_record.clone(),
                    payroll: payroll_record.clone(),
                    differences,
                });
            }
        }
        outcomes.extend(matched);

        ReconciliationSet { outcomes }
    }

    /// Compares two records of the same employee, returning only differing fields.
    ///
    /// Fields are reported in the configured order.
    pub fn compare(&self, hr: &EmployeeRecord, payroll: &EmployeeRecord) -> Vec<FieldDifference> {
        self.compared_fields
            .iter()
            .filter_map(|&field| self.compare_field(field, hr, payroll))
            .collect()
    }

    fn compare_field(
        &self,
        field: ComparedField,
        hr: &EmployeeRecord,
        payroll: &EmployeeRecord,
    ) -> Option<FieldDifference> {
        match field {
            ComparedField::Pay => {
                if !pay_differs(hr.pay, payroll.pay, self.pay_tolerance) {
                    return None;
                }
                Some(FieldDifference {
                    field,
                    hr_value: hr.pay.to_string(),
                    payroll_value: payroll.pay.to_string(),
                    delta: Some(payroll.pay - hr.pay),
                })
            }
            ComparedField::Position => text_difference(field, &hr.position, &payroll.position),
            ComparedField::Department => {
                text_difference(field, &hr.department, &payroll.department)
            }
            ComparedField::PayPeriodEnd => text_difference(
                field,
                &hr.pay_period_end.to_string(),
                &payroll.pay_period_end.to_string(),
            ),
        }
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::from_config(&ReconConfig::default())
    }
}

fn text_difference(field: ComparedField, hr: &str, payroll: &str) -> Option<FieldDifference> {
    (hr != payroll).then(|| FieldDifference {
        field,
        hr_value: hr.to_string(),
        payroll_value: payroll.to_string(),
        delta: None,
    })
}

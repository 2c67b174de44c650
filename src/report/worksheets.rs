//! Flat row shapes for the CSV worksheets.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{DepartmentSummary, EmployeeRecord, ReconciliationOutcome};

/// A key present in both sources, one row per employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    #[serde(rename = "EmployeeID")]
    pub employee_id: String,
    #[serde(rename = "Department")]
    pub department: String,
    #[serde(rename = "Pay_HR")]
    pub pay_hr: Decimal,
    #[serde(rename = "Pay_Payroll")]
    pub pay_payroll: Decimal,
    #[serde(rename = "Discrepancy")]
    pub discrepancy: Decimal,
    #[serde(rename = "Position_HR")]
    pub position_hr: String,
    #[serde(rename = "Position_Payroll")]
    pub position_payroll: String,
    #[serde(rename = "Department_HR")]
    pub department_hr: String,
    #[serde(rename = "Department_Payroll")]
    pub department_payroll: String,
    #[serde(rename = "PayPeriodEnd_HR")]
    pub pay_period_end_hr: String,
    #[serde(rename = "PayPeriodEnd_Payroll")]
    pub pay_period_end_payroll: String,
    /// Semicolon-separated compared fields that disagree.
    #[serde(rename = "MismatchedFields")]
    pub mismatched_fields: String,
}

impl ComparisonRow {
    /// Builds a row from a two-sided outcome; one-sided outcomes yield `None`.
    pub fn from_outcome(outcome: &ReconciliationOutcome) -> Option<Self> {
        let (hr, payroll) = (outcome.hr()?, outcome.payroll()?);
        let mismatched_fields = outcome
            .differences()
            .iter()
            .map(|d| d.field.column_name())
            .collect::<Vec<_>>()
            .join(";");

        Some(Self {
            employee_id: outcome.employee_id().to_string(),
            department: outcome.attributed_department().to_string(),
            pay_hr: hr.pay,
            pay_payroll: payroll.pay,
            discrepancy: (payroll.pay - hr.pay).abs(),
            position_hr: hr.position.clone(),
            position_payroll: payroll.position.clone(),
            department_hr: hr.department.clone(),
            department_payroll: payroll.department.clone(),
            pay_period_end_hr: hr.pay_period_end.to_string(),
            pay_period_end_payroll: payroll.pay_period_end.to_string(),
            mismatched_fields,
        })
    }
}

/// A key present in one source only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordRow {
    #[serde(rename = "EmployeeID")]
    pub employee_id: String,
    #[serde(rename = "Pay")]
    pub pay: Decimal,
    #[serde(rename = "Position")]
    pub position: String,
    #[serde(rename = "Department")]
    pub department: String,
    #[serde(rename = "PayPeriodEnd")]
    pub pay_period_end: String,
    /// 0-based row in the source that holds the record.
    #[serde(rename = "SourceRow")]
    pub source_row: usize,
}

impl From<&EmployeeRecord> for RecordRow {
    fn from(record: &EmployeeRecord) -> Self {
        Self {
            employee_id: record.employee_id.clone(),
            pay: record.pay,
            position: record.position.clone(),
            department: record.department.clone(),
            pay_period_end: record.pay_period_end.to_string(),
            source_row: record.row_index,
        }
    }
}

/// One department's tallies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentRow {
    #[serde(rename = "Department")]
    pub department: String,
    #[serde(rename = "Matched")]
    pub matched: usize,
    #[serde(rename = "Mismatched")]
    pub mismatched: usize,
    #[serde(rename = "MissingInHR")]
    pub missing_in_hr: usize,
    #[serde(rename = "MissingInPayroll")]
    pub missing_in_payroll: usize,
    #[serde(rename = "TotalEmployees")]
    pub total_employees: usize,
    #[serde(rename = "Pay_HR")]
    pub pay_hr: Decimal,
    #[serde(rename = "Pay_Payroll")]
    pub pay_payroll: Decimal,
    #[serde(rename = "Discrepancy")]
    pub discrepancy: Decimal,
    /// Empty when the department has no HR pay.
    #[serde(rename = "DiscrepancyPercentage")]
    pub discrepancy_percentage: Option<Decimal>,
}

impl From<&DepartmentSummary> for DepartmentRow {
    fn from(summary: &DepartmentSummary) -> Self {
        Self {
            department: summary.department.clone(),
            matched: summary.matched_count,
            mismatched: summary.mismatched_count,
            missing_in_hr: summary.missing_in_hr_count,
            missing_in_payroll: summary.missing_in_payroll_count,
            total_employees: summary.total_employees_considered,
            pay_hr: summary.hr_pay_total,
            pay_payroll: summary.payroll_pay_total,
            discrepancy: summary.pay_discrepancy,
            discrepancy_percentage: summary.discrepancy_percentage,
        }
    }
}

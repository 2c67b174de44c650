//! Department-level aggregation of reconciliation outcomes.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{DepartmentSummary, OutcomeCategory, ReconciliationOutcome};

/// Groups outcomes by attributed department and tallies each category.
///
/// Attribution follows [`ReconciliationOutcome::attributed_department`]: the HR
/// department whenever HR holds the employee, the payroll department otherwise.
/// The result is sorted by department name and does not depend on outcome order.
///
/// # Examples
///
/// ```
/// use payroll_recon::reconciliation::summarize_departments;
///
/// let summaries = summarize_departments(&[]);
/// assert!(summaries.is_empty());
/// ```
pub fn summarize_departments(outcomes: &[ReconciliationOutcome]) -> Vec<DepartmentSummary> {
    let mut departments: BTreeMap<&str, DepartmentSummary> = BTreeMap::new();

    for outcome in outcomes {
        let department = outcome.attributed_department();
        let summary = departments
            .entry(department)
            .or_insert_with(|| DepartmentSummary::new(department));

        summary.total_employees_considered += 1;
        match outcome.category() {
            OutcomeCategory::Matched => summary.matched_count += 1,
            OutcomeCategory::Mismatched => summary.mismatched_count += 1,
            OutcomeCategory::MissingInHr => summary.missing_in_hr_count += 1,
            OutcomeCategory::MissingInPayroll => summary.missing_in_payroll_count += 1,
        }

        if let Some(hr) = outcome.hr() {
            summary.hr_pay_total += hr.pay;
        }
        if let Some(payroll) = outcome.payroll() {
            summary.payroll_pay_total += payroll.pay;
        }
        if let Some(delta) = outcome.pay_delta() {
            summary.pay_discrepancy += delta.abs();
        }
    }

    departments
        .into_values()
        .map(|mut summary| {
            summary.discrepancy_percentage =
                discrepancy_percentage(summary.pay_discrepancy, summary.hr_pay_total);
            summary
        })
        .collect()
}

/// `discrepancy / base * 100`, rounded to two places.
///
/// `None` when `base` is zero or the ratio does not fit in a `Decimal`.
fn discrepancy_percentage(discrepancy: Decimal, base: Decimal) -> Option<Decimal> {
    discrepancy
        .checked_div(base)?
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|percentage| percentage.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ComparedField, EmployeeRecord, FieldDifference};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_record(id: &str, pay: &str, department: &str) -> EmployeeRecord {
        EmployeeRecord {
            employee_id: id.to_string(),
            pay: dec(pay),
            position: "Coordinator".to_string(),
            department: department.to_string(),
            pay_period_end: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            row_index: 0,
        }
    }

    fn mismatched(
        id: &str,
        hr_pay: &str,
        payroll_pay: &str,
        department: &str,
    ) -> ReconciliationOutcome {
        ReconciliationOutcome::Mismatched {
            employee_id: id.to_string(),
            hr: create_record(id, hr_pay, department),
            payroll: create_record(id, payroll_pay, department),
            differences: vec![FieldDifference {
                field: ComparedField::Pay,
                hr_value: hr_pay.to_string(),
                payroll_value: payroll_pay.to_string(),
                delta: Some(dec(payroll_pay) - dec(hr_pay)),
            }],
        }
    }

    fn create_outcomes() -> Vec<ReconciliationOutcome> {
        vec![
            ReconciliationOutcome::MissingInHr {
                employee_id: "TEMP001".to_string(),
                payroll: create_record("TEMP001", "900", "Facilities"),
            },
            ReconciliationOutcome::MissingInPayroll {
                employee_id: "ADJ002".to_string(),
                hr: create_record("ADJ002", "2000", "Biology"),
            },
            mismatched("ADJ001", "1000", "1100", "Biology"),
            mismatched("EMP007", "500", "450", "Biology"),
            ReconciliationOutcome::Matched {
                employee_id: "EMP001".to_string(),
                hr: create_record("EMP001", "1000", "Biology"),
                payroll: create_record("EMP001", "1000", "Biology"),
            },
        ]
    }

    #[test]
    fn test_departments_sorted_by_name() {
        let summaries = summarize_departments(&create_outcomes());
        let names: Vec<&str> = summaries.iter().map(|s| s.department.as_str()).collect();
        assert_eq!(names, vec!["Biology", "Facilities"]);
    }

    #[test]
    fn test_category_tallies() {
        let summaries = summarize_departments(&create_outcomes());
        let biology = &summaries[0];

        assert_eq!(biology.matched_count, 1);
        assert_eq!(biology.mismatched_count, 2);
        assert_eq!(biology.missing_in_payroll_count, 1);
        assert_eq!(biology.missing_in_hr_count, 0);
        assert_eq!(biology.total_employees_considered, 4);

        let facilities = &summaries[1];
        assert_eq!(facilities.missing_in_hr_count, 1);
        assert_eq!(facilities.total_employees_considered, 1);
    }

    #[test]
    fn test_pay_totals_and_discrepancy() {
        let summaries = summarize_departments(&create_outcomes());
        let biology = &summaries[0];

        // HR: 2000 + 1000 + 500 + 1000
        assert_eq!(biology.hr_pay_total, dec("4500"));
        // Payroll: 1100 + 450 + 1000
        assert_eq!(biology.payroll_pay_total, dec("2550"));
        // |+100| + |-50|
        assert_eq!(biology.pay_discrepancy, dec("150"));
        assert_eq!(biology.discrepancy_percentage, Some(dec("3.33")));
    }

    #[test]
    fn test_payroll_only_department_has_no_percentage() {
        let summaries = summarize_departments(&create_outcomes());
        let facilities = &summaries[1];
        assert_eq!(facilities.hr_pay_total, Decimal::ZERO);
        assert_eq!(facilities.payroll_pay_total, dec("900"));
        assert_eq!(facilities.discrepancy_percentage, None);
    }

    #[test]
    fn test_percentage_out_of_range_is_none() {
        let outcomes = vec![mismatched(
            "EMP010",
            "0.0000000000000000000000000001",
            "1000000000000",
            "Physics",
        )];
        let summaries = summarize_departments(&outcomes);
        assert!(summaries[0].pay_discrepancy > dec("999999999999"));
        assert_eq!(summaries[0].discrepancy_percentage, None);

        assert_eq!(discrepancy_percentage(Decimal::MAX, dec("0.5")), None);
        assert_eq!(discrepancy_percentage(dec("1"), Decimal::ZERO), None);
    }

    #[test]
    fn test_hr_only_employee_uses_hr_department() {
        let outcomes = vec![ReconciliationOutcome::MissingInPayroll {
            employee_id: "ADJ002".to_string(),
            hr: create_record("ADJ002", "100", "Mathematics"),
        }];
        let summaries = summarize_departments(&outcomes);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].department, "Mathematics");
        assert_eq!(summaries[0].missing_in_payroll_count, 1);
    }

    #[test]
    fn test_department_change_attributed_to_hr_side() {
        let outcomes = vec![ReconciliationOutcome::Mismatched {
            employee_id: "EMP003".to_string(),
            hr: create_record("EMP003", "100", "Physics"),
            payroll: create_record("EMP003", "100", "Chemistry"),
            differences: vec![FieldDifference {
                field: ComparedField::Department,
                hr_value: "Physics".to_string(),
                payroll_value: "Chemistry".to_string(),
                delta: None,
            }],
        }];

        let summaries = summarize_departments(&outcomes);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].department, "Physics");
        assert_eq!(summaries[0].pay_discrepancy, Decimal::ZERO);
    }

    #[test]
    fn test_aggregation_independent_of_order() {
        let outcomes = create_outcomes();
        let mut reversed = outcomes.clone();
        reversed.reverse();
        assert_eq!(
            summarize_departments(&outcomes),
            summarize_departments(&reversed)
        );
    }
}

//! Record normalization.
//!
//! Turns loosely-typed [`RawRow`]s into [`EmployeeRecord`]s. Column lookup by name
//! happens here and nowhere else.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::warn;

use crate::error::{AuditError, AuditResult};
use crate::models::{EmployeeRecord, RawRow, SourceDataset, SourceKind, ValidationReport};

/// Largest accepted pay amount: one trillion.
///
/// Keeps every per-run sum and difference well inside `Decimal` range.
pub const MAX_PAY: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// A normalized source together with the accounting of skipped rows.
#[derive(Debug, Clone)]
pub struct NormalizedSource {
    /// The valid records, in input order.
    pub dataset: SourceDataset,
    /// What was accepted and what was skipped.
    pub report: ValidationReport,
}

/// Normalizes a single raw row.
///
/// Required columns are checked in the order `EmployeeID`, `Pay`, `Position`,
/// `Department`, `PayPeriodEnd`; the first failure is returned.
///
/// # Errors
///
/// - `MissingField` when a column is absent, null, or blank
/// - `InvalidPayFormat` when `Pay` is not a number between zero and [`MAX_PAY`]
/// - `InvalidDateFormat` when `PayPeriodEnd` does not match `date_format`
///
/// # Examples
///
/// ```
/// use payroll_recon::models::RawRow;
/// use payroll_recon::reconciliation::normalize_row;
///
/// let row = RawRow::new(0)
///     .with("EmployeeID", "EMP001")
///     .with("Pay", "$52,000.00")
///     .with("Position", "Lecturer")
///     .with("Department", "Physics")
///     .with("PayPeriodEnd", "2025-01-31");
///
/// let record = normalize_row(&row, "%Y-%m-%d").unwrap();
/// assert_eq!(record.pay.to_string(), "52000.00");
/// ```
pub fn normalize_row(row: &RawRow, date_format: &str) -> AuditResult<EmployeeRecord> {
    let employee_id = required_text(row, "EmployeeID")?;

    let pay_text = required_text(row, "Pay")?;
    let pay = parse_pay(&pay_text).ok_or_else(|| AuditError::InvalidPayFormat {
        row_index: row.row_index,
        value: pay_text.clone(),
    })?;

    let position = required_text(row, "Position")?;
    let department = required_text(row, "Department")?;

    let date_text = required_text(row, "PayPeriodEnd")?;
    let pay_period_end = NaiveDate::parse_from_str(&date_text, date_format).map_err(|_| {
        AuditError::InvalidDateFormat {
            row_index: row.row_index,
            value: date_text.clone(),
            format: date_format.to_string(),
        }
    })?;

    Ok(EmployeeRecord {
        employee_id,
        pay,
        position,
        department,
        pay_period_end,
        row_index: row.row_index,
    })
}

/// Normalizes every row of a source, skipping (and recording) invalid ones.
///
/// Never fails: row-level errors are logged at `warn` and collected into the
/// returned [`ValidationReport`].
pub fn normalize_rows(source: SourceKind, rows: &[RawRow], date_format: &str) -> NormalizedSource {
    let mut report = ValidationReport::new(source);
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        match normalize_row(row, date_format) {
            Ok(record) => {
                report.record_valid();
                records.push(record);
            }
            Err(err) => {
                warn!(
                    source = %source,
                    row_index = row.row_index,
                    code = err.code(),
                    error = %err,
                    "Skipping invalid row"
                );
                report.record_skipped(&err);
            }
        }
    }

    NormalizedSource {
        dataset: SourceDataset::new(source, records),
        report,
    }
}

/// Reads a column as trimmed text, treating null and blank as missing.
fn required_text(row: &RawRow, column: &str) -> AuditResult<String> {
    let missing = || AuditError::MissingField {
        field: column.to_string(),
        row_index: row.row_index,
    };

    let text = match row.get(column) {
        None | Some(Value::Null) => return Err(missing()),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    };

    if text.is_empty() {
        return Err(missing());
    }
    Ok(text)
}

/// Parses a pay amount, tolerating a leading `$` and thousands separators.
///
/// Returns `None` for anything that is not a number in `0..=MAX_PAY`.
fn parse_pay(text: &str) -> Option<Decimal> {
    let unsigned = text.strip_prefix('$').unwrap_or(text);
    let cleaned: String = unsigned.chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.trim();

    let pay = Decimal::from_str(cleaned)
        .or_else(|_| Decimal::from_scientific(cleaned))
        .ok()?;

    if pay < Decimal::ZERO || pay > MAX_PAY {
        return None;
    }
    Some(pay)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATE_FORMAT: &str = "%Y-%m-%d";

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_valid_row(index: usize, id: &str) -> RawRow {
        RawRow::new(index)
            .with("EmployeeID", id)
            .with("Pay", "4800.00")
            .with("Position", "Librarian")
            .with("Department", "Library")
            .with("PayPeriodEnd", "2025-02-28")
    }

    #[test]
    fn test_normalize_valid_row() {
        let record = normalize_row(&create_valid_row(4, "EMP004"), DATE_FORMAT).unwrap();
        assert_eq!(record.employee_id, "EMP004");
        assert_eq!(record.pay, dec("4800.00"));
        assert_eq!(record.position, "Librarian");
        assert_eq!(record.department, "Library");
        assert_eq!(
            record.pay_period_end,
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
        assert_eq!(record.row_index, 4);
    }

    #[test]
    fn test_text_fields_are_trimmed() {
        let row = create_valid_row(0, "  EMP001 ").with("Department", " Physics\t");
        let record = normalize_row(&row, DATE_FORMAT).unwrap();
        assert_eq!(record.employee_id, "EMP001");
        assert_eq!(record.department, "Physics");
    }

    #[test]
    fn test_numeric_json_pay_accepted() {
        let row = create_valid_row(0, "EMP001").with("Pay", 50000);
        let record = normalize_row(&row, DATE_FORMAT).unwrap();
        assert_eq!(record.pay, dec("50000"));

        let row = create_valid_row(0, "EMP001").with("Pay", 1234.5);
        let record = normalize_row(&row, DATE_FORMAT).unwrap();
        assert_eq!(record.pay, dec("1234.5"));
    }

    #[test]
    fn test_currency_symbol_and_separators_accepted() {
        let row = create_valid_row(0, "EMP001").with("Pay", "$1,250,000.75");
        let record = normalize_row(&row, DATE_FORMAT).unwrap();
        assert_eq!(record.pay, dec("1250000.75"));
    }

    #[test]
    fn test_scientific_notation_accepted() {
        let row = create_valid_row(0, "EMP001").with("Pay", "5e4");
        let record = normalize_row(&row, DATE_FORMAT).unwrap();
        assert_eq!(record.pay, dec("50000"));
    }

    #[test]
    fn test_zero_pay_accepted() {
        let row = create_valid_row(0, "EMP001").with("Pay", "0");
        assert_eq!(normalize_row(&row, DATE_FORMAT).unwrap().pay, Decimal::ZERO);
    }

    #[test]
    fn test_missing_column_reports_field_and_row() {
        let mut row = create_valid_row(9, "EMP009");
        row.fields.remove("Position");

        let err = normalize_row(&row, DATE_FORMAT).unwrap_err();
        assert_eq!(
            err,
            AuditError::MissingField {
                field: "Position".to_string(),
                row_index: 9,
            }
        );
    }

    #[test]
    fn test_blank_and_null_values_are_missing() {
        let row = create_valid_row(1, "EMP001").with("Department", "   ");
        assert!(matches!(
            normalize_row(&row, DATE_FORMAT),
            Err(AuditError::MissingField { ref field, .. }) if field == "Department"
        ));

        let row = create_valid_row(1, "EMP001").with("EmployeeID", Value::Null);
        assert!(matches!(
            normalize_row(&row, DATE_FORMAT),
            Err(AuditError::MissingField { ref field, .. }) if field == "EmployeeID"
        ));
    }

    #[test]
    fn test_negative_pay_rejected() {
        let row = create_valid_row(2, "EMP002").with("Pay", "-100.00");
        assert_eq!(
            normalize_row(&row, DATE_FORMAT).unwrap_err(),
            AuditError::InvalidPayFormat {
                row_index: 2,
                value: "-100.00".to_string(),
            }
        );
    }

    #[test]
    fn test_max_pay_is_one_trillion() {
        assert_eq!(MAX_PAY, dec("1000000000000"));
    }

    #[test]
    fn test_pay_above_ceiling_rejected() {
        let row = create_valid_row(0, "EMP001").with("Pay", "1000000000000");
        assert_eq!(normalize_row(&row, DATE_FORMAT).unwrap().pay, MAX_PAY);

        for value in [
            "1000000000000.01",
            "79228162514264337593543950335",
            "1e27",
        ] {
            let row = create_valid_row(5, "EMP001").with("Pay", value);
            assert_eq!(
                normalize_row(&row, DATE_FORMAT).unwrap_err(),
                AuditError::InvalidPayFormat {
                    row_index: 5,
                    value: value.to_string(),
                }
            );
        }
    }

    #[test]
    fn test_non_numeric_pay_rejected() {
        let row = create_valid_row(2, "EMP002").with("Pay", "twelve");
        assert!(matches!(
            normalize_row(&row, DATE_FORMAT),
            Err(AuditError::InvalidPayFormat { .. })
        ));
    }

    #[test]
    fn test_wrong_date_format_rejected() {
        let row = create_valid_row(3, "EMP003").with("PayPeriodEnd", "02/28/2025");
        assert_eq!(
            normalize_row(&row, DATE_FORMAT).unwrap_err(),
            AuditError::InvalidDateFormat {
                row_index: 3,
                value: "02/28/2025".to_string(),
                format: DATE_FORMAT.to_string(),
            }
        );
    }

    #[test]
    fn test_configured_date_format_used() {
        let row = create_valid_row(3, "EMP003").with("PayPeriodEnd", "02/28/2025");
        let record = normalize_row(&row, "%m/%d/%Y").unwrap();
        assert_eq!(
            record.pay_period_end,
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
    }

    #[test]
    fn test_impossible_date_rejected() {
        let row = create_valid_row(0, "EMP001").with("PayPeriodEnd", "2025-02-30");
        assert!(matches!(
            normalize_row(&row, DATE_FORMAT),
            Err(AuditError::InvalidDateFormat { .. })
        ));
    }

    #[test]
    fn test_normalize_rows_skips_and_accounts() {
        let rows = vec![
            create_valid_row(0, "EMP001"),
            create_valid_row(1, "EMP002").with("Pay", "n/a"),
            create_valid_row(2, "EMP003"),
            create_valid_row(3, "").with("Pay", "10"),
        ];

        let normalized = normalize_rows(SourceKind::Payroll, &rows, DATE_FORMAT);

        assert_eq!(normalized.dataset.source(), SourceKind::Payroll);
        assert_eq!(normalized.dataset.len(), 2);
        assert_eq!(normalized.dataset.records()[0].employee_id, "EMP001");
        assert_eq!(normalized.dataset.records()[1].employee_id, "EMP003");

        let report = &normalized.report;
        assert_eq!(report.total_input_rows, 4);
        assert_eq!(report.valid_rows, 2);
        assert_eq!(report.skipped_rows(), 2);
        assert!(report.is_balanced());
        assert_eq!(report.skipped[0].row_index, 1);
        assert_eq!(report.skipped[0].code, "INVALID_PAY_FORMAT");
        assert_eq!(report.skipped[1].row_index, 3);
        assert_eq!(report.skipped[1].code, "MISSING_FIELD");
    }
}

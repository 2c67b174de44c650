//! Error types for the payroll reconciliation engine.
//!
//! Row-level variants ([`AuditError::MissingField`], [`AuditError::InvalidPayFormat`],
//! [`AuditError::InvalidDateFormat`]) are recoverable: the normalizer reports them and
//! the caller skips the row. Every other variant aborts the run.

use thiserror::Error;

use crate::models::SourceKind;

/// The main error type for the reconciliation engine.
///
/// # Example
///
/// ```
/// use payroll_recon::error::AuditError;
///
/// let error = AuditError::MissingField {
///     field: "Pay".to_string(),
///     row_index: 3,
/// };
/// assert_eq!(error.to_string(), "Row 3: missing required field 'Pay'");
/// assert!(error.is_row_level());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditError {
    /// A required field was absent or empty.
    #[error("Row {row_index}: missing required field '{field}'")]
    MissingField {
        /// The column name that was missing.
        field: String,
        /// 0-based index of the row within its source.
        row_index: usize,
    },

    /// The pay value was not a non-negative number.
    #[error("Row {row_index}: invalid pay value '{value}'")]
    InvalidPayFormat {
        /// 0-based index of the row within its source.
        row_index: usize,
        /// The raw value as read.
        value: String,
    },

    /// The pay period end date did not match the accepted format.
    #[error("Row {row_index}: invalid pay period end date '{value}' (expected format {format})")]
    InvalidDateFormat {
        /// 0-based index of the row within its source.
        row_index: usize,
        /// The raw value as read.
        value: String,
        /// The accepted `chrono` format string.
        format: String,
    },

    /// The same employee appeared twice in one source.
    #[error(
        "Duplicate employee '{employee_id}' in {dataset} data (rows {first_row} and {second_row})"
    )]
    DuplicateKey {
        /// The source containing the duplicate.
        dataset: SourceKind,
        /// The duplicated employee identifier.
        employee_id: String,
        /// Row index of the first occurrence.
        first_row: usize,
        /// Row index of the repeated occurrence.
        second_row: usize,
    },

    /// A source had no valid records left after normalization.
    #[error("{dataset} data contains no valid records")]
    EmptyDataset {
        /// The empty source.
        dataset: SourceKind,
    },

    /// A tabular input lacked required column headers.
    #[error("Missing required columns in {dataset} data: {}", .columns.join(", "))]
    MissingColumns {
        /// The source with missing headers.
        dataset: SourceKind,
        /// The absent column names.
        columns: Vec<String>,
    },

    /// An input table could not be read.
    #[error("Failed to read input '{path}': {message}")]
    InputRead {
        /// The path (or stream description) being read.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A report artifact could not be written.
    #[error("Failed to write report '{path}': {message}")]
    ReportWrite {
        /// The artifact path.
        path: String,
        /// A description of the failure.
        message: String,
    },
}

impl AuditError {
    /// Returns true for errors that only invalidate a single input row.
    pub fn is_row_level(&self) -> bool {
        matches!(
            self,
            AuditError::MissingField { .. }
                | AuditError::InvalidPayFormat { .. }
                | AuditError::InvalidDateFormat { .. }
        )
    }

    /// A stable code for the error kind, used in validation reports.
    pub fn code(&self) -> &'static str {
        match self {
            AuditError::MissingField { .. } => "MISSING_FIELD",
            AuditError::InvalidPayFormat { .. } => "INVALID_PAY_FORMAT",
            AuditError::InvalidDateFormat { .. } => "INVALID_DATE_FORMAT",
            AuditError::DuplicateKey { .. } => "DUPLICATE_KEY",
            AuditError::EmptyDataset { .. } => "EMPTY_DATASET",
            AuditError::MissingColumns { .. } => "MISSING_COLUMNS",
            AuditError::InputRead { .. } => "INPUT_READ",
            AuditError::ConfigNotFound { .. } => "CONFIG_NOT_FOUND",
            AuditError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            AuditError::ReportWrite { .. } => "REPORT_WRITE",
        }
    }
}

/// A type alias for Results that return AuditError.
pub type AuditResult<T> = Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_displays_field_and_row() {
        let error = AuditError::MissingField {
            field: "Department".to_string(),
            row_index: 7,
        };
        assert_eq!(
            error.to_string(),
            "Row 7: missing required field 'Department'"
        );
    }

    #[test]
    fn test_invalid_pay_displays_value() {
        let error = AuditError::InvalidPayFormat {
            row_index: 2,
            value: "-12.50".to_string(),
        };
        assert_eq!(error.to_string(), "Row 2: invalid pay value '-12.50'");
    }

    #[test]
    fn test_invalid_date_displays_value_and_format() {
        let error = AuditError::InvalidDateFormat {
            row_index: 0,
            value: "31/01/2025".to_string(),
            format: "%Y-%m-%d".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Row 0: invalid pay period end date '31/01/2025' (expected format %Y-%m-%d)"
        );
    }

    #[test]
    fn test_duplicate_key_displays_source_and_rows() {
        let error = AuditError::DuplicateKey {
            dataset: SourceKind::Payroll,
            employee_id: "EMP001".to_string(),
            first_row: 0,
            second_row: 4,
        };
        assert_eq!(
            error.to_string(),
            "Duplicate employee 'EMP001' in Payroll data (rows 0 and 4)"
        );
    }

    #[test]
    fn test_missing_columns_joins_names() {
        let error = AuditError::MissingColumns {
            dataset: SourceKind::Hr,
            columns: vec!["Pay".to_string(), "Position".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "Missing required columns in HR data: Pay, Position"
        );
    }

    #[test]
    fn test_row_level_classification() {
        assert!(
            AuditError::InvalidPayFormat {
                row_index: 0,
                value: "abc".to_string()
            }
            .is_row_level()
        );
        assert!(
            !AuditError::EmptyDataset {
                dataset: SourceKind::Hr
            }
            .is_row_level()
        );
        assert!(
            !AuditError::ConfigNotFound {
                path: "/x".to_string()
            }
            .is_row_level()
        );
    }

    #[test]
    fn test_error_codes_are_stable() {
        let error = AuditError::EmptyDataset {
            dataset: SourceKind::Payroll,
        };
        assert_eq!(error.code(), "EMPTY_DATASET");
        assert_eq!(error.to_string(), "Payroll data contains no valid records");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<AuditError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_config_not_found() -> AuditResult<()> {
            Err(AuditError::ConfigNotFound {
                path: "/test".to_string(),
            })
        }

        fn propagates_error() -> AuditResult<()> {
            returns_config_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}

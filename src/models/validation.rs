//! Row-level validation accounting.
//!
//! A [`ValidationReport`] is produced per source by the normalizer so operators can see
//! what was skipped alongside what was compared.

use serde::{Deserialize, Serialize};

use super::SourceKind;
use crate::error::AuditError;

/// An input row that was dropped during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// 0-based index of the row within its source.
    pub row_index: usize,
    /// Stable error code (e.g., "MISSING_FIELD").
    pub code: String,
    /// Human-readable reason.
    pub message: String,
}

impl From<&AuditError> for SkippedRow {
    fn from(error: &AuditError) -> Self {
        let row_index = match error {
            AuditError::MissingField { row_index, .. }
            | AuditError::InvalidPayFormat { row_index, .. }
            | AuditError::InvalidDateFormat { row_index, .. } => *row_index,
            _ => 0,
        };
        Self {
            row_index,
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

/// Normalization outcome counts for one source.
///
/// Invariant: `total_input_rows == valid_rows + skipped.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// The source these rows came from.
    pub source: SourceKind,
    /// Rows handed to the normalizer.
    pub total_input_rows: usize,
    /// Rows that became records.
    pub valid_rows: usize,
    /// Rows that were dropped, in input order.
    pub skipped: Vec<SkippedRow>,
}

impl ValidationReport {
    /// Creates an empty report for a source.
    pub fn new(source: SourceKind) -> Self {
        Self {
            source,
            total_input_rows: 0,
            valid_rows: 0,
            skipped: Vec::new(),
        }
    }

    /// Records an accepted row.
    pub fn record_valid(&mut self) {
        self.total_input_rows += 1;
        self.valid_rows += 1;
    }

    /// Records a rejected row.
    pub fn record_skipped(&mut self, error: &AuditError) {
        self.total_input_rows += 1;
        self.skipped.push(SkippedRow::from(error));
    }

    /// Number of rejected rows.
    pub fn skipped_rows(&self) -> usize {
        self.skipped.len()
    }

    /// Returns true when every input row is accounted for.
    pub fn is_balanced(&self) -> bool {
        self.total_input_rows == self.valid_rows + self.skipped_rows()
    }
}

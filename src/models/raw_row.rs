//! Untyped input rows.
//!
//! A [`RawRow`] is the shape every loader produces before normalization: CSV readers
//! fill it with strings, JSON callers may pass numbers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Column names every source must provide.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "EmployeeID",
    "Pay",
    "Position",
    "Department",
    "PayPeriodEnd",
];

/// A single input row keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    /// 0-based position of the row within its source.
    pub row_index: usize,
    /// Column name to raw value.
    pub fields: BTreeMap<String, Value>,
}

impl RawRow {
    /// Creates an empty row at the given index.
    pub fn new(row_index: usize) -> Self {
        Self {
            row_index,
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style insertion of a column value.
    ///
    /// ```
    /// use payroll_recon::models::RawRow;
    ///
    /// let row = RawRow::new(0).with("EmployeeID", "EMP001").with("Pay", 52000);
    /// assert_eq!(row.get("Pay").unwrap(), 52000);
    /// ```
    pub fn with(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(column.to_string(), value.into());
        self
    }

    /// Returns the raw value for a column, if present.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }
}

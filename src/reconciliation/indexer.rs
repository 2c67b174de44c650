//! Key indexing for a normalized source.

use std::collections::HashMap;

use crate::error::{AuditError, AuditResult};
use crate::models::{EmployeeRecord, SourceDataset, SourceKind};

/// Employee id to record lookup over a [`SourceDataset`].
///
/// Iteration follows source order; hash-map order is never observable.
#[derive(Debug, Clone)]
pub struct KeyIndex<'a> {
    source: SourceKind,
    records: &'a [EmployeeRecord],
    positions: HashMap<&'a str, usize>,
}

impl<'a> KeyIndex<'a> {
    /// Returns the provenance tag of the indexed dataset.
    pub fn source(&self) -> SourceKind {
        self.source
    }

    /// Looks up a record by employee id.
    pub fn get(&self, employee_id: &str) -> Option<&'a EmployeeRecord> {
        self.positions.get(employee_id).map(|&i| &self.records[i])
    }

    /// Returns true if the employee id is present.
    pub fn contains(&self, employee_id: &str) -> bool {
        self.positions.contains_key(employee_id)
    }

    /// Iterates records in source order.
    pub fn iter(&self) -> impl Iterator<Item = &'a EmployeeRecord> + '_ {
        self.records.iter()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Builds a [`KeyIndex`] over a dataset in one pass.
///
/// # Errors
///
/// Returns `DuplicateKey` on the first employee id seen twice. Duplicates are never
/// resolved silently.
///
/// # Examples
///
/// ```
/// use payroll_recon::models::{EmployeeRecord, SourceDataset, SourceKind};
/// use payroll_recon::reconciliation::build_index;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let record = EmployeeRecord {
///     employee_id: "EMP001".to_string(),
///     pay: Decimal::new(100, 0),
///     position: "Lecturer".to_string(),
///     department: "Physics".to_string(),
///     pay_period_end: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
///     row_index: 0,
/// };
/// let dataset = SourceDataset::new(SourceKind::Hr, vec![record]);
/// let index = build_index(&dataset).unwrap();
/// assert!(index.contains("EMP001"));
/// ```
pub fn build_index(dataset: &SourceDataset) -> AuditResult<KeyIndex<'_>> {
    let records = dataset.records();
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(records.len());

    for (position, record) in records.iter().enumerate() {
        if let Some(&first) = positions.get(record.employee_id.as_str()) {
            return Err(AuditError::DuplicateKey {
                dataset: dataset.source(),
                employee_id: record.employee_id.clone(),
                first_row: records[first].row_index,
                second_row: record.row_index,
            });
        }
        positions.insert(record.employee_id.as_str(), position);
    }

    Ok(KeyIndex {
        source: dataset.source(),
        records,
        positions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn create_record(id: &str, row_index: usize) -> EmployeeRecord {
        EmployeeRecord {
            employee_id: id.to_string(),
            pay: Decimal::new(3_000, 0),
            position: "Advisor".to_string(),
            department: "Student Services".to_string(),
            pay_period_end: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            row_index,
        }
    }

    #[test]
    fn test_index_lookup_and_order() {
        let dataset = SourceDataset::new(
            SourceKind::Payroll,
            vec![
                create_record("C", 0),
                create_record("A", 1),
                create_record("B", 2),
            ],
        );
        let index = build_index(&dataset).unwrap();

        assert_eq!(index.source(), SourceKind::Payroll);
        assert_eq!(index.len(), 3);
        assert_eq!(index.get("A").unwrap().row_index, 1);
        assert!(index.get("Z").is_none());

        let order: Vec<&str> = index.iter().map(|r| r.employee_id.as_str()).collect();
        assert_eq!(order, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_duplicate_key_is_fatal() {
        let dataset = SourceDataset::new(
            SourceKind::Hr,
            vec![
                create_record("EMP001", 0),
                create_record("EMP002", 1),
                create_record("EMP001", 5),
            ],
        );

        let err = build_index(&dataset).unwrap_err();
        assert_eq!(
            err,
            AuditError::DuplicateKey {
                dataset: SourceKind::Hr,
                employee_id: "EMP001".to_string(),
                first_row: 0,
                second_row: 5,
            }
        );
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let dataset = SourceDataset::new(
            SourceKind::Hr,
            vec![create_record("emp001", 0), create_record("EMP001", 1)],
        );
        let index = build_index(&dataset).unwrap();
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_empty_dataset_indexes_to_empty() {
        let dataset = SourceDataset::new(SourceKind::Hr, vec![]);
        let index = build_index(&dataset).unwrap();
        assert!(index.is_empty());
    }
}

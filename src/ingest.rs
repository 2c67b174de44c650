//! Tabular input loading.
//!
//! Reads CSV sources into [`RawRow`]s. Every cell is kept as a string; typing is
//! left to the normalizer. Header order is irrelevant and extra columns are
//! carried along untouched.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{AuditError, AuditResult};
use crate::models::{REQUIRED_COLUMNS, RawRow, SourceKind};

/// Reads a headed CSV stream into raw rows.
///
/// Row indexes are 0-based over data rows (the header is not counted). Short
/// rows are accepted; their absent cells surface later as missing fields.
/// Cells that are not valid UTF-8 (e.g., Latin-1 exports) are decoded lossily,
/// so an encoding problem never drops a row here.
///
/// # Errors
///
/// - `MissingColumns` if any required header is absent
/// - `InputRead` if the stream is not valid CSV
///
/// # Examples
///
/// ```
/// use payroll_recon::ingest::read_csv_rows;
/// use payroll_recon::models::SourceKind;
///
/// let data = "EmployeeID,Pay,Position,Department,PayPeriodEnd\n\
///             EMP001,52000,Lecturer,Physics,2025-01-31\n";
/// let rows = read_csv_rows(SourceKind::Hr, data.as_bytes()).unwrap();
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].get("Pay").unwrap(), "52000");
/// ```
pub fn read_csv_rows<R: Read>(source: SourceKind, reader: R) -> AuditResult<Vec<RawRow>> {
    let description = format!("{} data", source);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .byte_headers()
        .map_err(|e| AuditError::InputRead {
            path: description.clone(),
            message: e.to_string(),
        })?
        .iter()
        .map(decode_field)
        .collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(AuditError::MissingColumns {
            dataset: source,
            columns: missing,
        });
    }

    let mut rows = Vec::new();
    for (row_index, record) in reader.byte_records().enumerate() {
        let record = record.map_err(|e| AuditError::InputRead {
            path: description.clone(),
            message: e.to_string(),
        })?;

        let mut row = RawRow::new(row_index);
        for (header, value) in headers.iter().zip(record.iter()) {
            row.fields
                .insert(header.clone(), Value::String(decode_field(value)));
        }
        rows.push(row);
    }

    debug!(source = %source, rows = rows.len(), "Loaded CSV rows");
    Ok(rows)
}

/// Decodes a cell as UTF-8, replacing invalid sequences with U+FFFD.
fn decode_field(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Reads a headed CSV file into raw rows.
///
/// # Errors
///
/// `InputRead` if the file cannot be opened, plus everything [`read_csv_rows`]
/// returns. I/O failures report the file path.
pub fn read_csv_file<P: AsRef<Path>>(source: SourceKind, path: P) -> AuditResult<Vec<RawRow>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| AuditError::InputRead {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    read_csv_rows(source, file).map_err(|err| match err {
        AuditError::InputRead { message, .. } => AuditError::InputRead {
            path: path.display().to_string(),
            message,
        },
        other => other,
    })
}

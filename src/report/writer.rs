//! Report artifact writer.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::config::ReconConfig;
use crate::error::{AuditError, AuditResult};
use crate::models::{
    AuditReport, AuditStatistics, DepartmentSummary, OutcomeCategory, ValidationReport,
};

use super::worksheets::{ComparisonRow, DepartmentRow, RecordRow};

/// Timestamp suffix format shared by every artifact of a run.
pub const ARTIFACT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Paths written for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifacts {
    /// `audit_summary_<ts>.json`
    pub summary: PathBuf,
    /// `payroll_reconciliation_<ts>.json`
    pub reconciliation: PathBuf,
    /// CSV worksheets, in the order they were written.
    pub worksheets: Vec<PathBuf>,
}

impl ReportArtifacts {
    /// Every written path.
    pub fn all(&self) -> Vec<&Path> {
        [self.summary.as_path(), self.reconciliation.as_path()]
            .into_iter()
            .chain(self.worksheets.iter().map(PathBuf::as_path))
            .collect()
    }
}

#[derive(Serialize)]
struct AuditSummary<'a> {
    audit_date: String,
    run_id: Uuid,
    statistics: &'a AuditStatistics,
    departments_with_discrepancies: Vec<&'a DepartmentSummary>,
    validation: ValidationSection<'a>,
}

#[derive(Serialize)]
struct ValidationSection<'a> {
    hr: &'a ValidationReport,
    payroll: &'a ValidationReport,
}

/// Writes the JSON and CSV artifacts of an [`AuditReport`].
///
/// File names carry the run timestamp so successive runs never overwrite each
/// other. A worksheet with no rows is written as an empty file.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
    include_matched: bool,
}

impl ReportWriter {
    /// Creates a writer targeting `config.output_dir`.
    pub fn new(config: &ReconConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            include_matched: config.include_matched,
        }
    }

    /// Returns the directory artifacts are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes every artifact, creating the output directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `ReportWrite` naming the first path that could not be written.
    pub fn write(&self, report: &AuditReport) -> AuditResult<ReportArtifacts> {
        fs::create_dir_all(&self.output_dir).map_err(|e| AuditError::ReportWrite {
            path: self.output_dir.display().to_string(),
            message: e.to_string(),
        })?;

        let timestamp = report
            .statistics
            .run_timestamp
            .format(ARTIFACT_TIMESTAMP_FORMAT)
            .to_string();

        let summary = self.path_for("audit_summary", &timestamp, "json");
        write_json(&summary, &self.summary_of(report))?;

        let reconciliation = self.path_for("payroll_reconciliation", &timestamp, "json");
        if self.include_matched {
            write_json(&reconciliation, report)?;
        } else {
            write_json(&reconciliation, &report.without_matched())?;
        }

        let mut worksheets = Vec::new();

        let path = self.path_for("mismatched_records", &timestamp, "csv");
        write_csv(&path, comparison_rows(report, OutcomeCategory::Mismatched))?;
        worksheets.push(path);

        let path = self.path_for("missing_in_hr", &timestamp, "csv");
        write_csv(
            &path,
            report
                .outcomes_in(OutcomeCategory::MissingInHr)
                .filter_map(|o| o.payroll())
                .map(RecordRow::from),
        )?;
        worksheets.push(path);

        let path = self.path_for("missing_in_payroll", &timestamp, "csv");
        write_csv(
            &path,
            report
                .outcomes_in(OutcomeCategory::MissingInPayroll)
                .filter_map(|o| o.hr())
                .map(RecordRow::from),
        )?;
        worksheets.push(path);

        let path = self.path_for("department_analysis", &timestamp, "csv");
        write_csv(&path, report.departments.iter().map(DepartmentRow::from))?;
        worksheets.push(path);

        if self.include_matched {
            let path = self.path_for("matched_records", &timestamp, "csv");
            write_csv(&path, comparison_rows(report, OutcomeCategory::Matched))?;
            worksheets.push(path);
        }

        info!(
            run_id = %report.statistics.run_id,
            output_dir = %self.output_dir.display(),
            artifacts = worksheets.len() + 2,
            "Reports written"
        );

        Ok(ReportArtifacts {
            summary,
            reconciliation,
            worksheets,
        })
    }

    fn summary_of<'a>(&self, report: &'a AuditReport) -> AuditSummary<'a> {
        AuditSummary {
            audit_date: report
                .statistics
                .run_timestamp
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            run_id: report.statistics.run_id,
            statistics: &report.statistics,
            departments_with_discrepancies: report
                .departments
                .iter()
                .filter(|d| d.has_discrepancies())
                .collect(),
            validation: ValidationSection {
                hr: &report.hr_validation,
                payroll: &report.payroll_validation,
            },
        }
    }

    fn path_for(&self, stem: &str, timestamp: &str, extension: &str) -> PathBuf {
        self.output_dir.join(format!("{stem}_{timestamp}.{extension}"))
    }
}

fn comparison_rows(
    report: &AuditReport,
    category: OutcomeCategory,
) -> impl Iterator<Item = ComparisonRow> + '_ {
    report
        .outcomes_in(category)
        .filter_map(ComparisonRow::from_outcome)
}

fn write_error(path: &Path, message: impl ToString) -> AuditError {
    AuditError::ReportWrite {
        path: path.display().to_string(),
        message: message.to_string(),
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> AuditResult<()> {
    let file = File::create(path).map_err(|e| write_error(path, e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value).map_err(|e| write_error(path, e))
}

fn write_csv<T, I>(path: &Path, rows: I) -> AuditResult<()>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut writer = csv::Writer::from_path(path).map_err(|e| write_error(path, e))?;
    for row in rows {
        writer.serialize(row).map_err(|e| write_error(path, e))?;
    }
    writer.flush().map_err(|e| write_error(path, e))
}

//! Run orchestration.
//!
//! [`PayrollAuditor`] drives one reconciliation run end to end: normalize both
//! sources, refuse to continue on empty sources or duplicate keys, index,
//! reconcile, aggregate and compute the run statistics.

use std::time::Instant;

use tracing::{info, warn};

use crate::config::ReconConfig;
use crate::error::{AuditError, AuditResult};
use crate::models::{AuditReport, RawRow, RunParameters, SourceKind};

use super::department::summarize_departments;
use super::indexer::build_index;
use super::normalizer::{NormalizedSource, normalize_rows};
use super::reconciler::Reconciler;
use super::statistics::{RunStamp, compute_statistics};

/// Reconciles HR and payroll rows under an explicit configuration.
///
/// # Example
///
/// ```
/// use payroll_recon::config::ReconConfig;
/// use payroll_recon::models::RawRow;
/// use payroll_recon::reconciliation::PayrollAuditor;
///
/// let row = |id: &str, pay: &str| {
///     RawRow::new(0)
///         .with("EmployeeID", id)
///         .with("Pay", pay)
///         .with("Position", "Lecturer")
///         .with("Department", "History")
///         .with("PayPeriodEnd", "2025-01-31")
/// };
///
/// let auditor = PayrollAuditor::new(ReconConfig::default());
/// let report = auditor
///     .run(&[row("ADJ001", "50000")], &[row("ADJ001", "50500")])
///     .unwrap();
/// assert_eq!(report.statistics.mismatch_count, 1);
/// ```
#[derive(Debug, Clone)]
pub struct PayrollAuditor {
    config: ReconConfig,
    reconciler: Reconciler,
}

impl PayrollAuditor {
    /// Creates an auditor; the reconciler is derived from `config`.
    pub fn new(config: ReconConfig) -> Self {
        let reconciler = Reconciler::from_config(&config);
        Self { config, reconciler }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &ReconConfig {
        &self.config
    }

    /// Runs a reconciliation stamped with the current time.
    ///
    /// # Errors
    ///
    /// - `EmptyDataset` if either source has no valid rows after normalization
    /// - `DuplicateKey` if either source repeats an employee id
    ///
    /// Row-level problems never fail the run; they are reported in the
    /// validation sections of the returned [`AuditReport`].
    pub fn run(&self, hr_rows: &[RawRow], payroll_rows: &[RawRow]) -> AuditResult<AuditReport> {
        self.run_stamped(hr_rows, payroll_rows, RunStamp::now())
    }

    /// Runs a reconciliation with a caller-provided run id and timestamp.
    pub fn run_stamped(
        &self,
        hr_rows: &[RawRow],
        payroll_rows: &[RawRow],
        stamp: RunStamp,
    ) -> AuditResult<AuditReport> {
        let start_time = Instant::now();
        info!(
            run_id = %stamp.run_id,
            hr_rows = hr_rows.len(),
            payroll_rows = payroll_rows.len(),
            "Starting reconciliation"
        );

        let date_format = self.config.date_format.as_str();
        let hr = normalize_rows(SourceKind::Hr, hr_rows, date_format);
        let payroll = normalize_rows(SourceKind::Payroll, payroll_rows, date_format);
        ensure_not_empty(&hr)?;
        ensure_not_empty(&payroll)?;

        let hr_index = build_index(&hr.dataset).inspect_err(|err| {
            warn!(run_id = %stamp.run_id, error = %err, "Aborting run");
        })?;
        let payroll_index = build_index(&payroll.dataset).inspect_err(|err| {
            warn!(run_id = %stamp.run_id, error = %err, "Aborting run");
        })?;

        let set = self.reconciler.reconcile(&hr_index, &payroll_index);
        let departments = summarize_departments(set.outcomes());
        let statistics = compute_statistics(
            stamp,
            hr.dataset.len(),
            payroll.dataset.len(),
            &set,
            &departments,
        );

        info!(
            run_id = %stamp.run_id,
            total_records = statistics.total_records,
            matched = statistics.match_count,
            mismatched = statistics.mismatch_count,
            missing_in_hr = statistics.missing_in_hr_count,
            missing_in_payroll = statistics.missing_in_payroll_count,
            skipped_rows = hr.report.skipped_rows() + payroll.report.skipped_rows(),
            total_discrepancy = %statistics.total_discrepancy_amount,
            duration_us = start_time.elapsed().as_micros(),
            "Reconciliation completed"
        );

        Ok(AuditReport {
            statistics,
            parameters: RunParameters {
                pay_tolerance: self.reconciler.pay_tolerance(),
                compared_fields: self.config.compared_fields.clone(),
                date_format: self.config.date_format.clone(),
            },
            outcomes: set.into_outcomes(),
            departments,
            hr_validation: hr.report,
            payroll_validation: payroll.report,
        })
    }
}

fn ensure_not_empty(normalized: &NormalizedSource) -> AuditResult<()> {
    if normalized.dataset.is_empty() {
        let err = AuditError::EmptyDataset {
            dataset: normalized.dataset.source(),
        };
        warn!(
            error = %err,
            skipped_rows = normalized.report.skipped_rows(),
            "Aborting run"
        );
        return Err(err);
    }
    Ok(())
}

//! Configuration types for reconciliation runs.
//!
//! This module contains the strongly-typed configuration structure that is
//! deserialized from a YAML file. Every key is optional.

use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::ComparedField;

/// Default absolute pay tolerance: one cent.
pub const DEFAULT_PAY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Default accepted format for `PayPeriodEnd`.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Default directory for report artifacts.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Settings that shape a reconciliation run and its reports.
///
/// Passed explicitly to the auditor and report writer; nothing here is global.
///
/// # Example
///
/// ```
/// use payroll_recon::config::ReconConfig;
/// use payroll_recon::models::ComparedField;
///
/// let config = ReconConfig::default();
/// assert_eq!(config.pay_tolerance.to_string(), "0.01");
/// assert_eq!(config.date_format, "%Y-%m-%d");
/// assert!(config.compares(ComparedField::Department));
/// assert!(!config.compares(ComparedField::PayPeriodEnd));
/// assert!(!config.include_matched);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReconConfig {
    /// Maximum absolute pay difference still considered equal.
    pub pay_tolerance: Decimal,
    /// `chrono` format string accepted for `PayPeriodEnd`.
    pub date_format: String,
    /// Fields compared for employees present in both sources.
    pub compared_fields: Vec<ComparedField>,
    /// Whether reports list `Matched` outcomes.
    pub include_matched: bool,
    /// Directory report artifacts are written to.
    pub output_dir: PathBuf,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            pay_tolerance: DEFAULT_PAY_TOLERANCE,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            compared_fields: vec![
                ComparedField::Pay,
                ComparedField::Position,
                ComparedField::Department,
            ],
            include_matched: false,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl ReconConfig {
    /// Returns true if the field takes part in the comparison.
    pub fn compares(&self, field: ComparedField) -> bool {
        self.compared_fields.contains(&field)
    }

    /// Overrides the pay tolerance from its string form (e.g., "0.05").
    pub fn with_pay_tolerance(mut self, tolerance: &str) -> Result<Self, String> {
        self.pay_tolerance = Decimal::from_str(tolerance.trim())
            .map_err(|e| format!("invalid pay tolerance '{}': {}", tolerance, e))?;
        self.validate()?;
        Ok(self)
    }

    /// Checks values serde cannot enforce on its own.
    pub fn validate(&self) -> Result<(), String> {
        if self.pay_tolerance.is_sign_negative() {
            return Err(format!(
                "pay_tolerance must not be negative (got {})",
                self.pay_tolerance
            ));
        }
        if self.compared_fields.is_empty() {
            return Err("compared_fields must name at least one field".to_string());
        }
        if self.date_format.trim().is_empty() {
            return Err("date_format must not be empty".to_string());
        }
        Ok(())
    }
}

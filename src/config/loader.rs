//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading reconciliation
//! settings from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{AuditError, AuditResult};

use super::types::ReconConfig;

/// Loads and validates reconciliation configuration.
///
/// # File Format
///
/// ```text
/// pay_tolerance: "0.01"
/// date_format: "%Y-%m-%d"
/// compared_fields: [pay, position, department]
/// include_matched: false
/// output_dir: "output"
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_recon::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/recon.yaml")?;
/// println!("Pay tolerance: {}", loader.config().pay_tolerance);
/// # Ok::<(), payroll_recon::error::AuditError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ReconConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing or unreadable (`ConfigNotFound`)
    /// - The file is not valid YAML, has unknown keys, or holds invalid values
    ///   (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> AuditResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| AuditError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Parses configuration from YAML text; `origin` names the text in errors.
    pub fn from_yaml_str(content: &str, origin: &str) -> AuditResult<Self> {
        // An empty document means "all defaults".
        let config = if content.trim().is_empty() {
            ReconConfig::default()
        } else {
            serde_yaml::from_str::<ReconConfig>(content).map_err(|e| {
                AuditError::ConfigParseError {
                    path: origin.to_string(),
                    message: e.to_string(),
                }
            })?
        };

        config
            .validate()
            .map_err(|message| AuditError::ConfigParseError {
                path: origin.to_string(),
                message,
            })?;

        Ok(Self { config })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &ReconConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> ReconConfig {
        self.config
    }
}

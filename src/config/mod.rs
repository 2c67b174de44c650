//! Configuration loading and management for reconciliation runs.
//!
//! This module provides functionality to load run settings (pay tolerance, date
//! format, compared fields, report options) from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use payroll_recon::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/recon.yaml").unwrap().into_config();
//! println!("Tolerance: {}", config.pay_tolerance);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DEFAULT_DATE_FORMAT, DEFAULT_OUTPUT_DIR, DEFAULT_PAY_TOLERANCE, ReconConfig};

//! Reconciliation logic for the payroll audit engine.
//!
//! This module turns raw rows into typed records, indexes each source by
//! employee id, classifies every key into exactly one outcome, aggregates the
//! outcomes per department and computes the run statistics. [`PayrollAuditor`]
//! ties the stages together.

mod auditor;
mod department;
mod indexer;
mod normalizer;
mod reconciler;
mod statistics;

pub use auditor::PayrollAuditor;
pub use department::summarize_departments;
pub use indexer::{KeyIndex, build_index};
pub use normalizer::{MAX_PAY, NormalizedSource, normalize_row, normalize_rows};
pub use reconciler::{ReconciliationSet, Reconciler, pay_differs};
pub use statistics::{RunStamp, compute_statistics};

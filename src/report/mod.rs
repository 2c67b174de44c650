//! Report artifacts for a completed run.
//!
//! [`ReportWriter`] serializes an [`AuditReport`](crate::models::AuditReport)
//! into a JSON summary, the full JSON reconciliation and one CSV worksheet per
//! outcome category plus the department analysis.

mod worksheets;
mod writer;

pub use writer::{ARTIFACT_TIMESTAMP_FORMAT, ReportArtifacts, ReportWriter};

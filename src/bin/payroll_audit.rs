//! `payroll-audit`: reconcile an HR export against a payroll export.
//!
//! Exit codes: 0 success, 1 the run failed, 2 bad arguments or configuration.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use payroll_recon::config::{ConfigLoader, ReconConfig};
use payroll_recon::error::AuditError;
use payroll_recon::ingest::read_csv_file;
use payroll_recon::models::{AuditReport, SourceKind};
use payroll_recon::reconciliation::PayrollAuditor;
use payroll_recon::report::{ReportArtifacts, ReportWriter};

/// Success.
const EXIT_SUCCESS: u8 = 0;
/// Input, reconciliation or report failure.
const EXIT_ERROR: u8 = 1;
/// Bad arguments or configuration.
const EXIT_USAGE: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "payroll-audit")]
#[command(about = "Reconcile HR compensation records against payroll records")]
struct Cli {
    /// HR system export (CSV)
    #[arg(long)]
    hr: PathBuf,

    /// Payroll system export (CSV)
    #[arg(long)]
    payroll: PathBuf,

    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for report artifacts (overrides the config)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Absolute pay tolerance, e.g. 0.01 (overrides the config)
    #[arg(long)]
    tolerance: Option<String>,

    /// List matched employees in the reports
    #[arg(long)]
    include_matched: bool,

    /// Print the full report as JSON instead of the summary
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    match run(&cli, config) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn build_config(cli: &Cli) -> Result<ReconConfig, String> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load(path)
            .map_err(|e| e.to_string())?
            .into_config(),
        None => ReconConfig::default(),
    };

    if let Some(tolerance) = &cli.tolerance {
        config = config.with_pay_tolerance(tolerance)?;
    }
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    if cli.include_matched {
        config.include_matched = true;
    }
    Ok(config)
}

fn run(cli: &Cli, config: ReconConfig) -> Result<(), AuditError> {
    let hr_rows = read_csv_file(SourceKind::Hr, &cli.hr)?;
    let payroll_rows = read_csv_file(SourceKind::Payroll, &cli.payroll)?;

    let writer = ReportWriter::new(&config);
    let include_matched = config.include_matched;
    let report = PayrollAuditor::new(config).run(&hr_rows, &payroll_rows)?;
    let artifacts = writer.write(&report)?;

    if cli.json {
        let printed = if include_matched {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string_pretty(&report.without_matched())
        };
        let json = printed.map_err(|e| AuditError::ReportWrite {
            path: "stdout".to_string(),
            message: e.to_string(),
        })?;
        println!("{json}");
    } else {
        print_summary(&report, &artifacts);
    }
    Ok(())
}

fn print_summary(report: &AuditReport, artifacts: &ReportArtifacts) {
    let stats = &report.statistics;
    println!("Payroll audit {}", stats.run_id);
    println!("  Total records:          {}", stats.total_records);
    println!("  Matched:                {}", stats.match_count);
    println!("  Mismatched:             {}", stats.mismatch_count);
    println!("  Missing in HR:          {}", stats.missing_in_hr_count);
    println!("  Missing in payroll:     {}", stats.missing_in_payroll_count);
    println!("  Total discrepancy:      {}", stats.total_discrepancy_amount);
    println!("  Issue rate:             {}%", stats.issue_rate);
    println!("  Skipped rows:           {}", report.skipped_rows());
    if let Some(department) = &stats.highest_discrepancy_department {
        println!("  Largest discrepancy in: {department}");
    }
    println!("Reports:");
    for path in artifacts.all() {
        println!("  {}", path.display());
    }
}

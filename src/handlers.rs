//! Command handlers. Each handler owns its I/O and exit code so `main` stays
//! a thin dispatcher.
//!
//! Exit codes: 0 clean, 1 the aggregated health level is critical/severe (or
//! a diff gate found new issues), 2 operational failure.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use colored::Colorize;
use tracing::{debug, info};

use crate::aggregate::aggregate;
use crate::cli::{Cli, OutputFormat};
use crate::diff::compute_diff;
use crate::error::{AuditError, Result};
use crate::history::{FileRunStore, RunStore};
use crate::model::{AggregatedReport, HealthLevel, ToolReport};
use crate::reporter::{json::JsonReporter, terminal::TerminalReporter, Reporter};
use crate::trend::{analyze_last_n_runs, generate_comparison_report};

/// Handle the default aggregation mode.
pub fn handle_aggregate(cli: &Cli) -> ExitCode {
    if cli.paths.is_empty() {
        eprintln!("Error: no report files given");
        return ExitCode::from(2);
    }

    let reports = match load_tool_reports(&cli.paths) {
        Ok(reports) => reports,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    let previous = match load_previous(cli) {
        Ok(previous) => previous,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    let report = match aggregate(&reports) {
        Ok(report) => report.with_trend(previous.as_ref()),
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };
    info!(
        issues = report.summary.total_issues,
        tools = report.summary.total_tools,
        "aggregation complete"
    );

    if cli.save {
        let Some(dir) = &cli.history_dir else {
            eprintln!("Error: --save requires --history-dir");
            return ExitCode::from(2);
        };
        if let Err(e) = FileRunStore::new(dir).store(&report) {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    }

    let reporter: Box<dyn Reporter> = match cli.format {
        OutputFormat::Terminal => Box::new(TerminalReporter::new(cli.verbose).with_top(cli.top)),
        OutputFormat::Json => Box::new(JsonReporter::new()),
    };
    println!("{}", reporter.report(&report));

    let mut gate_failed = false;
    if let Some(baseline_path) = &cli.diff {
        match load_aggregated(baseline_path) {
            Ok(baseline) => {
                let diff = compute_diff(&baseline, &report);
                print_diff_summary(&diff);
                gate_failed = !diff.new_issues.is_empty();
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(2);
            }
        }
    }

    let unhealthy = matches!(
        report.summary.health_score,
        HealthLevel::Critical | HealthLevel::Severe
    );
    if unhealthy || gate_failed {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

/// Handle `--trend N`: analyze the last N runs in the history directory.
pub fn handle_trend(cli: &Cli, n: usize) -> ExitCode {
    let Some(dir) = &cli.history_dir else {
        eprintln!("Error: --trend requires --history-dir");
        return ExitCode::from(2);
    };

    let runs = match FileRunStore::new(dir).last_n(n) {
        Ok(runs) => runs,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    let Some(summary) = analyze_last_n_runs(&runs) else {
        println!("No historical runs found in {}", dir.display());
        return ExitCode::SUCCESS;
    };

    match cli.format {
        OutputFormat::Json => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(2);
            }
        },
        OutputFormat::Terminal => {
            println!("{}", "Trend Analysis".bold().underline());
            println!("Range: {}", summary.time_range);
            println!("Runs analyzed: {}", summary.runs_analyzed);
            let sparkline: Vec<String> =
                summary.issue_sparkline.iter().map(|n| n.to_string()).collect();
            println!("Issues over time: {}", sparkline.join(" → "));
            for (tool, trend) in &summary.by_tool {
                println!(
                    "  {}: {} → {} ({:+.1}%)",
                    tool, trend.previous, trend.current, trend.change_percent
                );
            }
            // The two most recent runs give the point-in-time comparison.
            if runs.len() >= 2 {
                let current = &runs[runs.len() - 1];
                let previous = &runs[runs.len() - 2];
                println!();
                println!("{}", generate_comparison_report(current, Some(previous)));
            }
        }
    }

    ExitCode::SUCCESS
}

fn load_tool_reports(paths: &[std::path::PathBuf]) -> Result<Vec<ToolReport>> {
    let mut reports = Vec::with_capacity(paths.len());
    for path in paths {
        let contents =
            fs::read_to_string(path).map_err(|e| AuditError::read_error(path.clone(), e))?;
        let report: ToolReport = serde_json::from_str(&contents)
            .map_err(|e| AuditError::parse_error(path.clone(), e))?;
        debug!(path = %path.display(), tool = %report.tool, "loaded tool report");
        reports.push(report);
    }
    Ok(reports)
}

fn load_aggregated(path: &Path) -> Result<AggregatedReport> {
    let contents =
        fs::read_to_string(path).map_err(|e| AuditError::read_error(path.to_path_buf(), e))?;
    serde_json::from_str(&contents).map_err(|e| AuditError::parse_error(path.to_path_buf(), e))
}

fn load_previous(cli: &Cli) -> Result<Option<AggregatedReport>> {
    match &cli.history_dir {
        Some(dir) => FileRunStore::new(dir).latest(),
        None => Ok(None),
    }
}

fn print_diff_summary(diff: &crate::diff::DiffResult) {
    println!("{}", "Baseline Diff".bold().underline());
    println!(
        "Delta: {:+} (new: {}, resolved: {})",
        diff.delta,
        diff.new_count(),
        diff.resolved_count()
    );
    for issue in &diff.new_issues {
        println!("  {} {}", "+".red().bold(), issue.identity_key());
    }
    for issue in &diff.resolved_issues {
        println!("  {} {}", "-".green(), issue.identity_key());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RawReport, VaultReport};
    use chrono::Utc;
    use tempfile::TempDir;

    fn write_vault_report(dir: &Path) -> std::path::PathBuf {
        let report = ToolReport {
            tool: "vault".to_string(),
            timestamp: Utc::now(),
            supported: true,
            raw: RawReport::Vault(VaultReport {
                total_references: 10,
                secrets: vec![],
            }),
            issue_count: 0,
        };
        let path = dir.join("vault.json");
        fs::write(&path, serde_json::to_string(&report).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_load_tool_reports() {
        let dir = TempDir::new().unwrap();
        let path = write_vault_report(dir.path());
        let reports = load_tool_reports(&[path]).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].tool, "vault");
    }

    #[test]
    fn test_load_tool_reports_missing_file() {
        let err = load_tool_reports(&[std::path::PathBuf::from("/no/such/file.json")])
            .unwrap_err();
        assert!(matches!(err, AuditError::Io { .. }));
    }

    #[test]
    fn test_load_tool_reports_bad_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{nope").unwrap();
        let err = load_tool_reports(&[path]).unwrap_err();
        assert!(matches!(err, AuditError::Parse { .. }));
    }

    #[test]
    fn test_load_previous_without_history_dir() {
        let cli = <Cli as clap::Parser>::try_parse_from(["infra-audit", "a.json"]).unwrap();
        assert!(load_previous(&cli).unwrap().is_none());
    }
}

//! Trend analysis across historical runs.
//!
//! [`calculate_trend`] is count-based: it knows the net change between two
//! runs but not which specific issues appeared or disappeared. The diff
//! engine's identity-based computation is strictly stronger; both exist
//! because callers use them in different contexts (lightweight trend line vs
//! explicit CI gating).

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::AggregatedReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Degrading,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Improving => "improving",
            TrendDirection::Degrading => "degrading",
            TrendDirection::Stable => "stable",
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Point-in-time delta between a run and its predecessor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub previous_issues: usize,
    pub current_issues: usize,
    pub direction: TrendDirection,
    pub change_percent: f64,
    pub new_issues: usize,
    pub resolved_issues: usize,
    /// Timestamp of the previous run this trend was computed against.
    pub compared_with: DateTime<Utc>,
}

/// Per-tool count comparison between the earliest and latest run in a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolTrend {
    pub previous: usize,
    pub current: usize,
    pub change: i64,
    pub change_percent: f64,
}

/// Multi-run view over a history window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    /// Human time range, e.g. "Single run" or "Last 14 days".
    pub time_range: String,
    pub runs_analyzed: usize,
    /// Total-issue counts, oldest first.
    pub issue_sparkline: Vec<usize>,
    /// Earliest vs latest comparison per tool; empty for a single run.
    pub by_tool: BTreeMap<String, ToolTrend>,
}

/// Count-based trend between two runs. `None` when there is no previous run.
pub fn calculate_trend(
    current: &AggregatedReport,
    previous: Option<&AggregatedReport>,
) -> Option<Trend> {
    let previous = previous?;
    let current_total = current.summary.total_issues;
    let previous_total = previous.summary.total_issues;
    let change = current_total as i64 - previous_total as i64;

    let change_percent = if previous_total == 0 {
        0.0
    } else {
        change as f64 / previous_total as f64 * 100.0
    };

    let direction = if change < 0 {
        TrendDirection::Improving
    } else if change > 0 {
        TrendDirection::Degrading
    } else {
        TrendDirection::Stable
    };

    Some(Trend {
        previous_issues: previous_total,
        current_issues: current_total,
        direction,
        change_percent,
        new_issues: change.max(0) as usize,
        resolved_issues: (-change).max(0) as usize,
        compared_with: previous.timestamp,
    })
}

impl AggregatedReport {
    /// Return a new report with a trend against `previous` attached; the
    /// report is returned unchanged when there is no previous run.
    pub fn with_trend(mut self, previous: Option<&AggregatedReport>) -> Self {
        self.trend = calculate_trend(&self, previous);
        self
    }
}

/// Analyze a window of historical runs. Runs may arrive in any order; the
/// window is sorted by timestamp before analysis.
pub fn analyze_last_n_runs(runs: &[AggregatedReport]) -> Option<TrendSummary> {
    if runs.is_empty() {
        return None;
    }

    let mut ordered: Vec<&AggregatedReport> = runs.iter().collect();
    ordered.sort_by_key(|r| r.timestamp);

    let earliest = ordered[0];
    let latest = ordered[ordered.len() - 1];

    let time_range = if ordered.len() == 1 {
        "Single run".to_string()
    } else {
        let days = (latest.timestamp - earliest.timestamp).num_hours() / 24;
        format!("Last {} days", days)
    };

    let issue_sparkline = ordered.iter().map(|r| r.summary.total_issues).collect();

    let mut by_tool = BTreeMap::new();
    if ordered.len() >= 2 {
        let tools: BTreeSet<&String> = earliest
            .summary
            .issues_by_tool
            .keys()
            .chain(latest.summary.issues_by_tool.keys())
            .collect();
        for tool in tools {
            let previous = earliest
                .summary
                .issues_by_tool
                .get(tool)
                .copied()
                .unwrap_or(0);
            let current = latest
                .summary
                .issues_by_tool
                .get(tool)
                .copied()
                .unwrap_or(0);
            let change = current as i64 - previous as i64;
            let change_percent = if previous == 0 {
                if current == 0 {
                    0.0
                } else {
                    100.0
                }
            } else {
                change as f64 / previous as f64 * 100.0
            };
            by_tool.insert(
                tool.clone(),
                ToolTrend {
                    previous,
                    current,
                    change,
                    change_percent,
                },
            );
        }
    }

    Some(TrendSummary {
        time_range,
        runs_analyzed: ordered.len(),
        issue_sparkline,
        by_tool,
    })
}

/// Placeholder returned when no previous run exists to compare against.
pub const NO_PREVIOUS_REPORT: &str = "No previous report available for comparison.";

/// Multi-line human-readable comparison between two runs. Tools whose counts
/// did not change are omitted.
pub fn generate_comparison_report(
    current: &AggregatedReport,
    previous: Option<&AggregatedReport>,
) -> String {
    let Some(previous) = previous else {
        return NO_PREVIOUS_REPORT.to_string();
    };
    // Previous is known to be present, so the trend always exists.
    let Some(trend) = calculate_trend(current, Some(previous)) else {
        return NO_PREVIOUS_REPORT.to_string();
    };

    let mut out = String::new();
    out.push_str("Comparison Report\n");
    out.push_str("=================\n");
    out.push_str(&format!(
        "Previous: {}\n",
        previous.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!(
        "Current:  {}\n\n",
        current.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!(
        "Overall: {} → {} issues ({:+.1}% {})\n",
        trend.previous_issues, trend.current_issues, trend.change_percent, trend.direction
    ));

    let tools: BTreeSet<&String> = previous
        .summary
        .issues_by_tool
        .keys()
        .chain(current.summary.issues_by_tool.keys())
        .collect();
    let mut tool_lines = String::new();
    for tool in tools {
        let before = previous
            .summary
            .issues_by_tool
            .get(tool)
            .copied()
            .unwrap_or(0);
        let after = current
            .summary
            .issues_by_tool
            .get(tool)
            .copied()
            .unwrap_or(0);
        if before != after {
            tool_lines.push_str(&format!("  {}: {} → {}\n", tool, before, after));
        }
    }
    if !tool_lines.is_empty() {
        out.push_str("\nBy tool:\n");
        out.push_str(&tool_lines);
    }

    if trend.new_issues > 0 {
        out.push_str(&format!("\nNew Issues: {}\n", trend.new_issues));
    }
    if trend.resolved_issues > 0 {
        out.push_str(&format!("\nResolved Issues: {}\n", trend.resolved_issues));
    }

    out
}

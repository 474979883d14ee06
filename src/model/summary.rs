//! Aggregated output records: the cross-tool summary and the report that
//! wraps one whole run.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::issue::{Category, HealthLevel, NormalizedIssue, Severity};
use crate::model::report::ToolReport;
use crate::recommend::Recommendation;
use crate::trend::Trend;

/// Counters and health score derived in a single pass over the merged issue
/// list of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossToolSummary {
    pub total_issues: usize,
    pub total_tools: usize,
    pub supported_tools: usize,
    pub unsupported_tools: usize,
    pub issues_by_tool: BTreeMap<String, usize>,
    pub issues_by_category: BTreeMap<Category, usize>,
    pub issues_by_severity: BTreeMap<Severity, usize>,
    pub health_score: HealthLevel,
    /// 0-100; 0 when no addressable resources were reported.
    pub score_percent: f64,
}

/// Output of one aggregation run. Immutable value; a trend is attached by
/// building a new report via [`AggregatedReport::with_trend`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedReport {
    pub timestamp: DateTime<Utc>,
    pub issues: Vec<NormalizedIssue>,
    /// Keyed by tool name; last write wins on duplicate tool names.
    pub tool_reports: BTreeMap<String, ToolReport>,
    pub summary: CrossToolSummary,
    pub recommendations: Vec<Recommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
}

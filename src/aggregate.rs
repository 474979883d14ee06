//! Aggregation: runs the normalizer over a batch of tool reports, merges the
//! results, and derives the cross-tool summary and health score.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use tracing::debug;

use crate::error::Result;
use crate::model::{
    AggregatedReport, Category, CrossToolSummary, HealthLevel, NormalizedIssue, RawReport,
    Severity, ToolReport,
};
use crate::normalize::normalize;
use crate::recommend;

/// Aggregate a batch of tool reports into one report.
///
/// Duplicate tool names follow last-write-wins in the stored map, though each
/// supported duplicate still contributes its issues. Any normalization error
/// aborts the whole batch: a partial cross-tool view is worse than a clear
/// failure.
pub fn aggregate(reports: &[ToolReport]) -> Result<AggregatedReport> {
    let mut issues: Vec<NormalizedIssue> = Vec::new();
    let mut tool_reports: BTreeMap<String, ToolReport> = BTreeMap::new();

    for report in reports {
        let mut stored = report.clone();
        if report.supported {
            let normalized = normalize(report)?;
            debug!(
                tool = %report.tool,
                issues = normalized.len(),
                "normalized tool report"
            );
            stored.issue_count = normalized.len();
            issues.extend(normalized);
        }
        tool_reports.insert(stored.tool.clone(), stored);
    }

    let summary = build_summary(&issues, &tool_reports);
    let recommendations = recommend::recommendations_for_issues(&issues);

    Ok(AggregatedReport {
        timestamp: Utc::now(),
        issues,
        tool_reports,
        summary,
        recommendations,
        trend: None,
    })
}

fn build_summary(
    issues: &[NormalizedIssue],
    tool_reports: &BTreeMap<String, ToolReport>,
) -> CrossToolSummary {
    let mut issues_by_tool: BTreeMap<String, usize> = BTreeMap::new();
    let mut issues_by_category: BTreeMap<Category, usize> = BTreeMap::new();
    let mut issues_by_severity: BTreeMap<Severity, usize> = BTreeMap::new();

    for issue in issues {
        *issues_by_tool.entry(issue.tool.clone()).or_default() += 1;
        *issues_by_category.entry(issue.category).or_default() += 1;
        *issues_by_severity.entry(issue.severity).or_default() += 1;
    }

    let supported_tools = tool_reports.values().filter(|r| r.supported).count();
    let (score_percent, health_score) = health_score(issues, tool_reports);

    CrossToolSummary {
        total_issues: issues.len(),
        total_tools: tool_reports.len(),
        supported_tools,
        unsupported_tools: tool_reports.len() - supported_tools,
        issues_by_tool,
        issues_by_category,
        issues_by_severity,
        health_score,
        score_percent,
    }
}

/// Score = (addressable resources − resources with at least one issue) /
/// addressable resources, as a percentage clamped to [0, 100]. With no
/// addressable resources at all there is nothing to score: 0 and `unknown`,
/// so a batch of only unsupported tools is never read as "nothing wrong."
fn health_score(
    issues: &[NormalizedIssue],
    tool_reports: &BTreeMap<String, ToolReport>,
) -> (f64, HealthLevel) {
    let total_resources: u64 = tool_reports.values().map(addressable_resources).sum();
    if total_resources == 0 {
        return (0.0, HealthLevel::Unknown);
    }

    let affected: BTreeSet<&str> = issues
        .iter()
        .filter(|i| !i.resource.is_empty())
        .map(|i| i.resource.as_str())
        .collect();

    let score = (total_resources as f64 - affected.len() as f64) / total_resources as f64 * 100.0;
    let score = score.clamp(0.0, 100.0);
    (score, HealthLevel::from_score_percent(score))
}

/// Per-tool "total addressable resource count" used as the score denominator.
/// Unsupported reports and payloads without such a field contribute zero.
fn addressable_resources(report: &ToolReport) -> u64 {
    if !report.supported {
        return 0;
    }
    match &report.raw {
        RawReport::Vault(d) => d.total_references,
        RawReport::S3(d) => d.total_buckets,
        RawReport::Kafka(d) => d.total_topics,
        RawReport::Cassandra(d) => d.total_tables,
        RawReport::Postgres(d) => d.total_tables,
        RawReport::Mongodb(d) => d.total_collections,
        RawReport::V1(_) | RawReport::Opaque { .. } => 0,
    }
}

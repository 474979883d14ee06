//! Prioritized remediation recommendations.
//!
//! Issues are grouped by (tool, category, severity); each group becomes one
//! human-readable action/impact pair whose count is the summed weight of the
//! underlying issues. Ordering is severity priority descending with a
//! deterministic tie-break by tool name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{AggregatedReport, Category, NormalizedIssue, Severity};

/// One prioritized remediation action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub severity: Severity,
    pub tool: String,
    pub action: String,
    pub impact: String,
    /// Summed weight of the underlying issue group, not the issue count.
    pub count: u64,
}

/// Human resource label per tool, used in action phrasing.
const RESOURCE_LABELS: &[(&str, &str)] = &[
    ("vault", "secrets"),
    ("s3", "buckets"),
    ("kafka", "topics"),
    ("cassandra", "tables"),
    ("postgres", "tables"),
    ("mongodb", "collections"),
];

fn resource_label(tool: &str) -> &'static str {
    RESOURCE_LABELS
        .iter()
        .find(|(t, _)| *t == tool)
        .map(|(_, label)| *label)
        .unwrap_or("resources")
}

fn action_text(tool: &str, category: Category, count: u64) -> String {
    let label = resource_label(tool);
    match category {
        Category::Missing => format!("Fix {count} missing {label}"),
        Category::Unused => format!("Clean up {count} unused {label}"),
        Category::Stale => format!("Refresh {count} stale {label}"),
        Category::AccessDenied => format!("Restore access to {count} {label}"),
        Category::Invalid => format!("Repair {count} invalid {label}"),
        Category::Misconfig => format!("Correct {tool} configuration affecting {count} {label}"),
        Category::Drift => format!("Reconcile {tool} drift across {count} {label}"),
        Category::Error => format!("Investigate {count} {tool} scan errors"),
    }
}

/// (severity, category) impact overrides, checked before the per-severity
/// defaults.
const IMPACT_OVERRIDES: &[(Severity, Category, &str)] = &[
    (
        Severity::Critical,
        Category::Missing,
        "Broken references will cause runtime failures",
    ),
    (
        Severity::Critical,
        Category::AccessDenied,
        "Blocked access is interrupting dependent services",
    ),
    (
        Severity::High,
        Category::Missing,
        "Dependent workloads may fail on the next deploy",
    ),
    (
        Severity::High,
        Category::Misconfig,
        "Exposed configuration widens the attack surface",
    ),
    (
        Severity::High,
        Category::Stale,
        "Outdated credentials increase compromise risk",
    ),
    (
        Severity::Medium,
        Category::Drift,
        "Configuration has diverged from the approved baseline",
    ),
    (
        Severity::Medium,
        Category::Unused,
        "Unused resources add cost and audit noise",
    ),
    (
        Severity::Low,
        Category::Unused,
        "Cleanup will reduce clutter and audit noise",
    ),
];

/// Per-severity default impact phrasing.
const IMPACT_DEFAULTS: &[(Severity, &str)] = &[
    (
        Severity::Critical,
        "Immediate action required to prevent outages",
    ),
    (Severity::High, "Address soon to reduce operational risk"),
    (
        Severity::Medium,
        "Schedule remediation in an upcoming maintenance window",
    ),
    (Severity::Low, "Low urgency housekeeping"),
];

/// Terminal fallback when the severity has no default row.
const IMPACT_FALLBACK: &str = "Review and address as needed";

fn impact_text(severity: Severity, category: Category) -> &'static str {
    if let Some((_, _, impact)) = IMPACT_OVERRIDES
        .iter()
        .find(|(s, c, _)| *s == severity && *c == category)
    {
        return impact;
    }
    IMPACT_DEFAULTS
        .iter()
        .find(|(s, _)| *s == severity)
        .map(|(_, impact)| *impact)
        .unwrap_or(IMPACT_FALLBACK)
}

/// Generate prioritized recommendations for a report's current issues.
pub fn generate_recommendations(report: &AggregatedReport) -> Vec<Recommendation> {
    recommendations_for_issues(&report.issues)
}

/// Group issues by (tool, category, severity) and emit one recommendation per
/// group, ordered by severity priority descending then tool name.
pub fn recommendations_for_issues(issues: &[NormalizedIssue]) -> Vec<Recommendation> {
    let mut groups: BTreeMap<(String, Category, Severity), u64> = BTreeMap::new();
    for issue in issues {
        *groups
            .entry((issue.tool.clone(), issue.category, issue.severity))
            .or_default() += issue.count;
    }

    let mut recommendations: Vec<Recommendation> = groups
        .into_iter()
        .map(|((tool, category, severity), count)| Recommendation {
            severity,
            action: action_text(&tool, category, count),
            impact: impact_text(severity, category).to_string(),
            tool,
            count,
        })
        .collect();

    // Stable sort: ties keep the deterministic (tool, category) group order.
    recommendations.sort_by(|a, b| {
        b.severity
            .priority()
            .cmp(&a.severity.priority())
            .then_with(|| a.tool.cmp(&b.tool))
    });
    recommendations
}

/// Truncate to the first `n` recommendations.
pub fn top_recommendations(recommendations: &[Recommendation], n: usize) -> Vec<Recommendation> {
    recommendations.iter().take(n).cloned().collect()
}

/// Partition an already-built list by severity, preserving insertion order
/// within each bucket.
pub fn group_by_severity(
    recommendations: &[Recommendation],
) -> BTreeMap<Severity, Vec<Recommendation>> {
    let mut buckets: BTreeMap<Severity, Vec<Recommendation>> = BTreeMap::new();
    for recommendation in recommendations {
        buckets
            .entry(recommendation.severity)
            .or_default()
            .push(recommendation.clone());
    }
    buckets
}

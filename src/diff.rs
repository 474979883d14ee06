//! Identity-based issue diffing between a baseline and a current run.
//!
//! Issues are keyed by `tool|category|resource`. `delta` is a raw count
//! difference over the full issue lists and can disagree with the new/resolved
//! sets when an issue's attributes changed without its identity changing;
//! that is intentional (delta measures volume, new/resolved measures identity
//! churn).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{AggregatedReport, Category, NormalizedIssue, Severity};

/// Set-difference between two aggregated runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffResult {
    pub baseline_timestamp: DateTime<Utc>,
    pub current_timestamp: DateTime<Utc>,
    /// Current-side issues whose identity key is absent from the baseline,
    /// deduplicated by key, in key order.
    pub new_issues: Vec<NormalizedIssue>,
    /// Baseline-side issues whose identity key is absent from the current
    /// run, deduplicated by key, in key order.
    pub resolved_issues: Vec<NormalizedIssue>,
    /// Raw count difference: current issue list length minus baseline's.
    pub delta: i64,
    /// Breakdowns over new issues only.
    pub new_by_severity: BTreeMap<Severity, usize>,
    pub new_by_tool: BTreeMap<String, usize>,
    pub new_by_category: BTreeMap<Category, usize>,
}

impl DiffResult {
    pub fn new_count(&self) -> usize {
        self.new_issues.len()
    }

    pub fn resolved_count(&self) -> usize {
        self.resolved_issues.len()
    }

    pub fn is_clean(&self) -> bool {
        self.new_issues.is_empty() && self.resolved_issues.is_empty() && self.delta == 0
    }
}

/// Compute the identity-keyed diff between two runs.
pub fn compute_diff(baseline: &AggregatedReport, current: &AggregatedReport) -> DiffResult {
    let baseline_keys: BTreeMap<String, &NormalizedIssue> = baseline
        .issues
        .iter()
        .map(|i| (i.identity_key(), i))
        .collect();
    let current_keys: BTreeMap<String, &NormalizedIssue> = current
        .issues
        .iter()
        .map(|i| (i.identity_key(), i))
        .collect();

    let new_issues: Vec<NormalizedIssue> = current_keys
        .iter()
        .filter(|(key, _)| !baseline_keys.contains_key(*key))
        .map(|(_, issue)| (*issue).clone())
        .collect();

    let resolved_issues: Vec<NormalizedIssue> = baseline_keys
        .iter()
        .filter(|(key, _)| !current_keys.contains_key(*key))
        .map(|(_, issue)| (*issue).clone())
        .collect();

    let mut new_by_severity: BTreeMap<Severity, usize> = BTreeMap::new();
    let mut new_by_tool: BTreeMap<String, usize> = BTreeMap::new();
    let mut new_by_category: BTreeMap<Category, usize> = BTreeMap::new();
    for issue in &new_issues {
        *new_by_severity.entry(issue.severity).or_default() += 1;
        *new_by_tool.entry(issue.tool.clone()).or_default() += 1;
        *new_by_category.entry(issue.category).or_default() += 1;
    }

    DiffResult {
        baseline_timestamp: baseline.timestamp,
        current_timestamp: current.timestamp,
        new_issues,
        resolved_issues,
        delta: current.issues.len() as i64 - baseline.issues.len() as i64,
        new_by_severity,
        new_by_tool,
        new_by_category,
    }
}

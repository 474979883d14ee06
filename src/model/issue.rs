//! The shared issue vocabulary: severities, categories, health levels, and
//! the normalized issue record every other component consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// Numeric priority used for recommendation ordering.
    pub fn priority(&self) -> u8 {
        match self {
            Severity::Critical => 4,
            Severity::High => 3,
            Severity::Medium => 2,
            Severity::Low => 1,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// The closed category set every tool-native status maps into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Missing,
    Unused,
    Stale,
    Misconfig,
    AccessDenied,
    Invalid,
    Drift,
    Error,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Missing => "missing",
            Category::Unused => "unused",
            Category::Stale => "stale",
            Category::Misconfig => "misconfig",
            Category::AccessDenied => "access_denied",
            Category::Invalid => "invalid",
            Category::Drift => "drift",
            Category::Error => "error",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Health classification for a whole aggregated run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthLevel {
    Excellent,
    Good,
    Warning,
    Critical,
    Severe,
    /// No addressable resources were reported, so no score can be derived.
    /// A batch of only unsupported tools lands here, never at `Excellent`.
    Unknown,
}

impl HealthLevel {
    /// Map a 0-100 score to a level via fixed descending thresholds.
    pub fn from_score_percent(score: f64) -> Self {
        if score >= 95.0 {
            HealthLevel::Excellent
        } else if score >= 85.0 {
            HealthLevel::Good
        } else if score >= 70.0 {
            HealthLevel::Warning
        } else if score >= 50.0 {
            HealthLevel::Critical
        } else {
            HealthLevel::Severe
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthLevel::Excellent => "excellent",
            HealthLevel::Good => "good",
            HealthLevel::Warning => "warning",
            HealthLevel::Critical => "critical",
            HealthLevel::Severe => "severe",
            HealthLevel::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for HealthLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

fn default_count() -> u64 {
    1
}

/// A single actionable finding expressed in the common schema, independent of
/// which tool produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedIssue {
    /// Source tool identifier (e.g. `vault`, `s3`).
    pub tool: String,
    pub category: Category,
    pub severity: Severity,
    /// Tool-specific opaque identifier, stable across runs for the same
    /// underlying resource (e.g. `s3://bucket/prefix`, `secret/app/db`).
    pub resource: String,
    /// Free-text explanation.
    pub evidence: String,
    /// Weight (reference count, partition count, ...); defaults to 1.
    #[serde(default = "default_count")]
    pub count: u64,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl NormalizedIssue {
    /// Identity key for diffing and grouping: `tool|category|resource`.
    ///
    /// Two issues with the same key are the same issue across runs even if
    /// their evidence text differs. Known limitation: the `|` separator is
    /// not escaped, so a resource string containing `|` could collide with
    /// another key. Downstream consumers depend on the exact key format, so
    /// it is kept as-is.
    pub fn identity_key(&self) -> String {
        format!("{}|{}|{}", self.tool, self.category.as_str(), self.resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_issue(tool: &str, category: Category, resource: &str) -> NormalizedIssue {
        let now = Utc::now();
        NormalizedIssue {
            tool: tool.to_string(),
            category,
            severity: Severity::Medium,
            resource: resource.to_string(),
            evidence: "test".to_string(),
            count: 1,
            first_seen: now,
            last_seen: now,
        }
    }

    #[test]
    fn test_severity_as_str() {
        assert_eq!(Severity::Low.as_str(), "low");
        assert_eq!(Severity::Medium.as_str(), "medium");
        assert_eq!(Severity::High.as_str(), "high");
        assert_eq!(Severity::Critical.as_str(), "critical");
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(format!("{}", Severity::Critical), "CRITICAL");
        assert_eq!(format!("{}", Severity::Low), "LOW");
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn test_severity_priority() {
        assert_eq!(Severity::Critical.priority(), 4);
        assert_eq!(Severity::High.priority(), 3);
        assert_eq!(Severity::Medium.priority(), 2);
        assert_eq!(Severity::Low.priority(), 1);
    }

    #[test]
    fn test_severity_serialization() {
        let json = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
        let deserialized: Severity = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, Severity::Critical);
    }

    #[test]
    fn test_category_as_str() {
        assert_eq!(Category::Missing.as_str(), "missing");
        assert_eq!(Category::Unused.as_str(), "unused");
        assert_eq!(Category::Stale.as_str(), "stale");
        assert_eq!(Category::Misconfig.as_str(), "misconfig");
        assert_eq!(Category::AccessDenied.as_str(), "access_denied");
        assert_eq!(Category::Invalid.as_str(), "invalid");
        assert_eq!(Category::Drift.as_str(), "drift");
        assert_eq!(Category::Error.as_str(), "error");
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&Category::AccessDenied).unwrap();
        assert_eq!(json, "\"access_denied\"");
        let deserialized: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, Category::AccessDenied);
    }

    #[test]
    fn test_health_level_boundaries() {
        assert_eq!(HealthLevel::from_score_percent(100.0), HealthLevel::Excellent);
        assert_eq!(HealthLevel::from_score_percent(95.0), HealthLevel::Excellent);
        assert_eq!(HealthLevel::from_score_percent(94.9), HealthLevel::Good);
        assert_eq!(HealthLevel::from_score_percent(85.0), HealthLevel::Good);
        assert_eq!(HealthLevel::from_score_percent(84.9), HealthLevel::Warning);
        assert_eq!(HealthLevel::from_score_percent(70.0), HealthLevel::Warning);
        assert_eq!(HealthLevel::from_score_percent(69.9), HealthLevel::Critical);
        assert_eq!(HealthLevel::from_score_percent(50.0), HealthLevel::Critical);
        assert_eq!(HealthLevel::from_score_percent(49.9), HealthLevel::Severe);
        assert_eq!(HealthLevel::from_score_percent(0.0), HealthLevel::Severe);
    }

    #[test]
    fn test_health_level_display() {
        assert_eq!(format!("{}", HealthLevel::Excellent), "EXCELLENT");
        assert_eq!(format!("{}", HealthLevel::Unknown), "UNKNOWN");
    }

    #[test]
    fn test_identity_key() {
        let issue = make_issue("s3", Category::Misconfig, "s3://logs");
        assert_eq!(issue.identity_key(), "s3|misconfig|s3://logs");
    }

    #[test]
    fn test_identity_key_ignores_evidence() {
        let mut a = make_issue("vault", Category::Missing, "secret/app/db");
        let mut b = make_issue("vault", Category::Missing, "secret/app/db");
        a.evidence = "first run".to_string();
        b.evidence = "second run".to_string();
        assert_eq!(a.identity_key(), b.identity_key());
    }

    #[test]
    fn test_count_defaults_to_one() {
        let json = r#"{
            "tool": "vault",
            "category": "missing",
            "severity": "high",
            "resource": "secret/app/db",
            "evidence": "missing",
            "first_seen": "2026-08-26T00:00:00Z",
            "last_seen": "2026-08-26T00:00:00Z"
        }"#;
        let issue: NormalizedIssue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.count, 1);
    }
}

//! Category and severity mapping tables.
//!
//! All lookups are literal constant tables rather than nested conditionals so
//! they can be unit-tested exhaustively and extended without touching control
//! flow. Unrecognized statuses and finding IDs map to [`Category::Error`].

use crate::model::{Category, Severity};

/// Statuses the tools themselves consider healthy; records carrying one of
/// these never become issues.
pub const OK_STATUSES: &[&str] = &["ok", "healthy", "active"];

pub fn is_ok_status(status: &str) -> bool {
    OK_STATUSES.contains(&status)
}

/// Secret-store auditor statuses.
pub const VAULT_STATUS_CATEGORIES: &[(&str, Category)] = &[
    ("missing", Category::Missing),
    ("not_found", Category::Missing),
    ("unused", Category::Unused),
    ("orphaned", Category::Unused),
    ("stale", Category::Stale),
    ("expired", Category::Stale),
    ("rotation_overdue", Category::Stale),
    ("misconfigured", Category::Misconfig),
    ("access_denied", Category::AccessDenied),
    ("permission_denied", Category::AccessDenied),
    ("invalid", Category::Invalid),
    ("malformed", Category::Invalid),
    ("drift", Category::Drift),
];

/// Object-storage auditor statuses.
pub const S3_STATUS_CATEGORIES: &[(&str, Category)] = &[
    ("missing", Category::Missing),
    ("no_such_bucket", Category::Missing),
    ("unused", Category::Unused),
    ("empty", Category::Unused),
    ("stale", Category::Stale),
    ("lifecycle_expired", Category::Stale),
    ("public", Category::Misconfig),
    ("unencrypted", Category::Misconfig),
    ("versioning_disabled", Category::Misconfig),
    ("misconfigured", Category::Misconfig),
    ("access_denied", Category::AccessDenied),
    ("forbidden", Category::AccessDenied),
    ("invalid_policy", Category::Invalid),
    ("invalid", Category::Invalid),
    ("drift", Category::Drift),
];

/// Message-queue auditor statuses.
pub const KAFKA_STATUS_CATEGORIES: &[(&str, Category)] = &[
    ("missing", Category::Missing),
    ("unused", Category::Unused),
    ("idle", Category::Unused),
    ("stale", Category::Stale),
    ("lagging", Category::Stale),
    ("under_replicated", Category::Misconfig),
    ("misconfigured", Category::Misconfig),
    ("access_denied", Category::AccessDenied),
    ("unauthorized", Category::AccessDenied),
    ("invalid_config", Category::Invalid),
    ("invalid", Category::Invalid),
    ("drift", Category::Drift),
    ("offline", Category::Error),
];

/// Columnar-database auditor statuses.
pub const CASSANDRA_STATUS_CATEGORIES: &[(&str, Category)] = &[
    ("missing", Category::Missing),
    ("unused", Category::Unused),
    ("stale", Category::Stale),
    ("tombstone_heavy", Category::Stale),
    ("compaction_backlog", Category::Misconfig),
    ("misconfigured", Category::Misconfig),
    ("access_denied", Category::AccessDenied),
    ("invalid", Category::Invalid),
    ("corrupt", Category::Invalid),
    ("drift", Category::Drift),
];

/// Relational-database auditor statuses.
pub const POSTGRES_STATUS_CATEGORIES: &[(&str, Category)] = &[
    ("missing", Category::Missing),
    ("unused", Category::Unused),
    ("stale", Category::Stale),
    ("bloated", Category::Stale),
    ("misconfigured", Category::Misconfig),
    ("access_denied", Category::AccessDenied),
    ("permission_denied", Category::AccessDenied),
    ("invalid", Category::Invalid),
    ("invalid_index", Category::Invalid),
    ("drift", Category::Drift),
];

/// Document-database auditor statuses.
pub const MONGODB_STATUS_CATEGORIES: &[(&str, Category)] = &[
    ("missing", Category::Missing),
    ("unused", Category::Unused),
    ("stale", Category::Stale),
    ("unsharded", Category::Misconfig),
    ("misconfigured", Category::Misconfig),
    ("access_denied", Category::AccessDenied),
    ("unauthorized", Category::AccessDenied),
    ("invalid", Category::Invalid),
    ("drift", Category::Drift),
];

/// Generic v1 finding IDs. IDs not present here default to `error`.
pub const V1_FINDING_CATEGORIES: &[(&str, Category)] = &[
    ("missing_resource", Category::Missing),
    ("missing_reference", Category::Missing),
    ("unused_resource", Category::Unused),
    ("orphaned_resource", Category::Unused),
    ("stale_resource", Category::Stale),
    ("stale_data", Category::Stale),
    ("misconfiguration", Category::Misconfig),
    ("insecure_configuration", Category::Misconfig),
    ("access_denied", Category::AccessDenied),
    ("permission_error", Category::AccessDenied),
    ("invalid_definition", Category::Invalid),
    ("validation_failure", Category::Invalid),
    ("configuration_drift", Category::Drift),
    ("baseline_drift", Category::Drift),
    ("scan_error", Category::Error),
];

/// Look up a tool-native status in a per-tool table.
pub fn status_category(table: &[(&str, Category)], status: &str) -> Category {
    table
        .iter()
        .find(|(s, _)| *s == status)
        .map(|(_, c)| *c)
        .unwrap_or(Category::Error)
}

/// Map a generic v1 finding ID to a category.
pub fn v1_finding_category(id: &str) -> Category {
    status_category(V1_FINDING_CATEGORIES, id)
}

/// Map a tool-supplied severity string to the closed severity set.
/// Unrecognized strings land in the middle rather than inflating or burying
/// the finding.
pub fn generic_severity(severity: &str) -> Severity {
    match severity.to_ascii_lowercase().as_str() {
        "critical" => Severity::Critical,
        "high" => Severity::High,
        "medium" => Severity::Medium,
        "low" => Severity::Low,
        _ => Severity::Medium,
    }
}

/// Per-(category, tool) severity overrides for tools with no native severity
/// concept. Checked before the per-category defaults below.
pub const SEVERITY_POLICY: &[(Category, &str, Severity)] = &[
    // A missing secret that is still referenced breaks consumers outright.
    (Category::Missing, "vault", Severity::Critical),
    (Category::Stale, "vault", Severity::High),
    (Category::AccessDenied, "vault", Severity::High),
    // Public or unencrypted buckets are an exposure, not a hygiene issue.
    (Category::Misconfig, "s3", Severity::High),
    (Category::Missing, "s3", Severity::High),
    (Category::Misconfig, "kafka", Severity::High),
    (Category::Invalid, "cassandra", Severity::High),
    (Category::Unused, "cassandra", Severity::Low),
    (Category::Unused, "postgres", Severity::Low),
    (Category::Unused, "mongodb", Severity::Low),
];

/// Per-category fallback severities.
pub const SEVERITY_DEFAULTS: &[(Category, Severity)] = &[
    (Category::Missing, Severity::High),
    (Category::Unused, Severity::Low),
    (Category::Stale, Severity::Medium),
    (Category::Misconfig, Severity::Medium),
    (Category::AccessDenied, Severity::High),
    (Category::Invalid, Severity::Medium),
    (Category::Drift, Severity::Medium),
    (Category::Error, Severity::Medium),
];

/// Severity policy for tools without a native severity field. Deterministic:
/// (category, tool) overrides first, then the per-category default.
pub fn determine_severity(category: Category, tool: &str) -> Severity {
    if let Some((_, _, severity)) = SEVERITY_POLICY
        .iter()
        .find(|(c, t, _)| *c == category && *t == tool)
    {
        return *severity;
    }
    SEVERITY_DEFAULTS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, s)| *s)
        .unwrap_or(Severity::Medium)
}

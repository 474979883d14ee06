//! Secret-store auditor converter.

use crate::model::{NormalizedIssue, ToolReport, VaultReport};
use crate::normalize::tables;

/// Vault has no native severity concept, so the severity policy table
/// applies. The secret's own observation window, when present, overrides the
/// report timestamp.
pub(super) fn normalize(report: &ToolReport, data: &VaultReport) -> Vec<NormalizedIssue> {
    let mut issues = Vec::new();

    for secret in &data.secrets {
        if tables::is_ok_status(&secret.status) {
            continue;
        }
        let category = tables::status_category(tables::VAULT_STATUS_CATEGORIES, &secret.status);
        issues.push(NormalizedIssue {
            tool: report.tool.clone(),
            category,
            severity: tables::determine_severity(category, &report.tool),
            resource: secret.path.clone(),
            evidence: format!(
                "secret {} is {} ({} references)",
                secret.path, secret.status, secret.reference_count
            ),
            count: secret.reference_count.max(1),
            first_seen: secret.first_seen.unwrap_or(report.timestamp),
            last_seen: secret.last_seen.unwrap_or(report.timestamp),
        });
    }

    issues
}

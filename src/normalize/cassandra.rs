//! Columnar-database auditor converter.

use crate::model::{CassandraReport, NormalizedIssue, ToolReport};
use crate::normalize::tables;

pub(super) fn normalize(report: &ToolReport, data: &CassandraReport) -> Vec<NormalizedIssue> {
    let mut issues = Vec::new();

    for table in &data.tables {
        if tables::is_ok_status(&table.status) {
            continue;
        }
        let category = tables::status_category(tables::CASSANDRA_STATUS_CATEGORIES, &table.status);
        issues.push(NormalizedIssue {
            tool: report.tool.clone(),
            category,
            severity: tables::determine_severity(category, &report.tool),
            resource: format!("{}.{}", table.keyspace, table.table),
            evidence: format!(
                "table {}.{} is {}",
                table.keyspace, table.table, table.status
            ),
            count: 1,
            first_seen: report.timestamp,
            last_seen: report.timestamp,
        });
    }

    issues
}

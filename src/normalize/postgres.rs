//! Relational-database auditor converter.
//!
//! Postgres is the one bespoke tool that supplies its own severity strings on
//! some findings; those take precedence over the severity policy table.

use crate::model::{NormalizedIssue, PostgresReport, ToolReport};
use crate::normalize::tables;

pub(super) fn normalize(report: &ToolReport, data: &PostgresReport) -> Vec<NormalizedIssue> {
    let mut issues = Vec::new();

    for object in &data.objects {
        if tables::is_ok_status(&object.status) {
            continue;
        }
        let category = tables::status_category(tables::POSTGRES_STATUS_CATEGORIES, &object.status);
        let severity = match &object.severity {
            Some(s) => tables::generic_severity(s),
            None => tables::determine_severity(category, &report.tool),
        };
        let resource = match &object.column {
            Some(column) => format!("{}.{}.{}", object.schema, object.table, column),
            None => format!("{}.{}", object.schema, object.table),
        };
        issues.push(NormalizedIssue {
            tool: report.tool.clone(),
            category,
            severity,
            resource: resource.clone(),
            evidence: format!("{} is {}", resource, object.status),
            count: 1,
            first_seen: report.timestamp,
            last_seen: report.timestamp,
        });
    }

    issues
}

//! Document-database auditor converter.

use crate::model::{MongoReport, NormalizedIssue, ToolReport};
use crate::normalize::tables;

pub(super) fn normalize(report: &ToolReport, data: &MongoReport) -> Vec<NormalizedIssue> {
    let mut issues = Vec::new();

    for collection in &data.collections {
        if tables::is_ok_status(&collection.status) {
            continue;
        }
        let category =
            tables::status_category(tables::MONGODB_STATUS_CATEGORIES, &collection.status);
        let resource = match &collection.index {
            Some(index) => format!(
                "{}.{}.{}",
                collection.database, collection.collection, index
            ),
            None => format!("{}.{}", collection.database, collection.collection),
        };
        issues.push(NormalizedIssue {
            tool: report.tool.clone(),
            category,
            severity: tables::determine_severity(category, &report.tool),
            resource: resource.clone(),
            evidence: format!("{} is {}", resource, collection.status),
            count: 1,
            first_seen: report.timestamp,
            last_seen: report.timestamp,
        });
    }

    issues
}

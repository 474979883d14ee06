//! Message-queue auditor converter.

use crate::model::{KafkaReport, NormalizedIssue, ToolReport};
use crate::normalize::tables;

/// Partition count becomes the issue weight.
pub(super) fn normalize(report: &ToolReport, data: &KafkaReport) -> Vec<NormalizedIssue> {
    let mut issues = Vec::new();

    for topic in &data.topics {
        if tables::is_ok_status(&topic.status) {
            continue;
        }
        let category = tables::status_category(tables::KAFKA_STATUS_CATEGORIES, &topic.status);
        issues.push(NormalizedIssue {
            tool: report.tool.clone(),
            category,
            severity: tables::determine_severity(category, &report.tool),
            resource: format!("kafka://{}", topic.name),
            evidence: format!(
                "topic {} is {} ({} partitions)",
                topic.name, topic.status, topic.partition_count
            ),
            count: topic.partition_count.max(1),
            first_seen: report.timestamp,
            last_seen: report.timestamp,
        });
    }

    issues
}

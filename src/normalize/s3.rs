//! Object-storage auditor converter.
//!
//! Buckets carry nested per-prefix findings. Each non-OK prefix becomes its
//! own issue rather than being folded into the parent; a bucket only becomes
//! an issue itself when it has a non-OK status and no prefix issues of its
//! own.

use crate::model::{NormalizedIssue, S3Report, ToolReport};
use crate::normalize::tables;

pub(super) fn normalize(report: &ToolReport, data: &S3Report) -> Vec<NormalizedIssue> {
    let mut issues = Vec::new();

    for bucket in &data.buckets {
        let bucket_resource = format!("s3://{}", bucket.name);
        let mut prefix_issues = 0usize;

        for prefix in &bucket.prefixes {
            if tables::is_ok_status(&prefix.status) {
                continue;
            }
            let category = tables::status_category(tables::S3_STATUS_CATEGORIES, &prefix.status);
            issues.push(NormalizedIssue {
                tool: report.tool.clone(),
                category,
                severity: tables::determine_severity(category, &report.tool),
                resource: format!("{}/{}", bucket_resource, prefix.prefix),
                evidence: format!(
                    "prefix {} in bucket {} is {}",
                    prefix.prefix, bucket.name, prefix.status
                ),
                count: prefix.object_count.unwrap_or(1).max(1),
                first_seen: report.timestamp,
                last_seen: report.timestamp,
            });
            prefix_issues += 1;
        }

        if prefix_issues == 0 && !tables::is_ok_status(&bucket.status) {
            let category = tables::status_category(tables::S3_STATUS_CATEGORIES, &bucket.status);
            issues.push(NormalizedIssue {
                tool: report.tool.clone(),
                category,
                severity: tables::determine_severity(category, &report.tool),
                resource: bucket_resource,
                evidence: format!("bucket {} is {}", bucket.name, bucket.status),
                count: bucket.object_count.unwrap_or(1).max(1),
                first_seen: report.timestamp,
                last_seen: report.timestamp,
            });
        }
    }

    issues
}

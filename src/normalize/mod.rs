//! Normalization layer: converts one tool-specific report (or a generic v1
//! finding envelope) into normalized issues.
//!
//! Dispatch order matters: unsupported reports short-circuit to an empty
//! result, a v1 envelope is handled before tool dispatch (any tool may adopt
//! the generic format), and only then does the tool name select a bespoke
//! converter. A supported report whose tool name matches no converter is a
//! hard error; so is a payload whose shape contradicts its tool name.

pub mod tables;

mod cassandra;
mod kafka;
mod mongodb;
mod postgres;
mod s3;
mod vault;

use crate::error::{AuditError, Result};
use crate::model::{NormalizedIssue, RawReport, ToolReport, V1Report};

/// Convert a tool report into normalized issues.
///
/// Unsupported reports yield an empty list with no error; they still count as
/// "unsupported" in the aggregate summary.
pub fn normalize(report: &ToolReport) -> Result<Vec<NormalizedIssue>> {
    if !report.supported {
        return Ok(Vec::new());
    }

    if let RawReport::V1(envelope) = &report.raw {
        return Ok(normalize_v1(report, envelope));
    }

    match report.tool.as_str() {
        "vault" => match &report.raw {
            RawReport::Vault(data) => Ok(vault::normalize(report, data)),
            _ => Err(mismatch(report, "vault")),
        },
        "s3" => match &report.raw {
            RawReport::S3(data) => Ok(s3::normalize(report, data)),
            _ => Err(mismatch(report, "s3")),
        },
        "kafka" => match &report.raw {
            RawReport::Kafka(data) => Ok(kafka::normalize(report, data)),
            _ => Err(mismatch(report, "kafka")),
        },
        "cassandra" => match &report.raw {
            RawReport::Cassandra(data) => Ok(cassandra::normalize(report, data)),
            _ => Err(mismatch(report, "cassandra")),
        },
        "postgres" => match &report.raw {
            RawReport::Postgres(data) => Ok(postgres::normalize(report, data)),
            _ => Err(mismatch(report, "postgres")),
        },
        "mongodb" => match &report.raw {
            RawReport::Mongodb(data) => Ok(mongodb::normalize(report, data)),
            _ => Err(mismatch(report, "mongodb")),
        },
        other => Err(AuditError::UnknownTool(other.to_string())),
    }
}

fn mismatch(report: &ToolReport, expected: &'static str) -> AuditError {
    AuditError::PayloadMismatch {
        tool: report.tool.clone(),
        expected,
    }
}

/// Generic v1 envelope path: every finding maps 1:1 to an issue.
fn normalize_v1(report: &ToolReport, envelope: &V1Report) -> Vec<NormalizedIssue> {
    envelope
        .findings
        .iter()
        .map(|finding| NormalizedIssue {
            tool: report.tool.clone(),
            category: tables::v1_finding_category(&finding.id),
            severity: tables::generic_severity(&finding.severity),
            resource: finding.location.clone(),
            evidence: finding.message.clone(),
            count: 1,
            first_seen: report.timestamp,
            last_seen: report.timestamp,
        })
        .collect()
}

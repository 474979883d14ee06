//! Shared domain model: the issue vocabulary, raw tool payloads, and
//! aggregated output records.

pub mod issue;
pub mod report;
pub mod summary;

pub use issue::{Category, HealthLevel, NormalizedIssue, Severity};
pub use report::{
    CassandraReport, CassandraTable, KafkaReport, KafkaTopic, MongoCollection, MongoReport,
    PostgresObject, PostgresReport, RawReport, S3Bucket, S3Prefix, S3Report, ToolReport,
    V1Finding, V1Report, VaultReport, VaultSecret,
};
pub use summary::{AggregatedReport, CrossToolSummary};

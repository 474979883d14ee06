//! Raw tool report payloads and the `ToolReport` input wrapper.
//!
//! Each scanning tool emits its own JSON schema; `RawReport` is the explicit
//! sum type over the known shapes plus the generic v1 finding envelope. The
//! wrapper format is ours, so the union is tagged with a `schema` field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tagged union over the known tool report shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "schema", rename_all = "snake_case")]
pub enum RawReport {
    Vault(VaultReport),
    S3(S3Report),
    Kafka(KafkaReport),
    Cassandra(CassandraReport),
    Postgres(PostgresReport),
    Mongodb(MongoReport),
    V1(V1Report),
    /// Payload of an unsupported tool; never normalized, carried verbatim.
    Opaque {
        #[serde(default)]
        data: serde_json::Value,
    },
}

impl RawReport {
    /// Human label for the payload shape, used in mismatch errors.
    pub fn shape_name(&self) -> &'static str {
        match self {
            RawReport::Vault(_) => "vault",
            RawReport::S3(_) => "s3",
            RawReport::Kafka(_) => "kafka",
            RawReport::Cassandra(_) => "cassandra",
            RawReport::Postgres(_) => "postgres",
            RawReport::Mongodb(_) => "mongodb",
            RawReport::V1(_) => "v1",
            RawReport::Opaque { .. } => "opaque",
        }
    }
}

/// Secret-store auditor report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultReport {
    /// Total secret references known to the auditor.
    #[serde(default)]
    pub total_references: u64,
    #[serde(default)]
    pub secrets: Vec<VaultSecret>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultSecret {
    /// Native secret path, e.g. `secret/app/db`.
    pub path: String,
    pub status: String,
    #[serde(default)]
    pub reference_count: u64,
    /// Observation window supplied by the auditor itself, when it has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_seen: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,
}

/// Object-storage auditor report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Report {
    #[serde(default)]
    pub total_buckets: u64,
    #[serde(default)]
    pub buckets: Vec<S3Bucket>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Bucket {
    pub name: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_count: Option<u64>,
    /// Per-prefix findings; each non-OK prefix becomes its own issue.
    #[serde(default)]
    pub prefixes: Vec<S3Prefix>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Prefix {
    pub prefix: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_count: Option<u64>,
}

/// Message-queue auditor report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KafkaReport {
    #[serde(default)]
    pub total_topics: u64,
    #[serde(default)]
    pub topics: Vec<KafkaTopic>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KafkaTopic {
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub partition_count: u64,
}

/// Columnar-database auditor report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CassandraReport {
    #[serde(default)]
    pub total_tables: u64,
    #[serde(default)]
    pub tables: Vec<CassandraTable>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CassandraTable {
    pub keyspace: String,
    pub table: String,
    pub status: String,
}

/// Relational-database auditor report. Postgres supplies its own severity
/// strings on some findings; the severity policy table fills the gaps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgresReport {
    /// Total scanned tables.
    #[serde(default)]
    pub total_tables: u64,
    #[serde(default)]
    pub objects: Vec<PostgresObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgresObject {
    pub schema: String,
    pub table: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

/// Document-database auditor report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoReport {
    #[serde(default)]
    pub total_collections: u64,
    #[serde(default)]
    pub collections: Vec<MongoCollection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoCollection {
    pub database: String,
    pub collection: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    pub status: String,
}

/// Generic v1 finding envelope used by newer scanners instead of a bespoke
/// schema. Every finding maps 1:1 to a normalized issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct V1Report {
    #[serde(default)]
    pub findings: Vec<V1Finding>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct V1Finding {
    pub id: String,
    pub severity: String,
    pub location: String,
    pub message: String,
}

/// One scanning tool's raw output for one run, wrapped with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolReport {
    /// Tool identifier used for converter dispatch.
    pub tool: String,
    pub timestamp: DateTime<Utc>,
    /// Unsupported tools contribute zero issues but are still counted in the
    /// summary.
    pub supported: bool,
    pub raw: RawReport,
    /// Number of normalized issues this report produced; filled in during
    /// aggregation on the stored copy.
    #[serde(default)]
    pub issue_count: usize,
}

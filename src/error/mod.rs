//! Error types for infra-audit.
//!
//! A single unified error enum covers the whole pipeline. The two variants
//! callers must care about are `PayloadMismatch` (a report claims a tool type
//! but carries data of the wrong shape, which signals a producer bug upstream)
//! and `UnknownTool` (a supported report names a tool we have no converter
//! for). Both abort aggregation for the whole batch: a partial cross-tool view
//! is worse than a clear failure.

mod context;

pub use context::IoOperation;

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for all infra-audit operations.
#[derive(Error, Debug)]
pub enum AuditError {
    /// A report's raw payload does not match the shape its tool name implies.
    #[error("Report for tool '{tool}' does not carry a {expected} payload")]
    PayloadMismatch {
        tool: String,
        expected: &'static str,
    },

    /// A supported report names a tool with no registered converter.
    #[error("Unknown tool type: {0}")]
    UnknownTool(String),

    /// I/O operation failed.
    #[error("Failed to {operation} {}: {source}", path.display())]
    Io {
        path: PathBuf,
        operation: IoOperation,
        #[source]
        source: std::io::Error,
    },

    /// JSON parse error with file context.
    #[error("Failed to parse JSON in {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// JSON error without file context (in-memory serialization).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Path is not a directory.
    #[error("Path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Result type alias for infra-audit operations.
pub type Result<T> = std::result::Result<T, AuditError>;

impl AuditError {
    /// Create an I/O read error.
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            operation: IoOperation::Read,
            source,
        }
    }

    /// Create an I/O write error.
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            operation: IoOperation::Write,
            source,
        }
    }

    /// Create a JSON parse error with file context.
    pub fn parse_error(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    /// Get the root cause of the error chain.
    pub fn root_cause(&self) -> &dyn std::error::Error {
        let mut current: &dyn std::error::Error = self;
        while let Some(source) = current.source() {
            current = source;
        }
        current
    }
}

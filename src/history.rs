//! Historical run persistence.
//!
//! The core only ever consumes this through the [`RunStore`] contract:
//! "get latest run" and "get last N runs". The bundled implementation keeps
//! one timestamped JSON file per aggregated run in a flat directory; a name
//! collision within the same second is last-write-wins, which is the only
//! durability guarantee offered.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{AuditError, Result};
use crate::model::AggregatedReport;

const RUN_FILE_PREFIX: &str = "run-";
const RUN_FILE_SUFFIX: &str = ".json";

/// Load/store contract for historical aggregated runs.
pub trait RunStore {
    /// Persist one run.
    fn store(&self, report: &AggregatedReport) -> Result<PathBuf>;

    /// The most recent run, or `None` when the history is empty. Missing
    /// history is not an error; every consumer special-cases `None`.
    fn latest(&self) -> Result<Option<AggregatedReport>>;

    /// The last `n` runs ordered oldest first.
    fn last_n(&self, n: usize) -> Result<Vec<AggregatedReport>>;
}

/// Flat-file JSON run store.
#[derive(Debug, Clone)]
pub struct FileRunStore {
    dir: PathBuf,
}

impl FileRunStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All runs in the directory, ordered oldest first. Files that do not
    /// follow the run naming scheme are ignored; files that do but fail to
    /// parse are a hard error, since silently skipping history would skew
    /// trends.
    fn load_all(&self) -> Result<Vec<AggregatedReport>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        if !self.dir.is_dir() {
            return Err(AuditError::NotADirectory(self.dir.clone()));
        }

        let mut runs = Vec::new();
        for entry in WalkDir::new(&self.dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let name = entry.file_name().to_string_lossy();
            if !name.starts_with(RUN_FILE_PREFIX) || !name.ends_with(RUN_FILE_SUFFIX) {
                continue;
            }
            let path = entry.path();
            let contents = fs::read_to_string(path)
                .map_err(|e| AuditError::read_error(path.to_path_buf(), e))?;
            let run: AggregatedReport = serde_json::from_str(&contents)
                .map_err(|e| AuditError::parse_error(path.to_path_buf(), e))?;
            runs.push(run);
        }

        runs.sort_by_key(|r| r.timestamp);
        debug!(dir = %self.dir.display(), runs = runs.len(), "loaded run history");
        Ok(runs)
    }
}

impl RunStore for FileRunStore {
    fn store(&self, report: &AggregatedReport) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| AuditError::write_error(self.dir.clone(), e))?;

        let name = format!(
            "{}{}{}",
            RUN_FILE_PREFIX,
            report.timestamp.format("%Y%m%dT%H%M%SZ"),
            RUN_FILE_SUFFIX
        );
        let path = self.dir.join(name);
        let json = serde_json::to_string_pretty(report)?;
        fs::write(&path, json).map_err(|e| AuditError::write_error(path.clone(), e))?;
        debug!(path = %path.display(), "stored aggregated run");
        Ok(path)
    }

    fn latest(&self) -> Result<Option<AggregatedReport>> {
        Ok(self.load_all()?.pop())
    }

    fn last_n(&self, n: usize) -> Result<Vec<AggregatedReport>> {
        let mut runs = self.load_all()?;
        if runs.len() > n {
            runs.drain(..runs.len() - n);
        }
        Ok(runs)
    }
}

use crate::error::AppError;
use crate::progression::queue::filter_by_queue;
use crate::progression::MatchRecord;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Supplies raw match records to the progression pipeline.
pub trait MatchSource {
    /// Fetches the match window for `queue_id` (`None` = every queue).
    fn fetch(&self, queue_id: Option<i32>) -> Result<Vec<MatchRecord>, AppError>;
}

/// Reads a JSON array of match records exported from the backend.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        JsonFileSource {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl MatchSource for JsonFileSource {
    fn fetch(&self, queue_id: Option<i32>) -> Result<Vec<MatchRecord>, AppError> {
        let content = fs::read_to_string(&self.path)?;
        let records: Vec<MatchRecord> = serde_json::from_str(&content).map_err(|e| {
            AppError::JsonError(format!("Failed to parse {}: {}", self.path.display(), e))
        })?;

        info!("loaded {} match records from {}", records.len(), self.path.display());
        Ok(filter_by_queue(&records, queue_id))
    }
}

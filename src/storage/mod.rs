// src/storage/mod.rs
pub mod input;

use std::fs;
use std::path::{Path, PathBuf};

use crate::extractors::RecordKind;
use crate::pipeline::BatchReport;
use crate::utils::error::StorageError;

pub use input::load_documents;

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Writes the batch's records as a JSON array, in result order, to `<kind>.json`.
    pub fn save_records(&self, kind: RecordKind, report: &BatchReport) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}.json", kind.name()));

        let body = serde_json::to_string_pretty(report.records.records())
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, body).map_err(StorageError::IoError)?;

        tracing::info!("Saved {} {} to {}", report.records.len(), kind.name(), file_path.display());
        Ok(file_path)
    }

    /// Writes run metadata (counts, per-document outcomes, failures) to `<kind>_meta.json`.
    pub fn save_run_metadata(
        &self,
        kind: RecordKind,
        report: &BatchReport,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}_meta.json", kind.name()));

        let metadata = serde_json::json!({
            "kind": kind.name(),
            "document_count": report.outcomes.len(),
            "record_count": report.records.len(),
            "documents": report.outcomes,
            "failures": report.failures,
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());
        Ok(file_path)
    }
}

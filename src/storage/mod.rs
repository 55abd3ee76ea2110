// src/storage/mod.rs
use crate::extractors::model::ExtractionResult;
use crate::utils::error::StorageError;
use std::fs;
use std::path::{Path, PathBuf};

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

    // /base_dir/COMPANY/
    fn company_dir(&self, company: &str) -> Result<PathBuf, StorageError> {
        let target_dir = self.base_dir.join(company.to_uppercase());
        if !target_dir.exists() {
            fs::create_dir_all(&target_dir).map_err(StorageError::IoError)?;
        }
        Ok(target_dir)
    }

    /// Saves the extraction result verbatim as JSON
    pub fn save_result(
        &self,
        company: &str,
        source_name: &str,
        result: &ExtractionResult,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self
            .company_dir(company)?
            .join(format!("{}_revenue.json", source_name));

        let json = serde_json::to_string_pretty(result)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, json).map_err(StorageError::IoError)?;

        tracing::info!("Saved revenue breakdown to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves a short provenance summary next to the result
    pub fn save_result_metadata(
        &self,
        company: &str,
        source_name: &str,
        result: &ExtractionResult,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self
            .company_dir(company)?
            .join(format!("{}_revenue_meta.json", source_name));

        let metadata = serde_json::json!({
            "company": company,
            "source": source_name,
            "extraction_method": result.extraction_method,
            "confidence_score": result.confidence_score,
            "category_count": result.revenue_breakdown.len(),
            "source_row_count": result.revenue_sources.len(),
            "has_total_revenue": result.total_revenue.is_some(),
            "error": result.error,
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());
        Ok(file_path)
    }
}

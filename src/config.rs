// src/config.rs
use crate::utils::AppError;
use serde::Deserialize;
use std::path::Path;

/// Default note-section heading patterns (matched case-insensitively).
pub const DEFAULT_NOTE_PATTERNS: &[&str] = &[
    r"note\s+\d+.*revenue",
    r"note\s+\d+.*segment",
    r"disaggregated\s+revenue",
];

/// Which period's value becomes `total_revenue` when a total row spans several periods.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TotalPeriodPreference {
    /// Latest year present in the row.
    MostRecent,
    /// First listed period present in the row, e.g. `["2023", "2022", "2021"]`.
    Ordered { periods: Vec<String> },
}

impl Default for TotalPeriodPreference {
    fn default() -> Self {
        TotalPeriodPreference::MostRecent
    }
}

/// Tunables for the extraction engine. Every field has a default, so a config
/// file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// How many leading rows the merchandise strategy searches for year headers.
    pub header_scan_rows: usize,
    pub total_period_preference: TotalPeriodPreference,
    pub note_patterns: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            header_scan_rows: 5,
            total_period_preference: TotalPeriodPreference::default(),
            note_patterns: DEFAULT_NOTE_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl ExtractorConfig {
    /// Loads a JSON config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: ExtractorConfig = serde_json::from_str(&raw).map_err(|e| {
            AppError::Config(format!("Invalid config file '{}': {}", path.display(), e))
        })?;
        if config.header_scan_rows == 0 {
            return Err(AppError::Config("header_scan_rows must be at least 1".to_string()));
        }
        tracing::debug!("Loaded extractor config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}

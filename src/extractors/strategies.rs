// src/extractors/strategies.rs
//! The four table strategies, tried in priority order by the orchestrator.
//!
//! Each strategy is a classifier, a header mode and an extraction policy.
//! Disaggregated, segment and notes stop at the first table that yields
//! data; merchandise aggregates every matching table in the document.

use crate::config::ExtractorConfig;
use crate::extractors::classifier::TableClassifier;
use crate::extractors::headers::{detect_headers, HeaderMode};
use crate::extractors::model::{ExtractionMethod, PartialExtraction};
use crate::extractors::notes::{compile_note_patterns, find_note_sections};
use crate::extractors::table::{tables_within, FilingDocument, Table};
use crate::extractors::table_extractor::{extract_table, ExtractionPolicy};
use crate::utils::error::ExtractError;

pub const DISAGGREGATED_CONFIDENCE: f64 = 0.95;
pub const SEGMENT_CONFIDENCE: f64 = 0.9;
pub const MERCHANDISE_CONFIDENCE: f64 = 0.9;
pub const NOTES_CONFIDENCE: f64 = 0.7;

/// Result of running one strategy over a document.
#[derive(Debug, Clone, PartialEq)]
pub enum StrategyOutcome {
    /// Non-empty breakdown; the pipeline stops here.
    Found(PartialExtraction),
    /// Ran cleanly, nothing usable.
    Empty,
    /// Broke on something unexpected; the pipeline moves on.
    Failed(String),
}

impl From<PartialExtraction> for StrategyOutcome {
    fn from(partial: PartialExtraction) -> Self {
        if partial.is_empty() {
            StrategyOutcome::Empty
        } else {
            StrategyOutcome::Found(partial)
        }
    }
}

impl From<Result<PartialExtraction, ExtractError>> for StrategyOutcome {
    fn from(result: Result<PartialExtraction, ExtractError>) -> Self {
        match result {
            Ok(partial) => partial.into(),
            Err(e) => StrategyOutcome::Failed(e.to_string()),
        }
    }
}

/// One self-contained extraction policy.
pub trait RevenueStrategy {
    /// Method label stamped on results this strategy produces.
    fn method(&self) -> ExtractionMethod;

    /// Fixed confidence for results this strategy produces.
    fn confidence(&self) -> f64;

    fn extract(&self, document: &FilingDocument) -> StrategyOutcome;
}

/// Returns the first table that is classified, has headers and yields rows.
fn first_match<'t>(
    tables: impl IntoIterator<Item = &'t Table>,
    classifier: TableClassifier,
    mode: HeaderMode,
    policy: &ExtractionPolicy,
    label: &str,
) -> Option<PartialExtraction> {
    tables.into_iter().filter(|t| classifier.matches(t)).find_map(|table| {
        tracing::debug!("Found candidate {} table ({} rows)", label, table.rows.len());
        let headers = detect_headers(table, mode)?;
        extract_table(table, &headers, policy)
    })
}

pub struct DisaggregatedRevenueStrategy;

impl RevenueStrategy for DisaggregatedRevenueStrategy {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::DisaggregatedRevenueTables
    }

    fn confidence(&self) -> f64 {
        DISAGGREGATED_CONFIDENCE
    }

    fn extract(&self, document: &FilingDocument) -> StrategyOutcome {
        let tables = document.tables();
        let found = first_match(
            &tables,
            TableClassifier::DISAGGREGATED,
            HeaderMode::Period { scan_rows: 1 },
            &ExtractionPolicy::generic(),
            "disaggregated revenue",
        );
        found.unwrap_or_default().into()
    }
}

pub struct SegmentStrategy;

impl RevenueStrategy for SegmentStrategy {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::SegmentTables
    }

    fn confidence(&self) -> f64 {
        SEGMENT_CONFIDENCE
    }

    fn extract(&self, document: &FilingDocument) -> StrategyOutcome {
        let tables = document.tables();
        let found = first_match(
            &tables,
            TableClassifier::SEGMENT,
            HeaderMode::Segment,
            &ExtractionPolicy::segment(),
            "segment",
        );
        found.unwrap_or_default().into()
    }
}

pub struct MerchandiseCategoryStrategy {
    scan_rows: usize,
    policy: ExtractionPolicy,
}

impl MerchandiseCategoryStrategy {
    pub fn new(config: &ExtractorConfig) -> Self {
        Self {
            scan_rows: config.header_scan_rows,
            policy: ExtractionPolicy::merchandise(config.total_period_preference.clone()),
        }
    }
}

impl RevenueStrategy for MerchandiseCategoryStrategy {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::MerchandiseCategoryTables
    }

    fn confidence(&self) -> f64 {
        MERCHANDISE_CONFIDENCE
    }

    fn extract(&self, document: &FilingDocument) -> StrategyOutcome {
        let mut aggregate = PartialExtraction::default();
        let mut processed_tables = 0;

        for table in document.tables().iter().filter(|t| TableClassifier::MERCHANDISE.matches(t)) {
            processed_tables += 1;
            tracing::debug!("Found merchandise category table {}", processed_tables);

            let Some(headers) = detect_headers(table, HeaderMode::Period { scan_rows: self.scan_rows }) else {
                tracing::debug!("Could not detect year columns in table {} - skipping", processed_tables);
                continue;
            };
            if let Some(partial) = extract_table(table, &headers, &self.policy) {
                aggregate.absorb(partial);
            }
        }

        if aggregate.is_empty() && aggregate.total_revenue.is_none() {
            tracing::debug!("No merchandise category data extracted from {} table(s)", processed_tables);
        }
        aggregate.into()
    }
}

pub struct NotesStrategy {
    note_patterns: Vec<String>,
}

impl NotesStrategy {
    pub fn new(config: &ExtractorConfig) -> Self {
        Self { note_patterns: config.note_patterns.clone() }
    }

    fn scan(&self, document: &FilingDocument) -> Result<PartialExtraction, ExtractError> {
        let patterns = compile_note_patterns(&self.note_patterns)?;

        for section in find_note_sections(document, &patterns) {
            let tables = tables_within(section);
            if let Some(found) = first_match(
                &tables,
                TableClassifier::NOTES,
                HeaderMode::Period { scan_rows: 1 },
                &ExtractionPolicy::generic(),
                "notes revenue",
            ) {
                return Ok(found);
            }
        }
        Ok(PartialExtraction::default())
    }
}

impl RevenueStrategy for NotesStrategy {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::NotesTables
    }

    fn confidence(&self) -> f64 {
        NOTES_CONFIDENCE
    }

    fn extract(&self, document: &FilingDocument) -> StrategyOutcome {
        self.scan(document).into()
    }
}

/// The built-in strategies in priority order.
pub fn default_strategies(config: &ExtractorConfig) -> Vec<Box<dyn RevenueStrategy + Send + Sync>> {
    vec![
        Box::new(DisaggregatedRevenueStrategy),
        Box::new(SegmentStrategy),
        Box::new(MerchandiseCategoryStrategy::new(config)),
        Box::new(NotesStrategy::new(config)),
    ]
}

// src/extractors/model.rs
use serde::Serialize;
use std::collections::BTreeMap;

/// Amounts for one line item keyed by period label (a year or a segment name).
pub type PeriodAmounts = BTreeMap<String, f64>;

/// Category key -> period label -> amount.
pub type RevenueBreakdown = BTreeMap<String, PeriodAmounts>;

/// A detected column: where it sits in the header row and what period it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    pub column_index: usize,
    pub period_label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenueCategory {
    GeographicSegment,
    MerchandiseCategory,
    BusinessSegment,
    Other,
}

/// One accepted table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueSource {
    pub description: String,
    pub amounts: PeriodAmounts,
    pub category: RevenueCategory,
    /// Segment column the amounts came from (segment tables only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    DisaggregatedRevenueTables,
    SegmentTables,
    MerchandiseCategoryTables,
    NotesTables,
    /// The pipeline itself broke; see `ExtractionResult::error`.
    Failed,
    /// Every strategy ran and none produced a breakdown.
    Fallback,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::DisaggregatedRevenueTables => "disaggregated_revenue_tables",
            ExtractionMethod::SegmentTables => "segment_tables",
            ExtractionMethod::MerchandiseCategoryTables => "merchandise_category_tables",
            ExtractionMethod::NotesTables => "notes_tables",
            ExtractionMethod::Failed => "failed",
            ExtractionMethod::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a strategy found before the orchestrator stamps method and confidence on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialExtraction {
    pub total_revenue: Option<f64>,
    pub revenue_breakdown: RevenueBreakdown,
    pub revenue_sources: Vec<RevenueSource>,
}

impl PartialExtraction {
    pub fn is_empty(&self) -> bool {
        self.revenue_breakdown.is_empty()
    }

    /// Folds another table's rows into this one. Periods merge per category;
    /// a later total replaces an earlier one.
    pub fn absorb(&mut self, other: PartialExtraction) {
        for (category, amounts) in other.revenue_breakdown {
            self.revenue_breakdown.entry(category).or_default().extend(amounts);
        }
        self.revenue_sources.extend(other.revenue_sources);
        if other.total_revenue.is_some() {
            self.total_revenue = other.total_revenue;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionResult {
    pub total_revenue: Option<f64>,
    pub revenue_breakdown: RevenueBreakdown,
    pub revenue_sources: Vec<RevenueSource>,
    pub extraction_method: ExtractionMethod,
    pub confidence_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractionResult {
    pub fn from_strategy(
        partial: PartialExtraction,
        method: ExtractionMethod,
        confidence_score: f64,
    ) -> Self {
        Self {
            total_revenue: partial.total_revenue,
            revenue_breakdown: partial.revenue_breakdown,
            revenue_sources: partial.revenue_sources,
            extraction_method: method,
            confidence_score,
            error: None,
        }
    }

    /// Terminal result when no strategy produced a breakdown.
    pub fn no_match() -> Self {
        Self::from_strategy(PartialExtraction::default(), ExtractionMethod::Fallback, 0.0)
    }

    /// Terminal result when the pipeline itself could not run.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::from_strategy(PartialExtraction::default(), ExtractionMethod::Failed, 0.0)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.revenue_breakdown.is_empty()
    }
}

// src/extractors/revenue.rs
use crate::config::ExtractorConfig;
use crate::extractors::model::ExtractionResult;
use crate::extractors::strategies::{default_strategies, RevenueStrategy, StrategyOutcome};
use crate::extractors::table::FilingDocument;
use crate::utils::error::ExtractError;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Runs revenue strategies in priority order until one yields a breakdown.
pub struct RevenueBreakdownExtractor {
    strategies: Vec<Box<dyn RevenueStrategy + Send + Sync>>,
}

impl RevenueBreakdownExtractor {
    pub fn new(config: &ExtractorConfig) -> Self {
        Self::with_strategies(default_strategies(config))
    }

    pub fn with_strategies(strategies: Vec<Box<dyn RevenueStrategy + Send + Sync>>) -> Self {
        Self { strategies }
    }

    /// Extracts a revenue breakdown from an already parsed document.
    ///
    /// The first strategy with a non-empty breakdown wins and stamps its
    /// method and confidence on the result. A failing or panicking strategy is
    /// logged and skipped. With no winner the result is empty, method
    /// `fallback`, confidence 0.0.
    pub fn extract(&self, document: &FilingDocument, company: Option<&str>) -> ExtractionResult {
        let span = tracing::info_span!("revenue_breakdown", company = company.unwrap_or("unknown"));
        let _guard = span.enter();

        for strategy in &self.strategies {
            let method = strategy.method();
            tracing::debug!("Trying strategy {}", method);

            let outcome = catch_unwind(AssertUnwindSafe(|| strategy.extract(document)))
                .unwrap_or_else(|panic_info| StrategyOutcome::Failed(panic_message(&*panic_info)));

            match outcome {
                StrategyOutcome::Found(partial) => {
                    tracing::info!(
                        "Successfully extracted revenue data using {} ({} categories)",
                        method,
                        partial.revenue_breakdown.len()
                    );
                    return ExtractionResult::from_strategy(partial, method, strategy.confidence());
                }
                StrategyOutcome::Empty => {
                    tracing::debug!("Strategy {} found no revenue breakdown", method);
                }
                StrategyOutcome::Failed(message) => {
                    let err = ExtractError::Strategy { strategy: method.as_str(), message };
                    tracing::warn!("Error in revenue extraction: {}", err);
                }
            }
        }

        tracing::info!("No strategy produced a revenue breakdown");
        ExtractionResult::no_match()
    }

    /// Parses raw filing markup and extracts from it, surfacing pipeline errors.
    pub fn try_extract_from_html(
        &self,
        markup: &str,
        company: Option<&str>,
    ) -> Result<ExtractionResult, ExtractError> {
        if markup.trim().is_empty() {
            tracing::info!("Empty document, nothing to extract");
            return Ok(ExtractionResult::no_match());
        }

        catch_unwind(AssertUnwindSafe(|| {
            let document = FilingDocument::parse(markup);
            self.extract(&document, company)
        }))
        .map_err(|panic_info| ExtractError::Panicked(panic_message(&*panic_info)))
    }

    /// Outermost boundary: never errors. Anything that escapes the pipeline
    /// becomes a `failed` result carrying the error text.
    pub fn extract_from_html(&self, markup: &str, company: Option<&str>) -> ExtractionResult {
        match self.try_extract_from_html(markup, company) {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Error extracting revenue breakdown: {}", e);
                ExtractionResult::failed(e.to_string())
            }
        }
    }
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "extraction panicked".to_string()
    }
}

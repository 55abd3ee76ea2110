// src/lib.rs
//! Revenue-breakdown extraction from SEC filing documents.
//!
//! Hand [`RevenueBreakdownExtractor::extract_from_html`] the body of a filing
//! and get back an [`ExtractionResult`]: a `{category -> {period -> amount}}`
//! breakdown, the rows it came from, and which strategy produced it.

pub mod config;
pub mod edgar;
pub mod extractors;
pub mod storage;
pub mod utils;

pub use config::ExtractorConfig;
pub use extractors::{ExtractionMethod, ExtractionResult, RevenueBreakdownExtractor};

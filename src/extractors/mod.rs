// src/extractors/mod.rs
pub mod amount;
pub mod classifier;
pub mod headers;
pub mod model;
pub mod notes;
pub mod revenue;
pub mod rows;
pub mod strategies;
pub mod table;
pub mod table_extractor;

// Re-export key extraction types for convenience
pub use model::{
    ColumnHeader,
    ExtractionMethod,
    ExtractionResult,
    RevenueBreakdown,
    RevenueCategory,
    RevenueSource,
};
pub use revenue::RevenueBreakdownExtractor;
pub use strategies::{RevenueStrategy, StrategyOutcome};
pub use table::FilingDocument;

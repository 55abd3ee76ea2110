// src/extractors/classifier.rs
//! Keyword policies deciding whether a table is worth handing to a strategy.
//!
//! Classification is plain containment over a table's flattened, lower-cased
//! text. Row and column structure play no part here.

use crate::extractors::table::Table;

pub const DISAGGREGATED_KEYWORDS: &[&str] = &["disaggregated revenue"];

pub const SEGMENT_KEYWORDS: &[&str] = &[
    "segment",
    "united states",
    "canada",
    "international",
    "geographic",
    "region",
    "market",
    "operations",
];

pub const SEGMENT_REVENUE_KEYWORDS: &[&str] =
    &["revenue", "sales", "net sales", "total revenue", "income"];

pub const MERCHANDISE_KEYWORDS: &[&str] = &[
    "foods and sundries",
    "non-foods",
    "fresh foods",
    "food",
    "sundries",
    "ancillary",
    "warehouse",
    "grocery",
    "apparel",
    "electronics",
    "pharmacy",
    "hardlines",
    "softlines",
    "membership fees",
    "merchandise",
    "ancillary and other",
    "net sales",
    "total sales",
    "automotive sales",
    "automotive regulatory credits",
    "energy generation and storage",
    "services and other",
    "automotive leasing",
    "energy generation and storage leasing",
    "segment",
    "product",
    "service",
    "geographic",
    "category",
    "revenue",
    "sales",
    "disaggregated",
    "iphone",
    "mac",
    "wearables, home and accessories",
];

pub const NOTES_REVENUE_KEYWORDS: &[&str] = &["revenue", "sales", "net sales"];

/// How a strategy combines keyword sets.
#[derive(Debug, Clone, Copy)]
pub enum TableClassifier {
    /// Any keyword present.
    AnyOf(&'static [&'static str]),
    /// At least one keyword from each set.
    AllOf(&'static [&'static str], &'static [&'static str]),
}

impl TableClassifier {
    pub const DISAGGREGATED: TableClassifier = TableClassifier::AnyOf(DISAGGREGATED_KEYWORDS);
    pub const SEGMENT: TableClassifier =
        TableClassifier::AllOf(SEGMENT_KEYWORDS, SEGMENT_REVENUE_KEYWORDS);
    pub const MERCHANDISE: TableClassifier = TableClassifier::AnyOf(MERCHANDISE_KEYWORDS);
    /// Applied only to tables inside located note sections.
    pub const NOTES: TableClassifier = TableClassifier::AnyOf(NOTES_REVENUE_KEYWORDS);

    pub fn matches(&self, table: &Table) -> bool {
        match self {
            TableClassifier::AnyOf(keywords) => table.contains_any(keywords),
            TableClassifier::AllOf(first, second) => {
                table.contains_any(first) && table.contains_any(second)
            }
        }
    }
}

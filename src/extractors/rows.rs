// src/extractors/rows.rs
use crate::extractors::model::RevenueCategory;

const REVENUE_INDICATORS: &[&str] = &[
    "total revenue",
    "net sales",
    "total net sales",
    "revenue",
    "sales",
    "total sales",
    "net revenue",
    "total revenues",
    "net revenues",
];

// Exclusion wins over inclusion
const EXCLUDE_TERMS: &[&str] = &[
    "cost",
    "expense",
    "income",
    "profit",
    "margin",
    "percentage",
    "ratio",
    "growth",
    "change",
    "variance",
];

const MERCHANDISE_CATEGORIES: &[&str] = &[
    "sales",
    "revenue",
    "net sales",
    "total sales",
    "product",
    "service",
    "segment",
    "geographic",
    "category",
    "foods",
    "non-foods",
    "fresh foods",
    "ancillary",
    "warehouse",
    "automotive",
    "energy",
    "services",
    "leasing",
    "iphone",
    "mac",
    "ipad",
    "wearables",
    "accessories",
    "total net sales",
    "product net sales",
];

const SEGMENT_TOTAL_LABELS: &[&str] = &["total revenue", "net sales"];

const TOTAL_INDICATORS: &[&str] = &["total", "net", "grand total", "consolidated"];
const TOTAL_SUBJECTS: &[&str] = &["sales", "revenue"];

const GEOGRAPHIC_TERMS: &[&str] =
    &["united states", "canada", "international", "americas", "europe", "asia"];
const MERCHANDISE_TERMS: &[&str] =
    &["foods", "non-foods", "fresh foods", "automotive", "energy", "services", "product"];
const SEGMENT_TERMS: &[&str] = &["segment", "division"];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// A genuine revenue line: names revenue/sales and none of the excluded terms.
pub fn is_revenue_row(label: &str) -> bool {
    let lowered = label.to_lowercase();
    contains_any(&lowered, REVENUE_INDICATORS) && !contains_any(&lowered, EXCLUDE_TERMS)
}

pub fn is_merchandise_category(label: &str) -> bool {
    contains_any(&label.to_lowercase(), MERCHANDISE_CATEGORIES)
}

/// Segment tables only keep their headline revenue rows.
pub fn is_segment_total_row(label: &str) -> bool {
    contains_any(&label.to_lowercase(), SEGMENT_TOTAL_LABELS)
}

/// "Total net sales", "Consolidated revenue" and the like.
pub fn is_total_revenue_row(label: &str) -> bool {
    let lowered = label.to_lowercase();
    contains_any(&lowered, TOTAL_INDICATORS) && contains_any(&lowered, TOTAL_SUBJECTS)
}

/// First match wins: geography, then merchandise, then business segment.
pub fn categorize(description: &str) -> RevenueCategory {
    let lowered = description.to_lowercase();
    if contains_any(&lowered, GEOGRAPHIC_TERMS) {
        RevenueCategory::GeographicSegment
    } else if contains_any(&lowered, MERCHANDISE_TERMS) {
        RevenueCategory::MerchandiseCategory
    } else if contains_any(&lowered, SEGMENT_TERMS) {
        RevenueCategory::BusinessSegment
    } else {
        RevenueCategory::Other
    }
}

/// Which rows of a table count as revenue line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowPolicy {
    Revenue,
    SegmentTotals,
    MerchandiseCategory,
}

impl RowPolicy {
    pub fn accepts(&self, label: &str) -> bool {
        match self {
            RowPolicy::Revenue => is_revenue_row(label),
            RowPolicy::SegmentTotals => is_segment_total_row(label),
            RowPolicy::MerchandiseCategory => is_merchandise_category(label),
        }
    }
}

// src/extractors/table_extractor.rs
use crate::config::TotalPeriodPreference;
use crate::extractors::amount::{is_placeholder, parse_amount};
use crate::extractors::headers::DetectedHeaders;
use crate::extractors::model::{PartialExtraction, PeriodAmounts, RevenueCategory, RevenueSource};
use crate::extractors::rows::{categorize, is_total_revenue_row, RowPolicy};
use crate::extractors::table::{Row, Table};

/// What to do when a header column's cell is empty or a lone `$`/dash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFallback {
    /// Read the cell to its right; spacer and currency columns sit before the figure.
    NextCell,
    /// Take the cell as it is.
    Strict,
}

/// How accepted rows are turned into line items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionPolicy {
    pub row_policy: RowPolicy,
    pub cell_fallback: CellFallback,
    /// When set, total rows become `total_revenue` instead of breakdown entries.
    pub capture_totals: Option<TotalPeriodPreference>,
    /// Overrides `categorize` for every source the table yields.
    pub fixed_category: Option<RevenueCategory>,
    /// Record the column label on each source (segment tables).
    pub tag_segment: bool,
}

impl ExtractionPolicy {
    pub fn generic() -> Self {
        Self {
            row_policy: RowPolicy::Revenue,
            cell_fallback: CellFallback::NextCell,
            capture_totals: None,
            fixed_category: None,
            tag_segment: false,
        }
    }

    pub fn segment() -> Self {
        Self {
            row_policy: RowPolicy::SegmentTotals,
            fixed_category: Some(RevenueCategory::GeographicSegment),
            tag_segment: true,
            ..Self::generic()
        }
    }

    pub fn merchandise(preference: TotalPeriodPreference) -> Self {
        Self {
            row_policy: RowPolicy::MerchandiseCategory,
            capture_totals: Some(preference),
            ..Self::generic()
        }
    }
}

/// Pulls line items out of one table whose headers are already known.
///
/// Returns `None` when the table yields neither a source row nor a total.
pub fn extract_table(
    table: &Table,
    headers: &DetectedHeaders,
    policy: &ExtractionPolicy,
) -> Option<PartialExtraction> {
    let mut extraction = PartialExtraction::default();

    for row in table.rows.iter().skip(headers.header_row + 1) {
        if row.len() < 2 {
            continue;
        }

        let label = row.label();
        if !policy.row_policy.accepts(label) {
            tracing::trace!("Skipping row '{}'", label);
            continue;
        }

        let amounts = read_amounts(row, headers, policy.cell_fallback);
        if amounts.is_empty() {
            continue;
        }

        if let Some(preference) = &policy.capture_totals {
            if is_total_revenue_row(label) {
                extraction.total_revenue = pick_total(&amounts, preference);
                tracing::debug!("Captured total row '{}': {:?}", label, extraction.total_revenue);
                continue;
            }
        }

        let category = policy.fixed_category.unwrap_or_else(|| categorize(label));
        if policy.tag_segment {
            // One source per segment column, as segment figures are not periods of one line.
            for (segment, amount) in &amounts {
                extraction.revenue_sources.push(RevenueSource {
                    description: format!("{} Revenue", segment),
                    amounts: PeriodAmounts::from([(segment.clone(), *amount)]),
                    category,
                    segment: Some(segment.clone()),
                });
            }
        } else {
            extraction.revenue_sources.push(RevenueSource {
                description: label.to_string(),
                amounts: amounts.clone(),
                category,
                segment: None,
            });
        }
        extraction.revenue_breakdown.entry(label.to_string()).or_default().extend(amounts);
    }

    if extraction.revenue_sources.is_empty() && extraction.total_revenue.is_none() {
        None
    } else {
        Some(extraction)
    }
}

fn read_amounts(row: &Row, headers: &DetectedHeaders, fallback: CellFallback) -> PeriodAmounts {
    let mut amounts = PeriodAmounts::new();
    for header in &headers.columns {
        let Some(mut raw) = row.text_at(header.column_index) else { continue };
        if fallback == CellFallback::NextCell && is_placeholder(raw) {
            match row.text_at(header.column_index + 1) {
                Some(next) => raw = next,
                None => continue,
            }
        }
        if let Some(amount) = parse_amount(raw) {
            amounts.insert(header.period_label.clone(), amount);
        }
    }
    amounts
}

fn pick_total(amounts: &PeriodAmounts, preference: &TotalPeriodPreference) -> Option<f64> {
    match preference {
        TotalPeriodPreference::MostRecent => amounts
            .iter()
            .max_by_key(|(period, _)| period.parse::<u32>().unwrap_or(0))
            .map(|(_, v)| *v),
        TotalPeriodPreference::Ordered { periods } => {
            periods.iter().find_map(|p| amounts.get(p).copied())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::headers::{detect_headers, HeaderMode};

    fn run(table: &Table, mode: HeaderMode, policy: &ExtractionPolicy) -> Option<PartialExtraction> {
        let headers = detect_headers(table, mode)?;
        extract_table(table, &headers, policy)
    }

    #[test]
    fn spacer_column_fallback() {
        let table = Table::from_rows([
            vec!["Disaggregated revenue", "2023", ""],
            vec!["Product revenue", "$", "1,000"],
        ]);
        let result = run(&table, HeaderMode::Period { scan_rows: 1 }, &ExtractionPolicy::generic()).unwrap();
        assert_eq!(result.revenue_breakdown["Product revenue"]["2023"], 1000.0);
        assert_eq!(result.revenue_sources[0].category, RevenueCategory::MerchandiseCategory);
    }

    #[test]
    fn strict_policy_skips_spacers() {
        let table = Table::from_rows([vec!["", "2023", ""], vec!["Net sales", "$", "1,000"]]);
        let policy = ExtractionPolicy { cell_fallback: CellFallback::Strict, ..ExtractionPolicy::generic() };
        assert!(run(&table, HeaderMode::Period { scan_rows: 1 }, &policy).is_none());
    }

    #[test]
    fn fallback_out_of_range_is_skipped() {
        let table = Table::from_rows([vec!["", "2023", "2022"], vec!["Net sales", "5", "$"]]);
        let result = run(&table, HeaderMode::Period { scan_rows: 1 }, &ExtractionPolicy::generic()).unwrap();
        assert_eq!(result.revenue_breakdown["Net sales"].len(), 1);
        assert_eq!(result.revenue_breakdown["Net sales"]["2023"], 5.0);
    }

    #[test]
    fn excluded_and_empty_rows_are_dropped() {
        let table = Table::from_rows([
            vec!["", "2023", "2022"],
            vec!["Total Revenue Growth Percentage", "4", "5"],
            vec!["Cost of sales", "1", "1"],
            vec!["Service revenue", "—", "—"],
            vec!["Product revenue", "(10)", "8"],
        ]);
        let result = run(&table, HeaderMode::Period { scan_rows: 1 }, &ExtractionPolicy::generic()).unwrap();
        assert_eq!(result.revenue_breakdown.len(), 1);
        assert_eq!(result.revenue_breakdown["Product revenue"]["2023"], -10.0);
        assert_eq!(result.revenue_sources.len(), 1);
    }

    #[test]
    fn data_starts_after_a_late_header_row() {
        let table = Table::from_rows([
            vec!["Net sales by category", ""],
            vec!["", "2024"],
            vec!["Foods and Sundries", "100"],
        ]);
        let result = run(
            &table,
            HeaderMode::Period { scan_rows: 5 },
            &ExtractionPolicy::merchandise(TotalPeriodPreference::MostRecent),
        )
        .unwrap();
        assert_eq!(result.revenue_breakdown.keys().collect::<Vec<_>>(), vec!["Foods and Sundries"]);
    }

    #[test]
    fn merchandise_total_prefers_most_recent() {
        let table = Table::from_rows([
            vec!["", "2021", "2022", "2023"],
            vec!["Fresh Foods", "1", "2", "3"],
            vec!["Total net sales", "10", "20", "30"],
        ]);
        let result = run(
            &table,
            HeaderMode::Period { scan_rows: 5 },
            &ExtractionPolicy::merchandise(TotalPeriodPreference::MostRecent),
        )
        .unwrap();
        assert_eq!(result.total_revenue, Some(30.0));
        assert!(!result.revenue_breakdown.contains_key("Total net sales"));
        assert_eq!(result.revenue_breakdown["Fresh Foods"].len(), 3);
    }

    #[test]
    fn merchandise_total_ordered_preference() {
        let table = Table::from_rows([vec!["", "2024", "2022"], vec!["Total net sales", "40", "20"]]);
        let ordered = TotalPeriodPreference::Ordered {
            periods: vec!["2023".into(), "2022".into(), "2021".into()],
        };
        let result = run(&table, HeaderMode::Period { scan_rows: 5 }, &ExtractionPolicy::merchandise(ordered)).unwrap();
        assert_eq!(result.total_revenue, Some(20.0));
        assert!(result.revenue_breakdown.is_empty());
    }

    #[test]
    fn segment_rows_tag_each_column() {
        let table = Table::from_rows([
            vec!["", "United States", "Canada"],
            vec!["Net sales", "$ 100", "50"],
            vec!["Operating income", "10", "5"],
        ]);
        let result = run(&table, HeaderMode::Segment, &ExtractionPolicy::segment()).unwrap();
        assert_eq!(result.revenue_breakdown["Net sales"]["United States"], 100.0);
        assert_eq!(result.revenue_breakdown["Net sales"]["Canada"], 50.0);
        assert_eq!(result.revenue_sources.len(), 2);
        assert!(result
            .revenue_sources
            .iter()
            .all(|s| s.category == RevenueCategory::GeographicSegment && s.segment.is_some()));
        assert_eq!(result.revenue_sources[0].description, "Canada Revenue");
    }
}

use sec_revenue_extractor::extractors::amount::parse_amount;
use sec_revenue_extractor::extractors::strategies::SegmentStrategy;
use sec_revenue_extractor::extractors::{FilingDocument, RevenueStrategy, StrategyOutcome};
use sec_revenue_extractor::{ExtractionMethod, ExtractorConfig, RevenueBreakdownExtractor};

fn extractor() -> RevenueBreakdownExtractor {
    RevenueBreakdownExtractor::new(&ExtractorConfig::default())
}

const DISAGGREGATED_AND_SEGMENT: &str = r#"
<html><body>
  <table>
    <tr><td>Geographic information</td><td>United States</td><td>Canada</td></tr>
    <tr><td>Net sales</td><td>$ 900</td><td>100</td></tr>
  </table>
  <table>
    <tr><td>Disaggregated revenue</td><td>2023</td><td>2022</td></tr>
    <tr><td>Product revenue</td><td>$</td><td>1,000</td></tr>
    <tr><td>Service revenue</td><td>250</td><td>200</td></tr>
    <tr><td>Total Revenue Growth Percentage</td><td>12</td><td>9</td></tr>
  </table>
</body></html>
"#;

const THREE_MERCHANDISE_TABLES: &str = r#"
<html><body>
  <table>
    <tr><td>Net sales by category</td><td></td><td></td></tr>
    <tr><td></td><td>2023</td><td>2022</td></tr>
    <tr><td>Foods and Sundries</td><td>$</td><td>91,000</td><td>$</td><td>85,000</td></tr>
  </table>
  <table>
    <tr><td></td><td>Fiscal 2023</td></tr>
    <tr><td>Automotive sales</td><td>67,210</td></tr>
  </table>
  <table>
    <tr><td></td><td>FY2023</td></tr>
    <tr><td>Services and other</td><td>8,319</td></tr>
    <tr><td>Total net sales</td><td>166,529</td></tr>
  </table>
</body></html>
"#;

// Only a total row: the merchandise strategy takes it as total_revenue and
// leaves its breakdown empty, so the notes strategy gets its turn.
const NOTES_ONLY: &str = r#"
<html><body>
  <div>
    <p>Note 12 - Revenue</p>
    <table>
      <tr><td></td><td>2023</td><td>2022</td></tr>
      <tr><td>Total revenues</td><td>4.2 million</td><td>3.9 million</td></tr>
    </table>
  </div>
</body></html>
"#;

#[test]
fn amount_parser_properties() {
    assert_eq!(parse_amount("$1,234"), Some(1234.0));
    assert_eq!(parse_amount("(500)"), Some(-500.0));
    assert_eq!(parse_amount("2.5 million"), Some(2_500_000.0));
    assert_eq!(parse_amount("—"), None);
    assert_eq!(parse_amount(""), None);
    assert_eq!(parse_amount("abc"), None);
}

#[test]
fn disaggregated_table_wins_over_segment_table() {
    let result = extractor().extract_from_html(DISAGGREGATED_AND_SEGMENT, Some("TST"));

    assert_eq!(result.extraction_method, ExtractionMethod::DisaggregatedRevenueTables);
    assert_eq!(result.confidence_score, 0.95);
    assert!(!result.revenue_breakdown.contains_key("Net sales"), "segment table must be ignored");
    // spacer column: "$" then "1,000"
    assert_eq!(result.revenue_breakdown["Product revenue"]["2023"], 1000.0);
    assert_eq!(result.revenue_breakdown["Service revenue"]["2022"], 200.0);
    assert!(!result.revenue_breakdown.contains_key("Total Revenue Growth Percentage"));
    assert!(result
        .revenue_sources
        .iter()
        .all(|s| s.description != "Total Revenue Growth Percentage"));
    assert_eq!(result.total_revenue, None);
}

#[test]
fn segment_table_used_when_nothing_disaggregated() {
    let html = r#"<body><table>
        <tr><td>Geographic information</td><td>United States</td><td>Canada</td></tr>
        <tr><td>Net sales</td><td>$ 900</td><td>100</td></tr>
      </table></body>"#;
    let result = extractor().extract_from_html(html, None);

    assert_eq!(result.extraction_method, ExtractionMethod::SegmentTables);
    assert_eq!(result.confidence_score, 0.9);
    assert_eq!(result.revenue_breakdown["Net sales"]["United States"], 900.0);
    assert_eq!(result.revenue_breakdown["Net sales"]["Canada"], 100.0);
}

#[test]
fn merchandise_tables_aggregate_across_the_document() {
    let result = extractor().extract_from_html(THREE_MERCHANDISE_TABLES, Some("COST"));

    assert_eq!(result.extraction_method, ExtractionMethod::MerchandiseCategoryTables);
    assert_eq!(result.confidence_score, 0.9);
    let categories: Vec<&str> = result.revenue_breakdown.keys().map(String::as_str).collect();
    assert_eq!(categories, vec!["Automotive sales", "Foods and Sundries", "Services and other"]);
    assert_eq!(result.revenue_breakdown["Foods and Sundries"]["2023"], 91_000.0);
    assert_eq!(result.total_revenue, Some(166_529.0));
    assert_eq!(result.revenue_sources.len(), 3);
}

#[test]
fn notes_section_is_the_last_resort() {
    let result = extractor().extract_from_html(NOTES_ONLY, None);

    assert_eq!(result.extraction_method, ExtractionMethod::NotesTables);
    assert_eq!(result.confidence_score, 0.7);
    assert_eq!(result.revenue_breakdown["Total revenues"]["2023"], 4_200_000.0);
    assert_eq!(result.revenue_breakdown["Total revenues"]["2022"], 3_900_000.0);
    assert_eq!(result.total_revenue, None);
}

#[test]
fn nothing_matching_gives_empty_fallback() {
    let result = extractor().extract_from_html(NO_REVENUE_TABLES, None);

    assert!(result.revenue_breakdown.is_empty());
    assert!(result.revenue_sources.is_empty());
    assert_eq!(result.total_revenue, None);
    assert_eq!(result.confidence_score, 0.0);
    assert_eq!(result.extraction_method, ExtractionMethod::Fallback);
    assert_eq!(result.error, None);
}

const NO_REVENUE_TABLES: &str = r#"<body>
    <p>Item 2. Properties</p>
    <table>
      <tr><td>Property</td><td>Location</td></tr>
      <tr><td>Headquarters</td><td>Seattle</td></tr>
    </table>
  </body>"#;

#[test]
fn broken_note_pattern_still_ends_in_fallback() {
    let config = ExtractorConfig {
        note_patterns: vec!["(unclosed".to_string()],
        ..ExtractorConfig::default()
    };
    let result = RevenueBreakdownExtractor::new(&config).extract_from_html(NO_REVENUE_TABLES, None);

    assert_eq!(result.extraction_method, ExtractionMethod::Fallback);
    assert_eq!(result.confidence_score, 0.0);
    assert_eq!(result.error, None);
}

// Stands in for a strategy that trips over an unexpected tree shape.
struct OutOfBounds;

impl RevenueStrategy for OutOfBounds {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::DisaggregatedRevenueTables
    }

    fn confidence(&self) -> f64 {
        0.95
    }

    fn extract(&self, document: &FilingDocument) -> StrategyOutcome {
        let tables = document.tables();
        let _ = &tables[tables.len()];
        StrategyOutcome::Empty
    }
}

#[test]
fn panicking_strategy_hands_over_to_the_next_one() {
    let extractor =
        RevenueBreakdownExtractor::with_strategies(vec![Box::new(OutOfBounds), Box::new(SegmentStrategy)]);
    let html = r#"<body><table>
        <tr><td>Geographic information</td><td>United States</td><td>Canada</td></tr>
        <tr><td>Net sales</td><td>$ 900</td><td>100</td></tr>
      </table></body>"#;
    let result = extractor.extract_from_html(html, Some("TST"));

    assert_eq!(result.extraction_method, ExtractionMethod::SegmentTables);
    assert_eq!(result.confidence_score, 0.9);
    assert_eq!(result.error, None);
    assert_eq!(result.revenue_breakdown["Net sales"]["United States"], 900.0);
}

#[test]
fn blank_document_is_fallback() {
    let result = extractor().extract_from_html("   ", Some("TST"));

    assert_eq!(result.extraction_method, ExtractionMethod::Fallback);
    assert_eq!(result.confidence_score, 0.0);
    assert_eq!(result.error, None);
}

#[test]
fn repeated_runs_are_identical() {
    let extractor = extractor();
    let document = FilingDocument::parse(THREE_MERCHANDISE_TABLES);

    let first = extractor.extract(&document, Some("COST"));
    let second = extractor.extract(&document, Some("COST"));

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

// src/extractors/headers.rs
use crate::extractors::model::ColumnHeader;
use crate::extractors::table::Table;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

// A 4-digit year, optionally written as "fiscal 2023" / "FY2023"
static YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:fiscal\s*|fy\s*)?((?:19|20)\d{2})\b").expect("Failed to compile YEAR_RE")
});

pub const SEGMENT_MARKERS: &[&str] = &["united states", "canada", "international", "segment"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMode {
    /// Year columns, searched for in the first `scan_rows` rows.
    Period { scan_rows: usize },
    /// Segment/geography columns in row 0 only.
    Segment,
}

/// Header columns found in one table, plus which row carried them.
/// Data rows are everything after `header_row`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedHeaders {
    pub header_row: usize,
    pub columns: Vec<ColumnHeader>,
}

/// Finds the period or segment columns of `table`.
///
/// Returns `None` when no scanned row qualifies; the table must then be
/// skipped. Column indices are positions in the header row and are used
/// unchanged to index data rows.
pub fn detect_headers(table: &Table, mode: HeaderMode) -> Option<DetectedHeaders> {
    let detected = match mode {
        HeaderMode::Period { scan_rows } => table
            .rows
            .iter()
            .take(scan_rows)
            .enumerate()
            .find_map(|(row_index, row)| {
                let mut seen = HashSet::new();
                let columns: Vec<ColumnHeader> = row
                    .cells
                    .iter()
                    .filter_map(|cell| {
                        let year = YEAR_RE.captures(&cell.text)?.get(1)?.as_str().to_string();
                        seen.insert(year.clone()).then(|| ColumnHeader {
                            column_index: cell.index,
                            period_label: year,
                        })
                    })
                    .collect();
                (!columns.is_empty()).then_some(DetectedHeaders { header_row: row_index, columns })
            }),
        HeaderMode::Segment => table.rows.first().and_then(|row| {
            let columns: Vec<ColumnHeader> = row
                .cells
                .iter()
                .filter(|cell| {
                    let lowered = cell.text.to_lowercase();
                    SEGMENT_MARKERS.iter().any(|m| lowered.contains(m))
                })
                .map(|cell| ColumnHeader {
                    column_index: cell.index,
                    period_label: cell.text.clone(),
                })
                .collect();
            (!columns.is_empty()).then_some(DetectedHeaders { header_row: 0, columns })
        }),
    };

    if detected.is_none() {
        tracing::trace!("No {:?} headers in table with {} rows", mode, table.rows.len());
    }
    detected
}

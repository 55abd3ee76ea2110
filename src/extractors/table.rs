// src/extractors/table.rs
use once_cell::sync::Lazy;
use scraper::{node::Node, ElementRef, Html, Selector};

// --- CSS Selectors (Lazy Static) ---
static TABLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("table").expect("Failed to compile TABLE_SELECTOR")
});

static ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("tr").expect("Failed to compile ROW_SELECTOR")
});

static CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("td, th").expect("Failed to compile CELL_SELECTOR")
});

// Elements whose boundaries separate words in a table's flattened text
const CELL_BOUNDARY_TAGS: &[&str] = &["tr", "td", "th", "caption", "br", "p", "div"];

/// A parsed filing body. Read-only to the extraction engine.
pub struct FilingDocument {
    html: Html,
}

impl FilingDocument {
    pub fn parse(markup: &str) -> Self {
        Self { html: Html::parse_document(markup) }
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Every table in document order, nested tables included.
    pub fn tables(&self) -> Vec<Table> {
        self.html.select(&TABLE_SELECTOR).map(Table::from_element).collect()
    }
}

/// Tables inside a subtree, e.g. a located note section.
pub fn tables_within(container: ElementRef<'_>) -> Vec<Table> {
    container.select(&TABLE_SELECTOR).map(Table::from_element).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    /// Trimmed text of the cell at `index`, if the row is that wide.
    pub fn text_at(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(|c| c.text.as_str())
    }

    /// First cell, read as the row's line-item label.
    pub fn label(&self) -> &str {
        self.text_at(0).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// All text in the table, lower-cased with whitespace collapsed.
    pub text: String,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn from_element(table: ElementRef<'_>) -> Self {
        let rows = table
            .select(&ROW_SELECTOR)
            .map(|tr| Row {
                cells: tr
                    .select(&CELL_SELECTOR)
                    .enumerate()
                    .map(|(index, td)| Cell { index, text: clean_text(td.text()) })
                    .collect(),
            })
            .collect();

        Self { text: flatten_text(table), rows }
    }

    /// Builds a table directly from cell text. Mostly useful in tests.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let rows: Vec<Row> = rows
            .into_iter()
            .map(|cells| Row {
                cells: cells
                    .into_iter()
                    .enumerate()
                    .map(|(index, text)| Cell { index, text: collapse_whitespace(text.as_ref()) })
                    .collect(),
            })
            .collect();
        let text = rows
            .iter()
            .flat_map(|r| r.cells.iter().map(|c| c.text.as_str()))
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        Self { text, rows }
    }

    pub fn contains_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.text.contains(k))
    }
}

fn flatten_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(text) => raw.push_str(text),
            Node::Element(el) if CELL_BOUNDARY_TAGS.contains(&el.name()) => raw.push(' '),
            _ => {}
        }
    }
    collapse_whitespace(&raw).to_lowercase()
}

fn clean_text<'a>(pieces: impl Iterator<Item = &'a str>) -> String {
    collapse_whitespace(&pieces.collect::<String>())
}

/// Trims and collapses runs of whitespace, non-breaking spaces included.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// src/extractors/notes.rs
use crate::extractors::table::FilingDocument;
use crate::utils::error::ExtractError;
use regex::Regex;
use scraper::{node::Node, ElementRef};

// Nearest ancestor of these kinds is taken as the note's container
const BLOCK_CONTAINERS: &[&str] = &["div", "section", "body"];

/// Compiles note-heading patterns, case-insensitive.
pub fn compile_note_patterns(patterns: &[String]) -> Result<Vec<Regex>, ExtractError> {
    patterns
        .iter()
        .map(|pat| {
            Regex::new(&format!("(?i){}", pat))
                .map_err(|e| ExtractError::RegexError(format!("note pattern '{}': {}", pat, e)))
        })
        .collect()
}

/// Finds footnote/disclosure blocks whose text mentions revenue or segment notes.
///
/// Each text node matching a pattern yields its nearest enclosing block
/// container. Output follows pattern order, then document order, and is not
/// deduplicated: a container matched twice is returned twice.
pub fn find_note_sections<'a>(document: &'a FilingDocument, patterns: &[Regex]) -> Vec<ElementRef<'a>> {
    let mut sections = Vec::new();
    let root = document.html().root_element();

    for pattern in patterns {
        for node in root.descendants() {
            let Node::Text(text) = node.value() else { continue };
            if !pattern.is_match(text) {
                continue;
            }

            let container = node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .find(|el| BLOCK_CONTAINERS.contains(&el.value().name()));

            if let Some(container) = container {
                tracing::trace!(
                    "Note pattern '{}' matched inside <{}>",
                    pattern.as_str(),
                    container.value().name()
                );
                sections.push(container);
            }
        }
    }

    tracing::debug!("Located {} note section(s)", sections.len());
    sections
}

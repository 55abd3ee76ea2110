// src/extractors/amount.rs
use once_cell::sync::Lazy;
use regex::Regex;

// Plain decimal after normalization. Rejects "inf", "nan", exponents and stray text.
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[-+]?(?:\d+\.?\d*|\.\d+)$").expect("Failed to compile NUMBER_RE")
});

// Tokens that mean "no value" rather than zero.
const SENTINELS: &[&str] = &["", "—", "–", "-", "n/a"];

// Longest suffix first so "million" is not read as "m".
const MAGNITUDES: &[(&str, f64)] = &[
    ("million", 1_000_000.0),
    ("thousand", 1_000.0),
    ("m", 1_000_000.0),
    ("k", 1_000.0),
];

/// Parses a financial-table cell into a number.
///
/// Handles thousands separators, currency symbols, `(1,234)` negatives and
/// trailing magnitude words. Returns `None` for placeholders and for anything
/// that is not a number; never panics.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let lowered = raw.trim().to_lowercase();
    if SENTINELS.contains(&lowered.as_str()) {
        return None;
    }

    let mut text: String = lowered
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, ',' | '$' | '€' | '£' | '¥'))
        .collect();

    let negative = text.starts_with('(') && text.contains(')');
    if negative {
        text = text.replace(['(', ')'], "");
    }

    let mut multiplier = 1.0;
    for (suffix, factor) in MAGNITUDES {
        if let Some(stripped) = text.strip_suffix(*suffix) {
            text = stripped.to_string();
            multiplier = *factor;
            break;
        }
    }

    if SENTINELS.contains(&text.as_str()) || !NUMBER_RE.is_match(&text) {
        tracing::trace!("Failed to parse amount: '{}'", raw);
        return None;
    }

    let value: f64 = text.parse().ok()?;
    let value = value * multiplier;
    Some(if negative { -value } else { value })
}

/// Cell contents that only pad a figure: empty, a lone currency sign, or a dash.
pub fn is_placeholder(text: &str) -> bool {
    matches!(text.trim(), "" | "$" | "—" | "–" | "-")
}

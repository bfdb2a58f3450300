//! Cell-level parsers. None of these fail: a malformed cell degrades to the
//! documented default for its field.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Month-first date-time layouts, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m-%d-%Y %H:%M:%S",
    "%m-%d-%Y %H:%M",
];

/// Month-first date-only layouts, tried after the date-time ones.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d-%b-%Y",
    "%d %b %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

/// Text the feed uses for "no value" in identifier and free-text columns.
const NULL_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "#N/A", "NaN", "nan", "-nan", "NaT", "NULL", "null", "None", "<NA>",
];

/// Parses a date or date-time cell, month before day. Blank or unparseable
/// cells are absent.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.naive_local())
        })
}

/// Parses a measure cell, returning `None` when the text is not a finite
/// number once units and separators are normalized.
///
/// `kg` and `m3` are removed wherever they appear (any case), whitespace is
/// dropped, then separators are resolved: with both `,` and `.` present the
/// later one is the decimal point; a single lone separator of either kind is
/// the decimal point; a repeated one is a thousands separator.
pub fn try_parse_quantity(raw: &str) -> Option<f64> {
    let stripped = raw.to_lowercase().replace("kg", "").replace("m3", "");
    let compact: String = stripped.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }

    normalize_separators(&compact)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parses a measure cell, defaulting to `0` and never going negative.
pub fn parse_quantity(raw: &str) -> f64 {
    match try_parse_quantity(raw) {
        Some(v) if v > 0.0 => v,
        _ => 0.0,
    }
}

fn normalize_separators(s: &str) -> String {
    let commas = s.matches(',').count();
    let dots = s.matches('.').count();

    match (commas, dots) {
        (0, 0) | (0, 1) => s.to_string(),
        (0, _) => s.replace('.', ""),
        (1, 0) => s.replace(',', "."),
        (_, 0) => s.replace(',', ""),
        _ => {
            if s.rfind(',') > s.rfind('.') {
                s.replace('.', "").replace(',', ".")
            } else {
                s.replace(',', "")
            }
        }
    }
}

/// Trimmed identifier, absent when blank or a null token.
pub fn parse_identifier(raw: &str) -> Option<String> {
    let s = raw.trim();
    if NULL_TOKENS.contains(&s) {
        None
    } else {
        Some(s.to_string())
    }
}

/// Trimmed free text, empty when blank or a null token.
pub fn parse_text(raw: &str) -> String {
    parse_identifier(raw).unwrap_or_default()
}

//! Positional mapping from spreadsheet rows to [`Restaurant`] records.
//!
//! Both the values API and the CSV export deliver the same fourteen columns:
//!
//! | idx | column                |
//! |-----|-----------------------|
//! | 0   | name                  |
//! | 1   | locality              |
//! | 2   | gps coordinates       |
//! | 3   | maps link             |
//! | 4   | cuisine types         |
//! | 5   | visited               |
//! | 6   | rating                |
//! | 7   | quality/price ratio   |
//! | 8   | price per person      |
//! | 9   | website or instagram  |
//! | 10  | curator rating        |
//! | 11  | notes                 |
//! | 12  | latitude              |
//! | 13  | longitude             |
//!
//! The first row is always a header and is skipped. Missing trailing cells read
//! as empty text, so short rows are accepted.

use barbometro_core::Restaurant;

use crate::error::SourceError;

const NAME: usize = 0;
const LOCALITY: usize = 1;
const GPS: usize = 2;
const MAPS_LINK: usize = 3;
const CUISINE: usize = 4;
const VISITED: usize = 5;
const RATING: usize = 6;
const QUALITY_PRICE: usize = 7;
const PRICE: usize = 8;
const WEBSITE: usize = 9;
const CURATOR_RATING: usize = 10;
const NOTES: usize = 11;
const LATITUDE: usize = 12;
const LONGITUDE: usize = 13;

/// A single spreadsheet cell, as typed by the source that produced it.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Text(String),
    Bool(bool),
    Empty,
}

impl Cell {
    fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => Self::Text(s.clone()),
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => Self::Text(n.to_string()),
            _ => Self::Empty,
        }
    }

    fn text(&self) -> &str {
        match self {
            Self::Text(s) => s.trim(),
            Self::Bool(true) => "true",
            Self::Bool(false) => "false",
            Self::Empty => "",
        }
    }
}

/// Map a values-API payload (header row included) into records.
///
/// # Errors
///
/// Returns [`SourceError::MalformedSource`] if fewer than two rows are present.
pub fn parse_values(rows: &[Vec<serde_json::Value>]) -> Result<Vec<Restaurant>, SourceError> {
    if rows.len() < 2 {
        return Err(SourceError::MalformedSource {
            source_name: "structured-api",
            reason: format!("expected a header and at least one row, got {} rows", rows.len()),
        });
    }

    Ok(rows
        .iter()
        .skip(1)
        .map(|row| row.iter().map(Cell::from_json).collect::<Vec<_>>())
        .zip(1u32..)
        .map(|(cells, id)| map_row(id, &cells))
        .collect())
}

/// Map the text of a CSV export (header line included) into records.
///
/// Blank lines are skipped. Quoted fields may contain commas and escaped
/// quotes; rows may have fewer than fourteen fields.
///
/// # Errors
///
/// Returns [`SourceError::MalformedSource`] if the text is not valid CSV or
/// holds fewer than two non-blank lines.
pub fn parse_csv(text: &str) -> Result<Vec<Restaurant>, SourceError> {
    let malformed = |reason: String| SourceError::MalformedSource {
        source_name: "public-csv",
        reason,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| malformed(e.to_string()))?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        rows.push(
            record
                .iter()
                .map(|field| Cell::Text(field.to_owned()))
                .collect::<Vec<_>>(),
        );
    }

    if rows.len() < 2 {
        return Err(malformed(format!(
            "expected a header and at least one row, got {} lines",
            rows.len()
        )));
    }

    Ok(rows
        .iter()
        .skip(1)
        .zip(1u32..)
        .map(|(cells, id)| map_row(id, cells))
        .collect())
}

fn map_row(id: u32, cells: &[Cell]) -> Restaurant {
    let text = |idx: usize| cells.get(idx).map_or("", Cell::text);
    let optional = |idx: usize| Some(text(idx)).filter(|s| !s.is_empty()).map(str::to_owned);
    let number = |idx: usize| parse_number(text(idx));

    Restaurant {
        id,
        name: text(NAME).to_owned(),
        locality: text(LOCALITY).to_owned(),
        gps_coordinates: optional(GPS),
        maps_link: text(MAPS_LINK).to_owned(),
        cuisine_types: text(CUISINE).to_owned(),
        visited: cells.get(VISITED).is_some_and(is_visited),
        rating: number(RATING),
        quality_price_ratio: number(QUALITY_PRICE),
        price_per_person: text(PRICE).to_owned(),
        website_or_instagram: optional(WEBSITE),
        curator_rating: Some(number(CURATOR_RATING)),
        notes: optional(NOTES),
        latitude: number(LATITUDE),
        longitude: number(LONGITUDE),
    }
}

fn is_visited(cell: &Cell) -> bool {
    match cell {
        Cell::Bool(b) => *b,
        Cell::Text(raw) => {
            let token = raw.trim();
            token.eq_ignore_ascii_case("sim") || token.eq_ignore_ascii_case("true") || token == "1"
        }
        Cell::Empty => false,
    }
}

/// Parse the leading decimal number of a cell, reading a decimal comma as a
/// point. Anything unparseable becomes `0.0`.
fn parse_number(raw: &str) -> f64 {
    let normalised = raw.trim().replacen(',', ".", 1);
    let bytes = normalised.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return 0.0;
    }

    normalised[..end]
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;

//! Plant inventory parsing.
//!
//! Converts raw delimited text into [`PlantRecord`]s using a fixed positional
//! column layout. The first line is a header and is always discarded without
//! validation. Short rows are padded with empty fields, unparsable numbers
//! fall back to defaults, and rows without an id or coordinates are dropped.
//! Parsing never fails on individual rows.

use crate::constants::{
    DEFAULT_DELIMITER, DEFAULT_HEIGHT_METERS, INVENTORY_COLUMN_COUNT, UNKNOWN_NAME, columns,
};
use crate::models::PlantRecord;
use csv::StringRecord;
use tracing::{debug, trace, warn};

pub mod stats;

#[cfg(test)]
pub mod tests;

pub use stats::{ParseResult, ParseStats};

/// Parser for the fixed-column plant inventory format
#[derive(Debug, Clone, Copy)]
pub struct RecordParser {
    delimiter: u8,
}

impl RecordParser {
    /// Create a parser using the default comma delimiter
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER as u8,
        }
    }

    /// Use a different single-byte column delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Parse raw inventory text into placeable records
    pub fn parse(&self, raw_text: &str) -> Vec<PlantRecord> {
        self.parse_with_stats(raw_text).records
    }

    /// Parse raw inventory text, also reporting row statistics
    pub fn parse_with_stats(&self, raw_text: &str) -> ParseResult {
        let mut stats = ParseStats::new();
        let mut records = Vec::new();

        // Everything up to the first newline is the header
        let body = match raw_text.split_once('\n') {
            Some((_, rest)) => rest,
            None => "",
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .delimiter(self.delimiter)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_reader(body.as_bytes());

        for result in reader.records() {
            stats.total_rows += 1;

            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    warn!("Skipping unreadable inventory row: {}", e);
                    stats.rows_dropped += 1;
                    continue;
                }
            };

            if row.len() < INVENTORY_COLUMN_COUNT {
                stats.rows_padded += 1;
            }

            let record = parse_row(&row);
            if record.is_placeable() {
                records.push(record);
            } else {
                trace!("Dropping unplaceable row: {:?}", row);
                stats.rows_dropped += 1;
            }
        }

        stats.records_retained = records.len();

        debug!(
            "Parsed inventory: {} rows, {} retained, {} padded, {} dropped",
            stats.total_rows, stats.records_retained, stats.rows_padded, stats.rows_dropped
        );

        ParseResult { records, stats }
    }
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse comma-delimited inventory text with the default parser
pub fn parse_records(raw_text: &str) -> Vec<PlantRecord> {
    RecordParser::new().parse(raw_text)
}

/// Map one row onto a record, padding missing trailing fields
///
/// The result may violate the retention invariant; callers filter it.
pub fn parse_row(row: &StringRecord) -> PlantRecord {
    PlantRecord {
        id: field(row, columns::ID).to_string(),
        common_name: text_or(field(row, columns::COMMON_NAME), UNKNOWN_NAME),
        common_name_alt: field(row, columns::COMMON_NAME_ALT).to_string(),
        genus: text_or(field(row, columns::GENUS), UNKNOWN_NAME),
        species: field(row, columns::SPECIES).to_string(),
        longitude: number_or(field(row, columns::LONGITUDE), 0.0),
        latitude: number_or(field(row, columns::LATITUDE), 0.0),
        height_meters: number_or(field(row, columns::HEIGHT), DEFAULT_HEIGHT_METERS),
    }
}

/// Trimmed field at `index`, or empty when the row is too short
fn field(row: &StringRecord, index: usize) -> &str {
    row.get(index).map(str::trim).unwrap_or("")
}

fn text_or(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

/// Parse the leading number of a field, falling back to `default` for
/// blank, non-numeric, non-finite or zero values
///
/// Trailing text after the number is ignored, so `"12 ft"` reads as 12.
/// Zero is the missing-value sentinel of the format, so an explicit `0`
/// is indistinguishable from a blank field.
pub fn number_or(value: &str, default: f64) -> f64 {
    leading_number(value)
        .filter(|v| v.is_finite() && *v != 0.0)
        .unwrap_or(default)
}

/// Longest prefix of `value` (after leading whitespace) that forms a decimal
/// number: optional sign, digits with an optional fraction, optional exponent
fn leading_number(value: &str) -> Option<f64> {
    let text = value.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer_digits = digits_from(end);
    end += integer_digits;

    let mut fraction_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction_digits = digits_from(end + 1);
        if integer_digits + fraction_digits > 0 {
            end += 1 + fraction_digits;
        }
    }

    if integer_digits + fraction_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let exponent_digits = digits_from(exponent_end);
        if exponent_digits > 0 {
            end = exponent_end + exponent_digits;
        }
    }

    text[..end].parse().ok()
}

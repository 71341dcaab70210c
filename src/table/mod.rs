//! Delimited table ingestion.
//!
//! This module reads delimiter-separated text, detects a header line, pulls two
//! numeric columns out as coordinates and keeps every original row so edits can
//! be written back without touching the other columns.

mod inspect;
mod parser;

pub use inspect::{inspect, inspect_file, ColumnInfo, ColumnKind, TableLayout};
pub use parser::{load_file, parse, ParseStats, ParsedTable, RawRow};

/// Default field delimiter.
pub const DEFAULT_DELIMITER: char = ',';

/// Parse a field as a finite number, ignoring surrounding whitespace.
pub(crate) fn parse_number(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Split a line into its raw fields. No quoting is understood.
pub(crate) fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    line.split(delimiter).map(str::to_string).collect()
}

/// Decide whether the first non-empty line is a header for plotting columns
/// `x_col` and `y_col`.
///
/// The line must reach both columns, and at least one of them must fail to
/// parse as a number. A line that is too short is a short data row instead.
pub(crate) fn is_header_row(fields: &[String], x_col: usize, y_col: usize) -> bool {
    fields.len() > x_col.max(y_col)
        && [x_col, y_col]
            .iter()
            .any(|&col| parse_number(&fields[col]).is_none())
}

/// Iterate over the lines of a text, dropping a trailing `\r`.
pub(crate) fn lines(text: &str) -> impl Iterator<Item = &str> {
    // A final newline terminates the last line, it does not start a new one.
    let body = text.strip_suffix('\n').unwrap_or(text);
    (!text.is_empty())
        .then(|| body.split('\n'))
        .into_iter()
        .flatten()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

//! Coordinate extraction from delimited text.

use super::{is_header_row, lines, parse_number, split_fields};
use crate::error::{CurveError, Result};
use crate::geometry::DataPoint;
use std::path::Path;

/// One original data row, kept verbatim for saving.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// Every field of the row, untrimmed.
    pub fields: Vec<String>,
    /// X value parsed from the row.
    pub x: f64,
    /// Y value parsed from the row.
    pub y: f64,
}

/// Counters describing what happened to each line of the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Lines that became coordinates.
    pub data_rows: usize,
    /// Blank lines.
    pub empty_lines: usize,
    /// Lines with too few fields for the selected columns.
    pub short_rows: usize,
    /// Lines where a selected column was not a number.
    pub non_numeric_rows: usize,
    /// Lines dropped because X was not positive on a logarithmic axis.
    pub domain_filtered: usize,
}

impl ParseStats {
    /// Every line that did not become a coordinate, header excluded.
    pub fn skipped(&self) -> usize {
        self.empty_lines + self.short_rows + self.non_numeric_rows + self.domain_filtered
    }
}

/// The outcome of parsing a table for two columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedTable {
    /// Extracted points in row order.
    pub coordinates: Vec<DataPoint>,
    /// Original rows, index-aligned with `coordinates`.
    pub raw_rows: Vec<RawRow>,
    /// Whether the first non-empty line was a header.
    pub has_header: bool,
    /// Header fields, verbatim.
    pub header_fields: Vec<String>,
    /// Line counters.
    pub stats: ParseStats,
}

impl ParsedTable {
    /// Whether at least one point was produced.
    pub fn has_data(&self) -> bool {
        !self.coordinates.is_empty()
    }
}

/// Parse `text`, taking X from `x_col` and Y from `y_col`.
///
/// Never fails: malformed lines are dropped and counted in [`ParseStats`].
pub fn parse(
    text: &str,
    x_col: usize,
    y_col: usize,
    x_must_be_positive: bool,
    delimiter: char,
) -> ParsedTable {
    let mut table = ParsedTable::default();
    let required = x_col.max(y_col) + 1;
    let mut first_line = true;

    for line in lines(text) {
        if line.trim().is_empty() {
            table.stats.empty_lines += 1;
            continue;
        }

        let fields = split_fields(line, delimiter);

        if std::mem::take(&mut first_line) && is_header_row(&fields, x_col, y_col) {
            table.has_header = true;
            table.header_fields = fields;
            continue;
        }

        if fields.len() < required {
            table.stats.short_rows += 1;
            continue;
        }

        let (Some(x), Some(y)) = (parse_number(&fields[x_col]), parse_number(&fields[y_col]))
        else {
            table.stats.non_numeric_rows += 1;
            continue;
        };

        if x_must_be_positive && x <= 0.0 {
            table.stats.domain_filtered += 1;
            continue;
        }

        table.coordinates.push(DataPoint::new(x, y));
        table.raw_rows.push(RawRow { fields, x, y });
        table.stats.data_rows += 1;
    }

    table
}

/// Read and parse a file. Only an unreadable file is an error.
pub fn load_file(
    path: &Path,
    x_col: usize,
    y_col: usize,
    x_must_be_positive: bool,
    delimiter: char,
) -> Result<ParsedTable> {
    let text = std::fs::read_to_string(path).map_err(|e| CurveError::file_open(path, e))?;
    let table = parse(&text, x_col, y_col, x_must_be_positive, delimiter);

    tracing::debug!(
        path = %path.display(),
        rows = table.stats.data_rows,
        skipped = table.stats.skipped(),
        header = table.has_header,
        "Parsed table"
    );
    if table.stats.domain_filtered > 0 {
        tracing::warn!(
            "{} rows with X <= 0 filtered for logarithmic X axis in {}",
            table.stats.domain_filtered,
            path.display()
        );
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xy(table: &ParsedTable) -> Vec<(f64, f64)> {
        table.coordinates.iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn detects_header() {
        let table = parse("x,y\n1,2\n", 0, 1, false, ',');
        assert!(table.has_header);
        assert_eq!(table.header_fields, vec!["x", "y"]);
        assert_eq!(xy(&table), vec![(1.0, 2.0)]);
    }

    #[test]
    fn numeric_first_line_is_data() {
        let table = parse("1,2\n3,4\n", 0, 1, false, ',');
        assert!(!table.has_header);
        assert!(table.header_fields.is_empty());
        assert_eq!(xy(&table), vec![(1.0, 2.0), (3.0, 4.0)]);
    }

    #[test]
    fn header_is_found_after_leading_blank_lines() {
        let table = parse("\n\nx,y\n1,2\n", 0, 1, false, ',');
        assert!(table.has_header);
        assert_eq!(table.stats.empty_lines, 2);
        assert_eq!(table.stats.data_rows, 1);
    }

    #[test]
    fn only_first_line_may_be_a_header() {
        let table = parse("1,2\nx,y\n3,4\n", 0, 1, false, ',');
        assert!(!table.has_header);
        assert_eq!(table.stats.non_numeric_rows, 1);
        assert_eq!(xy(&table), vec![(1.0, 2.0), (3.0, 4.0)]);
    }

    #[test]
    fn short_first_line_is_skipped_not_header() {
        let table = parse("title\n1,2\n", 0, 1, false, ',');
        assert!(!table.has_header);
        assert_eq!(table.stats.short_rows, 1);
        assert_eq!(xy(&table), vec![(1.0, 2.0)]);
    }

    #[test]
    fn counts_every_kind_of_skip() {
        let text = "t,a,b\n1,2,3\n\n4,5\n6,7,oops\n-1,1,1\n8,9,10\n";
        let table = parse(text, 0, 2, true, ',');
        assert_eq!(xy(&table), vec![(1.0, 3.0), (8.0, 10.0)]);
        assert_eq!(
            table.stats,
            ParseStats {
                data_rows: 2,
                empty_lines: 1,
                short_rows: 1,
                non_numeric_rows: 1,
                domain_filtered: 1,
            }
        );
        assert_eq!(table.stats.skipped(), 4);
    }

    #[test]
    fn non_numeric_target_column_is_skipped() {
        let table = parse("1,2\n3,abc\n5,6\n", 0, 1, false, ',');
        assert_eq!(table.stats.non_numeric_rows, 1);
        assert_eq!(table.raw_rows.len(), 2);
    }

    #[test]
    fn domain_filter_drops_non_positive_x() {
        let table = parse("-1,5\n2,3\n", 0, 1, true, ',');
        assert_eq!(xy(&table), vec![(2.0, 3.0)]);
        assert_eq!(table.stats.domain_filtered, 1);
    }

    #[test]
    fn zero_x_is_kept_without_domain_filter() {
        let table = parse("0,5\n-2,3\n", 0, 1, false, ',');
        assert_eq!(table.stats.data_rows, 2);
    }

    #[test]
    fn raw_rows_keep_fields_verbatim() {
        let table = parse("id, x ,y\na, 1.50 ,2\n", 1, 2, false, ',');
        assert_eq!(table.raw_rows[0].fields, vec!["a", " 1.50 ", "2"]);
        assert_eq!(table.raw_rows[0].x, 1.5);
        assert_eq!(table.coordinates.len(), table.raw_rows.len());
    }

    #[test]
    fn same_column_for_both_axes() {
        let table = parse("1\n2\n", 0, 0, false, ',');
        assert_eq!(xy(&table), vec![(1.0, 1.0), (2.0, 2.0)]);
    }

    #[test]
    fn custom_delimiter() {
        let table = parse("a;b\n1;2\n", 0, 1, false, ';');
        assert!(table.has_header);
        assert_eq!(xy(&table), vec![(1.0, 2.0)]);
    }

    #[test]
    fn crlf_input() {
        let table = parse("x,y\r\n1,2\r\n", 0, 1, false, ',');
        assert_eq!(table.raw_rows[0].fields, vec!["1", "2"]);
    }

    #[test]
    fn empty_input_has_no_data() {
        let table = parse("", 0, 1, false, ',');
        assert!(!table.has_data());
        assert_eq!(table.stats, ParseStats::default());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_file(Path::new("/definitely/not/here.csv"), 0, 1, false, ',')
            .expect_err("missing file");
        assert!(matches!(err, CurveError::FileOpen { .. }));
    }
}

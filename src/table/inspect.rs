//! Column layout detection for picking X and Y columns.

use super::{is_header_row, lines, parse_number, split_fields};
use crate::error::{CurveError, Result};
use std::fmt;
use std::path::Path;

/// Number of data rows sampled to infer column kinds.
const SAMPLE_ROWS: usize = 10;

/// Inferred content of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Every sampled value is a number (or blank).
    Numeric,
    /// At least one sampled value is not a number.
    Text,
}

impl ColumnKind {
    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Text => "text",
        }
    }
}

/// One column of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Zero-based position.
    pub index: usize,
    /// Header text, when the table has a header.
    pub name: Option<String>,
    /// Inferred kind.
    pub kind: ColumnKind,
}

impl ColumnInfo {
    /// Spreadsheet-style letter label: A, B, …, Z, AA, AB, …
    pub fn letter(&self) -> String {
        let mut n = self.index + 1;
        let mut out = Vec::new();
        while n > 0 {
            let rem = (n - 1) % 26;
            out.push(b'A' + rem as u8);
            n = (n - 1) / 26;
        }
        out.reverse();
        String::from_utf8_lossy(&out).into_owned()
    }
}

impl fmt::Display for ColumnInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(
                f,
                "Column {}: {} ({})",
                self.letter(),
                name.trim(),
                self.kind.name()
            ),
            None => write!(f, "Column {} ({})", self.letter(), self.kind.name()),
        }
    }
}

/// Column layout of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableLayout {
    /// Whether the first non-empty line is a header for `plot_columns`.
    pub has_header: bool,
    /// Columns, in order.
    pub columns: Vec<ColumnInfo>,
    /// X/Y columns the header decision was made for.
    pub plot_columns: (usize, usize),
}

impl TableLayout {
    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Indices of the numeric columns.
    pub fn numeric_columns(&self) -> Vec<usize> {
        self.columns
            .iter()
            .filter(|c| c.kind == ColumnKind::Numeric)
            .map(|c| c.index)
            .collect()
    }

    /// Default X/Y selection: the first two numeric columns, else (0, 1).
    pub fn default_columns(&self) -> (usize, usize) {
        match self.numeric_columns().as_slice() {
            [x, y, ..] => (*x, *y),
            [only] => (*only, *only),
            [] => (0, 1.min(self.column_count().saturating_sub(1))),
        }
    }
}

/// Inspect the column layout of delimited text.
///
/// The first non-empty line decides the column count. Column kinds are first
/// inferred from the lines after it, which fixes the plot columns (`columns`,
/// or the default pick). The first line is then a header exactly when the
/// loader would treat it as one for those columns.
pub fn inspect(text: &str, delimiter: char, columns: Option<(usize, usize)>) -> TableLayout {
    let mut non_empty = lines(text).filter(|line| !line.trim().is_empty());

    let Some(first) = non_empty.next() else {
        return TableLayout {
            plot_columns: columns.unwrap_or_default(),
            ..TableLayout::default()
        };
    };

    let first_fields = split_fields(first, delimiter);
    let body: Vec<Vec<String>> = non_empty
        .take(SAMPLE_ROWS)
        .map(|line| split_fields(line, delimiter))
        .collect();

    let mut layout = TableLayout {
        has_header: false,
        columns: column_kinds(first_fields.len(), &body),
        plot_columns: (0, 0),
    };
    let (x, y) = columns.unwrap_or_else(|| layout.default_columns());
    layout.plot_columns = (x, y);
    layout.has_header = is_header_row(&first_fields, x, y);

    if layout.has_header {
        for column in &mut layout.columns {
            column.name = first_fields.get(column.index).cloned();
        }
    } else {
        // The first line is data; it joins the sample in place of the last row.
        let sample: Vec<Vec<String>> = std::iter::once(first_fields)
            .chain(body.into_iter().take(SAMPLE_ROWS - 1))
            .collect();
        layout.columns = column_kinds(layout.columns.len(), &sample);
    }
    layout
}

fn column_kinds(count: usize, sample: &[Vec<String>]) -> Vec<ColumnInfo> {
    (0..count)
        .map(|index| {
            let numeric = sample.iter().all(|row| match row.get(index) {
                Some(field) if !field.trim().is_empty() => parse_number(field).is_some(),
                _ => true,
            });
            ColumnInfo {
                index,
                name: None,
                kind: if numeric {
                    ColumnKind::Numeric
                } else {
                    ColumnKind::Text
                },
            }
        })
        .collect()
}

/// Read a file and inspect its column layout.
pub fn inspect_file(
    path: &Path,
    delimiter: char,
    columns: Option<(usize, usize)>,
) -> Result<TableLayout> {
    let text = std::fs::read_to_string(path).map_err(|e| CurveError::file_open(path, e))?;
    Ok(inspect(&text, delimiter, columns))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_kinds() {
        let layout = inspect("time,label,value\n0,a,1.5\n1,b,2.5\n", ',', None);
        assert!(layout.has_header);
        assert_eq!(layout.column_count(), 3);
        assert_eq!(layout.columns[0].name.as_deref(), Some("time"));
        assert_eq!(layout.columns[1].kind, ColumnKind::Text);
        assert_eq!(layout.numeric_columns(), vec![0, 2]);
        assert_eq!(layout.default_columns(), (0, 2));
    }

    #[test]
    fn numeric_first_line_is_sampled() {
        let layout = inspect("1,2\n3,4\n", ',', None);
        assert!(!layout.has_header);
        assert!(layout.columns.iter().all(|c| c.name.is_none()));
        assert_eq!(layout.default_columns(), (0, 1));
    }

    #[test]
    fn blank_fields_do_not_make_text() {
        let layout = inspect("a,b\n1,\n2,3\n", ',', None);
        assert_eq!(layout.columns[1].kind, ColumnKind::Numeric);
    }

    #[test]
    fn agrees_with_loader_on_header() {
        let cases = [
            ("x,y\n1,2\n", None),
            ("a,1,2\nb,3,4\n", None),
            ("name,t,v\nb,3,4\n", None),
            ("a,1,2\nb,3,4\n", Some((0, 1))),
            ("1\n2,3\n", Some((0, 1))),
        ];
        for (text, columns) in cases {
            let layout = inspect(text, ',', columns);
            let (x, y) = layout.plot_columns;
            let table = super::super::parse(text, x, y, false, ',');
            assert_eq!(layout.has_header, table.has_header, "{text:?} {columns:?}");
        }
    }

    #[test]
    fn text_label_column_is_not_a_header() {
        let layout = inspect("a,1,2\nb,3,4\n", ',', None);
        assert!(!layout.has_header);
        assert_eq!(layout.plot_columns, (1, 2));
        assert!(layout.columns.iter().all(|c| c.name.is_none()));
        assert_eq!(layout.columns[0].kind, ColumnKind::Text);
        assert_eq!(layout.numeric_columns(), vec![1, 2]);
    }

    #[test]
    fn header_depends_on_plot_columns() {
        let layout = inspect("a,1,2\nb,3,4\n", ',', Some((0, 1)));
        assert!(layout.has_header);
        assert_eq!(layout.columns[1].name.as_deref(), Some("1"));
    }

    #[test]
    fn labels() {
        let col = |index| ColumnInfo {
            index,
            name: None,
            kind: ColumnKind::Numeric,
        };
        assert_eq!(col(0).letter(), "A");
        assert_eq!(col(25).letter(), "Z");
        assert_eq!(col(26).letter(), "AA");
        assert_eq!(col(1).to_string(), "Column B (numeric)");
    }

    #[test]
    fn empty_text() {
        assert_eq!(inspect("", ',', None), TableLayout::default());
        assert_eq!(TableLayout::default().default_columns(), (0, 0));
    }
}

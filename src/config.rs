//! Editor configuration.

use crate::edit::DEFAULT_HIT_TOLERANCE;
use crate::history::DEFAULT_DEPTH;
use crate::table::DEFAULT_DELIMITER;
use crate::transform::AxisScale;

/// Settings for a [`crate::editor::CurveEditor`].
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Field delimiter for reading and writing.
    pub delimiter: char,
    /// Undo steps kept. Values below 1 act as 1.
    pub history_depth: usize,
    /// Hit radius for grabbing a point, in pixels.
    pub hit_tolerance: f64,
    /// Column used for X by new series.
    pub x_column: usize,
    /// Column used for Y by new series.
    pub y_column: usize,
    /// Initial X scale.
    pub x_scale: AxisScale,
    /// Initial Y scale.
    pub y_scale: AxisScale,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            history_depth: DEFAULT_DEPTH,
            hit_tolerance: DEFAULT_HIT_TOLERANCE,
            x_column: 0,
            y_column: 1,
            x_scale: AxisScale::Linear,
            y_scale: AxisScale::Linear,
        }
    }
}

/// Parse a column pair such as `0,2` or `A,C`.
pub fn parse_columns(text: &str) -> crate::Result<(usize, usize)> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| crate::CurveError::InvalidColumns(format!("expected X,Y in '{}'", text)))?;
    Ok((parse_column(x)?, parse_column(y)?))
}

/// Parse one column: a zero-based number or a spreadsheet letter label.
pub fn parse_column(text: &str) -> crate::Result<usize> {
    let text = text.trim();
    if let Ok(n) = text.parse::<usize>() {
        return Ok(n);
    }
    if !text.is_empty() && text.chars().all(|c| c.is_ascii_alphabetic()) {
        let n = text
            .to_ascii_uppercase()
            .bytes()
            .fold(0usize, |acc, b| acc * 26 + (b - b'A' + 1) as usize);
        return Ok(n - 1);
    }
    Err(crate::CurveError::InvalidColumns(format!(
        "'{}' is neither an index nor a column letter",
        text
    )))
}

/// Parse an axis range written as `xmin,xmax,ymin,ymax`.
///
/// Only the syntax is checked here; [`crate::plot::PlotState::set_range`]
/// decides whether the bounds fit the axes.
pub fn parse_range(text: &str) -> crate::Result<((f64, f64), (f64, f64))> {
    let values = text
        .split(',')
        .map(|field| {
            field.trim().parse::<f64>().map_err(|_| {
                crate::CurveError::InvalidRange(format!("'{}' is not a number", field.trim()))
            })
        })
        .collect::<crate::Result<Vec<f64>>>()?;
    match values.as_slice() {
        [x0, x1, y0, y1] => Ok(((*x0, *x1), (*y0, *y1))),
        _ => Err(crate::CurveError::InvalidRange(format!(
            "expected xmin,xmax,ymin,ymax in '{}'",
            text
        ))),
    }
}

/// Parse a delimiter argument. Accepts a single character, `\t` or `tab`.
pub fn parse_delimiter(text: &str) -> std::result::Result<char, String> {
    match text {
        "\\t" | "tab" | "TAB" => return Ok('\t'),
        _ => {}
    }
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("delimiter must be a single character, got '{}'", text)),
    }
}

/// Parse an undo depth argument. Zero is refused.
pub fn parse_history_depth(text: &str) -> std::result::Result<usize, String> {
    match text.trim().parse::<usize>() {
        Ok(0) => Err("history depth must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("invalid history depth '{}': {}", text, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_by_index_or_letter() {
        assert_eq!(parse_columns("0,2").expect("columns"), (0, 2));
        assert_eq!(parse_columns("a, C").expect("columns"), (0, 2));
        assert_eq!(parse_column("AA").expect("column"), 26);
        assert!(parse_columns("0").is_err());
        assert!(parse_column("x1").is_err());
    }

    #[test]
    fn range_needs_four_numbers() {
        assert_eq!(
            parse_range("0, 10,-1,1e3").expect("range"),
            ((0.0, 10.0), (-1.0, 1000.0))
        );
        assert!(parse_range("0,10,1").is_err());
        assert!(parse_range("0,ten,1,2").is_err());
    }

    #[test]
    fn history_depth_is_positive() {
        assert_eq!(parse_history_depth("3"), Ok(3));
        assert!(parse_history_depth("0").is_err());
        assert!(parse_history_depth("-1").is_err());
    }

    #[test]
    fn delimiter_names() {
        assert_eq!(parse_delimiter(";"), Ok(';'));
        assert_eq!(parse_delimiter("\\t"), Ok('\t'));
        assert_eq!(parse_delimiter("tab"), Ok('\t'));
        assert!(parse_delimiter(",,").is_err());
        assert!(parse_delimiter("").is_err());
    }
}

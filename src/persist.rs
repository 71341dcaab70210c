//! Writing edited series back to delimited text.
//!
//! Only the Y column is rewritten. Every other field, and the header, goes out
//! exactly as it was read.

use crate::error::{CurveError, Result};
use crate::series::Series;
use std::path::Path;

/// Significant digits used for rewritten Y values.
pub const SIGNIFICANT_DIGITS: usize = 10;

/// Format a number like C's `%.{digits}g`.
///
/// Scientific notation is used when the decimal exponent is below -4 or at
/// least `digits`; trailing zeros are trimmed either way.
pub fn format_significant(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let digits = digits.max(1);
    // Round once in scientific form so the exponent reflects the rounding.
    let sci = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Render a series in its original row structure with current Y values.
///
/// Rows whose Y still equals the value read from them keep their original
/// text. Only rows present in both the raw rows and the coordinates are
/// written.
pub fn serialize(series: &Series, delimiter: char) -> String {
    let sep = delimiter.to_string();
    let y_col = series.y_column();
    let mut out = String::new();

    if series.has_header() {
        out.push_str(&series.header_fields().join(&sep));
        out.push('\n');
    }

    for (row, point) in series.raw_rows().iter().zip(series.coordinates()) {
        let mut fields = row.fields.clone();
        if let Some(field) = fields.get_mut(y_col) {
            if point.y.to_bits() != row.y.to_bits() {
                *field = format_significant(point.y, SIGNIFICANT_DIGITS);
            }
        }
        out.push_str(&fields.join(&sep));
        out.push('\n');
    }

    out
}

/// Write a series to `path`. Returns the number of data rows written.
pub fn save(series: &Series, path: &Path, delimiter: char) -> Result<usize> {
    let text = serialize(series, delimiter);
    std::fs::write(path, text).map_err(|e| CurveError::file_write(path, e))?;

    let rows = series.raw_rows().len().min(series.len());
    tracing::info!("Saved {} rows of series {} to {}", rows, series.id(), path.display());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{LoadOptions, SeriesStore};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn load(content: &str, x: usize, y: usize) -> (NamedTempFile, SeriesStore, crate::SeriesId) {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write");
        let mut store = SeriesStore::new(LoadOptions::default());
        let (id, _) = store.add_series(Some(file.path().to_path_buf()), x, y);
        (file, store, id)
    }

    #[test]
    fn formats_like_printf_g() {
        assert_eq!(format_significant(2.5, 10), "2.5");
        assert_eq!(format_significant(100.0, 10), "100");
        assert_eq!(format_significant(1.0 / 3.0, 10), "0.3333333333");
        assert_eq!(format_significant(123456789.0, 10), "123456789");
        assert_eq!(format_significant(1e10, 10), "1e+10");
        assert_eq!(format_significant(12345678901.0, 10), "1.23456789e+10");
        assert_eq!(format_significant(0.0001, 10), "0.0001");
        assert_eq!(format_significant(0.00001, 10), "1e-05");
        assert_eq!(format_significant(-42.125, 10), "-42.125");
        assert_eq!(format_significant(0.000123456, 10), "0.000123456");
        assert_eq!(format_significant(0.0, 10), "0");
    }

    #[test]
    fn unedited_series_round_trips() {
        let text = "time,label,value\n0.0,a,1.50\n1.0,b,2.0e0\n";
        let (_f, store, id) = load(text, 0, 2);
        assert_eq!(serialize(store.get(id).expect("series"), ','), text);
    }

    #[test]
    fn edit_rewrites_only_y_column() {
        let text = "time,label,value,note\n0.0,a,1.50,keep\n1.0,b,2.0,me\n";
        let (_f, mut store, id) = load(text, 0, 2);
        store.set_point_y(id, 1, 3.25);

        let out = serialize(store.get(id).expect("series"), ',');
        assert_eq!(out, "time,label,value,note\n0.0,a,1.50,keep\n1.0,b,3.25,me\n");
    }

    #[test]
    fn filtered_rows_are_not_written() {
        let text = "1,2\nbad,row\n3,4\n";
        let (_f, store, id) = load(text, 0, 1);
        assert_eq!(serialize(store.get(id).expect("series"), ','), "1,2\n3,4\n");
    }

    #[test]
    fn save_writes_file() {
        let (_f, mut store, id) = load("x,y\n1,2\n", 0, 1);
        store.set_point_y(id, 0, 7.0);

        let out = NamedTempFile::new().expect("temp file");
        let rows = save(store.get(id).expect("series"), out.path(), ',').expect("saved");
        assert_eq!(rows, 1);
        assert_eq!(std::fs::read_to_string(out.path()).expect("read"), "x,y\n1,7\n");
    }

    #[test]
    fn save_to_bad_path_fails() {
        let (_f, store, id) = load("1,2\n", 0, 1);
        let err = save(
            store.get(id).expect("series"),
            Path::new("/no/such/dir/out.csv"),
            ',',
        )
        .expect_err("unwritable");
        assert!(matches!(err, CurveError::FileWrite { .. }));
    }
}

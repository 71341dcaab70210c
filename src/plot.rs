//! Plot settings: axis scales, labels and the visible range.
//!
//! The visible range fits the data automatically once, the first time any
//! series has points; after that it only changes when the user pans, zooms,
//! types a range or asks for an auto range.

use crate::error::{CurveError, Result};
use crate::series::SeriesStore;
use crate::transform::{AxisScale, AxisTransform, PlotTransform};

/// Fraction of the data span added on each side when fitting.
const FIT_MARGIN: f64 = 0.05;

/// Visible data range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRange {
    /// X range (low, high).
    pub x: (f64, f64),
    /// Y range (low, high).
    pub y: (f64, f64),
}

impl Default for ViewRange {
    fn default() -> Self {
        Self {
            x: (0.0, 10.0),
            y: (0.0, 10.0),
        }
    }
}

/// Plot state.
#[derive(Debug, Clone)]
pub struct PlotState {
    /// Plot title.
    pub title: String,
    /// X axis label.
    pub x_label: String,
    /// Y axis label.
    pub y_label: String,
    /// X axis scale.
    pub x_scale: AxisScale,
    /// Y axis scale.
    pub y_scale: AxisScale,
    /// Draw X increasing to the left.
    pub x_reversed: bool,
    /// Visible range.
    pub view: ViewRange,
    auto_ranged: bool,
}

impl PlotState {
    /// Create a new plot state.
    pub fn new() -> Self {
        Self {
            title: String::new(),
            x_label: "X".to_string(),
            y_label: "Y".to_string(),
            x_scale: AxisScale::Linear,
            y_scale: AxisScale::Linear,
            x_reversed: false,
            view: ViewRange::default(),
            auto_ranged: false,
        }
    }

    /// Fit the view to the data the first time there is any.
    pub fn auto_range_if_needed(&mut self, store: &SeriesStore) {
        if !self.auto_ranged && self.auto_range(store) {
            self.auto_ranged = true;
        }
    }

    /// Fit the view to all plottable data. Returns `false` if there is none.
    pub fn auto_range(&mut self, store: &SeriesStore) -> bool {
        let mut x = Extent::default();
        let mut y = Extent::default();
        for series in store.iter() {
            for p in series.coordinates() {
                let (px, py) = (self.x_scale.forward(p.x), self.y_scale.forward(p.y));
                if px.is_finite() && py.is_finite() {
                    x.add(px);
                    y.add(py);
                }
            }
        }

        let (Some(xr), Some(yr)) = (x.padded(), y.padded()) else {
            return false;
        };
        self.view = ViewRange {
            x: (self.x_scale.inverse(xr.0), self.x_scale.inverse(xr.1)),
            y: (self.y_scale.inverse(yr.0), self.y_scale.inverse(yr.1)),
        };
        tracing::debug!("Auto range: {:?}", self.view);
        true
    }

    /// Show exactly the given ranges.
    ///
    /// Each range must be finite with low below high, and strictly positive on
    /// a logarithmic axis. On error the view is unchanged.
    pub fn set_range(&mut self, x: (f64, f64), y: (f64, f64)) -> Result<()> {
        check_range("X", self.x_scale, x)?;
        check_range("Y", self.y_scale, y)?;
        self.view = ViewRange { x, y };
        self.auto_ranged = true;
        tracing::debug!("View range set: {:?}", self.view);
        Ok(())
    }

    /// Shift the view by a fraction of its span on each axis.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.view.x = shift(self.x_scale, self.view.x, dx);
        self.view.y = shift(self.y_scale, self.view.y, dy);
    }

    /// Scale the view around its centre. Factors below 1 zoom in.
    pub fn zoom(&mut self, factor: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        self.view.x = scale_about_centre(self.x_scale, self.view.x, factor);
        self.view.y = scale_about_centre(self.y_scale, self.view.y, factor);
    }

    /// Change the X scale. A log axis cannot show a non-positive range, so the
    /// view is refitted when that happens.
    pub fn set_x_scale(&mut self, scale: AxisScale, store: &SeriesStore) {
        self.x_scale = scale;
        if scale == AxisScale::Logarithmic && self.view.x.0 <= 0.0 {
            self.auto_range(store);
        }
    }

    /// Change the Y scale, refitting if the view is not representable.
    pub fn set_y_scale(&mut self, scale: AxisScale, store: &SeriesStore) {
        self.y_scale = scale;
        if scale == AxisScale::Logarithmic && self.view.y.0 <= 0.0 {
            self.auto_range(store);
        }
    }

    /// Transform for a plot area of `width` × `height` pixels with its origin
    /// at the top-left corner.
    pub fn transform(&self, width: f64, height: f64) -> PlotTransform {
        let x_pixels = if self.x_reversed {
            (width, 0.0)
        } else {
            (0.0, width)
        };
        PlotTransform {
            x: AxisTransform::new(self.x_scale, self.view.x, x_pixels),
            y: AxisTransform::new(self.y_scale, self.view.y, (height, 0.0)),
        }
    }
}

impl Default for PlotState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default)]
struct Extent(Option<(f64, f64)>);

impl Extent {
    fn add(&mut self, v: f64) {
        self.0 = Some(match self.0 {
            None => (v, v),
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
        });
    }

    fn padded(&self) -> Option<(f64, f64)> {
        let (lo, hi) = self.0?;
        let span = hi - lo;
        let pad = if span > 0.0 {
            span * FIT_MARGIN
        } else {
            lo.abs().max(1.0) * FIT_MARGIN
        };
        Some((lo - pad, hi + pad))
    }
}

fn check_range(axis: &str, scale: AxisScale, (lo, hi): (f64, f64)) -> Result<()> {
    if !(lo.is_finite() && hi.is_finite()) {
        return Err(CurveError::InvalidRange(format!("{} bounds must be finite", axis)));
    }
    if lo >= hi {
        return Err(CurveError::InvalidRange(format!(
            "{} minimum {} is not below maximum {}",
            axis, lo, hi
        )));
    }
    if scale == AxisScale::Logarithmic && lo <= 0.0 {
        return Err(CurveError::InvalidRange(format!(
            "{} is logarithmic, bounds must be positive",
            axis
        )));
    }
    Ok(())
}

fn shift(scale: AxisScale, (lo, hi): (f64, f64), fraction: f64) -> (f64, f64) {
    let (l, h) = (scale.forward(lo), scale.forward(hi));
    let d = (h - l) * fraction;
    (scale.inverse(l + d), scale.inverse(h + d))
}

fn scale_about_centre(scale: AxisScale, (lo, hi): (f64, f64), factor: f64) -> (f64, f64) {
    let (l, h) = (scale.forward(lo), scale.forward(hi));
    let mid = (l + h) / 2.0;
    let half = (h - l) / 2.0 * factor;
    (scale.inverse(mid - half), scale.inverse(mid + half))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::LoadOptions;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn store_with(content: &str) -> (NamedTempFile, SeriesStore) {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write");
        let mut store = SeriesStore::new(LoadOptions::default());
        store.add_series(Some(file.path().to_path_buf()), 0, 1);
        (file, store)
    }

    #[test]
    fn auto_range_happens_once() {
        let (_f, store) = store_with("0,0\n10,100\n");
        let mut plot = PlotState::new();
        plot.auto_range_if_needed(&store);
        assert_eq!(plot.view.x, (-0.5, 10.5));
        assert_eq!(plot.view.y, (-5.0, 105.0));

        plot.pan(0.1, 0.0);
        let panned = plot.view;
        plot.auto_range_if_needed(&store);
        assert_eq!(plot.view, panned);
    }

    #[test]
    fn no_data_no_range() {
        let store = SeriesStore::new(LoadOptions::default());
        let mut plot = PlotState::new();
        assert!(!plot.auto_range(&store));
        assert_eq!(plot.view, ViewRange::default());
    }

    #[test]
    fn zoom_keeps_centre() {
        let mut plot = PlotState::new();
        plot.zoom(0.5);
        assert_eq!(plot.view.x, (2.5, 7.5));
    }

    #[test]
    fn typed_range_is_validated() {
        let mut plot = PlotState::new();
        plot.set_range((-5.0, 5.0), (0.0, 1.0)).expect("valid range");
        assert_eq!(plot.view.x, (-5.0, 5.0));

        assert!(plot.set_range((5.0, 5.0), (0.0, 1.0)).is_err());
        assert!(plot.set_range((0.0, 1.0), (2.0, 1.0)).is_err());
        assert!(plot.set_range((0.0, f64::INFINITY), (0.0, 1.0)).is_err());
        assert_eq!(plot.view.x, (-5.0, 5.0));
    }

    #[test]
    fn typed_range_on_log_axis_must_be_positive() {
        let mut plot = PlotState::new();
        plot.y_scale = AxisScale::Logarithmic;
        let err = plot
            .set_range((-1.0, 1.0), (0.0, 100.0))
            .expect_err("zero bound on log Y");
        assert!(matches!(err, CurveError::InvalidRange(_)));
        plot.set_range((-1.0, 1.0), (0.1, 100.0)).expect("positive log range");
        assert_eq!(plot.view.y, (0.1, 100.0));
    }

    #[test]
    fn typed_range_survives_first_data() {
        let (_f, store) = store_with("0,0\n10,100\n");
        let mut plot = PlotState::new();
        plot.set_range((2.0, 3.0), (4.0, 5.0)).expect("range");
        plot.auto_range_if_needed(&store);
        assert_eq!(plot.view.x, (2.0, 3.0));
    }

    #[test]
    fn reversed_x_swaps_pixels() {
        let mut plot = PlotState::new();
        plot.x_reversed = true;
        let t = plot.transform(100.0, 50.0);
        assert_eq!(t.x.pixels, (100.0, 0.0));
        assert_eq!(t.y.pixels, (50.0, 0.0));
    }

    #[test]
    fn log_scale_refits_non_positive_view() {
        let (_f, store) = store_with("1,1\n100,2\n");
        let mut plot = PlotState::new();
        plot.set_x_scale(AxisScale::Logarithmic, &store);
        assert!(plot.view.x.0 > 0.0);
    }
}

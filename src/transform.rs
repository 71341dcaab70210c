//! Mapping between data space and screen space.
//!
//! The editing core only talks to [`CoordinateTransform`]. The per-axis
//! [`AxisTransform`] here is what the terminal front end supplies, and it is
//! equally usable by any other front end that knows its plot rectangle.

use crate::geometry::{DataPoint, ScreenPoint};

/// A bidirectional data ⇄ screen mapping.
pub trait CoordinateTransform {
    /// Where a data point lands on screen.
    fn data_to_screen(&self, point: DataPoint) -> ScreenPoint;

    /// The data point under a screen position.
    fn screen_to_data(&self, point: ScreenPoint) -> DataPoint;

    /// The Y data value at a vertical screen position.
    fn screen_y_to_data(&self, y: f64) -> f64 {
        self.screen_to_data(ScreenPoint::new(0.0, y)).y
    }
}

/// Axis scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisScale {
    /// Linear.
    #[default]
    Linear,
    /// Base-10 logarithmic. Only positive values are representable.
    Logarithmic,
}

impl AxisScale {
    /// Get the other scale.
    pub fn toggle(self) -> Self {
        match self {
            AxisScale::Linear => AxisScale::Logarithmic,
            AxisScale::Logarithmic => AxisScale::Linear,
        }
    }

    /// Get display name.
    pub fn name(self) -> &'static str {
        match self {
            AxisScale::Linear => "linear",
            AxisScale::Logarithmic => "log",
        }
    }

    /// Map a data value into the scale's linear space. NaN if unrepresentable.
    pub fn forward(self, value: f64) -> f64 {
        match self {
            AxisScale::Linear => value,
            AxisScale::Logarithmic if value > 0.0 => value.log10(),
            AxisScale::Logarithmic => f64::NAN,
        }
    }

    /// Inverse of [`AxisScale::forward`].
    pub fn inverse(self, value: f64) -> f64 {
        match self {
            AxisScale::Linear => value,
            AxisScale::Logarithmic => 10f64.powf(value),
        }
    }
}

/// One axis: a data range shown across a pixel span.
///
/// `pixels.0` is where `range.0` lands. Swap the pixel ends to reverse the
/// axis; a vertical axis normally has `pixels.0` at the bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTransform {
    /// Scale type.
    pub scale: AxisScale,
    /// Visible data range.
    pub range: (f64, f64),
    /// Pixel positions of the range ends.
    pub pixels: (f64, f64),
}

impl AxisTransform {
    /// Create a new axis transform.
    pub fn new(scale: AxisScale, range: (f64, f64), pixels: (f64, f64)) -> Self {
        Self {
            scale,
            range,
            pixels,
        }
    }

    /// Data value to pixel.
    pub fn to_pixel(&self, value: f64) -> f64 {
        let lo = self.scale.forward(self.range.0);
        let hi = self.scale.forward(self.range.1);
        let v = self.scale.forward(value);
        if hi == lo {
            return (self.pixels.0 + self.pixels.1) / 2.0;
        }
        self.pixels.0 + (v - lo) / (hi - lo) * (self.pixels.1 - self.pixels.0)
    }

    /// Pixel to data value.
    pub fn to_data(&self, pixel: f64) -> f64 {
        let lo = self.scale.forward(self.range.0);
        let hi = self.scale.forward(self.range.1);
        let span = self.pixels.1 - self.pixels.0;
        if span == 0.0 {
            return self.scale.inverse(lo);
        }
        self.scale
            .inverse(lo + (pixel - self.pixels.0) / span * (hi - lo))
    }
}

/// A transform built from two independent axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotTransform {
    /// Horizontal axis.
    pub x: AxisTransform,
    /// Vertical axis.
    pub y: AxisTransform,
}

impl CoordinateTransform for PlotTransform {
    fn data_to_screen(&self, point: DataPoint) -> ScreenPoint {
        ScreenPoint::new(self.x.to_pixel(point.x), self.y.to_pixel(point.y))
    }

    fn screen_to_data(&self, point: ScreenPoint) -> DataPoint {
        DataPoint::new(self.x.to_data(point.x), self.y.to_data(point.y))
    }

    fn screen_y_to_data(&self, y: f64) -> f64 {
        self.y.to_data(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn linear_axis_round_trips() {
        let axis = AxisTransform::new(AxisScale::Linear, (0.0, 10.0), (0.0, 100.0));
        assert!(close(axis.to_pixel(5.0), 50.0));
        assert!(close(axis.to_data(25.0), 2.5));
    }

    #[test]
    fn vertical_axis_grows_upwards() {
        let axis = AxisTransform::new(AxisScale::Linear, (0.0, 10.0), (200.0, 0.0));
        assert!(close(axis.to_pixel(0.0), 200.0));
        assert!(close(axis.to_pixel(10.0), 0.0));
        assert!(close(axis.to_data(50.0), 7.5));
    }

    #[test]
    fn log_axis() {
        let axis = AxisTransform::new(AxisScale::Logarithmic, (1.0, 1000.0), (0.0, 300.0));
        assert!(close(axis.to_pixel(10.0), 100.0));
        assert!(close(axis.to_data(200.0), 100.0));
        assert!(axis.to_pixel(0.0).is_nan());
        assert!(axis.to_pixel(-5.0).is_nan());
    }

    #[test]
    fn degenerate_range_maps_to_centre() {
        let axis = AxisTransform::new(AxisScale::Linear, (3.0, 3.0), (0.0, 100.0));
        assert!(close(axis.to_pixel(3.0), 50.0));
    }

    #[test]
    fn plot_transform_uses_each_axis() {
        let t = PlotTransform {
            x: AxisTransform::new(AxisScale::Linear, (0.0, 10.0), (0.0, 100.0)),
            y: AxisTransform::new(AxisScale::Linear, (0.0, 10.0), (100.0, 0.0)),
        };
        let s = t.data_to_screen(DataPoint::new(2.0, 2.0));
        assert!(close(s.x, 20.0) && close(s.y, 80.0));
        let d = t.screen_to_data(s);
        assert!(close(d.x, 2.0) && close(d.y, 2.0));
        assert!(close(t.screen_y_to_data(0.0), 10.0));
    }
}

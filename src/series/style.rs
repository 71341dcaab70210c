//! Presentation-only series styling.

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colors handed out to new series in turn.
pub const PALETTE: [Rgb; 5] = [
    Rgb(0, 0, 255),
    Rgb(0, 255, 255),
    Rgb(255, 0, 255),
    Rgb(255, 255, 0),
    Rgb(128, 0, 0),
];

/// Connecting line between consecutive points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    /// Points only.
    #[default]
    None,
    /// Solid line.
    Solid,
    /// Dashed line.
    Dash,
    /// Dotted line.
    Dot,
}

impl LineStyle {
    /// Get the next line style in cycle.
    pub fn next(self) -> Self {
        match self {
            LineStyle::None => LineStyle::Solid,
            LineStyle::Solid => LineStyle::Dash,
            LineStyle::Dash => LineStyle::Dot,
            LineStyle::Dot => LineStyle::None,
        }
    }

    /// Get display name.
    pub fn name(self) -> &'static str {
        match self {
            LineStyle::None => "None",
            LineStyle::Solid => "Solid",
            LineStyle::Dash => "Dash",
            LineStyle::Dot => "Dot",
        }
    }
}

/// Marker drawn at each point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerShape {
    /// No marker.
    None,
    /// Filled circle.
    #[default]
    Disc,
    /// Hollow circle.
    Circle,
    /// Diagonal cross.
    Cross,
    /// Plus sign.
    Plus,
    /// Filled square.
    Square,
    /// Filled diamond.
    Diamond,
    /// Filled triangle.
    Triangle,
}

impl MarkerShape {
    /// Get the next marker shape in cycle.
    pub fn next(self) -> Self {
        match self {
            Self::None => Self::Disc,
            Self::Disc => Self::Circle,
            Self::Circle => Self::Cross,
            Self::Cross => Self::Plus,
            Self::Plus => Self::Square,
            Self::Square => Self::Diamond,
            Self::Diamond => Self::Triangle,
            Self::Triangle => Self::None,
        }
    }

    /// Get display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Disc => "Disc",
            Self::Circle => "Circle",
            Self::Cross => "Cross",
            Self::Plus => "Plus",
            Self::Square => "Square",
            Self::Diamond => "Diamond",
            Self::Triangle => "Triangle",
        }
    }
}

/// How a series is drawn. Carries no invariant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// Line and marker color.
    pub color: Rgb,
    /// Connecting line.
    pub line_style: LineStyle,
    /// Line width in pixels.
    pub line_width: f64,
    /// Point marker.
    pub marker: MarkerShape,
    /// Marker size in pixels.
    pub marker_size: f64,
}

impl Style {
    /// Default style for the `n`th series (zero-based).
    pub fn for_index(n: usize) -> Self {
        Self {
            color: PALETTE[n % PALETTE.len()],
            ..Self::default()
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: PALETTE[0],
            line_style: LineStyle::None,
            line_width: 1.0,
            marker: MarkerShape::Disc,
            marker_size: 6.0,
        }
    }
}

//! Layout configuration constants for the terminal front end.

/// Configuration for the plot area.
#[derive(Debug, Clone)]
pub struct PlotLayoutConfig {
    /// Assumed width of one terminal cell in pixels.
    pub cell_width_px: f64,
    /// Assumed height of one terminal cell in pixels.
    pub cell_height_px: f64,
    /// Width of the Y tick label column.
    pub y_label_width: u16,
    /// Height of the X tick label row.
    pub x_label_height: u16,
    /// Fraction of the view moved per pan step.
    pub pan_step: f64,
    /// Zoom factor per step.
    pub zoom_step: f64,
}

impl Default for PlotLayoutConfig {
    fn default() -> Self {
        Self {
            cell_width_px: 8.0,
            cell_height_px: 16.0,
            y_label_width: 10,
            x_label_height: 1,
            pan_step: 0.1,
            zoom_step: 1.25,
        }
    }
}

/// Configuration for the series panel.
#[derive(Debug, Clone)]
pub struct PanelLayoutConfig {
    /// Panel width in characters.
    pub width: u16,
    /// Height of the details block under the list.
    pub details_height: u16,
}

impl Default for PanelLayoutConfig {
    fn default() -> Self {
        Self {
            width: 36,
            details_height: 11,
        }
    }
}

/// Combined layout configuration.
#[derive(Debug, Clone, Default)]
pub struct LayoutConfig {
    /// Plot area.
    pub plot: PlotLayoutConfig,
    /// Series panel.
    pub panel: PanelLayoutConfig,
}

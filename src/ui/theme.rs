//! Color themes.
//!
//! Both themes draw from the Gruvbox palette. [`Tones`] holds the base tones
//! of one variant and [`ThemeColors`] assigns them to the roles the editor
//! draws with.

use crate::series::Rgb;
use ratatui::style::Color;

/// Application theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Gruvbox dark theme.
    GruvboxDark,
    /// Gruvbox light theme.
    GruvboxLight,
}

impl Theme {
    /// Get the next theme in the cycle.
    pub fn next(self) -> Self {
        match self {
            Theme::GruvboxDark => Theme::GruvboxLight,
            Theme::GruvboxLight => Theme::GruvboxDark,
        }
    }

    /// Get the theme name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::GruvboxDark => "Gruvbox Dark",
            Theme::GruvboxLight => "Gruvbox Light",
        }
    }

    fn tones(self) -> &'static Tones {
        match self {
            Theme::GruvboxDark => &DARK,
            Theme::GruvboxLight => &LIGHT,
        }
    }
}

struct Tones {
    bg0: Color,
    bg1: Color,
    bg3: Color,
    fg1: Color,
    gray: Color,
    red: Color,
    green: Color,
    yellow: Color,
    aqua: Color,
    orange: Color,
}

const DARK: Tones = Tones {
    bg0: Color::Rgb(40, 40, 40),
    bg1: Color::Rgb(60, 56, 54),
    bg3: Color::Rgb(102, 92, 84),
    fg1: Color::Rgb(235, 219, 178),
    gray: Color::Rgb(168, 153, 132),
    red: Color::Rgb(251, 73, 52),
    green: Color::Rgb(184, 187, 38),
    yellow: Color::Rgb(250, 189, 47),
    aqua: Color::Rgb(142, 192, 124),
    orange: Color::Rgb(254, 128, 25),
};

const LIGHT: Tones = Tones {
    bg0: Color::Rgb(251, 241, 199),
    bg1: Color::Rgb(235, 219, 178),
    bg3: Color::Rgb(189, 174, 147),
    fg1: Color::Rgb(60, 56, 54),
    gray: Color::Rgb(124, 111, 100),
    red: Color::Rgb(157, 0, 6),
    green: Color::Rgb(121, 116, 14),
    yellow: Color::Rgb(181, 118, 20),
    aqua: Color::Rgb(66, 123, 88),
    orange: Color::Rgb(175, 58, 3),
};

/// Colors by role.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    /// Background of every panel and the canvas.
    pub bg: Color,
    /// Plain text.
    pub text: Color,
    /// Block titles.
    pub heading: Color,
    /// Field names in the details block and the Y axis label.
    pub label: Color,
    /// Field values.
    pub value: Color,
    /// Block borders.
    pub border: Color,
    /// Selected series row, foreground.
    pub selection_fg: Color,
    /// Selected series row, background.
    pub selection_bg: Color,
    /// Status bar foreground.
    pub status_fg: Color,
    /// Status bar background.
    pub status_bg: Color,
    /// Axis tick values.
    pub tick: Color,
    /// Plot border in drag mode and the hovered point.
    pub drag: Color,
    /// Unsaved edits.
    pub modified: Color,
    /// Load failures.
    pub failed: Color,
}

impl ThemeColors {
    /// Colors for a theme.
    pub fn from_theme(theme: Theme) -> Self {
        let t = theme.tones();
        Self {
            bg: t.bg0,
            text: t.fg1,
            heading: t.orange,
            label: t.green,
            value: t.aqua,
            border: t.bg3,
            selection_fg: t.bg0,
            selection_bg: t.orange,
            status_fg: t.fg1,
            status_bg: t.bg1,
            tick: t.gray,
            drag: t.yellow,
            modified: t.yellow,
            failed: t.red,
        }
    }
}

/// Terminal color of a series.
pub fn series_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn themes_cycle_and_differ() {
        assert_eq!(Theme::GruvboxDark.next().next(), Theme::GruvboxDark);
        let dark = ThemeColors::from_theme(Theme::GruvboxDark);
        let light = ThemeColors::from_theme(Theme::GruvboxLight);
        assert_ne!(dark.bg, light.bg);
        assert_eq!(dark.selection_fg, dark.bg);
    }
}

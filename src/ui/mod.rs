//! User interface rendering.

mod formatters;
mod keymap_bar;
mod plot_view;
mod series_panel;
mod status_bar;
mod theme;

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Frame,
};

pub use theme::{Theme, ThemeColors};

/// Draw the UI.
pub fn draw(f: &mut Frame<'_>, app: &mut App) {
    let colors = ThemeColors::from_theme(app.theme);
    f.render_widget(Block::default().style(Style::default().bg(colors.bg)), f.area());

    // Main layout with status bar and key map bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1), Constraint::Length(1)])
        .split(f.area());

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(app.layout.panel.width)])
        .split(chunks[0]);

    plot_view::draw_plot(f, app, content[0], &colors);
    series_panel::draw_panel(f, app, content[1], &colors);

    status_bar::draw_status(f, chunks[1], &app.status, &app.prompt, &colors);
    keymap_bar::draw_keymap(
        f,
        chunks[2],
        app.editor.session().is_enabled(),
        app.prompt.is_active(),
        &colors,
    );
}

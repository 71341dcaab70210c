//! Series list and details.

use super::formatters::{format_axis_label, format_number, truncate_path, truncate_to_width};
use super::theme::series_color;
use super::ThemeColors;
use crate::app::App;
use crate::series::{LoadStatus, Series};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Draw the series panel.
pub fn draw_panel(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(app.layout.panel.details_height),
        ])
        .split(area);

    draw_list(f, app, chunks[0], colors);
    draw_details(f, app, chunks[1], colors);
}

fn draw_list(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    let name_width = usize::from(area.width.saturating_sub(6));
    let items: Vec<ListItem<'_>> = app
        .editor
        .store()
        .iter()
        .map(|series| {
            let mut spans = vec![
                Span::styled("■ ", Style::default().fg(series_color(series.style.color))),
                Span::styled(
                    truncate_to_width(&series.name, name_width),
                    Style::default().fg(colors.text),
                ),
            ];
            if series.is_modified() {
                spans.push(Span::styled(" *", Style::default().fg(colors.modified)));
            }
            if matches!(series.load_status(), LoadStatus::Failed(_)) {
                spans.push(Span::styled(" !", Style::default().fg(colors.failed)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut state = ListState::default();
    state.select(app.selected.and_then(|id| app.editor.store().position(id)));

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.border))
                .title(" Series ")
                .title_style(Style::default().fg(colors.heading)),
        )
        .highlight_style(
            Style::default()
                .fg(colors.selection_fg)
                .bg(colors.selection_bg)
                .add_modifier(Modifier::BOLD),
        );

    f.render_stateful_widget(list, area, &mut state);
}

fn draw_details(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .title(" Details ")
        .title_style(Style::default().fg(colors.heading));

    let Some(series) = app.selected.and_then(|id| app.editor.store().get(id)) else {
        let para = Paragraph::new("No series selected")
            .style(Style::default().fg(colors.text))
            .block(block);
        f.render_widget(para, area);
        return;
    };

    let width = usize::from(area.width.saturating_sub(12));
    let (undo, redo) = app.editor.history_availability();
    let history = app.editor.history();

    let mut lines = vec![
        field(
            "Source",
            series
                .source_path()
                .map(|p| truncate_path(&p.display().to_string(), width))
                .unwrap_or_else(|| "none".to_string()),
            colors,
        ),
        field("Columns", column_summary(series), colors),
        field("Points", format_number(series.len()), colors),
    ];

    if let Some(((x0, x1), (y0, y1))) = series.bounds() {
        lines.push(field(
            "Range",
            format!(
                "x {}..{} y {}..{}",
                format_axis_label(x0),
                format_axis_label(x1),
                format_axis_label(y0),
                format_axis_label(y1)
            ),
            colors,
        ));
    }

    match series.load_status() {
        LoadStatus::Loaded(stats) if stats.skipped() > 0 => {
            lines.push(field("Skipped", format_number(stats.skipped()), colors));
        },
        LoadStatus::Failed(message) => lines.push(Line::from(vec![
            Span::styled("Error: ", Style::default().fg(colors.label)),
            Span::styled(message.clone(), Style::default().fg(colors.failed)),
        ])),
        _ => {},
    }

    lines.push(field(
        "Style",
        format!(
            "{} / {} {}",
            series.style.line_style.name(),
            series.style.marker.name(),
            series.style.marker_size
        ),
        colors,
    ));
    lines.push(field(
        "History",
        format!(
            "undo {}{} redo {}{}",
            history.undo_len(),
            if undo { "" } else { " (off)" },
            history.redo_len(),
            if redo { "" } else { " (off)" },
        ),
        colors,
    ));
    if series.is_modified() {
        lines.push(Line::from(Span::styled(
            "Unsaved changes",
            Style::default().fg(colors.modified),
        )));
    }

    let para = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(para, area);
}

fn field(label: &str, value: String, colors: &ThemeColors) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(colors.label)),
        Span::styled(value, Style::default().fg(colors.value)),
    ])
}

fn column_summary(series: &Series) -> String {
    let name = |index: usize| {
        series
            .header_fields()
            .get(index)
            .map_or_else(|| index.to_string(), |h| format!("{} ({})", index, h))
    };
    format!("x={} y={}", name(series.x_column()), name(series.y_column()))
}

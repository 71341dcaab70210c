//! Plot canvas UI component.
//!
//! Everything is painted in the same virtual pixel space the mouse handler
//! hit-tests in, so what is drawn under the pointer is what gets grabbed.

use super::formatters::{format_axis_label, truncate_to_width};
use super::theme::series_color;
use super::ThemeColors;
use crate::app::App;
use crate::series::{LineStyle, MarkerShape, Series};
use crate::transform::{CoordinateTransform, PlotTransform};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine, Points},
        Block, Borders, Paragraph,
    },
    Frame,
};

/// Draw the plot with its axes. Records the canvas area on `app`.
pub fn draw_plot(f: &mut Frame<'_>, app: &mut App, area: Rect, colors: &ThemeColors) {
    let plot = app.editor.plot();
    let title = if plot.title.is_empty() {
        " Curvedit ".to_string()
    } else {
        format!(" {} ", plot.title)
    };
    let border = if app.editor.session().is_enabled() {
        colors.drag
    } else {
        colors.border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title)
        .title_style(Style::default().fg(colors.heading))
        .title_bottom(Line::from(format!(" {} ", plot.x_label)).centered());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cfg = &app.layout.plot;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(cfg.y_label_width), Constraint::Min(1)])
        .split(inner);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(cfg.x_label_height)])
        .split(columns[1]);
    let canvas_area = rows[0];

    app.plot_area = canvas_area;
    let transform = app.plot_transform();

    draw_y_ticks(f, app, columns[0], canvas_area, &transform, colors);
    draw_x_ticks(f, rows[1], &transform, colors);

    if app.editor.store().is_empty() {
        let para = Paragraph::new("Press a to add a data file")
            .style(Style::default().fg(colors.text))
            .alignment(Alignment::Center);
        f.render_widget(para, centre_row(canvas_area));
        return;
    }

    let width = transform.x.pixels.0.max(transform.x.pixels.1);
    let height = transform.y.pixels.0.max(transform.y.pixels.1);
    let highlight = app.selected.zip(app.hover);

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(colors.bg)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            for series in app.editor.store().iter() {
                paint_series(ctx, series, &transform, height);
            }
            if let Some((id, index)) = highlight {
                let point = app
                    .editor
                    .store()
                    .get(id)
                    .and_then(|s| s.coordinates().get(index));
                if let Some(point) = point {
                    let at = transform.data_to_screen(*point);
                    if at.is_finite() {
                        ctx.layer();
                        ctx.print(
                            at.x,
                            height - at.y,
                            Span::styled(
                                "◉",
                                Style::default()
                                    .fg(colors.drag)
                                    .add_modifier(Modifier::BOLD),
                            ),
                        );
                    }
                }
            }
        });

    f.render_widget(canvas, canvas_area);
}

fn paint_series(ctx: &mut Context<'_>, series: &Series, transform: &PlotTransform, height: f64) {
    let color = series_color(series.style.color);
    let points: Vec<Option<(f64, f64)>> = series
        .coordinates()
        .iter()
        .map(|p| {
            let at = transform.data_to_screen(*p);
            at.is_finite().then_some((at.x, height - at.y))
        })
        .collect();

    paint_line(ctx, &points, series.style.line_style, color);

    if let Some(glyph) = marker_glyph(series.style.marker, series.style.marker_size) {
        for &(x, y) in points.iter().flatten() {
            ctx.print(x, y, Span::styled(glyph, Style::default().fg(color)));
        }
    }
}

fn paint_line(ctx: &mut Context<'_>, points: &[Option<(f64, f64)>], style: LineStyle, color: Color) {
    let segments = points.windows(2).filter_map(|w| Some((w[0]?, w[1]?)));

    match style {
        LineStyle::None => {},
        LineStyle::Solid => {
            for ((x1, y1), (x2, y2)) in segments {
                ctx.draw(&CanvasLine {
                    x1,
                    y1,
                    x2,
                    y2,
                    color,
                });
            }
        },
        LineStyle::Dash => {
            for ((x1, y1), (x2, y2)) in segments {
                // Draw the middle half of each segment.
                let (dx, dy) = ((x2 - x1) / 4.0, (y2 - y1) / 4.0);
                ctx.draw(&CanvasLine {
                    x1: x1 + dx,
                    y1: y1 + dy,
                    x2: x2 - dx,
                    y2: y2 - dy,
                    color,
                });
            }
        },
        LineStyle::Dot => {
            let coords: Vec<(f64, f64)> = segments
                .flat_map(|((x1, y1), (x2, y2))| {
                    (0..4).map(move |i| {
                        let t = f64::from(i) / 4.0;
                        (x1 + (x2 - x1) * t, y1 + (y2 - y1) * t)
                    })
                })
                .collect();
            ctx.draw(&Points {
                coords: &coords,
                color,
            });
        },
    }
}

fn marker_glyph(shape: MarkerShape, size: f64) -> Option<&'static str> {
    let small = size < 6.0;
    Some(match shape {
        MarkerShape::None => return None,
        MarkerShape::Disc if small => "•",
        MarkerShape::Disc => "●",
        MarkerShape::Circle => "○",
        MarkerShape::Cross => "×",
        MarkerShape::Plus => "+",
        MarkerShape::Square if small => "▪",
        MarkerShape::Square => "■",
        MarkerShape::Diamond => "◆",
        MarkerShape::Triangle => "▲",
    })
}

fn draw_y_ticks(
    f: &mut Frame<'_>,
    app: &App,
    area: Rect,
    canvas_area: Rect,
    transform: &PlotTransform,
    colors: &ThemeColors,
) {
    if area.width == 0 || canvas_area.height == 0 {
        return;
    }
    let width = usize::from(area.width.saturating_sub(1));
    let label = Paragraph::new(truncate_to_width(&app.editor.plot().y_label, width))
        .style(Style::default().fg(colors.label));
    f.render_widget(label, Rect::new(area.x, area.y, area.width, 1));

    let cell_h = app.layout.plot.cell_height_px;
    let last = canvas_area.height - 1;
    let mut rows = vec![last, last / 2];
    if last > 2 {
        rows.push(1);
    }

    for row in rows {
        let pixel = (f64::from(row) + 0.5) * cell_h;
        let text = truncate_to_width(&format_axis_label(transform.y.to_data(pixel)), width);
        let tick = Paragraph::new(text)
            .style(Style::default().fg(colors.tick))
            .alignment(Alignment::Right);
        f.render_widget(
            tick,
            Rect::new(area.x, canvas_area.y + row, area.width.saturating_sub(1), 1),
        );
    }
}

fn draw_x_ticks(f: &mut Frame<'_>, area: Rect, transform: &PlotTransform, colors: &ThemeColors) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let width = transform.x.pixels.0.max(transform.x.pixels.1);
    let labels = [0.0, width / 2.0, width].map(|px| format_axis_label(transform.x.to_data(px)));
    let text = spread_labels(&labels, usize::from(area.width));
    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(colors.tick)),
        Rect::new(area.x, area.y, area.width, 1),
    );
}

/// Lay out labels left, centre and right across `width` columns.
fn spread_labels(labels: &[String; 3], width: usize) -> String {
    let mut line = vec![' '; width];
    let starts = [
        0,
        (width / 2).saturating_sub(labels[1].chars().count() / 2),
        width.saturating_sub(labels[2].chars().count()),
    ];
    for (label, start) in labels.iter().zip(starts) {
        for (i, c) in label.chars().enumerate() {
            if let Some(slot) = line.get_mut(start + i) {
                *slot = c;
            }
        }
    }
    line.into_iter().collect()
}

fn centre_row(area: Rect) -> Rect {
    Rect::new(area.x, area.y + area.height / 2, area.width, area.height.min(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_spread_across_row() {
        let labels = ["0".to_string(), "5".to_string(), "10".to_string()];
        assert_eq!(spread_labels(&labels, 11), "0    5   10");
    }

    #[test]
    fn hidden_marker_has_no_glyph() {
        assert_eq!(marker_glyph(MarkerShape::None, 6.0), None);
        assert_eq!(marker_glyph(MarkerShape::Disc, 6.0), Some("●"));
        assert_eq!(marker_glyph(MarkerShape::Disc, 3.0), Some("•"));
    }
}

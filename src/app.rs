//! Application state and logic.

use std::path::{Path, PathBuf};

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::config::{parse_columns, parse_range};
use crate::edit::{MoveOutcome, PressOutcome};
use crate::editor::{CurveEditor, ResetOutcome, SaveOutcome};
use crate::error::CurveError;
use crate::geometry::ScreenPoint;
use crate::persist::{format_significant, SIGNIFICANT_DIGITS};
use crate::prompt::{PromptKind, PromptState};
use crate::series::SeriesId;
use crate::table::inspect_file;
use crate::transform::PlotTransform;
use crate::ui::Theme;
use crate::util::LayoutConfig;

/// Application state.
#[derive(Debug)]
pub struct App {
    /// The editing core.
    pub editor: CurveEditor,
    /// Series the commands apply to.
    pub selected: Option<SeriesId>,
    /// Text prompt.
    pub prompt: PromptState,
    /// Status message.
    pub status: String,
    /// Current theme.
    pub theme: Theme,
    /// Layout settings.
    pub layout: LayoutConfig,
    /// Point under the pointer in the selected series.
    pub hover: Option<usize>,
    /// Screen area of the plot canvas, set while drawing.
    pub plot_area: Rect,
    /// Column pair forced for every opened file.
    pub columns: Option<(usize, usize)>,
}

impl App {
    /// Create a new application instance.
    pub fn new(editor: CurveEditor) -> Self {
        Self {
            editor,
            selected: None,
            prompt: PromptState::new(),
            status: "Ready".to_string(),
            theme: Theme::GruvboxDark,
            layout: LayoutConfig::default(),
            hover: None,
            plot_area: Rect::default(),
            columns: None,
        }
    }

    /// Add a series for a file.
    ///
    /// Columns come from `columns` when set; otherwise the first two numeric
    /// columns of the file are used.
    pub fn open_file(&mut self, path: PathBuf) {
        let delimiter = self.editor.store().options().delimiter;
        let (x, y) = match self.columns {
            Some(pair) => pair,
            None => inspect_file(&path, delimiter, None)
                .map(|layout| layout.plot_columns)
                .unwrap_or((self.editor.config().x_column, self.editor.config().y_column)),
        };

        match self.editor.load_series(&path, x, y) {
            Ok(id) => {
                self.selected = Some(id);
                let points = self.editor.store().get(id).map_or(0, |s| s.len());
                self.status = format!("{} loaded: {} points", file_label(&path), points);
            },
            Err(CurveError::SeriesLoad { id, .. }) => {
                self.selected = Some(id);
                self.status = format!("Error loading {}", file_label(&path));
            },
            Err(e) => {
                self.status = format!("Error: {}", e);
                tracing::error!("Error loading file: {}", e);
            },
        }
    }

    /// Name of the selected series.
    pub fn selected_name(&self) -> Option<&str> {
        self.selected
            .and_then(|id| self.editor.store().get(id))
            .map(|s| s.name.as_str())
    }

    /// Select the next series.
    pub fn select_next(&mut self) {
        self.select_offset(1);
    }

    /// Select the previous series.
    pub fn select_prev(&mut self) {
        self.select_offset(-1);
    }

    fn select_offset(&mut self, delta: isize) {
        if self.editor.session().is_dragging() {
            return;
        }
        let ids = self.editor.store().ids();
        if ids.is_empty() {
            self.selected = None;
            return;
        }
        let current = self
            .selected
            .and_then(|id| ids.iter().position(|&i| i == id))
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(ids.len() as isize) as usize;
        self.selected = Some(ids[next]);
        self.hover = None;
    }

    /// Toggle drag mode.
    pub fn toggle_drag_mode(&mut self) {
        if self.editor.session().is_enabled() {
            self.editor.disable_drag_mode();
            self.status = "Drag mode: OFF".to_string();
        } else {
            self.editor.enable_drag_mode();
            self.status = "Drag mode: ON".to_string();
        }
        self.hover = None;
    }

    /// Undo the last edit.
    pub fn undo(&mut self) {
        self.status = match self.editor.undo() {
            Some(id) => format!("Undo in {}", self.series_label(id)),
            None => "Nothing to undo".to_string(),
        };
    }

    /// Redo the last undone edit.
    pub fn redo(&mut self) {
        self.status = match self.editor.redo() {
            Some(id) => format!("Redo in {}", self.series_label(id)),
            None => "Nothing to redo".to_string(),
        };
    }

    /// Save the selected series, to its own source or to `destination`.
    pub fn save_selected(&mut self, destination: Option<PathBuf>) {
        let Some(id) = self.selected else {
            self.status = "No series selected".to_string();
            return;
        };
        let destination = destination.or_else(|| {
            self.editor
                .store()
                .get(id)
                .and_then(|s| s.source_path())
                .map(Path::to_path_buf)
        });
        let Some(destination) = destination else {
            self.status = "No destination: use save as".to_string();
            return;
        };

        self.status = match self.editor.save_series(id, &destination) {
            Ok(SaveOutcome::Saved { rows }) => {
                format!("Saved {} rows to {}", rows, destination.display())
            },
            Ok(SaveOutcome::NotModified) => "Data is not modified".to_string(),
            Err(e) => {
                tracing::error!("Save failed: {}", e);
                format!("Save failed: {}", e)
            },
        };
    }

    /// Reset the selected series to its source.
    pub fn reset_selected(&mut self) {
        let Some(id) = self.selected else {
            self.status = "No series selected".to_string();
            return;
        };
        self.hover = None;
        self.status = match self.editor.reset_series(id) {
            Ok(ResetOutcome::Reset(stats)) => format!("Reset: {} points", stats.data_rows),
            Ok(ResetOutcome::NotModified) => "Data is not modified".to_string(),
            Err(e) => format!("Reset failed: {}", e),
        };
    }

    /// Remove the selected series.
    pub fn remove_selected(&mut self) {
        let Some(id) = self.selected else {
            return;
        };
        let position = self.editor.store().position(id).unwrap_or(0);
        let label = self.series_label(id);
        if let Err(e) = self.editor.remove_series(id) {
            self.status = format!("Remove failed: {}", e);
            return;
        }

        let ids = self.editor.store().ids();
        self.selected = ids.get(position.min(ids.len().saturating_sub(1))).copied();
        self.hover = None;
        self.status = format!("Removed {}", label);
    }

    /// Cycle the line style of the selected series.
    pub fn cycle_line_style(&mut self) {
        self.restyle(|style| style.line_style = style.line_style.next());
    }

    /// Cycle the marker of the selected series.
    pub fn cycle_marker(&mut self) {
        self.restyle(|style| style.marker = style.marker.next());
    }

    /// Change the marker size of the selected series.
    pub fn adjust_marker_size(&mut self, delta: f64) {
        self.restyle(|style| style.marker_size = (style.marker_size + delta).clamp(1.0, 30.0));
    }

    fn restyle(&mut self, change: impl FnOnce(&mut crate::series::Style)) {
        let Some(series) = self.selected.and_then(|id| self.editor.store().get(id)) else {
            return;
        };
        let id = series.id();
        let mut style = series.style;
        change(&mut style);
        let summary = format!(
            "Style: {} line, {} marker, size {}",
            style.line_style.name(),
            style.marker.name(),
            style.marker_size
        );
        if self.editor.set_style(id, style).is_ok() {
            self.status = summary;
        }
    }

    /// Toggle the X scale between linear and logarithmic.
    pub fn toggle_x_scale(&mut self) {
        let scale = self.editor.plot().x_scale.toggle();
        let reports = self.editor.set_x_scale(scale);
        let filtered: usize = reports
            .iter()
            .filter_map(|(_, r)| r.as_ref().ok())
            .map(|s| s.domain_filtered)
            .sum();
        self.hover = None;
        self.status = if filtered > 0 {
            format!("X axis: {} ({} rows with X <= 0 dropped)", scale.name(), filtered)
        } else {
            format!("X axis: {}", scale.name())
        };
    }

    /// Toggle the Y scale between linear and logarithmic.
    pub fn toggle_y_scale(&mut self) {
        let scale = self.editor.plot().y_scale.toggle();
        self.editor.set_y_scale(scale);
        self.status = format!("Y axis: {}", scale.name());
    }

    /// Flip the X axis direction.
    pub fn toggle_x_reversed(&mut self) {
        let plot = self.editor.plot_mut();
        plot.x_reversed = !plot.x_reversed;
        self.status = if plot.x_reversed {
            "X axis reversed".to_string()
        } else {
            "X axis normal".to_string()
        };
    }

    /// Fit the view to the data.
    pub fn auto_range(&mut self) {
        if !self.editor.auto_range() {
            self.status = "No data to fit".to_string();
        }
    }

    /// Pan by steps. Refused in drag mode.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        if !self.pan_zoom_allowed() {
            return;
        }
        let step = self.layout.plot.pan_step;
        self.editor.plot_mut().pan(dx * step, dy * step);
    }

    /// Zoom in (`steps > 0`) or out. Refused in drag mode.
    pub fn zoom(&mut self, steps: i32) {
        if !self.pan_zoom_allowed() {
            return;
        }
        let factor = self.layout.plot.zoom_step.powi(-steps);
        self.editor.plot_mut().zoom(factor);
    }

    fn pan_zoom_allowed(&mut self) -> bool {
        let allowed = self.editor.session().pan_zoom_enabled();
        if !allowed {
            self.status = "Pan and zoom are off in drag mode".to_string();
        }
        allowed
    }

    /// Cycle to the next theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.status = format!("Theme: {}", self.theme.name());
    }

    /// Open a prompt, pre-filled where there is something sensible to edit.
    pub fn start_prompt(&mut self, kind: PromptKind) {
        let series = self.selected.and_then(|id| self.editor.store().get(id));
        let initial = match kind {
            PromptKind::AddSeries => String::new(),
            PromptKind::SourcePath | PromptKind::SaveAs => series
                .and_then(|s| s.source_path())
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            PromptKind::Rename => series.map(|s| s.name.clone()).unwrap_or_default(),
            PromptKind::Columns => series
                .map(|s| format!("{},{}", s.x_column(), s.y_column()))
                .unwrap_or_default(),
            PromptKind::PointValue => {
                let Some(point) = series
                    .zip(self.hover)
                    .and_then(|(s, i)| s.coordinates().get(i))
                else {
                    self.status = "Hover a point in drag mode first".to_string();
                    return;
                };
                format_significant(point.y, SIGNIFICANT_DIGITS)
            },
            PromptKind::Title => self.editor.plot().title.clone(),
            PromptKind::XLabel => self.editor.plot().x_label.clone(),
            PromptKind::YLabel => self.editor.plot().y_label.clone(),
            PromptKind::Range => {
                let view = self.editor.plot().view;
                [view.x.0, view.x.1, view.y.0, view.y.1]
                    .map(|v| format_significant(v, SIGNIFICANT_DIGITS))
                    .join(",")
            },
        };

        if series.is_none() && is_series_prompt(kind) {
            self.status = "No series selected".to_string();
            return;
        }
        self.prompt.start(kind, initial);
    }

    /// Apply the text typed into the prompt.
    pub fn submit_prompt(&mut self) {
        let Some((kind, text)) = self.prompt.submit() else {
            return;
        };

        match kind {
            PromptKind::AddSeries => {
                if !text.is_empty() {
                    self.open_file(PathBuf::from(text));
                }
            },
            PromptKind::Title => self.editor.plot_mut().title = text,
            PromptKind::XLabel => self.editor.plot_mut().x_label = text,
            PromptKind::YLabel => self.editor.plot_mut().y_label = text,
            PromptKind::Range => {
                self.status = match parse_range(&text)
                    .and_then(|(x, y)| self.editor.set_view_range(x, y))
                {
                    Ok(()) => format!("Range: {}", text),
                    Err(e) => format!("Error: {}", e),
                };
            },
            _ => {
                if let Some(id) = self.selected {
                    self.apply_series_prompt(id, kind, text);
                }
            },
        }
    }

    fn apply_series_prompt(&mut self, id: SeriesId, kind: PromptKind, text: String) {
        match kind {
            PromptKind::SourcePath => {
                let path = (!text.is_empty()).then(|| PathBuf::from(text));
                self.hover = None;
                self.status = match self.editor.set_source_path(id, path) {
                    Ok(stats) => format!("Loaded {} points", stats.data_rows),
                    Err(e) => format!("Error: {}", e),
                };
            },
            PromptKind::SaveAs => {
                if !text.is_empty() {
                    self.save_selected(Some(PathBuf::from(text)));
                }
            },
            PromptKind::Rename => {
                if !text.is_empty() && self.editor.rename(id, text).is_ok() {
                    self.status = "Renamed".to_string();
                }
            },
            PromptKind::Columns => {
                self.hover = None;
                self.status = match parse_columns(&text)
                    .and_then(|(x, y)| self.editor.set_columns(id, x, y))
                {
                    Ok(stats) => format!(
                        "Loaded {} points ({} rows skipped)",
                        stats.data_rows,
                        stats.skipped()
                    ),
                    Err(e) => format!("Error: {}", e),
                };
            },
            PromptKind::PointValue => {
                let Some(index) = self.hover else {
                    return;
                };
                self.status = match text.parse::<f64>() {
                    Ok(value) if value.is_finite() => {
                        if self.editor.set_point_y(id, index, value) {
                            format!("Point {} set to {}", index, text)
                        } else {
                            "Point no longer exists".to_string()
                        }
                    },
                    _ => format!("Not a number: {}", text),
                };
            },
            PromptKind::AddSeries
            | PromptKind::Title
            | PromptKind::XLabel
            | PromptKind::YLabel
            | PromptKind::Range => {},
        }
    }

    /// Transform for the current plot area in virtual pixels.
    pub fn plot_transform(&self) -> PlotTransform {
        let cfg = &self.layout.plot;
        self.editor.plot().transform(
            f64::from(self.plot_area.width) * cfg.cell_width_px,
            f64::from(self.plot_area.height) * cfg.cell_height_px,
        )
    }

    /// Virtual pixel position of the centre of a terminal cell.
    pub fn cell_to_screen(&self, column: u16, row: u16) -> ScreenPoint {
        let cfg = &self.layout.plot;
        ScreenPoint::new(
            (f64::from(column) - f64::from(self.plot_area.x) + 0.5) * cfg.cell_width_px,
            (f64::from(row) - f64::from(self.plot_area.y) + 0.5) * cfg.cell_height_px,
        )
    }

    fn in_plot(&self, column: u16, row: u16) -> bool {
        let a = self.plot_area;
        column >= a.x && column < a.x + a.width && row >= a.y && row < a.y + a.height
    }

    /// Handle a mouse event.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let screen = self.cell_to_screen(mouse.column, mouse.row);
        let inside = self.in_plot(mouse.column, mouse.row);
        let transform = self.plot_transform();

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if inside => {
                let Some(id) = self.selected else {
                    return;
                };
                match self.editor.pointer_down(id, screen, &transform) {
                    PressOutcome::Grabbed(index) => {
                        self.hover = Some(index);
                        self.status = format!("Dragging point {}", index);
                    },
                    PressOutcome::Missed => self.status = "No point within reach".to_string(),
                    PressOutcome::Ignored => {},
                }
            },
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                let hover = if inside || self.editor.session().is_dragging() {
                    self.selected
                } else {
                    None
                };
                match self.editor.pointer_move(hover, screen, &transform) {
                    MoveOutcome::Moved { index, y } => {
                        self.hover = Some(index);
                        self.status = format!(
                            "Point {}: y = {}",
                            index,
                            format_significant(y, SIGNIFICANT_DIGITS)
                        );
                    },
                    MoveOutcome::Hover(index) => self.hover = index,
                    MoveOutcome::Ignored => {},
                }
            },
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(drag) = self.editor.pointer_up() {
                    self.status = format!("Moved point {}", drag.point_index);
                }
            },
            MouseEventKind::ScrollUp if inside => self.zoom(1),
            MouseEventKind::ScrollDown if inside => self.zoom(-1),
            _ => {},
        }
    }

    fn series_label(&self, id: SeriesId) -> String {
        self.editor
            .store()
            .get(id)
            .map_or_else(|| id.to_string(), |s| s.name.clone())
    }
}

fn is_series_prompt(kind: PromptKind) -> bool {
    matches!(
        kind,
        PromptKind::SourcePath
            | PromptKind::SaveAs
            | PromptKind::Rename
            | PromptKind::Columns
            | PromptKind::PointValue
    )
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "file".to_string())
}

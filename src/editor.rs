//! The command surface of the editing core.
//!
//! [`CurveEditor`] owns the series, the history, the drag session and the plot
//! settings, and exposes one method per user command. Every command names the
//! series it applies to; there is no ambient selection here.

use crate::config::EditorConfig;
use crate::edit::{DragSession, MoveOutcome, PointEditSession, PressOutcome};
use crate::error::{CurveError, Result};
use crate::geometry::ScreenPoint;
use crate::history::EditHistory;
use crate::persist;
use crate::plot::PlotState;
use crate::series::{LoadOptions, SeriesId, SeriesStore, Style};
use crate::table::ParseStats;
use crate::transform::{AxisScale, CoordinateTransform};
use std::path::{Path, PathBuf};

/// Outcome of a save request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Written.
    Saved {
        /// Data rows written.
        rows: usize,
    },
    /// Nothing to save.
    NotModified,
}

/// Outcome of a reset request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// Reloaded from the source.
    Reset(ParseStats),
    /// Nothing to reset.
    NotModified,
}

/// The curve editing core.
#[derive(Debug)]
pub struct CurveEditor {
    store: SeriesStore,
    history: EditHistory,
    session: PointEditSession,
    plot: PlotState,
    config: EditorConfig,
}

impl CurveEditor {
    /// Create an editor.
    pub fn new(config: EditorConfig) -> Self {
        let mut plot = PlotState::new();
        plot.x_scale = config.x_scale;
        plot.y_scale = config.y_scale;
        if config.x_scale == AxisScale::Logarithmic {
            plot.view.x = (1.0, 10.0);
        }
        if config.y_scale == AxisScale::Logarithmic {
            plot.view.y = (1.0, 10.0);
        }

        Self {
            store: SeriesStore::new(LoadOptions {
                delimiter: config.delimiter,
                x_must_be_positive: config.x_scale == AxisScale::Logarithmic,
            }),
            history: EditHistory::new(config.history_depth),
            session: PointEditSession::new(config.hit_tolerance),
            plot,
            config,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The series.
    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    /// The undo/redo history.
    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    /// The drag session.
    pub fn session(&self) -> &PointEditSession {
        &self.session
    }

    /// Plot settings.
    pub fn plot(&self) -> &PlotState {
        &self.plot
    }

    /// Plot settings, mutable. Axis scales go through [`CurveEditor::set_x_scale`]
    /// and [`CurveEditor::set_y_scale`].
    pub fn plot_mut(&mut self) -> &mut PlotState {
        &mut self.plot
    }

    /// Add a series loaded from `path`.
    ///
    /// On a read failure the series still exists, empty, and the error carries
    /// its id.
    pub fn load_series(
        &mut self,
        path: impl Into<PathBuf>,
        x_column: usize,
        y_column: usize,
    ) -> Result<SeriesId> {
        let path = path.into();
        let (id, report) = self
            .store
            .add_series(Some(path.clone()), x_column, y_column);
        self.plot.auto_range_if_needed(&self.store);

        match report {
            Ok(_) => Ok(id),
            Err(CurveError::FileOpen { source, .. }) => Err(CurveError::SeriesLoad {
                id,
                path,
                source,
            }),
            Err(e) => Err(e),
        }
    }

    /// Add a series with no source.
    pub fn add_empty_series(&mut self) -> SeriesId {
        let (id, _) = self
            .store
            .add_series(None, self.config.x_column, self.config.y_column);
        id
    }

    /// Delete a series and its history.
    pub fn remove_series(&mut self, id: SeriesId) -> Result<()> {
        self.forget(id);
        self.store
            .remove_series(id)
            .map(|_| ())
            .ok_or_else(|| CurveError::series_not_found(id))
    }

    /// Select new columns for a series and reload it.
    pub fn set_columns(&mut self, id: SeriesId, x_column: usize, y_column: usize) -> Result<ParseStats> {
        self.ensure(id)?;
        self.forget(id);
        let report = self.store.set_columns(id, x_column, y_column);
        self.plot.auto_range_if_needed(&self.store);
        report
    }

    /// Point a series at another file and reload it.
    pub fn set_source_path(&mut self, id: SeriesId, path: Option<PathBuf>) -> Result<ParseStats> {
        self.ensure(id)?;
        self.forget(id);
        let report = self.store.set_source_path(id, path);
        self.plot.auto_range_if_needed(&self.store);
        report
    }

    /// Rename a series.
    pub fn rename(&mut self, id: SeriesId, name: impl Into<String>) -> Result<()> {
        self.store.rename(id, name)
    }

    /// Restyle a series.
    pub fn set_style(&mut self, id: SeriesId, style: Style) -> Result<()> {
        self.store.set_style(id, style)
    }

    /// Set one point's Y value as a single undoable edit.
    pub fn set_point_y(&mut self, id: SeriesId, index: usize, value: f64) -> bool {
        if self.session.is_dragging() {
            return false;
        }
        let Some(series) = self.store.get(id) else {
            return false;
        };
        if index >= series.len() {
            return false;
        }
        self.history
            .record_snapshot(id, series.coordinates().to_vec());
        self.store.set_point_y(id, index, value)
    }

    /// Turn drag mode on.
    pub fn enable_drag_mode(&mut self) {
        self.session.enable();
    }

    /// Turn drag mode off.
    pub fn disable_drag_mode(&mut self) {
        self.session.disable();
    }

    /// Press on the surface over series `id`.
    pub fn pointer_down(
        &mut self,
        id: SeriesId,
        screen: ScreenPoint,
        transform: &dyn CoordinateTransform,
    ) -> PressOutcome {
        self.session
            .press(&self.store, &mut self.history, id, screen, transform)
    }

    /// Pointer moved. `hover` is the series checked for hover feedback.
    pub fn pointer_move(
        &mut self,
        hover: Option<SeriesId>,
        screen: ScreenPoint,
        transform: &dyn CoordinateTransform,
    ) -> MoveOutcome {
        self.session
            .move_to(&mut self.store, hover, screen, transform)
    }

    /// Pointer released.
    pub fn pointer_up(&mut self) -> Option<DragSession> {
        self.session.release()
    }

    /// Undo the last edit. Refused while dragging.
    pub fn undo(&mut self) -> Option<SeriesId> {
        if self.session.is_dragging() {
            tracing::debug!("Undo refused during drag");
            return None;
        }
        let store = &self.store;
        let entry = self
            .history
            .undo(|id| store.get(id).map(|s| s.coordinates().to_vec()))?;
        self.apply(entry.series_id, entry.coordinates)
    }

    /// Redo the last undone edit. Refused while dragging.
    pub fn redo(&mut self) -> Option<SeriesId> {
        if self.session.is_dragging() {
            tracing::debug!("Redo refused during drag");
            return None;
        }
        let store = &self.store;
        let entry = self
            .history
            .redo(|id| store.get(id).map(|s| s.coordinates().to_vec()))?;
        self.apply(entry.series_id, entry.coordinates)
    }

    /// Whether undo and redo are available. Both false while dragging.
    pub fn history_availability(&self) -> (bool, bool) {
        if self.session.is_dragging() {
            return (false, false);
        }
        (self.history.can_undo(), self.history.can_redo())
    }

    /// Discard edits by reloading from the source.
    pub fn reset_series(&mut self, id: SeriesId) -> Result<ResetOutcome> {
        let series = self
            .store
            .get(id)
            .ok_or_else(|| CurveError::series_not_found(id))?;
        if !series.is_modified() {
            return Ok(ResetOutcome::NotModified);
        }
        if series.source_path().is_none() {
            return Err(CurveError::NoSource { id });
        }

        self.forget(id);
        let stats = self.store.reload(id)?;
        tracing::info!("Reset series {}", id);
        Ok(ResetOutcome::Reset(stats))
    }

    /// Write a modified series to `destination`.
    pub fn save_series(&mut self, id: SeriesId, destination: &Path) -> Result<SaveOutcome> {
        let series = self
            .store
            .get(id)
            .ok_or_else(|| CurveError::series_not_found(id))?;
        if !series.is_modified() {
            return Ok(SaveOutcome::NotModified);
        }

        let rows = persist::save(series, destination, self.store.options().delimiter)?;
        self.store.mark_saved(id);
        Ok(SaveOutcome::Saved { rows })
    }

    /// Change the X scale.
    ///
    /// A logarithmic X axis only accepts positive X, so every unmodified series
    /// is reloaded under the new domain filter. Modified series keep their
    /// points. Returns the reload report of each series that was reloaded.
    pub fn set_x_scale(&mut self, scale: AxisScale) -> Vec<(SeriesId, Result<ParseStats>)> {
        let mut options = self.store.options();
        options.x_must_be_positive = scale == AxisScale::Logarithmic;
        self.store.set_options(options);

        let reload: Vec<SeriesId> = self
            .store
            .iter()
            .filter(|s| !s.is_modified() && s.source_path().is_some())
            .map(|s| s.id())
            .collect();

        let reports = reload
            .into_iter()
            .map(|id| {
                self.forget(id);
                (id, self.store.reload(id))
            })
            .collect();

        self.plot.set_x_scale(scale, &self.store);
        reports
    }

    /// Change the Y scale.
    pub fn set_y_scale(&mut self, scale: AxisScale) {
        self.plot.set_y_scale(scale, &self.store);
    }

    /// Show an explicit X and Y range. Rejected ranges leave the view as it was.
    pub fn set_view_range(&mut self, x: (f64, f64), y: (f64, f64)) -> Result<()> {
        self.plot.set_range(x, y)
    }

    /// Fit the view to all data.
    pub fn auto_range(&mut self) -> bool {
        self.plot.auto_range(&self.store)
    }

    fn apply(&mut self, id: SeriesId, coordinates: Vec<crate::geometry::DataPoint>) -> Option<SeriesId> {
        self.store.set_coordinates(id, coordinates).then_some(id)
    }

    fn ensure(&self, id: SeriesId) -> Result<()> {
        if self.store.contains(id) {
            Ok(())
        } else {
            Err(CurveError::series_not_found(id))
        }
    }

    /// Drop history for a series whose rows are about to change, and let go of
    /// any drag on it.
    fn forget(&mut self, id: SeriesId) {
        self.history.purge(id);
        if self.session.drag().is_some_and(|d| d.series_id == id) {
            self.session.cancel_drag();
        }
    }
}

impl Default for CurveEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

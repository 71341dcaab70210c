//! Point dragging: hit-testing and the press → move → release lifecycle.

use crate::geometry::ScreenPoint;
use crate::history::EditHistory;
use crate::series::{SeriesId, SeriesStore};
use crate::transform::CoordinateTransform;

/// Default hit radius in pixels.
pub const DEFAULT_HIT_TOLERANCE: f64 = 30.0;

/// The point being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    /// Series owning the point.
    pub series_id: SeriesId,
    /// Index of the point in the series.
    pub point_index: usize,
}

/// Editing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    /// Drag mode off; the surface pans and zooms.
    #[default]
    Idle,
    /// Drag mode on, nothing grabbed.
    Armed,
    /// A point is being dragged.
    Dragging(DragSession),
}

/// Result of a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// A point was grabbed.
    Grabbed(usize),
    /// Nothing within reach.
    Missed,
    /// Not armed, or already dragging.
    Ignored,
}

/// Result of a pointer move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// The dragged point got a new Y value.
    Moved {
        /// Point index.
        index: usize,
        /// New Y value.
        y: f64,
    },
    /// Armed hover: the point under the pointer, if any.
    Hover(Option<usize>),
    /// Nothing to do.
    Ignored,
}

/// Nearest point of a series to a screen position.
///
/// Returns the index and its pixel distance. Points that do not land on the
/// screen (e.g. non-positive values on a log axis) are skipped. Ties go to the
/// lowest index.
pub fn nearest_point(
    store: &SeriesStore,
    series_id: SeriesId,
    screen: ScreenPoint,
    transform: &dyn CoordinateTransform,
) -> Option<(usize, f64)> {
    let series = store.get(series_id)?;
    let mut best: Option<(usize, f64)> = None;

    for (i, point) in series.coordinates().iter().enumerate() {
        let at = transform.data_to_screen(*point);
        if !at.is_finite() {
            continue;
        }
        let dist = at.distance_to(screen);
        if best.map_or(true, |(_, d)| dist < d) {
            best = Some((i, dist));
        }
    }

    best
}

/// The drag state machine.
#[derive(Debug, Clone)]
pub struct PointEditSession {
    state: EditState,
    tolerance: f64,
}

impl Default for PointEditSession {
    fn default() -> Self {
        Self::new(DEFAULT_HIT_TOLERANCE)
    }
}

impl PointEditSession {
    /// Create a session with a hit radius in pixels.
    pub fn new(tolerance: f64) -> Self {
        Self {
            state: EditState::Idle,
            tolerance,
        }
    }

    /// Current state.
    pub fn state(&self) -> EditState {
        self.state
    }

    /// Whether drag mode is on.
    pub fn is_enabled(&self) -> bool {
        !matches!(self.state, EditState::Idle)
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, EditState::Dragging(_))
    }

    /// The active drag, if any.
    pub fn drag(&self) -> Option<DragSession> {
        match self.state {
            EditState::Dragging(drag) => Some(drag),
            _ => None,
        }
    }

    /// Whether the surface may pan and zoom. False whenever drag mode is on.
    pub fn pan_zoom_enabled(&self) -> bool {
        !self.is_enabled()
    }

    /// Hit radius in pixels.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Turn drag mode on.
    pub fn enable(&mut self) {
        if matches!(self.state, EditState::Idle) {
            self.state = EditState::Armed;
            tracing::debug!("Drag mode enabled");
        }
    }

    /// Turn drag mode off, abandoning any drag in progress.
    pub fn disable(&mut self) {
        if let EditState::Dragging(drag) = self.state {
            tracing::debug!(
                "Abandoned drag of point {} in series {}",
                drag.point_index,
                drag.series_id
            );
        }
        self.state = EditState::Idle;
    }

    /// Press on the surface.
    ///
    /// Grabs the nearest point of `series_id` when it is closer than the
    /// tolerance and records the series' pre-drag coordinates in `history`.
    pub fn press(
        &mut self,
        store: &SeriesStore,
        history: &mut EditHistory,
        series_id: SeriesId,
        screen: ScreenPoint,
        transform: &dyn CoordinateTransform,
    ) -> PressOutcome {
        if !matches!(self.state, EditState::Armed) {
            return PressOutcome::Ignored;
        }

        let Some((index, _)) = self.hit(store, series_id, screen, transform) else {
            return PressOutcome::Missed;
        };
        let Some(series) = store.get(series_id) else {
            return PressOutcome::Missed;
        };

        history.record_snapshot(series_id, series.coordinates().to_vec());
        self.state = EditState::Dragging(DragSession {
            series_id,
            point_index: index,
        });
        tracing::debug!("Grabbed point {} of series {}", index, series_id);
        PressOutcome::Grabbed(index)
    }

    /// Pointer moved.
    ///
    /// While dragging, only the vertical component is used: the point's X never
    /// changes. While armed, reports the hovered point without mutating.
    pub fn move_to(
        &mut self,
        store: &mut SeriesStore,
        hover_series: Option<SeriesId>,
        screen: ScreenPoint,
        transform: &dyn CoordinateTransform,
    ) -> MoveOutcome {
        match self.state {
            EditState::Dragging(drag) => {
                let y = transform.screen_y_to_data(screen.y);
                if !y.is_finite() {
                    return MoveOutcome::Ignored;
                }
                if store.set_point_y(drag.series_id, drag.point_index, y) {
                    MoveOutcome::Moved {
                        index: drag.point_index,
                        y,
                    }
                } else {
                    // The series shrank under us.
                    MoveOutcome::Ignored
                }
            }
            EditState::Armed => MoveOutcome::Hover(
                hover_series
                    .and_then(|id| self.hit(store, id, screen, transform))
                    .map(|(index, _)| index),
            ),
            EditState::Idle => MoveOutcome::Ignored,
        }
    }

    /// Drop an in-progress drag without leaving drag mode. The points keep
    /// whatever values the drag gave them.
    pub fn cancel_drag(&mut self) -> Option<DragSession> {
        let drag = self.drag()?;
        self.state = EditState::Armed;
        tracing::debug!("Cancelled drag in series {}", drag.series_id);
        Some(drag)
    }

    /// Release the pointer. Returns the finished drag.
    pub fn release(&mut self) -> Option<DragSession> {
        let drag = self.drag()?;
        self.state = EditState::Armed;
        tracing::debug!(
            "Released point {} of series {}",
            drag.point_index,
            drag.series_id
        );
        Some(drag)
    }

    fn hit(
        &self,
        store: &SeriesStore,
        series_id: SeriesId,
        screen: ScreenPoint,
        transform: &dyn CoordinateTransform,
    ) -> Option<(usize, f64)> {
        nearest_point(store, series_id, screen, transform).filter(|&(_, d)| d < self.tolerance)
    }
}

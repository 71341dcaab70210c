//! Ownership of every series and of their source mappings.

use super::{LoadStatus, Series, SeriesId, Style};
use crate::error::{CurveError, Result};
use crate::geometry::DataPoint;
use crate::table::{self, ParseStats, DEFAULT_DELIMITER};
use std::path::PathBuf;

/// Settings applied whenever a series is read from its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Field delimiter.
    pub delimiter: char,
    /// Drop rows whose X is not strictly positive.
    pub x_must_be_positive: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            x_must_be_positive: false,
        }
    }
}

/// The set of series, in the order they were added.
#[derive(Debug, Default)]
pub struct SeriesStore {
    series: Vec<Series>,
    next_id: u64,
    options: LoadOptions,
}

impl SeriesStore {
    /// Create an empty store.
    pub fn new(options: LoadOptions) -> Self {
        Self {
            series: Vec::new(),
            next_id: 1,
            options,
        }
    }

    /// Current load options.
    pub fn options(&self) -> LoadOptions {
        self.options
    }

    /// Change load options. Takes effect on the next (re)load.
    pub fn set_options(&mut self, options: LoadOptions) {
        self.options = options;
    }

    /// Add a series and load it from `source_path`.
    ///
    /// The series exists afterwards whatever the load outcome; an unreadable
    /// file leaves it empty and is reported through the returned result.
    pub fn add_series(
        &mut self,
        source_path: Option<PathBuf>,
        x_column: usize,
        y_column: usize,
    ) -> (SeriesId, Result<ParseStats>) {
        let id = SeriesId(self.next_id.max(1));
        self.next_id = id.0 + 1;

        let n = self.series.len();
        self.series.push(Series::new(
            id,
            format!("Curve {}", n + 1),
            source_path,
            x_column,
            y_column,
            Style::for_index(n),
        ));
        tracing::info!("Added series {} with columns ({}, {})", id, x_column, y_column);

        let report = self.reload(id);
        (id, report)
    }

    /// Remove a series.
    pub fn remove_series(&mut self, id: SeriesId) -> Option<Series> {
        let pos = self.position(id)?;
        tracing::info!("Removed series {}", id);
        Some(self.series.remove(pos))
    }

    /// Select new columns and reload.
    pub fn set_columns(
        &mut self,
        id: SeriesId,
        x_column: usize,
        y_column: usize,
    ) -> Result<ParseStats> {
        let series = self.get_mut(id)?;
        series.x_column = x_column;
        series.y_column = y_column;
        self.reload(id)
    }

    /// Point the series at a new source file and reload.
    pub fn set_source_path(&mut self, id: SeriesId, path: Option<PathBuf>) -> Result<ParseStats> {
        self.get_mut(id)?.source_path = path;
        self.reload(id)
    }

    /// Change the display name.
    pub fn rename(&mut self, id: SeriesId, name: impl Into<String>) -> Result<()> {
        self.get_mut(id)?.name = name.into();
        Ok(())
    }

    /// Change the drawing style.
    pub fn set_style(&mut self, id: SeriesId, style: Style) -> Result<()> {
        self.get_mut(id)?.style = style;
        Ok(())
    }

    /// Set the Y value of one point. Marks the series modified even when the
    /// value is unchanged. Returns `false` for an unknown series or index.
    pub fn set_point_y(&mut self, id: SeriesId, index: usize, value: f64) -> bool {
        let Ok(series) = self.get_mut(id) else {
            return false;
        };
        let Some(point) = series.coordinates.get_mut(index) else {
            return false;
        };
        point.y = value;
        series.modified = true;
        true
    }

    /// Replace all coordinates with a snapshot and mark the series modified.
    ///
    /// The snapshot must have one point per raw row; anything else is refused.
    pub fn set_coordinates(&mut self, id: SeriesId, coordinates: Vec<DataPoint>) -> bool {
        let Ok(series) = self.get_mut(id) else {
            return false;
        };
        if coordinates.len() != series.raw_rows.len() {
            tracing::warn!(
                "Refusing snapshot of {} points for series {} with {} rows",
                coordinates.len(),
                id,
                series.raw_rows.len()
            );
            return false;
        }
        series.coordinates = coordinates;
        series.modified = true;
        true
    }

    /// Clear the modified flag after the series was written out.
    pub fn mark_saved(&mut self, id: SeriesId) {
        if let Ok(series) = self.get_mut(id) {
            series.modified = false;
        }
    }

    /// Re-read the series from its source with its current columns.
    ///
    /// Replaces coordinates, raw rows and header and clears the modified flag.
    /// On failure the series is left empty.
    pub fn reload(&mut self, id: SeriesId) -> Result<ParseStats> {
        let options = self.options;
        let series = self.get_mut(id)?;

        let Some(path) = series.source_path.clone() else {
            series.clear_data(LoadStatus::NotLoaded);
            return Ok(ParseStats::default());
        };

        match table::load_file(
            &path,
            series.x_column,
            series.y_column,
            options.x_must_be_positive,
            options.delimiter,
        ) {
            Ok(parsed) => {
                let stats = parsed.stats;
                series.apply_table(parsed);
                tracing::info!(
                    "Loaded {} points for series {} from {}",
                    stats.data_rows,
                    id,
                    path.display()
                );
                Ok(stats)
            }
            Err(e) => {
                tracing::warn!("Failed to load series {}: {}", id, e);
                series.clear_data(LoadStatus::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Look up a series.
    pub fn get(&self, id: SeriesId) -> Option<&Series> {
        self.series.iter().find(|s| s.id == id)
    }

    /// Whether a series exists.
    pub fn contains(&self, id: SeriesId) -> bool {
        self.get(id).is_some()
    }

    /// Position of a series in insertion order.
    pub fn position(&self, id: SeriesId) -> Option<usize> {
        self.series.iter().position(|s| s.id == id)
    }

    /// All series in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.series.iter()
    }

    /// All ids in insertion order.
    pub fn ids(&self) -> Vec<SeriesId> {
        self.series.iter().map(|s| s.id).collect()
    }

    /// Number of series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether there are no series.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    fn get_mut(&mut self, id: SeriesId) -> Result<&mut Series> {
        self.series
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| CurveError::series_not_found(id))
    }
}

//! Series: the curves a user has added, and the store that owns them.

mod store;
mod style;

pub use store::{LoadOptions, SeriesStore};
pub use style::{LineStyle, MarkerShape, Rgb, Style, PALETTE};

use crate::geometry::DataPoint;
use crate::table::{ParseStats, ParsedTable, RawRow};
use std::fmt;
use std::path::PathBuf;

/// Stable identity of a series. Never reused within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesId(pub u64);

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Outcome of the most recent (re)load of a series.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// No load attempted yet (no source path).
    #[default]
    NotLoaded,
    /// Source parsed.
    Loaded(ParseStats),
    /// Source could not be read.
    Failed(String),
}

/// One curve.
#[derive(Debug, Clone)]
pub struct Series {
    id: SeriesId,
    /// User-visible label.
    pub name: String,
    /// Drawing style.
    pub style: Style,
    source_path: Option<PathBuf>,
    x_column: usize,
    y_column: usize,
    coordinates: Vec<DataPoint>,
    raw_rows: Vec<RawRow>,
    has_header: bool,
    header_fields: Vec<String>,
    modified: bool,
    load_status: LoadStatus,
}

impl Series {
    pub(crate) fn new(
        id: SeriesId,
        name: String,
        source_path: Option<PathBuf>,
        x_column: usize,
        y_column: usize,
        style: Style,
    ) -> Self {
        Self {
            id,
            name,
            style,
            source_path,
            x_column,
            y_column,
            coordinates: Vec::new(),
            raw_rows: Vec::new(),
            has_header: false,
            header_fields: Vec::new(),
            modified: false,
            load_status: LoadStatus::NotLoaded,
        }
    }

    /// Identity.
    pub fn id(&self) -> SeriesId {
        self.id
    }

    /// Originating file, if any.
    pub fn source_path(&self) -> Option<&std::path::Path> {
        self.source_path.as_deref()
    }

    /// Selected X column.
    pub fn x_column(&self) -> usize {
        self.x_column
    }

    /// Selected Y column.
    pub fn y_column(&self) -> usize {
        self.y_column
    }

    /// Plotted points.
    pub fn coordinates(&self) -> &[DataPoint] {
        &self.coordinates
    }

    /// Original rows, index-aligned with [`Series::coordinates`].
    pub fn raw_rows(&self) -> &[RawRow] {
        &self.raw_rows
    }

    /// Whether the source had a header line.
    pub fn has_header(&self) -> bool {
        self.has_header
    }

    /// Verbatim header fields.
    pub fn header_fields(&self) -> &[String] {
        &self.header_fields
    }

    /// Whether any Y value changed since load, save or reset.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Outcome of the last load.
    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// Whether the series has no points.
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// X and Y extents over finite points.
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        self.coordinates
            .iter()
            .filter(|p| p.is_finite())
            .fold(None, |acc, p| match acc {
                None => Some(((p.x, p.x), (p.y, p.y))),
                Some(((x0, x1), (y0, y1))) => {
                    Some(((x0.min(p.x), x1.max(p.x)), (y0.min(p.y), y1.max(p.y))))
                }
            })
    }

    fn apply_table(&mut self, table: ParsedTable) {
        self.coordinates = table.coordinates;
        self.raw_rows = table.raw_rows;
        self.has_header = table.has_header;
        self.header_fields = table.header_fields;
        self.modified = false;
        self.load_status = LoadStatus::Loaded(table.stats);
    }

    fn clear_data(&mut self, status: LoadStatus) {
        self.coordinates.clear();
        self.raw_rows.clear();
        self.has_header = false;
        self.header_fields.clear();
        self.modified = false;
        self.load_status = status;
    }
}

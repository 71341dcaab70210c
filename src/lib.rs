//! Curvedit - A terminal curve editor for delimited data files.
//!
//! Curvedit plots X/Y series read from CSV-like text files and lets the user
//! drag individual points vertically to new Y values, with undo/redo, reset
//! and save-back that keeps every untouched field of the file as it was.
//!
//! # Features
//!
//! - Lenient parsing: malformed rows are counted and skipped, never fatal
//! - Header and column type detection
//! - Drag-to-edit with a bounded undo/redo history across series
//! - Linear and logarithmic axes
//! - Gruvbox color themes
//!
//! # Example
//!
//! ```no_run
//! use curvedit::editor::{CurveEditor, SaveOutcome};
//! use std::path::Path;
//!
//! let mut editor = CurveEditor::default();
//! let id = editor.load_series("data.csv", 0, 1)?;
//! editor.set_point_y(id, 3, 42.0);
//!
//! let outcome = editor.save_series(id, Path::new("edited.csv"))?;
//! assert!(matches!(outcome, SaveOutcome::Saved { .. }));
//! # Ok::<(), curvedit::CurveError>(())
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod app;
pub mod config;
pub mod edit;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod history;
pub mod persist;
pub mod plot;
pub mod prompt;
pub mod series;
pub mod table;
pub mod transform;
pub mod ui;
pub mod util;

pub use error::{CurveError, Result};
pub use series::SeriesId;

//! Error types for Curvedit.
//!
//! This module provides a unified error handling approach using `thiserror`.
//! Malformed rows are never errors: the parser counts them instead.

use crate::series::SeriesId;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Curvedit operations.
pub type Result<T> = std::result::Result<T, CurveError>;

/// Errors that can occur in Curvedit.
#[derive(Debug, Error)]
pub enum CurveError {
    /// Failed to open or read a data file.
    #[error("Failed to open file: {path}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a data file.
    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A series was created but its source could not be read.
    #[error("Series {id} could not be loaded from {path}")]
    SeriesLoad {
        id: SeriesId,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No series with this id.
    #[error("Series not found: {id}")]
    SeriesNotFound { id: SeriesId },

    /// The series has no source file to read from.
    #[error("Series {id} has no source file")]
    NoSource { id: SeriesId },

    /// Column selection could not be understood.
    #[error("Invalid column selection: {0}")]
    InvalidColumns(String),

    /// Axis range was rejected.
    #[error("Invalid axis range: {0}")]
    InvalidRange(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CurveError {
    /// Create a FileOpen error.
    pub fn file_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileOpen {
            path: path.into(),
            source,
        }
    }

    /// Create a FileWrite error.
    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Create a SeriesNotFound error.
    pub fn series_not_found(id: SeriesId) -> Self {
        Self::SeriesNotFound { id }
    }

    /// Whether this error comes from the filesystem.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Self::FileOpen { .. } | Self::FileWrite { .. } | Self::SeriesLoad { .. } | Self::Io(_)
        )
    }
}

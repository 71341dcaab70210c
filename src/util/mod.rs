//! Utility types.
//!
//! This module provides layout settings for the terminal front end.

mod layout_config;

pub use layout_config::{LayoutConfig, PanelLayoutConfig, PlotLayoutConfig};

//! PixKit Settings Crate
//!
//! Loads, validates and stores the editor configuration.

pub mod config;
pub mod error;

pub use config::{Config, HistorySettings, RasterSettings, MAX_UNDO_LIMIT};
pub use error::{Result, SettingsError};

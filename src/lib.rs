//! # PixKit
//!
//! The command and undo engine of a raster and vector image editor.
//!
//! ## Architecture
//!
//! PixKit is organized as a workspace with multiple crates:
//!
//! 1. **pixkit-core** - Geometry, colours, bitmaps, selections, objects, frames
//! 2. **pixkit-commands** - Commands, merging, bundling and the undo history
//! 3. **pixkit-settings** - Configuration loading and validation
//! 4. **pixkit** - This crate, wiring configuration and logging together
//!
//! Every edit of a document is a command run through the history. Object
//! edits undo themselves exactly; pixel edits are undone by reverting the
//! frame to a stored original bitmap and replaying the remaining edits.

use anyhow::Context;

pub use pixkit_commands::{
    edits, Command, CommandContext, CommandHistory, CommandType, Document, Editor, HistoryConfig,
    StepOutcome,
};
pub use pixkit_core::{
    Bitmap, Color, Error, Frame, FrameId, IntPoint, IntRect, IntSize, ObjectId, Point, Result,
    VectorObject,
};
pub use pixkit_settings::{Config, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// History settings from the application configuration.
pub fn history_config(config: &Config) -> HistoryConfig {
    HistoryConfig {
        undo_limit: config.history.undo_limit,
        merge_commands: config.history.merge_commands,
    }
}

/// A new editor on a blank image, configured from `config`.
pub fn editor_from_config(config: &Config, size: IntSize) -> anyhow::Result<Editor> {
    let document = Document::with_limit(size, config.raster.background, config.raster.max_pixels)
        .with_context(|| format!("cannot create a {}x{} image", size.w, size.h))?;
    Ok(Editor::new(document, history_config(config)))
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("logging is already initialized")?;

    Ok(())
}

//! # PixKit Core
//!
//! Core types for PixKit.
//! Provides the document surface that edit commands operate on: geometry,
//! colours, bitmaps, raster selections, vector objects and frames, plus the
//! error types of the layers below the command engine.

pub mod bitmap;
pub mod color;
pub mod dc;
pub mod error;
pub mod frame;
pub mod geo;
pub mod ids;
pub mod objects;
pub mod selection;

pub use bitmap::{Bitmap, ScaleQuality};
pub use color::Color;
pub use dc::DrawingSurface;
pub use error::{BitmapError, Error, GeometryError, Result};
pub use frame::Frame;
pub use geo::{Axis, IntPoint, IntRect, IntSize, Point, Scale, Size};
pub use ids::{FrameId, ObjectId};
pub use objects::{collective_name, ObjectKind, VectorObject};
pub use selection::{RasterSelection, SelectionState};

/// Default limit on the number of pixels in a single bitmap.
pub const DEFAULT_MAX_PIXELS: u64 = 64 * 1024 * 1024;

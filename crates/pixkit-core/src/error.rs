//! Error handling for PixKit
//!
//! These errors belong to the layers below the command engine: allocating
//! bitmaps, validating geometry before a command is built, and looking up
//! frames and objects by handle. Commands themselves never return errors;
//! anything that can fail is checked before a command exists.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Bitmap allocation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BitmapError {
    /// A bitmap must cover at least one pixel
    #[error("Bitmap size {w}x{h} is empty")]
    EmptySize {
        /// Requested width.
        w: i32,
        /// Requested height.
        h: i32,
    },

    /// The requested bitmap exceeds the configured pixel limit
    #[error("Bitmap of {pixels} pixels exceeds the limit of {limit} pixels")]
    TooLarge {
        /// Number of pixels requested.
        pixels: u64,
        /// The configured maximum.
        limit: u64,
    },
}

/// Geometry validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// Rectangle covers no pixels
    #[error("Rectangle {w}x{h} at ({x}, {y}) is empty")]
    EmptyRect {
        /// Left edge.
        x: i32,
        /// Top edge.
        y: i32,
        /// Width.
        w: i32,
        /// Height.
        h: i32,
    },

    /// Point index outside an object's point list
    #[error("Point index {index} out of range (object has {len} points)")]
    PointIndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of points in the object.
        len: usize,
    },
}

/// Main error type for PixKit
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Bitmap error
    #[error(transparent)]
    Bitmap(#[from] BitmapError),

    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// No frame with this id exists in the document
    #[error("Unknown frame {0}")]
    UnknownFrame(u64),

    /// No object with this id exists in the frame
    #[error("Unknown object {0}")]
    UnknownObject(u64),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}

/// Result type alias using the PixKit error.
pub type Result<T> = std::result::Result<T, Error>;

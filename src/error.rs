// src/error.rs

//! Error types for the teletext engine.
//!
//! The engine itself only has two failure modes: the glyph assets could not be
//! turned into a complete `GlyphSet` (fatal at startup), or a caller handed the
//! renderer a page of the wrong dimensions (an integration bug). Page dump I/O
//! lives at the boundary and gets its own small error type.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to build a `GlyphSet` from the font and control-icon assets.
#[derive(Debug, Error)]
pub enum AssetLoadError {
    /// An asset file could not be read at all.
    #[error("asset {path:?} could not be read: {source}")]
    Missing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The packed font is not exactly 96 glyph records long.
    #[error("font asset has the wrong length: expected {expected} bytes, got {actual}")]
    FontLength { expected: usize, actual: usize },

    /// The wrong number of control icons was supplied.
    #[error("expected {expected} control icons, got {actual}")]
    IconCount { expected: usize, actual: usize },

    /// A control icon could not be decoded by any supported image codec.
    #[error("control icon {index} could not be decoded: {source}")]
    IconDecode {
        index: usize,
        #[source]
        source: image::ImageError,
    },

    /// A control icon decoded fine but is not the size of a glyph cell.
    #[error("control icon {index} is {width}x{height}, expected the glyph cell size")]
    IconGeometry {
        index: usize,
        width: u32,
        height: u32,
    },
}

/// Rejection of a render request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// The page buffer does not match the renderer's configured grid.
    #[error("page buffer is {}x{}, renderer expects {}x{}", actual.0, actual.1, expected.0, expected.1)]
    InvalidInput {
        expected: (usize, usize),
        actual: (usize, usize),
    },
}

/// Failure reading or writing a raw page dump.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("page I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The dump (or byte slice) does not hold exactly one page.
    #[error("page data is {actual} bytes, expected {expected}")]
    WrongSize { expected: usize, actual: usize },
}

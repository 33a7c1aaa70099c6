// src/lib.rs

//! Teletext page decoding and rendering, plus the editing primitives a page
//! editor needs.
//!
//! A page is a 40x25 grid of 7-bit codes. The `Renderer` decodes it row by
//! row with the teletext attribute state machine and draws it into an RGB
//! raster using a precomputed `GlyphSet`.

pub mod assets;
pub mod color;
pub mod config;
pub mod editor;
pub mod error;
pub mod font;
pub mod glyph;
pub mod page;
pub mod raster;
pub mod renderer;
pub mod sixel;

pub use crate::color::{Rgb, TeletextColor};
pub use crate::error::{AssetLoadError, PageError, RenderError};
pub use crate::font::GlyphSet;
pub use crate::glyph::{GlyphBitmap, HeightSlot, RenderMode};
pub use crate::page::PageBuffer;
pub use crate::raster::{PixelRect, Raster};
pub use crate::renderer::Renderer;

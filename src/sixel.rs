// src/sixel.rs

//! Sub-cell ("sixel") addressing for block mosaics.
//!
//! A graphics-mode character cell is split into 2 columns x 3 rows of
//! sub-cells. Each sub-cell is one bit of the cell's code, but the bits are
//! not contiguous: the sixth sub-cell lives in bit 6, because bit 5 is the
//! flag that marks the code as graphics-capable at all.
//!
//! ```text
//!   +---+---+
//!   | 1 | 2 |      sub-cell index i -> bit MOSAIC_BITS[i]
//!   +---+---+
//!   | 4 | 8 |      0,1,2,3,4,5 -> 0,1,2,3,4,6
//!   +---+---+
//!   |16 |64 |
//!   +---+---+
//! ```
//!
//! Coordinates here are in sub-cell units across the whole page, so the
//! containing cell of `(x, y)` is `(x / 2, y / 3)`.

use log::warn;

use crate::glyph::{GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::page::PageBuffer;

/// Sub-cell columns per character cell.
pub const SIXEL_COLS: usize = 2;
/// Sub-cell rows per character cell.
pub const SIXEL_ROWS: usize = 3;

/// Bit position of each sub-cell, indexed by `col + 2 * row`. Index 5 maps to
/// bit 6; keep this a table.
pub const MOSAIC_BITS: [u8; 6] = [0, 1, 2, 3, 4, 6];

/// Bit 5 marks a code whose graphics-mode rendering is a mosaic.
pub const GRAPHICS_FLAG: u8 = 0x20;

/// How `set` changes a sub-cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetMode {
    Off,
    On,
    Toggle,
}

impl From<bool> for SetMode {
    fn from(on: bool) -> Self {
        if on {
            SetMode::On
        } else {
            SetMode::Off
        }
    }
}

/// Returns true if `code` renders as a mosaic in graphics mode.
#[inline]
pub fn is_graphic(code: u8) -> bool {
    code & GRAPHICS_FLAG != 0
}

/// Bit position inside a cell's code for sub-cell `(x, y)`.
#[inline]
pub fn bit_index(x: usize, y: usize) -> u8 {
    MOSAIC_BITS[x % SIXEL_COLS + SIXEL_COLS * (y % SIXEL_ROWS)]
}

/// Single-bit mask for sub-cell `(x, y)`.
#[inline]
pub fn bit_mask(x: usize, y: usize) -> u8 {
    1 << bit_index(x, y)
}

/// Character cell `(col, row)` that contains sub-cell `(x, y)`.
#[inline]
pub fn cell_of(x: usize, y: usize) -> (usize, usize) {
    (x / SIXEL_COLS, y / SIXEL_ROWS)
}

/// Reads sub-cell `(x, y)`. Sub-cells outside the page read as clear.
pub fn get(page: &PageBuffer, x: usize, y: usize) -> bool {
    let (col, row) = cell_of(x, y);
    page.get(col, row)
        .map(|code| code & bit_mask(x, y) != 0)
        .unwrap_or(false)
}

/// Sets, clears or flips sub-cell `(x, y)`. Out-of-page coordinates are ignored.
pub fn set(page: &mut PageBuffer, x: usize, y: usize, mode: SetMode) {
    let (col, row) = cell_of(x, y);
    let mask = bit_mask(x, y);
    match page.get_mut(col, row) {
        Some(code) => match mode {
            SetMode::On => *code |= mask,
            SetMode::Off => *code &= !mask,
            SetMode::Toggle => *code ^= mask,
        },
        None => warn!("Ignoring sixel write outside the page at ({}, {})", x, y),
    }
}

/// Pixel size of one sub-cell within a glyph cell.
pub const fn sixel_pixel_size() -> (usize, usize) {
    (GLYPH_WIDTH / SIXEL_COLS, GLYPH_HEIGHT / SIXEL_ROWS)
}

/// Pixel rectangle `(left, top, width, height)` of sub-cell `sub` inside a
/// glyph, where `sub` is the index `col + 2 * row`.
pub const fn sub_cell_rect(sub: usize) -> (usize, usize, usize, usize) {
    let (sw, sh) = sixel_pixel_size();
    ((sub % SIXEL_COLS) * sw, (sub / SIXEL_COLS) * sh, sw, sh)
}

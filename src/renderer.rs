// src/renderer.rs

//! This module defines the `Renderer`, the teletext decoder.
//!
//! Rendering walks the page one row at a time, left to right, running the
//! same attribute state machine a teletext display chip runs on each scan
//! row. Control codes (0-31) change the row's attributes and occupy a cell of
//! their own, normally drawn as a blank (or, with hold graphics, as a repeat
//! of the last mosaic). Every attribute is reset at the start of a row; the
//! only thing carried to the next row is whether it is the bottom half of a
//! double-height row.
//!
//! The renderer holds no per-page state between calls. Given the page, the
//! two display flags and the immutable `GlyphSet`, the output is fully
//! determined.

use std::sync::Arc;

use bitflags::bitflags;
use log::{debug, trace};

use crate::color::{Rgb, TeletextColor};
use crate::error::RenderError;
use crate::font::GlyphSet;
use crate::glyph::{GlyphBitmap, HeightSlot, RenderMode};
use crate::page::{PageBuffer, PAGE_HEIGHT, PAGE_WIDTH, SPACE};
use crate::raster::{PixelRect, Raster};
use crate::sixel::{self, SIXEL_COLS, SIXEL_ROWS};

/// Control codes understood by the row decoder.
pub mod codes {
    pub const ALPHA_RED: u8 = 1;
    pub const ALPHA_WHITE: u8 = 7;
    pub const FLASH: u8 = 8;
    pub const STEADY: u8 = 9;
    pub const NORMAL_HEIGHT: u8 = 12;
    pub const DOUBLE_HEIGHT: u8 = 13;
    pub const GRAPHICS_RED: u8 = 17;
    pub const GRAPHICS_WHITE: u8 = 23;
    pub const CONTIGUOUS_GRAPHICS: u8 = 25;
    pub const SEPARATED_GRAPHICS: u8 = 26;
    pub const ESCAPE: u8 = 27;
    pub const BLACK_BACKGROUND: u8 = 28;
    pub const NEW_BACKGROUND: u8 = 29;
    pub const HOLD_GRAPHICS: u8 = 30;
    pub const RELEASE_GRAPHICS: u8 = 31;
}

bitflags! {
    /// Boolean attributes of the row being decoded.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RowFlags: u8 {
        const SEPARATED_GRAPHICS = 1 << 0;
        const HOLD_GRAPHICS      = 1 << 1;
        const GRAPHICS           = 1 << 2;
        /// Double height is active at this point in the row.
        const DOUBLE_HEIGHT      = 1 << 3;
        /// The next row is the bottom half of a double-height row.
        const NEXT_DOUBLE_HEIGHT = 1 << 4;
        const FLASH              = 1 << 5;
    }
}

/// Attribute state of one row, threaded through the column loop by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowState {
    /// Whether this row is the bottom half of a double-height row. Fixed for
    /// the whole row.
    pub bottom_half: bool,
    pub flags: RowFlags,
    pub foreground: TeletextColor,
    pub background: TeletextColor,
    /// Most recent mosaic code seen while graphics were on, for hold graphics.
    pub last_graphic_code: u8,
}

impl RowState {
    /// State at the first column of a row.
    pub fn start_of_row(bottom_half: bool) -> Self {
        Self {
            bottom_half,
            flags: RowFlags::empty(),
            foreground: TeletextColor::White,
            background: TeletextColor::Black,
            last_graphic_code: 0,
        }
    }

    /// Applies the attribute change of control code `code` (0-31). Codes with
    /// no effect are ignored.
    pub fn apply_control(&mut self, code: u8) {
        use crate::renderer::codes::*;
        match code {
            ALPHA_RED..=ALPHA_WHITE => {
                self.foreground = TeletextColor::from_code(code);
                self.flags.remove(RowFlags::GRAPHICS);
            }
            FLASH => self.flags.insert(RowFlags::FLASH),
            STEADY => self.flags.remove(RowFlags::FLASH),
            NORMAL_HEIGHT => self.flags.remove(RowFlags::DOUBLE_HEIGHT),
            DOUBLE_HEIGHT => {
                self.flags.insert(RowFlags::DOUBLE_HEIGHT);
                if !self.bottom_half {
                    self.flags.insert(RowFlags::NEXT_DOUBLE_HEIGHT);
                }
            }
            GRAPHICS_RED..=GRAPHICS_WHITE => {
                self.foreground = TeletextColor::from_code(code);
                self.flags.insert(RowFlags::GRAPHICS);
            }
            CONTIGUOUS_GRAPHICS => self.flags.remove(RowFlags::SEPARATED_GRAPHICS),
            SEPARATED_GRAPHICS => self.flags.insert(RowFlags::SEPARATED_GRAPHICS),
            ESCAPE => {}
            BLACK_BACKGROUND => self.background = TeletextColor::Black,
            NEW_BACKGROUND => self.background = self.foreground,
            HOLD_GRAPHICS => self.flags.insert(RowFlags::HOLD_GRAPHICS),
            RELEASE_GRAPHICS => self.flags.remove(RowFlags::HOLD_GRAPHICS),
            _ => {}
        }
    }

    /// Code whose glyph fills a control code's own cell: the held mosaic when
    /// hold graphics is on in graphics mode, otherwise the blank code 0.
    pub fn control_cell_code(&self) -> u8 {
        if self
            .flags
            .contains(RowFlags::HOLD_GRAPHICS | RowFlags::GRAPHICS)
        {
            self.last_graphic_code
        } else {
            0
        }
    }

    /// Height slot for the current cell, or `None` when the cell is a
    /// single-height cell on a bottom-half row and must not be drawn.
    pub fn height_slot(&self) -> Option<HeightSlot> {
        match (self.flags.contains(RowFlags::DOUBLE_HEIGHT), self.bottom_half) {
            (true, false) => Some(HeightSlot::Upper),
            (true, true) => Some(HeightSlot::Lower),
            (false, false) => Some(HeightSlot::Standard),
            (false, true) => None,
        }
    }

    pub fn render_mode(&self) -> RenderMode {
        if !self.flags.contains(RowFlags::GRAPHICS) {
            RenderMode::Normal
        } else if self.flags.contains(RowFlags::SEPARATED_GRAPHICS) {
            RenderMode::ThinGraphics
        } else {
            RenderMode::Graphics
        }
    }
}

/// What the decoder decided for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedCell {
    /// The stored code masked to seven bits.
    pub actual_code: u8,
    /// The code whose glyph is drawn (after control and flash substitution).
    pub glyph_code: u8,
    pub mode: RenderMode,
    /// `None` when the cell is suppressed and drawn as plain background.
    pub height: Option<HeightSlot>,
    pub foreground: Rgb,
    pub background: Rgb,
}

/// Advances `state` over one stored code and returns how the cell is drawn.
pub fn decode_cell(state: &mut RowState, stored: u8, flash_visible: bool) -> DecodedCell {
    let actual_code = stored & 0x7f;
    let mut code = actual_code;

    if code < 32 {
        state.apply_control(code);
        code = state.control_cell_code();
    }

    let height = state.height_slot();
    let mode = state.render_mode();

    // A mosaic counts as "last seen" even if this cell is suppressed.
    if state.flags.contains(RowFlags::GRAPHICS) && sixel::is_graphic(code) {
        state.last_graphic_code = code;
    }

    if state.flags.contains(RowFlags::FLASH) && !flash_visible {
        code = SPACE;
    }

    DecodedCell {
        actual_code,
        glyph_code: code,
        mode,
        height,
        foreground: state.foreground.to_rgb(),
        background: state.background.to_rgb(),
    }
}

/// Decodes one row of codes. Returns the per-cell decisions and whether the
/// next row is a bottom-half row.
pub fn decode_row(row: &[u8], bottom_half: bool, flash_visible: bool) -> (Vec<DecodedCell>, bool) {
    let mut state = RowState::start_of_row(bottom_half);
    let cells = row
        .iter()
        .map(|&stored| decode_cell(&mut state, stored, flash_visible))
        .collect();
    (cells, state.flags.contains(RowFlags::NEXT_DOUBLE_HEIGHT))
}

/// Turns page buffers into pixel rasters.
///
/// The `Renderer` keeps its output raster between calls only to reuse the
/// allocation; every call redraws every pixel.
pub struct Renderer {
    glyphs: Arc<GlyphSet>,
    columns: usize,
    rows: usize,
    raster: Raster,
}

impl Renderer {
    /// A renderer for standard 40x25 pages.
    pub fn new(glyphs: Arc<GlyphSet>) -> Self {
        Self::with_dimensions(glyphs, PAGE_WIDTH, PAGE_HEIGHT)
    }

    /// A renderer for pages of `columns` x `rows` cells.
    pub fn with_dimensions(glyphs: Arc<GlyphSet>, columns: usize, rows: usize) -> Self {
        let (gw, gh) = glyphs.cell_size();
        debug!(
            "Renderer: {}x{} cells, raster {}x{} px",
            columns,
            rows,
            columns * gw,
            rows * gh
        );
        Self {
            glyphs,
            columns,
            rows,
            raster: Raster::new(columns * gw, rows * gh),
        }
    }

    /// (columns, rows) this renderer accepts.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    pub fn glyphs(&self) -> &Arc<GlyphSet> {
        &self.glyphs
    }

    /// Renders `page` into the internal raster and returns it.
    ///
    /// # Arguments
    /// * `page` - Must be exactly the configured dimensions.
    /// * `show_control_glyphs` - Overlay an icon on every control code cell.
    /// * `flash_visible` - Current phase of flashing text; when false,
    ///   flashing cells draw as spaces.
    ///
    /// # Returns
    /// The rendered raster, or `RenderError::InvalidInput` if the page has
    /// the wrong dimensions.
    pub fn render(
        &mut self,
        page: &PageBuffer,
        show_control_glyphs: bool,
        flash_visible: bool,
    ) -> Result<&Raster, RenderError> {
        if page.dimensions() != (self.columns, self.rows) {
            return Err(RenderError::InvalidInput {
                expected: (self.columns, self.rows),
                actual: page.dimensions(),
            });
        }

        let (gw, gh) = self.glyphs.cell_size();
        self.raster.resize(self.columns * gw, self.rows * gh);

        let mut bottom_half = false;
        for y in 0..self.rows {
            trace!("Renderer: row {} (bottom half: {})", y, bottom_half);
            let (cells, next_bottom_half) = decode_row(page.row(y), bottom_half, flash_visible);

            for (x, cell) in cells.iter().enumerate() {
                let glyph: &GlyphBitmap = match cell.height {
                    Some(height) => self.glyphs.get(cell.glyph_code, cell.mode, height),
                    None => self.glyphs.blank(),
                };

                let (left, top) = (x * gw, y * gh);
                self.raster
                    .stencil(left, top, glyph, cell.foreground, cell.background);

                if show_control_glyphs && cell.actual_code < 32 {
                    let icon = self.glyphs.control_icon(cell.actual_code);
                    self.raster
                        .overlay_icon(left, top, icon, cell.foreground, cell.background);
                }
            }

            bottom_half = next_bottom_half;
        }

        Ok(&self.raster)
    }

    /// The most recently rendered raster.
    pub fn rendered(&self) -> &Raster {
        &self.raster
    }

    /// Pixel size of one character cell.
    pub fn glyph_cell_pixel_size(&self) -> (usize, usize) {
        self.glyphs.cell_size()
    }

    /// Pixel rectangle of the character cell containing sub-cell (`sub_x`, `sub_y`).
    pub fn character_cell_pixel_bounds(&self, sub_x: usize, sub_y: usize) -> PixelRect {
        let (gw, gh) = self.glyph_cell_pixel_size();
        let (col, row) = sixel::cell_of(sub_x, sub_y);
        PixelRect::new(col * gw, row * gh, gw, gh)
    }

    /// Pixel rectangle of sub-cell (`sub_x`, `sub_y`) itself.
    pub fn sixel_pixel_bounds(&self, sub_x: usize, sub_y: usize) -> PixelRect {
        let cell = self.character_cell_pixel_bounds(sub_x, sub_y);
        let (sw, sh) = (cell.width / SIXEL_COLS, cell.height / SIXEL_ROWS);
        PixelRect::new(
            cell.x + (sub_x % SIXEL_COLS) * sw,
            cell.y + (sub_y % SIXEL_ROWS) * sh,
            sw,
            sh,
        )
    }
}

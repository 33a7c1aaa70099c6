// src/editor.rs

//! Editing primitives that sit directly on the page buffer.
//!
//! The cursor always lives in sub-cell coordinates, so the same position can
//! address a whole character cell (Character and Text modes) or a single
//! mosaic sub-cell (Graphics mode). Nothing here knows about keys or undo
//! history; a front end maps its input onto these calls and snapshots the
//! page itself if it wants history.

use log::{debug, trace};

use crate::page::{PageBuffer, SPACE};
use crate::raster::PixelRect;
use crate::renderer::{codes, Renderer};
use crate::sixel::{self, SetMode, MOSAIC_BITS, SIXEL_COLS, SIXEL_ROWS};

/// The solid block code: every sub-cell lit.
pub const FILL_BLOCK: u8 = 0x7f;

/// Width in pixels of the Text mode caret.
const TEXT_CARET_WIDTH: usize = 4;

/// How the cursor addresses the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Whole cells; attribute codes are alphanumeric variants.
    #[default]
    Character,
    /// Single sub-cells; attribute color codes are graphics variants.
    Graphics,
    /// Whole cells with a narrow caret, for typing text.
    Text,
}

/// Colors selectable as attribute codes, numbered by their 3-bit RGB field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorKey {
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
}

impl ColorKey {
    /// The attribute code for this color: alphanumeric color in Character and
    /// Text modes, graphics color in Graphics mode.
    pub fn code(self, mode: EditMode) -> u8 {
        let base = self as u8;
        match mode {
            EditMode::Graphics => base + 16,
            EditMode::Character | EditMode::Text => base,
        }
    }
}

/// Attribute codes an editor inserts by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Color(ColorKey),
    Flash,
    Steady,
    NormalHeight,
    DoubleHeight,
    BlackBackground,
    NewBackground,
    HoldGraphics,
    ReleaseGraphics,
    FillBlock,
    Blank,
    Null,
}

impl Attribute {
    pub fn code(self, mode: EditMode) -> u8 {
        match self {
            Attribute::Color(color) => color.code(mode),
            Attribute::Flash => codes::FLASH,
            Attribute::Steady => codes::STEADY,
            Attribute::NormalHeight => codes::NORMAL_HEIGHT,
            Attribute::DoubleHeight => codes::DOUBLE_HEIGHT,
            Attribute::BlackBackground => codes::BLACK_BACKGROUND,
            Attribute::NewBackground => codes::NEW_BACKGROUND,
            Attribute::HoldGraphics => codes::HOLD_GRAPHICS,
            Attribute::ReleaseGraphics => codes::RELEASE_GRAPHICS,
            Attribute::FillBlock => FILL_BLOCK,
            Attribute::Blank => SPACE,
            Attribute::Null => 0,
        }
    }
}

/// A sub-cell position clamped to a page of `columns` x `rows` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    x: usize,
    y: usize,
    max_x: usize,
    max_y: usize,
}

impl Cursor {
    /// Cursor for a page of the given size, at the editor's start position.
    pub fn new(columns: usize, rows: usize) -> Self {
        let mut cursor = Self {
            x: 0,
            y: 0,
            max_x: (columns * SIXEL_COLS).saturating_sub(1),
            max_y: (rows * SIXEL_ROWS).saturating_sub(1),
        };
        cursor.set(4, 6);
        cursor
    }

    /// Sub-cell position.
    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// Character cell under the cursor.
    pub fn cell(&self) -> (usize, usize) {
        sixel::cell_of(self.x, self.y)
    }

    pub fn set(&mut self, x: isize, y: isize) {
        self.set_x(x);
        self.set_y(y);
    }

    pub fn set_x(&mut self, x: isize) {
        self.x = x.clamp(0, self.max_x as isize) as usize;
    }

    pub fn set_y(&mut self, y: isize) {
        self.y = y.clamp(0, self.max_y as isize) as usize;
    }

    /// Moves by `dx`, `dy` steps. A step is one sub-cell in Graphics mode
    /// and one character cell otherwise.
    pub fn step(&mut self, mode: EditMode, dx: isize, dy: isize) {
        let (sx, sy) = match mode {
            EditMode::Graphics => (1, 1),
            EditMode::Character | EditMode::Text => (SIXEL_COLS as isize, SIXEL_ROWS as isize),
        };
        self.set(self.x as isize + dx * sx, self.y as isize + dy * sy);
        trace!("Cursor moved to {:?}", self.position());
    }

    /// One character cell to the right.
    pub fn advance(&mut self) {
        self.set_x(self.x as isize + SIXEL_COLS as isize);
    }

    pub fn home(&mut self) {
        self.set_x(0);
    }

    pub fn end(&mut self) {
        self.set_x(self.max_x as isize);
    }

    /// Pixel rectangle to highlight for this cursor in `mode`.
    pub fn highlight(&self, renderer: &Renderer, mode: EditMode) -> PixelRect {
        match mode {
            EditMode::Graphics => renderer.sixel_pixel_bounds(self.x, self.y),
            EditMode::Text => {
                let mut rect = renderer.character_cell_pixel_bounds(self.x, self.y);
                rect.width = TEXT_CARET_WIDTH;
                rect
            }
            EditMode::Character => renderer.character_cell_pixel_bounds(self.x, self.y),
        }
    }
}

/// Stores `code` in the cell under `cursor`.
pub fn put_code(page: &mut PageBuffer, cursor: &Cursor, code: u8) {
    let (col, row) = cursor.cell();
    if let Some(cell) = page.get_mut(col, row) {
        *cell = code;
    }
}

/// Stores the attribute code for `attr` under the cursor.
pub fn put_attribute(page: &mut PageBuffer, cursor: &Cursor, mode: EditMode, attr: Attribute) {
    put_code(page, cursor, attr.code(mode));
}

/// Whether the cell under the cursor holds a mosaic-capable code.
pub fn cursor_on_graphic(page: &PageBuffer, cursor: &Cursor) -> bool {
    let (col, row) = cursor.cell();
    page.get(col, row).is_some_and(sixel::is_graphic)
}

/// First column at or after `col` on `row` whose code is not mosaic-capable,
/// or the page width if the run reaches the end of the row.
pub fn next_non_graphic_column(page: &PageBuffer, col: usize, row: usize) -> usize {
    (col..page.width())
        .find(|&c| page.get(c, row).is_some_and(|code| !sixel::is_graphic(code)))
        .unwrap_or(page.width())
}

/// Flips mosaic sub-cell `sub` (0-5) of the cell under the cursor. Ignored
/// unless the cell is mosaic-capable.
pub fn toggle_mosaic_bit(page: &mut PageBuffer, cursor: &Cursor, sub: usize) -> bool {
    if sub >= MOSAIC_BITS.len() || !cursor_on_graphic(page, cursor) {
        return false;
    }
    let (col, row) = cursor.cell();
    page[(col, row)] ^= 1 << MOSAIC_BITS[sub];
    true
}

/// Sets the sub-cell under the cursor. Ignored unless the cell is mosaic-capable.
pub fn paint_sixel(page: &mut PageBuffer, cursor: &Cursor, mode: SetMode) -> bool {
    if !cursor_on_graphic(page, cursor) {
        return false;
    }
    let (x, y) = cursor.position();
    sixel::set(page, x, y, mode);
    true
}

/// Shifts the row right from the cursor cell, blanking the cursor cell.
pub fn insert_cell(page: &mut PageBuffer, cursor: &Cursor) {
    let (col, row) = cursor.cell();
    page.insert_cell(col, row);
}

/// Shifts the row left onto the cursor cell, padding the end with a space.
pub fn delete_cell(page: &mut PageBuffer, cursor: &Cursor) {
    let (col, row) = cursor.cell();
    page.delete_cell(col, row);
}

/// Opens a blank row at the cursor row.
pub fn insert_row(page: &mut PageBuffer, cursor: &Cursor) {
    page.insert_row(cursor.cell().1);
}

pub fn delete_row(page: &mut PageBuffer, cursor: &Cursor) {
    page.delete_row(cursor.cell().1);
}

/// Last sub-column of the mosaic run that starts at the cursor cell.
fn run_end(page: &PageBuffer, cursor: &Cursor) -> usize {
    let (col, row) = cursor.cell();
    next_non_graphic_column(page, col, row) * SIXEL_COLS - 1
}

/// Shifts the cursor's sub-row right by one sub-cell, up to the end of the
/// mosaic run, and clears the sub-cell under the cursor. Ignored unless the
/// cursor cell is mosaic-capable.
pub fn insert_sixel(page: &mut PageBuffer, cursor: &Cursor) -> bool {
    if !cursor_on_graphic(page, cursor) {
        return false;
    }
    let (x, y) = cursor.position();
    let last = run_end(page, cursor);
    for sx in (x..last).rev() {
        let on = sixel::get(page, sx, y);
        sixel::set(page, sx + 1, y, SetMode::from(on));
    }
    sixel::set(page, x, y, SetMode::Off);
    debug!("Inserted sixel at ({}, {}), run ends at sub-column {}", x, y, last);
    true
}

/// Shifts the cursor's sub-row left onto the cursor, up to the end of the
/// mosaic run, and clears the last sub-cell of the run.
pub fn delete_sixel(page: &mut PageBuffer, cursor: &Cursor) -> bool {
    if !cursor_on_graphic(page, cursor) {
        return false;
    }
    let (x, y) = cursor.position();
    let last = run_end(page, cursor);
    for sx in x..last {
        let on = sixel::get(page, sx + 1, y);
        sixel::set(page, sx, y, SetMode::from(on));
    }
    sixel::set(page, last, y, SetMode::Off);
    debug!("Deleted sixel at ({}, {}), run ends at sub-column {}", x, y, last);
    true
}

/// `insert_sixel` in Graphics mode, `insert_cell` otherwise.
pub fn insert_at_cursor(page: &mut PageBuffer, cursor: &Cursor, mode: EditMode) -> bool {
    match mode {
        EditMode::Graphics => insert_sixel(page, cursor),
        EditMode::Character | EditMode::Text => {
            insert_cell(page, cursor);
            true
        }
    }
}

/// `delete_sixel` in Graphics mode, `delete_cell` otherwise.
pub fn delete_at_cursor(page: &mut PageBuffer, cursor: &Cursor, mode: EditMode) -> bool {
    match mode {
        EditMode::Graphics => delete_sixel(page, cursor),
        EditMode::Character | EditMode::Text => {
            delete_cell(page, cursor);
            true
        }
    }
}

/// Types `code` in Text mode: stores it and moves one cell right.
pub fn type_code(page: &mut PageBuffer, cursor: &mut Cursor, code: u8) {
    put_code(page, cursor, code);
    cursor.advance();
}

/// Blanks at the cursor. In Graphics mode this clears the sub-cell and moves
/// one sub-cell right; otherwise the cell becomes a space and the cursor
/// advances a cell.
pub fn blank_at_cursor(page: &mut PageBuffer, cursor: &mut Cursor, mode: EditMode) {
    match mode {
        EditMode::Graphics => {
            if paint_sixel(page, cursor, SetMode::Off) {
                cursor.step(mode, 1, 0);
            }
        }
        EditMode::Character | EditMode::Text => type_code(page, cursor, SPACE),
    }
}

#[cfg(test)]
mod tests;

// src/glyph.rs

//! Defines `GlyphBitmap`, the fixed-size pixel mask every teletext glyph is
//! drawn from, and the two axes (`RenderMode`, `HeightSlot`) that select a
//! variant of a character code in the `GlyphSet`.

use std::fmt;

/// Width of a glyph cell in pixels.
pub const GLYPH_WIDTH: usize = 12;
/// Height of a glyph cell in pixels.
pub const GLYPH_HEIGHT: usize = 18;

/// An immutable-once-built 12x18 boolean mask. A set pixel draws the
/// foreground color, a clear one the background color.
///
/// Each pixel row is stored as the low `GLYPH_WIDTH` bits of a `u16`, with
/// column 0 in bit 0.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GlyphBitmap {
    rows: [u16; GLYPH_HEIGHT],
}

impl GlyphBitmap {
    /// The all-background glyph.
    pub const BLANK: GlyphBitmap = GlyphBitmap {
        rows: [0; GLYPH_HEIGHT],
    };

    /// Builds a bitmap by evaluating `f(col, row)` for every pixel.
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut glyph = Self::BLANK;
        for row in 0..GLYPH_HEIGHT {
            for col in 0..GLYPH_WIDTH {
                if f(col, row) {
                    glyph.set(col, row, true);
                }
            }
        }
        glyph
    }

    /// Returns whether pixel (`col`, `row`) is foreground.
    ///
    /// # Panics
    /// Panics if `row` is outside the cell; `col` outside the cell reads as clear.
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> bool {
        col < GLYPH_WIDTH && self.rows[row] & (1 << col) != 0
    }

    #[inline]
    pub fn set(&mut self, col: usize, row: usize, on: bool) {
        debug_assert!(col < GLYPH_WIDTH && row < GLYPH_HEIGHT);
        if on {
            self.rows[row] |= 1 << col;
        } else {
            self.rows[row] &= !(1 << col);
        }
    }

    /// Number of foreground pixels.
    pub fn count_set(&self) -> usize {
        self.rows.iter().map(|r| r.count_ones() as usize).sum()
    }

    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|&r| r == 0)
    }

    /// Double-height top half: each of the first nine rows is shown twice.
    pub fn upper_half(&self) -> Self {
        let mut out = Self::BLANK;
        for row in 0..GLYPH_HEIGHT {
            out.rows[row] = self.rows[row / 2];
        }
        out
    }

    /// Double-height bottom half: each of the last nine rows is shown twice.
    pub fn lower_half(&self) -> Self {
        let mut out = Self::BLANK;
        for row in 0..GLYPH_HEIGHT {
            out.rows[row] = self.rows[GLYPH_HEIGHT / 2 + row / 2];
        }
        out
    }
}

impl fmt::Debug for GlyphBitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GlyphBitmap {{")?;
        for row in 0..GLYPH_HEIGHT {
            let line: String = (0..GLYPH_WIDTH)
                .map(|col| if self.get(col, row) { '#' } else { '.' })
                .collect();
            writeln!(f, "    {}", line)?;
        }
        write!(f, "}}")
    }
}

/// Which character set a code is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// Alphanumeric text from the font.
    Normal,
    /// Contiguous block mosaics.
    Graphics,
    /// Separated block mosaics (the mosaic with its sub-cell borders cut away).
    ThinGraphics,
}

impl RenderMode {
    pub const ALL: [RenderMode; 3] = [
        RenderMode::Normal,
        RenderMode::Graphics,
        RenderMode::ThinGraphics,
    ];

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// Which vertical slice of a glyph is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeightSlot {
    Standard,
    /// Top half of a double-height glyph.
    Upper,
    /// Bottom half of a double-height glyph.
    Lower,
}

impl HeightSlot {
    pub const ALL: [HeightSlot; 3] = [HeightSlot::Standard, HeightSlot::Upper, HeightSlot::Lower];

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

// src/font.rs

//! The `GlyphSet`: every glyph the renderer can draw, built once at startup.
//!
//! Teletext effectively has five character sets stacked on one 7-bit code
//! space: normal text, the two halves of double-height text, and contiguous
//! and separated block mosaics. Codes 0-31 are control codes and draw as
//! blank; codes 32-127 come from the packed font, and the ones with bit 5 set
//! also get mosaic variants synthesized from their bit pattern.
//!
//! The table is fully populated for every (code, mode, height) triple, so a
//! lookup can never miss.

use log::{info, trace};

use crate::error::AssetLoadError;
use crate::glyph::{GlyphBitmap, HeightSlot, RenderMode, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::sixel::{self, MOSAIC_BITS};

/// Number of 7-bit codes.
pub const CODE_COUNT: usize = 128;
/// Number of control codes, each of which has an icon.
pub const CONTROL_CODE_COUNT: usize = 32;
/// First code stored in the font asset.
pub const FIRST_PRINTABLE: usize = 32;
/// Bytes per glyph record in the font asset: 18 rows of 2 bytes.
pub const FONT_RECORD_LEN: usize = GLYPH_HEIGHT * 2;
/// Total size of the font asset (codes 32-127).
pub const FONT_ASSET_LEN: usize = (CODE_COUNT - FIRST_PRINTABLE) * FONT_RECORD_LEN;

const MODES: usize = 3;
const HEIGHTS: usize = 3;

type GlyphVariants = [[GlyphBitmap; HEIGHTS]; MODES];

/// Immutable glyph table plus the control-code icons.
///
/// Cheap to share: wrap it in an `Arc` and hand it to as many renderers as
/// needed.
pub struct GlyphSet {
    glyphs: Box<[GlyphVariants; CODE_COUNT]>,
    control_icons: Box<[GlyphBitmap; CONTROL_CODE_COUNT]>,
}

impl GlyphSet {
    /// Builds the glyph table from the packed font bytes and 32 already
    /// decoded icon masks.
    ///
    /// # Arguments
    /// * `font` - 96 records of 18 two-byte rows, codes 32 to 127 in order.
    /// * `control_icons` - One mask per control code 0-31.
    ///
    /// # Returns
    /// The finished set, or `AssetLoadError` if either input has the wrong size.
    pub fn new(font: &[u8], control_icons: Vec<GlyphBitmap>) -> Result<Self, AssetLoadError> {
        if font.len() != FONT_ASSET_LEN {
            return Err(AssetLoadError::FontLength {
                expected: FONT_ASSET_LEN,
                actual: font.len(),
            });
        }
        let icon_count = control_icons.len();
        let control_icons: Box<[GlyphBitmap; CONTROL_CODE_COUNT]> = control_icons
            .into_boxed_slice()
            .try_into()
            .map_err(|_| AssetLoadError::IconCount {
                expected: CONTROL_CODE_COUNT,
                actual: icon_count,
            })?;

        let blank = [[GlyphBitmap::BLANK; HEIGHTS]; MODES];
        let mut glyphs = Box::new([blank; CODE_COUNT]);

        for (offset, record) in font.chunks_exact(FONT_RECORD_LEN).enumerate() {
            let code = FIRST_PRINTABLE + offset;
            let text = unpack_font_record(record);

            let (graphics, thin) = if sixel::is_graphic(code as u8) {
                let graphics = mosaic(code as u8);
                (graphics, separated(&graphics))
            } else {
                (text, text)
            };

            glyphs[code] = [with_heights(text), with_heights(graphics), with_heights(thin)];
        }

        info!(
            "GlyphSet built: {} codes x {} modes x {} heights, {} control icons",
            CODE_COUNT, MODES, HEIGHTS, CONTROL_CODE_COUNT
        );
        Ok(Self {
            glyphs,
            control_icons,
        })
    }

    /// Looks up the glyph for `code`. Only the low seven bits of `code` are used.
    #[inline]
    pub fn get(&self, code: u8, mode: RenderMode, height: HeightSlot) -> &GlyphBitmap {
        &self.glyphs[(code & 0x7f) as usize][mode.index()][height.index()]
    }

    /// Icon drawn over control code `code` (0-31) when codes are shown.
    #[inline]
    pub fn control_icon(&self, code: u8) -> &GlyphBitmap {
        &self.control_icons[(code as usize) % CONTROL_CODE_COUNT]
    }

    /// The all-background glyph.
    pub fn blank(&self) -> &GlyphBitmap {
        &GlyphBitmap::BLANK
    }

    /// Pixel size of every glyph.
    pub const fn cell_size(&self) -> (usize, usize) {
        (GLYPH_WIDTH, GLYPH_HEIGHT)
    }
}

impl std::fmt::Debug for GlyphSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphSet")
            .field("codes", &CODE_COUNT)
            .field("control_icons", &CONTROL_CODE_COUNT)
            .finish()
    }
}

/// Unpacks one 36-byte font record. Each row is stored as byte `c` (the
/// right eight columns) followed by byte `d` (the left two); only ten of the
/// twelve columns are used.
pub fn unpack_font_record(record: &[u8]) -> GlyphBitmap {
    let mut glyph = GlyphBitmap::BLANK;
    for (row, pair) in record.chunks_exact(2).take(GLYPH_HEIGHT).enumerate() {
        let (c, d) = (pair[0], pair[1]);
        glyph.set(0, row, d & 2 != 0);
        glyph.set(1, row, d & 1 != 0);
        for col in 2..10 {
            glyph.set(col, row, c & (0x80 >> (col - 2)) != 0);
        }
    }
    glyph
}

/// Contiguous mosaic: each sub-cell rectangle is solid if its bit is set.
pub fn mosaic(code: u8) -> GlyphBitmap {
    let mut glyph = GlyphBitmap::BLANK;
    for (sub, &bit) in MOSAIC_BITS.iter().enumerate() {
        if code & (1 << bit) == 0 {
            continue;
        }
        let (left, top, w, h) = sixel::sub_cell_rect(sub);
        for row in top..top + h {
            for col in left..left + w {
                glyph.set(col, row, true);
            }
        }
    }
    glyph
}

/// Separated mosaic: the contiguous mosaic with the first pixel column and
/// row of every sub-cell forced to background.
pub fn separated(graphics: &GlyphBitmap) -> GlyphBitmap {
    let (sw, sh) = sixel::sixel_pixel_size();
    GlyphBitmap::from_fn(|col, row| {
        col % sw != 0 && row % sh != 0 && graphics.get(col, row)
    })
}

fn with_heights(standard: GlyphBitmap) -> [GlyphBitmap; HEIGHTS] {
    let upper = standard.upper_half();
    let lower = standard.lower_half();
    trace!(
        "height variants: {} / {} / {} pixels set",
        standard.count_set(),
        upper.count_set(),
        lower.count_set()
    );
    [standard, upper, lower]
}

#[cfg(test)]
mod tests;

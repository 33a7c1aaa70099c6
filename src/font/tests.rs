// src/font/tests.rs

use super::*;
use crate::sixel::{sixel_pixel_size, sub_cell_rect};

/// Font where every code's glyph is a distinct but simple pattern: row `r`
/// lights column `(code + r) % 10`.
fn diagonal_font() -> Vec<u8> {
    let mut font = Vec::with_capacity(FONT_ASSET_LEN);
    for code in FIRST_PRINTABLE..CODE_COUNT {
        for row in 0..GLYPH_HEIGHT {
            let col = (code + row) % 10;
            font.extend_from_slice(&pack_column(col));
        }
    }
    font
}

/// Packs a single lit column (0..10) into the (c, d) byte pair.
fn pack_column(col: usize) -> [u8; 2] {
    match col {
        0 => [0, 2],
        1 => [0, 1],
        _ => [0x80 >> (col - 2), 0],
    }
}

fn icons() -> Vec<GlyphBitmap> {
    vec![GlyphBitmap::BLANK; CONTROL_CODE_COUNT]
}

fn glyph_set() -> GlyphSet {
    GlyphSet::new(&diagonal_font(), icons()).unwrap()
}

#[test]
fn unpack_maps_each_bit_to_its_column() {
    for col in 0..10 {
        let mut record = vec![0u8; FONT_RECORD_LEN];
        record[..2].copy_from_slice(&pack_column(col));
        let glyph = unpack_font_record(&record);
        for c in 0..GLYPH_WIDTH {
            assert_eq!(glyph.get(c, 0), c == col, "bit for column {} lit column {}", col, c);
        }
        assert_eq!(glyph.count_set(), 1);
    }
}

#[test]
fn unpack_leaves_spare_columns_clear() {
    let glyph = unpack_font_record(&[0xff; FONT_RECORD_LEN]);
    for row in 0..GLYPH_HEIGHT {
        assert!(!glyph.get(10, row));
        assert!(!glyph.get(11, row));
    }
    assert_eq!(glyph.count_set(), 10 * GLYPH_HEIGHT);
}

#[test]
fn truncated_font_is_rejected() {
    let font = vec![0u8; FONT_ASSET_LEN - 1];
    let err = GlyphSet::new(&font, icons()).unwrap_err();
    assert!(matches!(
        err,
        AssetLoadError::FontLength { expected: FONT_ASSET_LEN, .. }
    ));
}

#[test]
fn oversized_font_is_rejected() {
    let mut font = diagonal_font();
    font.extend_from_slice(&[0u8; FONT_RECORD_LEN]);
    let err = GlyphSet::new(&font, icons()).unwrap_err();
    assert!(matches!(
        err,
        AssetLoadError::FontLength { expected: FONT_ASSET_LEN, actual } if actual == FONT_ASSET_LEN + FONT_RECORD_LEN
    ));
}

#[test]
fn wrong_icon_count_is_rejected() {
    let err = GlyphSet::new(&diagonal_font(), vec![GlyphBitmap::BLANK; 31]).unwrap_err();
    assert!(matches!(err, AssetLoadError::IconCount { expected: 32, actual: 31 }));
}

#[test]
fn mosaic_sub_cells_follow_remapped_bits() {
    let set = glyph_set();
    let (sw, sh) = sixel_pixel_size();
    for code in (32u8..128).filter(|c| c & 32 != 0) {
        let glyph = set.get(code, RenderMode::Graphics, HeightSlot::Standard);
        for (sub, &bit) in MOSAIC_BITS.iter().enumerate() {
            let (left, top, _, _) = sub_cell_rect(sub);
            let lit = code & (1 << bit) != 0;
            // Sample the middle of the sub-cell.
            assert_eq!(
                glyph.get(left + sw / 2, top + sh / 2),
                lit,
                "code {:#04x} sub-cell {}",
                code,
                sub
            );
        }
    }
}

#[test]
fn solid_mosaic_fills_the_cell() {
    let set = glyph_set();
    let solid = set.get(0x7f, RenderMode::Graphics, HeightSlot::Standard);
    assert_eq!(solid.count_set(), GLYPH_WIDTH * GLYPH_HEIGHT);
    // Bit 5 alone is the empty mosaic.
    assert!(set.get(0x20, RenderMode::Graphics, HeightSlot::Standard).is_blank());
}

#[test]
fn separated_mosaic_cuts_sub_cell_borders() {
    let set = glyph_set();
    let thin = set.get(0x7f, RenderMode::ThinGraphics, HeightSlot::Standard);
    for row in 0..GLYPH_HEIGHT {
        for col in 0..GLYPH_WIDTH {
            let border = col == 0 || col == 6 || row == 0 || row == 6 || row == 12;
            assert_eq!(thin.get(col, row), !border, "pixel ({}, {})", col, row);
        }
    }
}

#[test]
fn non_graphic_codes_reuse_text_glyph() {
    let set = glyph_set();
    for code in (32u8..128).filter(|c| c & 32 == 0) {
        let text = set.get(code, RenderMode::Normal, HeightSlot::Standard);
        assert_eq!(set.get(code, RenderMode::Graphics, HeightSlot::Standard), text);
        assert_eq!(set.get(code, RenderMode::ThinGraphics, HeightSlot::Standard), text);
        assert_eq!(
            set.get(code, RenderMode::Graphics, HeightSlot::Lower),
            set.get(code, RenderMode::Normal, HeightSlot::Lower)
        );
    }
}

#[test]
fn graphic_codes_keep_their_text_glyph_in_normal_mode() {
    let set = glyph_set();
    let text = set.get(b'a', RenderMode::Normal, HeightSlot::Standard);
    assert_eq!(text.count_set(), GLYPH_HEIGHT);
    assert_ne!(text, set.get(b'a', RenderMode::Graphics, HeightSlot::Standard));
}

#[test]
fn control_codes_are_blank_everywhere() {
    let set = glyph_set();
    for code in 0u8..32 {
        for mode in RenderMode::ALL {
            for height in HeightSlot::ALL {
                assert!(set.get(code, mode, height).is_blank());
            }
        }
    }
}

#[test]
fn height_slots_are_derived_independently() {
    let set = glyph_set();
    for code in [b'A', b'q', 0x35] {
        for mode in RenderMode::ALL {
            let standard = set.get(code, mode, HeightSlot::Standard);
            assert_eq!(set.get(code, mode, HeightSlot::Upper), &standard.upper_half());
            assert_eq!(set.get(code, mode, HeightSlot::Lower), &standard.lower_half());
        }
    }
    let a = b'A';
    assert_ne!(
        set.get(a, RenderMode::Normal, HeightSlot::Upper),
        set.get(a, RenderMode::Normal, HeightSlot::Lower)
    );
}

#[test]
fn high_bit_is_ignored_on_lookup() {
    let set = glyph_set();
    assert_eq!(
        set.get(b'A' | 0x80, RenderMode::Normal, HeightSlot::Standard),
        set.get(b'A', RenderMode::Normal, HeightSlot::Standard)
    );
}

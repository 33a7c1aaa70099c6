// src/editor/tests.rs

use super::*;
use crate::font::{GlyphSet, CONTROL_CODE_COUNT, FONT_ASSET_LEN};
use crate::glyph::GlyphBitmap;
use crate::page::{PAGE_HEIGHT, PAGE_WIDTH};
use std::sync::Arc;
use test_log::test;

fn cursor() -> Cursor {
    Cursor::new(PAGE_WIDTH, PAGE_HEIGHT)
}

fn renderer() -> Renderer {
    let glyphs = GlyphSet::new(
        &[0u8; FONT_ASSET_LEN],
        vec![GlyphBitmap::BLANK; CONTROL_CODE_COUNT],
    )
    .expect("blank glyph set");
    Renderer::new(Arc::new(glyphs))
}

#[test]
fn cursor_starts_inside_the_page() {
    let c = cursor();
    assert_eq!(c.position(), (4, 6));
    assert_eq!(c.cell(), (2, 2));
}

#[test]
fn cursor_is_clamped() {
    let mut c = cursor();
    c.set(-5, 100);
    assert_eq!(c.position(), (0, 74));
    c.set(500, -1);
    assert_eq!(c.position(), (79, 0));
}

#[test]
fn step_size_depends_on_mode() {
    let mut c = cursor();
    c.step(EditMode::Character, 1, 1);
    assert_eq!(c.position(), (6, 9));
    c.step(EditMode::Text, -1, 0);
    assert_eq!(c.position(), (4, 9));
    c.step(EditMode::Graphics, 1, -1);
    assert_eq!(c.position(), (5, 8));
}

#[test]
fn home_end_and_advance() {
    let mut c = cursor();
    c.end();
    assert_eq!(c.position().0, 79);
    c.advance();
    assert_eq!(c.position().0, 79);
    c.home();
    assert_eq!(c.position(), (0, 6));
    c.advance();
    assert_eq!(c.position(), (2, 6));
}

#[test]
fn highlight_follows_mode() {
    let r = renderer();
    let c = cursor();
    assert_eq!(
        c.highlight(&r, EditMode::Character),
        PixelRect::new(24, 36, 12, 18)
    );
    assert_eq!(c.highlight(&r, EditMode::Text), PixelRect::new(24, 36, 4, 18));
    assert_eq!(
        c.highlight(&r, EditMode::Graphics),
        PixelRect::new(24, 36, 6, 6)
    );
}

#[test]
fn color_codes_switch_with_mode() {
    assert_eq!(ColorKey::Red.code(EditMode::Character), 1);
    assert_eq!(ColorKey::White.code(EditMode::Text), 7);
    assert_eq!(ColorKey::Red.code(EditMode::Graphics), 17);
    assert_eq!(ColorKey::Cyan.code(EditMode::Graphics), 22);
}

#[test]
fn attribute_codes() {
    let mode = EditMode::Character;
    assert_eq!(Attribute::Flash.code(mode), 8);
    assert_eq!(Attribute::Steady.code(mode), 9);
    assert_eq!(Attribute::NormalHeight.code(mode), 12);
    assert_eq!(Attribute::DoubleHeight.code(mode), 13);
    assert_eq!(Attribute::BlackBackground.code(mode), 28);
    assert_eq!(Attribute::NewBackground.code(mode), 29);
    assert_eq!(Attribute::HoldGraphics.code(mode), 30);
    assert_eq!(Attribute::ReleaseGraphics.code(mode), 31);
    assert_eq!(Attribute::FillBlock.code(mode), 127);
    assert_eq!(Attribute::Blank.code(mode), 32);
    assert_eq!(Attribute::Null.code(mode), 0);
}

#[test]
fn put_attribute_writes_under_cursor() {
    let mut page = PageBuffer::blank();
    let c = cursor();
    put_attribute(
        &mut page,
        &c,
        EditMode::Graphics,
        Attribute::Color(ColorKey::Blue),
    );
    assert_eq!(page[(2, 2)], 20);
}

#[test]
fn toggle_mosaic_bit_needs_graphic_cell() {
    let mut page = PageBuffer::blank();
    let c = cursor();
    page[(2, 2)] = b'A';
    assert!(!toggle_mosaic_bit(&mut page, &c, 0));
    assert_eq!(page[(2, 2)], b'A');

    page[(2, 2)] = 0x20;
    assert!(toggle_mosaic_bit(&mut page, &c, 5));
    assert_eq!(page[(2, 2)], 0x60);
    assert!(toggle_mosaic_bit(&mut page, &c, 0));
    assert_eq!(page[(2, 2)], 0x61);
    assert!(!toggle_mosaic_bit(&mut page, &c, 6));
}

#[test]
fn next_non_graphic_column_finds_end_of_run() {
    let mut page = PageBuffer::filled(PAGE_WIDTH, PAGE_HEIGHT, 0x20);
    page[(7, 1)] = b'A';
    assert_eq!(next_non_graphic_column(&page, 2, 1), 7);
    assert_eq!(next_non_graphic_column(&page, 7, 1), 7);
    assert_eq!(next_non_graphic_column(&page, 8, 1), PAGE_WIDTH);
}

#[test]
fn graphics_insert_shifts_within_run() {
    let mut page = PageBuffer::blank();
    let c = cursor();
    page[(2, 2)] = 0x21; // top-left sub-cell lit
    page[(3, 2)] = 0x22; // top-right sub-cell lit, shifted out
    page[(4, 2)] = b'A';

    assert!(insert_at_cursor(&mut page, &c, EditMode::Graphics));
    assert_eq!(page[(2, 2)], 0x22);
    assert_eq!(page[(3, 2)], 0x20);
    assert_eq!(page[(4, 2)], b'A');

    assert!(delete_at_cursor(&mut page, &c, EditMode::Graphics));
    assert_eq!(page[(2, 2)], 0x21);
    assert_eq!(page[(3, 2)], 0x20);
    assert_eq!(page[(4, 2)], b'A');
}

#[test]
fn graphics_edits_ignore_text_cells() {
    let mut page = PageBuffer::blank();
    page[(2, 2)] = b'A';
    let before = page.clone();
    let c = cursor();
    assert!(!insert_at_cursor(&mut page, &c, EditMode::Graphics));
    assert!(!delete_at_cursor(&mut page, &c, EditMode::Graphics));
    assert!(!paint_sixel(&mut page, &c, SetMode::On));
    assert_eq!(page, before);
}

#[test]
fn character_insert_and_delete_shift_row() {
    let mut page = PageBuffer::blank();
    let c = cursor();
    page[(2, 2)] = b'X';
    page[(3, 2)] = b'Y';
    insert_at_cursor(&mut page, &c, EditMode::Character);
    assert_eq!(page[(2, 2)], SPACE);
    assert_eq!(page[(3, 2)], b'X');
    assert_eq!(page[(4, 2)], b'Y');
    delete_at_cursor(&mut page, &c, EditMode::Text);
    assert_eq!(page[(2, 2)], b'X');
    assert_eq!(page[(3, 2)], b'Y');
}

#[test]
fn typing_advances_cursor() {
    let mut page = PageBuffer::blank();
    let mut c = cursor();
    for &b in b"Hi" {
        type_code(&mut page, &mut c, b);
    }
    assert_eq!(&page.row(2)[2..4], b"Hi");
    assert_eq!(c.cell(), (4, 2));
}

#[test]
fn blank_clears_sixel_in_graphics_mode() {
    let mut page = PageBuffer::blank();
    page[(2, 2)] = 0x7f;
    let mut c = cursor();
    blank_at_cursor(&mut page, &mut c, EditMode::Graphics);
    assert_eq!(page[(2, 2)], 0x7e);
    assert_eq!(c.position(), (5, 6));

    blank_at_cursor(&mut page, &mut c, EditMode::Character);
    assert_eq!(page[(2, 2)], SPACE);
    assert_eq!(c.position(), (7, 6));
}

#[test]
fn row_edits_follow_cursor_row() {
    let mut page = PageBuffer::blank();
    let c = cursor();
    page[(0, 2)] = b'R';
    insert_row(&mut page, &c);
    assert_eq!(page[(0, 2)], SPACE);
    assert_eq!(page[(0, 3)], b'R');
    delete_row(&mut page, &c);
    assert_eq!(page[(0, 2)], b'R');
    assert!(page.row(24).iter().all(|&b| b == SPACE));
}

#[test]
fn sixel_shift_runs_to_end_of_row() {
    let mut page = PageBuffer::filled(PAGE_WIDTH, PAGE_HEIGHT, 0x20);
    let mut c = cursor();
    // Last cell of the row, left sub-cell lit.
    page[(39, 2)] = 0x21;
    c.set_x(78);
    assert!(insert_sixel(&mut page, &c));
    assert_eq!(page[(39, 2)], 0x22);
    assert!(insert_sixel(&mut page, &c));
    assert_eq!(page[(39, 2)], 0x20);
}

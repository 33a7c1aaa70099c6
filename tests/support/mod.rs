// tests/support/mod.rs

//! Shared fixtures for the integration tests.
//!
//! The glyph set is built once, from real encoded assets: a packed font
//! generated in memory and 32 PNG icons encoded with the `image` crate.

#![allow(dead_code)]

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use image::{GrayImage, ImageFormat, Luma};
use once_cell::sync::Lazy;

use teletext_edit::assets::glyph_set_from_bytes;
use teletext_edit::font::{CODE_COUNT, CONTROL_CODE_COUNT, FIRST_PRINTABLE};
use teletext_edit::glyph::{GLYPH_HEIGHT, GLYPH_WIDTH};
use teletext_edit::{GlyphSet, Renderer};

/// Every printable glyph except space lights columns 2-9 of its top nine
/// rows. Space is blank.
pub fn font_bytes() -> Vec<u8> {
    let mut font = Vec::new();
    for code in FIRST_PRINTABLE..CODE_COUNT {
        for row in 0..GLYPH_HEIGHT {
            let lit = code != 32 && row < GLYPH_HEIGHT / 2;
            font.extend_from_slice(&[if lit { 0xff } else { 0 }, 0]);
        }
    }
    font
}

/// A PNG icon that is set everywhere except its top-left pixel.
pub fn icon_png() -> Vec<u8> {
    let img = GrayImage::from_fn(GLYPH_WIDTH as u32, GLYPH_HEIGHT as u32, |x, y| {
        if (x, y) == (0, 0) {
            Luma([0])
        } else {
            Luma([255])
        }
    });
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png)
        .expect("encode icon");
    bytes.into_inner()
}

pub fn icon_pngs() -> Vec<Vec<u8>> {
    vec![icon_png(); CONTROL_CODE_COUNT]
}

pub static GLYPHS: Lazy<Arc<GlyphSet>> = Lazy::new(|| {
    Arc::new(glyph_set_from_bytes(&font_bytes(), &icon_pngs()).expect("fixture glyph set"))
});

pub fn renderer() -> Renderer {
    Renderer::new(Arc::clone(&GLYPHS))
}

/// A fresh scratch directory unique to this process and `name`.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("teletext-edit-{}-{}", std::process::id(), name));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

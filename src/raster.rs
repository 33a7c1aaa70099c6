// src/raster.rs

//! The output pixel buffer and the few drawing primitives that operate on it.
//!
//! The renderer owns one `Raster` and redraws it in place on every call, so
//! the allocation survives between frames while the contents do not.

use std::path::Path;

use image::{ImageResult, RgbImage};
use log::debug;

use crate::color::Rgb;
use crate::glyph::{GlyphBitmap, GLYPH_HEIGHT, GLYPH_WIDTH};

/// An axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl PixelRect {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner.
    pub const fn top_left(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub const fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

/// A row-major RGB image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Raster {
    /// A black raster of the given pixel size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width * height],
        }
    }

    /// Changes the pixel size, keeping the existing allocation where it is
    /// large enough. Contents are unspecified afterwards.
    pub fn resize(&mut self, width: usize, height: usize) {
        if (width, height) != (self.width, self.height) {
            debug!(
                "Raster resized from {}x{} to {}x{}",
                self.width, self.height, width, height
            );
            self.width = width;
            self.height = height;
            self.pixels.resize(width * height, Rgb::BLACK);
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// # Panics
    /// Panics if (`x`, `y`) is outside the raster.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Rgb) {
        self.pixels[y * self.width + x] = color;
    }

    /// Draws `glyph` with its top-left corner at (`left`, `top`): set pixels
    /// become `fg`, clear ones `bg`.
    pub fn stencil(&mut self, left: usize, top: usize, glyph: &GlyphBitmap, fg: Rgb, bg: Rgb) {
        for row in 0..GLYPH_HEIGHT {
            let start = (top + row) * self.width + left;
            let line = &mut self.pixels[start..start + GLYPH_WIDTH];
            for (col, px) in line.iter_mut().enumerate() {
                *px = if glyph.get(col, row) { fg } else { bg };
            }
        }
    }

    /// Overlays a control-code icon on the cell at (`left`, `top`). Wherever
    /// the icon pixel is clear, the cell pixel swaps between `fg` and the
    /// background. When `fg == bg` the swap goes to black so the icon stays
    /// visible.
    pub fn overlay_icon(&mut self, left: usize, top: usize, icon: &GlyphBitmap, fg: Rgb, bg: Rgb) {
        let swap_bg = if fg == bg { Rgb::BLACK } else { bg };
        for row in 0..GLYPH_HEIGHT {
            for col in 0..GLYPH_WIDTH {
                if icon.get(col, row) {
                    continue;
                }
                let idx = (top + row) * self.width + left + col;
                self.pixels[idx] = if self.pixels[idx] == fg { swap_bg } else { fg };
            }
        }
    }

    /// Inverts every channel inside `rect`, clipped to the raster.
    pub fn invert_rect(&mut self, rect: PixelRect) {
        let x_end = (rect.x + rect.width).min(self.width);
        let y_end = (rect.y + rect.height).min(self.height);
        for y in rect.y.min(y_end)..y_end {
            for x in rect.x.min(x_end)..x_end {
                let idx = y * self.width + x;
                self.pixels[idx] = self.pixels[idx].inverted();
            }
        }
    }

    /// Draws a dotted line along every cell boundary: grey on even pixel
    /// coordinates, black on odd ones.
    pub fn draw_cell_grid(&mut self, cell_width: usize, cell_height: usize) {
        if cell_width == 0 || cell_height == 0 {
            return;
        }
        let dot = |i: usize| if i % 2 == 0 { Rgb::GREY } else { Rgb::BLACK };
        for y in 0..self.height {
            for x in 0..self.width {
                if x % cell_width == 0 {
                    self.set(x, y, dot(x));
                }
                if y % cell_height == 0 {
                    self.set(x, y, dot(y));
                }
            }
        }
    }

    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            image::Rgb(self.get(x as usize, y as usize).to_bytes())
        })
    }

    /// Writes the raster as an image; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        self.to_image().save(path)
    }
}

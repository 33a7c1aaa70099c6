// src/color.rs

//! The teletext palette.
//!
//! Teletext has exactly eight colors. A color control code carries them as a
//! 3-bit field: bit 0 is red, bit 1 green, bit 2 blue, each channel fully on
//! or fully off.

use serde::{Deserialize, Serialize};

/// One of the eight teletext colors, in 3-bit RGB field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TeletextColor {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
}

impl TeletextColor {
    /// Decodes the color field held in the low three bits of a control code.
    ///
    /// Alphanumeric color codes (1-7) and graphics color codes (17-23) share
    /// the same low bits, so both decode through here.
    pub fn from_code(code: u8) -> Self {
        match code & 0x07 {
            0 => TeletextColor::Black,
            1 => TeletextColor::Red,
            2 => TeletextColor::Green,
            3 => TeletextColor::Yellow,
            4 => TeletextColor::Blue,
            5 => TeletextColor::Magenta,
            6 => TeletextColor::Cyan,
            _ => TeletextColor::White,
        }
    }

    /// Returns the pixel value of this color.
    pub const fn to_rgb(self) -> Rgb {
        let bits = self as u8;
        Rgb::new(
            if bits & 1 != 0 { 255 } else { 0 },
            if bits & 2 != 0 { 255 } else { 0 },
            if bits & 4 != 0 { 255 } else { 0 },
        )
    }
}

/// A 24-bit RGB pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    /// Grid line color used by the cell grid overlay.
    pub const GREY: Rgb = Rgb::new(128, 128, 128);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise complement, used for cursor highlighting.
    pub const fn inverted(self) -> Self {
        Self::new(self.r ^ 255, self.g ^ 255, self.b ^ 255)
    }

    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<TeletextColor> for Rgb {
    fn from(color: TeletextColor) -> Self {
        color.to_rgb()
    }
}

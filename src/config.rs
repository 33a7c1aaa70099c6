// src/config.rs

//! Configuration for the teletext editor front end.
//!
//! Everything here is deserialized from a JSON file; any field that is
//! missing falls back to its default, so an empty `{}` is a valid config.
//! The rendering engine itself never reads this: it takes resolved flags per
//! call. These settings are for the code that drives it.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

// --- Top-Level Configuration Structure ---

/// Root of the configuration tree.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where the font and control icons live.
    pub assets: AssetConfig,
    /// What the rendered page shows.
    pub display: DisplayConfig,
    /// Blink periods for the cursor and flashing text.
    pub timing: TimingConfig,
}

impl Config {
    /// Reads a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Reads `path` if one is given, otherwise returns the defaults. A named
    /// file that cannot be read or parsed is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                info!("Configuration loaded (using default).");
                Ok(Self::default())
            }
        }
    }
}

// --- Assets ---

/// Locations of the glyph assets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    /// Packed teletext font (96 records of 36 bytes).
    pub font_path: PathBuf,
    /// Directory holding one icon per control code, named `00.<ext>` to `31.<ext>`.
    pub control_icon_dir: PathBuf,
    /// File extension of the icon images.
    pub control_icon_extension: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        AssetConfig {
            font_path: PathBuf::from("assets/teletext.fnt"),
            control_icon_dir: PathBuf::from("assets/control"),
            control_icon_extension: "png".to_string(),
        }
    }
}

// --- Display ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Overlay an icon on every control code cell.
    pub show_control_codes: bool,
    /// Draw a dotted line on every cell boundary.
    pub show_grid: bool,
    /// When false, flashing text is always shown.
    pub flash_enabled: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            show_control_codes: true,
            show_grid: false,
            flash_enabled: true,
        }
    }
}

// --- Timing ---

/// Blink periods. Each period is the time spent in one phase, so a full
/// on/off cycle takes twice as long.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    pub cursor_blink_ms: u64,
    pub text_flash_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            cursor_blink_ms: 200,
            text_flash_ms: 500,
        }
    }
}

impl TimingConfig {
    /// Whether flashing text is visible `elapsed` after the display started.
    pub fn flash_visible(&self, elapsed: Duration) -> bool {
        phase_on(self.text_flash_ms, elapsed)
    }

    /// Whether the cursor highlight is drawn `elapsed` after it last moved.
    pub fn cursor_visible(&self, elapsed: Duration) -> bool {
        phase_on(self.cursor_blink_ms, elapsed)
    }
}

/// Both blinkers start in the "on" phase.
fn phase_on(period_ms: u64, elapsed: Duration) -> bool {
    if period_ms == 0 {
        return true;
    }
    (elapsed.as_millis() / u128::from(period_ms)) % 2 == 0
}

// src/assets.rs

//! Loading the glyph assets from disk.
//!
//! Two assets feed the `GlyphSet`: the packed teletext font, and one small
//! image per control code that is overlaid when codes are made visible. Icons
//! may use any lossless format the `image` crate can sniff (PNG, PBM/PGM, BMP).
//! A pixel counts as set when its luma is at least half intensity.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::AssetConfig;
use crate::error::AssetLoadError;
use crate::font::{GlyphSet, CONTROL_CODE_COUNT};
use crate::glyph::{GlyphBitmap, GLYPH_HEIGHT, GLYPH_WIDTH};

const LUMA_THRESHOLD: u8 = 128;

/// Decodes one icon image into a glyph-sized mask.
///
/// `index` is only used to label errors.
pub fn decode_icon(index: usize, bytes: &[u8]) -> Result<GlyphBitmap, AssetLoadError> {
    let image = image::load_from_memory(bytes)
        .map_err(|source| AssetLoadError::IconDecode { index, source })?
        .to_luma8();

    let (width, height) = image.dimensions();
    if width as usize != GLYPH_WIDTH || height as usize != GLYPH_HEIGHT {
        return Err(AssetLoadError::IconGeometry {
            index,
            width,
            height,
        });
    }

    Ok(GlyphBitmap::from_fn(|col, row| {
        image.get_pixel(col as u32, row as u32).0[0] >= LUMA_THRESHOLD
    }))
}

/// Builds a `GlyphSet` from in-memory asset bytes: the packed font and the
/// encoded icon images in control-code order.
pub fn glyph_set_from_bytes<B: AsRef<[u8]>>(
    font: &[u8],
    icons: &[B],
) -> Result<GlyphSet, AssetLoadError> {
    if icons.len() != CONTROL_CODE_COUNT {
        return Err(AssetLoadError::IconCount {
            expected: CONTROL_CODE_COUNT,
            actual: icons.len(),
        });
    }
    let masks = icons
        .iter()
        .enumerate()
        .map(|(index, bytes)| decode_icon(index, bytes.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    GlyphSet::new(font, masks)
}

/// Path of the icon for control code `index` under `config`.
pub fn icon_path(config: &AssetConfig, index: usize) -> PathBuf {
    config
        .control_icon_dir
        .join(format!("{:02}.{}", index, config.control_icon_extension))
}

fn read_asset(path: &Path) -> Result<Vec<u8>, AssetLoadError> {
    fs::read(path).map_err(|source| AssetLoadError::Missing {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads the font file and all 32 icon files named by `config` and builds the
/// glyph set.
pub fn load_glyph_set(config: &AssetConfig) -> Result<GlyphSet, AssetLoadError> {
    info!(
        "Loading teletext font from {} and control icons from {}",
        config.font_path.display(),
        config.control_icon_dir.display()
    );
    let font = read_asset(&config.font_path)?;
    debug!("Font asset is {} bytes", font.len());

    let icons = (0..CONTROL_CODE_COUNT)
        .map(|index| read_asset(&icon_path(config, index)))
        .collect::<Result<Vec<_>, _>>()?;

    glyph_set_from_bytes(&font, &icons)
}

// src/main.rs

//! Command-line front end for the teletext renderer.
//!
//! ```text
//! teletext-edit render <page> <out-image> [--config <json>] [--no-codes]
//!               [--flash-off] [--grid] [--cursor X,Y]
//!               [--mode character|graphics|text]
//! teletext-edit blank <page>
//! teletext-edit sixel <page> <x> <y> on|off|toggle
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{info, warn};

use teletext_edit::config::Config;
use teletext_edit::editor::{Cursor, EditMode};
use teletext_edit::sixel::{self, SetMode};
use teletext_edit::{assets, PageBuffer, Renderer};

#[derive(Parser, Debug)]
#[command(name = "teletext-edit", about = "Render and edit teletext page dumps")]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Render a page dump to an image file
    Render(RenderArgs),
    /// Write an all-space page dump
    Blank {
        /// Page dump to create or overwrite
        page: PathBuf,
    },
    /// Set, clear or flip one mosaic sub-cell of a page dump in place
    Sixel {
        page: PathBuf,
        /// Sub-cell column, 0 to 79
        x: usize,
        /// Sub-cell row, 0 to 74
        y: usize,
        #[arg(value_enum)]
        mode: SixelAction,
    },
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Raw 40x25 page dump
    page: PathBuf,
    /// Output image; the format follows the extension
    output: PathBuf,
    /// JSON configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Do not overlay control-code icons
    #[arg(long)]
    no_codes: bool,
    /// Render the "off" phase of flashing text
    #[arg(long)]
    flash_off: bool,
    /// Draw the cell grid
    #[arg(long)]
    grid: bool,
    /// Highlight the cursor at sub-cell X,Y
    #[arg(long, value_name = "X,Y", value_parser = parse_cursor)]
    cursor: Option<(isize, isize)>,
    /// How the cursor highlight is drawn
    #[arg(long, value_enum, default_value_t = ModeArg::Character)]
    mode: ModeArg,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ModeArg {
    Character,
    Graphics,
    Text,
}

impl From<ModeArg> for EditMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Character => EditMode::Character,
            ModeArg::Graphics => EditMode::Graphics,
            ModeArg::Text => EditMode::Text,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SixelAction {
    On,
    Off,
    Toggle,
}

impl From<SixelAction> for SetMode {
    fn from(action: SixelAction) -> Self {
        match action {
            SixelAction::On => SetMode::On,
            SixelAction::Off => SetMode::Off,
            SixelAction::Toggle => SetMode::Toggle,
        }
    }
}

fn parse_cursor(s: &str) -> Result<(isize, isize), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{}'", s))?;
    let x = x.trim().parse().map_err(|e| format!("invalid X: {}", e))?;
    let y = y.trim().parse().map_err(|e| format!("invalid Y: {}", e))?;
    Ok((x, y))
}

fn render(opts: RenderArgs) -> Result<()> {
    let config = Config::load_or_default(opts.config.as_deref())?;

    let glyphs = assets::load_glyph_set(&config.assets).context("Failed to load glyph assets")?;
    let page = PageBuffer::load(&opts.page)
        .with_context(|| format!("Failed to load page '{}'", opts.page.display()))?;

    let mut renderer = Renderer::new(Arc::new(glyphs));
    let show_codes = config.display.show_control_codes && !opts.no_codes;
    // With flashing disabled, flashing text is always shown.
    let flash_visible = !config.display.flash_enabled || !opts.flash_off;
    let mut raster = renderer
        .render(&page, show_codes, flash_visible)
        .context("Failed to render page")?
        .clone();

    if config.display.show_grid || opts.grid {
        let (cw, ch) = renderer.glyph_cell_pixel_size();
        raster.draw_cell_grid(cw, ch);
    }

    if let Some((x, y)) = opts.cursor {
        let (cols, rows) = renderer.dimensions();
        let mut cursor = Cursor::new(cols, rows);
        cursor.set(x, y);
        raster.invert_rect(cursor.highlight(&renderer, opts.mode.into()));
    }

    raster
        .save(&opts.output)
        .with_context(|| format!("Failed to write image '{}'", opts.output.display()))?;
    info!(
        "Rendered {} to {} ({}x{} px)",
        opts.page.display(),
        opts.output.display(),
        raster.width(),
        raster.height()
    );
    Ok(())
}

fn edit_sixel(path: PathBuf, x: usize, y: usize, mode: SetMode) -> Result<()> {
    let mut page = PageBuffer::load(&path)
        .with_context(|| format!("Failed to load page '{}'", path.display()))?;

    let (col, row) = sixel::cell_of(x, y);
    let code = page
        .get(col, row)
        .ok_or_else(|| anyhow!("Sixel ({}, {}) is outside the page", x, y))?;
    if !sixel::is_graphic(code) {
        warn!(
            "Cell ({}, {}) holds code {}, which does not render as a mosaic",
            col, row, code
        );
    }

    sixel::set(&mut page, x, y, mode);
    page.save(&path)
        .with_context(|| format!("Failed to write page '{}'", path.display()))?;
    info!("Sixel ({}, {}) set {:?} in {}", x, y, mode, path.display());
    Ok(())
}

fn main() -> Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Cmd::Render(opts) => render(opts),
        Cmd::Blank { page } => {
            PageBuffer::blank()
                .save(&page)
                .with_context(|| format!("Failed to write page '{}'", page.display()))?;
            info!("Wrote blank page to {}", page.display());
            Ok(())
        }
        Cmd::Sixel { page, x, y, mode } => edit_sixel(page, x, y, mode.into()),
    }
}

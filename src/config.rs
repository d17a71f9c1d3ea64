use anyhow::{ensure, Result};
use log::warn;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{common::ColorRGB, persist};

// Neon colors for slots 1-7 (I, J, L, O, S, T, Z). Slot 0 is the empty cell.
const NEON_PALETTE: [ColorRGB; 7] = [
    [0, 255, 255],
    [60, 100, 255],
    [255, 180, 50],
    [255, 255, 0],
    [50, 255, 50],
    [220, 50, 255],
    [255, 50, 50],
];

// Largest bitmap either generator will allocate.
pub const MAX_PIXELS: u32 = 1 << 24;

fn ensure_pixel_count(what: &str, width: u32, height: u32) -> Result<()> {
    let pixels = width.checked_mul(height);
    ensure!(
        pixels.is_some_and(|n| n <= MAX_PIXELS),
        "{} {}x{} exceeds {} pixels",
        what,
        width,
        height,
        MAX_PIXELS
    );
    Ok(())
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TileSheetConfig {
    pub tile_size: u32,
    pub num_tiles: u32,
    // Entry k colors slot k + 1.
    pub palette: Vec<ColorRGB>,
    pub preview_path: PathBuf,
    pub mem_path: PathBuf,
}

impl Default for TileSheetConfig {
    fn default() -> Self {
        TileSheetConfig {
            tile_size: 20,
            num_tiles: 8,
            palette: NEON_PALETTE.to_vec(),
            preview_path: PathBuf::from("blocks.png"),
            mem_path: PathBuf::from("blocks.mem"),
        }
    }
}

impl TileSheetConfig {
    pub fn sheet_width(&self) -> u32 {
        self.tile_size
    }

    pub fn sheet_height(&self) -> u32 {
        self.tile_size * self.num_tiles
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ResizeConfig {
    pub input_path: PathBuf,
    pub mem_path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        // Half of VGA 640x480.
        ResizeConfig {
            input_path: PathBuf::from("background.ppm"),
            mem_path: PathBuf::from("images.mem"),
            width: 320,
            height: 240,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct CompressConfig {
    pub chroma_key: u32,
    pub chroma_key_code: u8,
}

impl Default for CompressConfig {
    fn default() -> Self {
        CompressConfig {
            chroma_key: 0x0F0,
            chroma_key_code: 0x1C,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    pub blocks: TileSheetConfig,
    pub background: ResizeConfig,
    pub compress: CompressConfig,
}

impl AssetConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let config: AssetConfig = persist::load_json(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        persist::save_json(path, self)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.blocks.tile_size > 0, "tile size must be non-zero");
        ensure!(self.blocks.num_tiles > 0, "tile count must be non-zero");
        ensure!(
            self.background.width > 0 && self.background.height > 0,
            "target size {}x{} must be non-zero",
            self.background.width,
            self.background.height
        );
        ensure!(
            self.blocks.tile_size.checked_mul(self.blocks.num_tiles).is_some(),
            "tile sheet of {} tiles of {} px is too tall",
            self.blocks.num_tiles,
            self.blocks.tile_size
        );
        ensure_pixel_count(
            "tile sheet",
            self.blocks.sheet_width(),
            self.blocks.sheet_height(),
        )?;
        ensure_pixel_count("target size", self.background.width, self.background.height)?;
        let colored_slots = self.blocks.num_tiles as usize - 1;
        if self.blocks.palette.len() < colored_slots {
            warn!(
                "Palette has {} colors for {} tile slots; the rest stay black.",
                self.blocks.palette.len(),
                colored_slots
            );
        }
        Ok(())
    }
}

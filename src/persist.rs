use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use itertools::Itertools;
use json_pretty_compact::PrettyCompactFormatter;
use log::info;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Serializer;

use crate::{common::Bitmap, helpers::quantize_rgb444};

pub fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    info!("Saving {}", path.display());
    let formatter = PrettyCompactFormatter::new();
    let mut data_bytes = vec![];
    let mut ser = Serializer::with_formatter(&mut data_bytes, formatter);
    data.serialize(&mut ser)?;
    fs::create_dir_all(path.parent().context("invalid parent directory")?)?;
    fs::write(path, &data_bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    info!("Loading {}", path.display());
    let data_bytes =
        std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let data: T = serde_json::from_slice(&data_bytes)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(data)
}

/// Writes one RGB444 value per pixel as three lowercase hex digits, scanning
/// rows top to bottom so that line `n` is memory address `y * width + x`.
/// Returns the number of lines written.
pub fn write_mem<W: Write>(out: &mut W, bitmap: &Bitmap) -> Result<usize> {
    let mut count = 0;
    for (y, x) in (0..bitmap.height()).cartesian_product(0..bitmap.width()) {
        writeln!(out, "{:03x}", quantize_rgb444(bitmap.get(x, y)))?;
        count += 1;
    }
    Ok(count)
}

pub fn save_mem(path: &Path, bitmap: &Bitmap) -> Result<usize> {
    info!("Writing {}", path.display());
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    let count = write_mem(&mut out, bitmap)?;
    out.flush()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(count)
}

pub fn save_png(path: &Path, bitmap: &Bitmap) -> Result<()> {
    info!("Saving {}", path.display());
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), bitmap.width(), bitmap.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&bitmap.to_rgb_bytes())?;
    writer.finish()?;
    Ok(())
}

use crate::{common::ColorRGB, config::CompressConfig};

/// Darkens every channel by integer division. `factor` must be non-zero.
pub fn darken(c: ColorRGB, factor: u8) -> ColorRGB {
    debug_assert!(factor > 0);
    [c[0] / factor, c[1] / factor, c[2] / factor]
}

/// Packs the top nibble of each channel as RGB444: `0xRGB`.
pub fn quantize_rgb444(c: ColorRGB) -> u16 {
    let r4 = (c[0] >> 4) as u16;
    let g4 = (c[1] >> 4) as u16;
    let b4 = (c[2] >> 4) as u16;
    r4 << 8 | g4 << 4 | b4
}

/// Reduces an RGB444 value to RGB332. The chroma key maps to a reserved code.
pub fn compress_rgb444(value: u32, config: &CompressConfig) -> u8 {
    if value == config.chroma_key {
        return config.chroma_key_code;
    }
    let r = (value >> 8) & 0xF;
    let g = (value >> 4) & 0xF;
    let b = value & 0xF;
    ((r >> 1) << 5 | (g >> 1) << 2 | b >> 2) as u8
}

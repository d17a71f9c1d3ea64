// Converts RGB444 .mem dumps into the 8-bit RGB332 layout used by sprite ROMs.
use std::{
    fs::File,
    io::{BufRead, BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::{config::CompressConfig, helpers::compress_rgb444};

/// Parses a token the way `scanf("%x")` does: an optional sign, an optional
/// `0x` prefix, then the longest run of hex digits. Digits beyond 32 bits wrap
/// and a `-` sign negates in two's complement. Trailing garbage is ignored; a
/// token with no leading digit yields `None`.
pub fn parse_hex_token(token: &str) -> Option<u32> {
    let (negative, rest) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };
    let digits = rest
        .strip_prefix("0x")
        .or_else(|| rest.strip_prefix("0X"))
        .filter(|tail| tail.starts_with(|c: char| c.is_ascii_hexdigit()))
        .unwrap_or(rest);
    let end = digits
        .find(|c: char| !c.is_ascii_hexdigit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value = digits[..end]
        .chars()
        .filter_map(|c| c.to_digit(16))
        .fold(0u32, |acc, d| acc.wrapping_mul(16).wrapping_add(d));
    Some(if negative { value.wrapping_neg() } else { value })
}

/// Reads whitespace-separated RGB444 values and writes one RGB332 value per
/// line as two lowercase hex digits. Returns the number of values written.
pub fn compress_stream<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    config: &CompressConfig,
) -> Result<usize> {
    let mut count = 0;
    for line in input.lines() {
        for token in line?.split_whitespace() {
            let Some(value) = parse_hex_token(token) else {
                debug!("Skipping non-hex token {:?}", token);
                continue;
            };
            writeln!(out, "{:02x}", compress_rgb444(value, config))?;
            count += 1;
        }
    }
    Ok(count)
}

pub fn compress_to_file<R: BufRead>(input: R, path: &Path, config: &CompressConfig) -> Result<usize> {
    let file = File::create(path).with_context(|| format!("Cannot create file '{}'", path.display()))?;
    info!("Output file: {}", path.display());
    let mut out = BufWriter::new(file);
    let count = compress_stream(input, &mut out, config)?;
    out.flush()?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_like_scanf_hex() {
        assert_eq!(parse_hex_token("0f0"), Some(0x0F0));
        assert_eq!(parse_hex_token("0xfff"), Some(0xFFF));
        assert_eq!(parse_hex_token("1a3,"), Some(0x1A3));
        assert_eq!(parse_hex_token("0x"), Some(0));
        assert_eq!(parse_hex_token("zz"), None);
        assert_eq!(parse_hex_token(""), None);
        assert_eq!(parse_hex_token("-"), None);
    }

    #[test]
    fn signed_and_wide_tokens_wrap() {
        assert_eq!(parse_hex_token("+0f0"), Some(0x0F0));
        assert_eq!(parse_hex_token("-1"), Some(u32::MAX));
        assert_eq!(parse_hex_token("-0x10"), Some(0u32.wrapping_sub(0x10)));
        assert_eq!(parse_hex_token("123456789"), Some(0x2345_6789));
    }

    #[test]
    fn signed_and_wide_tokens_keep_their_slot() {
        let input = "+0f0 -1 123456789 0f0".as_bytes();
        let mut out = vec![];
        let count = compress_stream(input, &mut out, &CompressConfig::default()).unwrap();
        assert_eq!(count, 4);
        assert_eq!(String::from_utf8(out).unwrap(), "1c\nff\n72\n1c\n");
    }

    #[test]
    fn converts_pasted_dump() {
        let input = "fff 0f0\n--- f00\n\n 00f\n".as_bytes();
        let mut out = vec![];
        let count = compress_stream(input, &mut out, &CompressConfig::default()).unwrap();
        assert_eq!(count, 4);
        assert_eq!(String::from_utf8(out).unwrap(), "ff\n1c\ne0\n03\n");
    }

    #[test]
    fn file_output_matches_stream() {
        let path = std::env::temp_dir().join(format!("mem_assets_rgb332_{}.mem", std::process::id()));
        let count = compress_to_file("abc 123".as_bytes(), &path, &CompressConfig::default()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(count, 2);
        // 0xabc -> r=5 g=5 b=3, 0x123 -> r=0 g=1 b=0
        assert_eq!(text, "b7\n04\n");
    }
}

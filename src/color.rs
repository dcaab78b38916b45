use image::Rgb;

use crate::{BackdropError, BackdropResult};

/// Parse a color given as `#rrggbb`, `rrggbb` or `r,g,b`.
pub fn parse_rgb(value: &str) -> BackdropResult<Rgb<u8>> {
    let trimmed = value.trim();
    let invalid = || BackdropError::InvalidColor(value.to_string());

    if trimmed.contains(',') {
        let channels: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        let [r, g, b] = channels.as_slice() else {
            return Err(invalid());
        };
        let channel = |s: &str| s.parse::<u8>().map_err(|_| invalid());
        return Ok(Rgb([channel(*r)?, channel(*g)?, channel(*b)?]));
    }

    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
    };
    Ok(Rgb([channel(0..2)?, channel(2..4)?, channel(4..6)?]))
}

/// Format a color as lowercase `#rrggbb`.
pub fn to_hex(rgb: Rgb<u8>) -> String {
    let Rgb([r, g, b]) = rgb;
    format!("#{r:02x}{g:02x}{b:02x}")
}

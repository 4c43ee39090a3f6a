//! Color parsing for the marble's tint colors.
//!
//! Supports `#RGB`, `#RRGGBB`, `#RRGGBBAA`, `rgb(r,g,b)` and
//! `rgba(r,g,b,a)`. In `rgba()` the alpha may be 0-255 (integer) or
//! 0.0-1.0 (float), matching CSS conventions. Only the RGB channels reach
//! the shader.

mod parse;

#[cfg(test)]
mod tests;

use marble_common::types::Color;
use marble_common::ConfigError;

use parse::{parse_hex, parse_rgba, HEX_RE, RGBA_RE};

/// Parse a color string into a [`Color`].
pub fn parse_color(s: &str) -> Result<Color, ConfigError> {
    let s = s.trim();

    if s.starts_with('#') {
        if let Some(color) = parse_hex(s) {
            return Ok(color);
        }
        return Err(ConfigError::ParseError(format!("invalid hex color: {s}")));
    }

    if s.starts_with("rgba(") || s.starts_with("rgb(") {
        if let Some(color) = parse_rgba(s) {
            return Ok(color);
        }
        return Err(ConfigError::ParseError(format!("invalid rgb color: {s}")));
    }

    Err(ConfigError::ParseError(format!(
        "unrecognized color format: {s}"
    )))
}

/// Validate that a string is a recognized color format.
pub fn validate_color(s: &str) -> bool {
    let s = s.trim();
    if s.is_empty() {
        return false;
    }
    if s.starts_with('#') {
        return HEX_RE.is_match(s);
    }
    if s.starts_with("rgba(") || s.starts_with("rgb(") {
        return RGBA_RE.is_match(s) && parse_rgba(s).is_some();
    }
    false
}

/// Parse a color string straight to linear `[r, g, b]` in 0.0-1.0.
///
/// The bytes are divided by 255 with no sRGB decoding, so `#00ffaa`
/// becomes `[0.0, 1.0, 0.6667]`.
pub fn parse_rgb_f32(s: &str) -> Result<[f32; 3], ConfigError> {
    Ok(parse_color(s)?.to_rgb_f32())
}

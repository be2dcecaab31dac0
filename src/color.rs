//! Color transforms and the cosmetic palette.
//!
//! Transforms only understand the six-digit `#rrggbb` form. Everything else
//! (named colors, `rgb(...)`, gradient references, short `#rgb`) is returned
//! unchanged. Transformed colors come back as `rgb(r, g, b)`, so applying a
//! second transform to an already-transformed fill is a pass-through.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use rand::Rng;

/// Palette used for random fills.
pub const PALETTE: [&str; 16] = [
    "#f44336", "#e91e63", "#9c27b0", "#673ab7", "#3f51b5", "#2196f3", "#03a9f4", "#00bcd4", "#009688", "#4caf50",
    "#8bc34a", "#cddc39", "#ffeb3b", "#ffc107", "#ff9800", "#ff5722",
];

/// Parse `#rrggbb` (case-insensitive) into RGB channels.
#[must_use]
pub fn parse_hex_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.strip_prefix('#')?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Luminance-weighted grayscale.
#[must_use]
pub fn grayscale(color: &str) -> String {
    let Some((r, g, b)) = parse_hex_rgb(color) else {
        return color.to_owned();
    };
    let gray = channel(0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b));
    rgb(gray, gray, gray)
}

/// Classic sepia matrix, each channel clamped at 255.
#[must_use]
pub fn sepia(color: &str) -> String {
    let Some((r, g, b)) = parse_hex_rgb(color) else {
        return color.to_owned();
    };
    let (r, g, b) = (f64::from(r), f64::from(g), f64::from(b));
    rgb(
        channel(0.393 * r + 0.769 * g + 0.189 * b),
        channel(0.349 * r + 0.686 * g + 0.168 * b),
        channel(0.272 * r + 0.534 * g + 0.131 * b),
    )
}

/// Every channel scaled by 1.2, clamped at 255.
#[must_use]
pub fn vibrant(color: &str) -> String {
    let Some((r, g, b)) = parse_hex_rgb(color) else {
        return color.to_owned();
    };
    let boost = |c: u8| channel(f64::from(c) * 1.2);
    rgb(boost(r), boost(g), boost(b))
}

/// Uniformly random palette entry.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    PALETTE[rng.random_range(0..PALETTE.len())]
}

/// Perturb each channel of a `#rrggbb` color by a uniform amount in
/// `[-spread, spread]`, clamp to `[0, 255]`, and floor.
///
/// Returns `None` when `base` is not a hex color.
pub fn jitter_color<R: Rng + ?Sized>(base: &str, spread: f64, rng: &mut R) -> Option<String> {
    let (r, g, b) = parse_hex_rgb(base)?;
    let mut jitter = |c: u8| {
        let offset = if spread > 0.0 { rng.random_range(-spread..=spread) } else { 0.0 };
        floor_channel(f64::from(c) + offset)
    };
    let (r, g, b) = (jitter(r), jitter(g), jitter(b));
    Some(rgb(r, g, b))
}

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("rgb({r}, {g}, {b})")
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn floor_channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0).floor() as u8
}

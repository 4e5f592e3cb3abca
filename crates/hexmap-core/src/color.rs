//! Hex-triplet colors.

use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Color used whenever a color string cannot be parsed.
pub const DEFAULT_BLUE: Rgb = Rgb::new(59, 130, 246);

/// Color parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("Invalid hex color: {0:?}")]
    Invalid(String),
}

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }

    /// Parse a `#RGB` or `#RRGGBB` string, falling back to [`DEFAULT_BLUE`].
    pub fn parse_or_default(input: &str) -> Self {
        input.parse().unwrap_or(DEFAULT_BLUE)
    }

    /// Format as `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to a peniko color with the given opacity (0.0 - 1.0).
    pub fn with_opacity(self, opacity: f64) -> Color {
        let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color::from_rgba8(self.r, self.g, self.b, alpha)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    /// Accepts `RGB` or `RRGGBB` hex digits with an optional leading `#`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorParseError::Invalid(input.to_string());
        let digits = input.strip_prefix('#').unwrap_or(input);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            3 => {
                // #rgb -> #rrggbb
                let r = channel(&digits[0..1])? * 17;
                let g = channel(&digits[1..2])? * 17;
                let b = channel(&digits[2..3])? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Rgb> for Color {
    fn from(color: Rgb) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, 255)
    }
}

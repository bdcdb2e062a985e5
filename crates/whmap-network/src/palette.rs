//! Default warehouse colors and hex conversion.
//!
//! Palette order is significant: the same warehouse ordering must always
//! produce the same default colors.

use serde::{Deserialize, Serialize};
use whmap_core::Rgb;

use crate::error::NetworkError;

/// Tableau 10.
pub const TABLEAU_10: [Rgb; 10] = [
    Rgb::new(31, 119, 180),
    Rgb::new(255, 127, 14),
    Rgb::new(44, 160, 44),
    Rgb::new(214, 39, 40),
    Rgb::new(148, 103, 189),
    Rgb::new(140, 86, 75),
    Rgb::new(227, 119, 194),
    Rgb::new(127, 127, 127),
    Rgb::new(188, 189, 34),
    Rgb::new(23, 190, 207),
];

/// A fixed, non-empty, ordered list of colors indexed with wraparound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPalette {
    colors: Vec<Rgb>,
}

impl ColorPalette {
    #[must_use]
    pub fn tableau10() -> Self {
        Self {
            colors: TABLEAU_10.to_vec(),
        }
    }

    /// Palette entry `index mod len`.
    #[must_use]
    pub fn color_at(&self, index: usize) -> Rgb {
        self.colors[index % self.colors.len()]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[must_use]
    pub fn hex_entries(&self) -> Vec<String> {
        self.colors.iter().copied().map(rgb_to_hex).collect()
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::tableau10()
    }
}

/// Parses `RRGGBB` or `#RRGGBB`, case-insensitive.
///
/// # Errors
///
/// Returns [`NetworkError::InvalidColorFormat`] unless the input is exactly six
/// hex digits after stripping one optional leading `#`.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, NetworkError> {
    let invalid = || NetworkError::InvalidColorFormat {
        value: hex.to_string(),
    };

    let digits = hex.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
    };
    Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Formats a color as lowercase `#rrggbb`.
///
/// Components are bytes, so out-of-range values are clamped earlier by
/// [`Rgb::clamped`] and this conversion is total.
#[must_use]
pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

/// A user-supplied color for one warehouse index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorOverride {
    Hex(String),
    /// Integer components, clamped to `0..=255`.
    Rgb([i64; 3]),
}

impl ColorOverride {
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidColorFormat`] for a malformed hex string.
    pub fn to_rgb(&self) -> Result<Rgb, NetworkError> {
        match self {
            ColorOverride::Hex(hex) => hex_to_rgb(hex),
            ColorOverride::Rgb([r, g, b]) => Ok(Rgb::clamped(*r, *g, *b)),
        }
    }
}

/// Splits a comma-separated list of hex colors, as accepted on the command
/// line and in query strings. Blank entries are skipped.
#[must_use]
pub fn parse_override_list(raw: &str) -> Vec<ColorOverride> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| ColorOverride::Hex(s.to_string()))
        .collect()
}

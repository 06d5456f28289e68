//! Color handling for map styling.
//!
//! Configuration refers to colors the way the original map did: by CSS color
//! name ("saddlebrown", "lightblue") or by `#rrggbb` hex string. Both forms
//! parse into a plain RGB value.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use plotters::style::RGBColor;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{LittoralError, Result};

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// CSS color names accepted in configuration.
static NAMED_COLORS: Lazy<HashMap<&'static str, Color>> = Lazy::new(|| {
    HashMap::from([
        ("black", Color::rgb(0, 0, 0)),
        ("white", Color::rgb(255, 255, 255)),
        ("whitesmoke", Color::rgb(245, 245, 245)),
        ("red", Color::rgb(255, 0, 0)),
        ("green", Color::rgb(0, 128, 0)),
        ("blue", Color::rgb(0, 0, 255)),
        ("gray", Color::rgb(128, 128, 128)),
        ("grey", Color::rgb(128, 128, 128)),
        ("dimgray", Color::rgb(105, 105, 105)),
        ("lightgray", Color::rgb(211, 211, 211)),
        ("navy", Color::rgb(0, 0, 128)),
        ("teal", Color::rgb(0, 128, 128)),
        ("olive", Color::rgb(128, 128, 0)),
        ("gold", Color::rgb(255, 215, 0)),
        ("khaki", Color::rgb(240, 230, 140)),
        ("coral", Color::rgb(255, 127, 80)),
        ("orange", Color::rgb(255, 165, 0)),
        ("darkorange", Color::rgb(255, 140, 0)),
        ("darkred", Color::rgb(139, 0, 0)),
        ("sienna", Color::rgb(160, 82, 45)),
        ("saddlebrown", Color::rgb(139, 69, 19)),
        ("seagreen", Color::rgb(46, 139, 87)),
        ("forestgreen", Color::rgb(34, 139, 34)),
        ("steelblue", Color::rgb(70, 130, 180)),
        ("royalblue", Color::rgb(65, 105, 225)),
        ("lightblue", Color::rgb(173, 216, 230)),
    ])
});

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a CSS color name or a `#rrggbb` hex string.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Some(color) = NAMED_COLORS.get(trimmed.to_lowercase().as_str()) {
            return Ok(*color);
        }
        if let Some(color) = parse_hex(trimmed) {
            return Ok(color);
        }
        Err(LittoralError::InvalidParameter {
            param: "color".to_string(),
            message: format!(
                "Unknown color: {}. Use a CSS color name or '#rrggbb'",
                trimmed
            ),
        })
    }

    pub fn to_plotters(&self) -> RGBColor {
        RGBColor(self.r, self.g, self.b)
    }
}

/// Parse a hex color string to RGB
fn parse_hex(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::rgb(r, g, b))
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = LittoralError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::parse(&s).map_err(D::Error::custom)
    }
}

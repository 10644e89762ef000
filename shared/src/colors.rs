use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MapError;

/// Straight-alpha RGBA color. Serialized as a CSS color string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

/// Overlay used for regions that don't declare their own highlight.
pub const DEFAULT_HIGHLIGHT: Rgba = Rgba::new(0, 0, 0, 0.2);

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Format as a CSS `rgba()` string.
    pub fn css(&self) -> String {
        rgba_css(self.r, self.g, self.b, self.a)
    }
}

/// Format RGBA as a CSS color string.
pub fn rgba_css(r: u8, g: u8, b: u8, a: f64) -> String {
    format!("rgba({r},{g},{b},{a})")
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css())
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.css()
    }
}

impl TryFrom<String> for Rgba {
    type Error = MapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for Rgba {
    type Err = MapError;

    /// Accepts `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` and `rgba(r, g, b, a)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || MapError::Config(format!("invalid color \"{s}\""));

        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(invalid);
        }

        let (body, with_alpha) = if let Some(body) = s.strip_prefix("rgba(") {
            (body, true)
        } else if let Some(body) = s.strip_prefix("rgb(") {
            (body, false)
        } else {
            return Err(invalid());
        };
        let body = body.strip_suffix(')').ok_or_else(invalid)?;
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();

        let channel = |p: &str| p.parse::<u8>().map_err(|_| invalid());
        match (with_alpha, parts.as_slice()) {
            (true, [r, g, b, a]) => {
                let a: f64 = a.parse().map_err(|_| invalid())?;
                if !a.is_finite() {
                    return Err(invalid());
                }
                Ok(Self::new(channel(r)?, channel(g)?, channel(b)?, a.clamp(0.0, 1.0)))
            }
            (false, [r, g, b]) => Ok(Self::opaque(channel(r)?, channel(g)?, channel(b)?)),
            _ => Err(invalid()),
        }
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        6 => Some(Rgba::opaque(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba::new(
            byte(0)?,
            byte(2)?,
            byte(4)?,
            byte(6)? as f64 / 255.0,
        )),
        _ => None,
    }
}

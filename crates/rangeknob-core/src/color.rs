#![forbid(unsafe_code)]

//! Packed RGBA colors passed through to the renderer.
//!
//! The engine never draws; it only decides which of the two configured range
//! colors applies and forwards it alongside the range frame.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A color packed as `0xRRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Rgba(pub u32);

impl Rgba {
    pub const TRANSPARENT: Self = Self(0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const LIGHT_GRAY: Self = Self::rgb(170, 170, 170);

    /// Opaque color from RGB components.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | a as u32)
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a() == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r(), self.g(), self.b())
        } else {
            write!(f, "#{:08x}", self.0)
        }
    }
}

/// Failure to parse a `#rrggbb` / `#rrggbbaa` color literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color literal {literal:?}: expected #rrggbb or #rrggbbaa")]
pub struct ParseRgbaError {
    pub literal: String,
}

impl FromStr for Rgba {
    type Err = ParseRgbaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseRgbaError {
            literal: s.to_string(),
        };
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
        match hex.len() {
            6 => Ok(Self((value << 8) | 0xFF)),
            8 => Ok(Self(value)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Rgba {
    type Error = ParseRgbaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}

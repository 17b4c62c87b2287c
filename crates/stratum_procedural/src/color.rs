//! # Map Colors
//!
//! One byte per channel RGBA, the pixel format of the region buffer and of
//! exported map images.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::MapError;

/// An RGBA color with one byte per channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Opaque white, the background of a fresh region buffer.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black, the default edge color.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque cyan, the default centroid color.
    pub const CYAN: Self = Self::rgb(0, 255, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    /// Opaque red.
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Opaque mid gray.
    pub const GRAY: Self = Self::rgb(128, 128, 128);
    /// Opaque green.
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    /// Opaque yellow.
    pub const YELLOW: Self = Self::rgb(255, 235, 4);
    /// Opaque magenta.
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);

    /// Creates an opaque color.
    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color with an explicit alpha.
    #[inline]
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque gray from a value in [0, 1].
    #[inline]
    #[must_use]
    pub fn gray(value: f32) -> Self {
        let v = (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::rgb(v, v, v)
    }

    /// Returns the channels as `[r, g, b, a]`.
    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Builds a color from `[r, g, b, a]`.
    #[inline]
    #[must_use]
    pub const fn from_array(c: [u8; 4]) -> Self {
        Self::rgba(c[0], c[1], c[2], c[3])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for Color {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MapError::InvalidColor(s.to_owned());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        assert_eq!("#00FFFF".parse::<Color>().unwrap(), Color::CYAN);
        assert_eq!("#ff000080".parse::<Color>().unwrap(), Color::rgba(255, 0, 0, 128));
        assert!("00FFFF".parse::<Color>().is_err());
        assert!("#00FF".parse::<Color>().is_err());
        assert!("#GG0000".parse::<Color>().is_err());
    }

    #[test]
    fn test_display_matches_parse() {
        for color in [Color::GRAY, Color::rgba(1, 2, 3, 4), Color::WHITE] {
            assert_eq!(color.to_string().parse::<Color>().unwrap(), color);
        }
    }

    #[test]
    fn test_gray_clamps() {
        assert_eq!(Color::gray(-1.0), Color::BLACK);
        assert_eq!(Color::gray(2.0), Color::WHITE);
        assert_eq!(Color::gray(0.5), Color::GRAY);
    }
}

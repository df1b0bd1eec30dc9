//! RGB color handling with hex parsing and serialization.
//!
//! This is the boundary where free-form color input (CLI flags, the color
//! picker, web requests) is turned into the canonical lowercase `#rrggbb`
//! strings stored in the configuration and the paint layer.

// Allow small types passed by reference for API consistency
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// RGB color value with hex string representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RgbColor {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl RgbColor {
    /// Creates a new `RgbColor` from individual channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses an `RgbColor` from a hex string.
    ///
    /// Supports "#rrggbb", "rrggbb" and the CSS shorthand "#rgb", in either case.
    ///
    /// # Examples
    ///
    /// ```
    /// use quilt_planner::models::RgbColor;
    ///
    /// let color = RgbColor::from_hex("#FFCC00").unwrap();
    /// assert_eq!(color, RgbColor::new(255, 204, 0));
    ///
    /// let color = RgbColor::from_hex("#0a5").unwrap();
    /// assert_eq!(color, RgbColor::new(0, 170, 85));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color format.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim();
        let digits = hex.strip_prefix('#').unwrap_or(hex);

        if !digits.is_ascii() {
            anyhow::bail!("Invalid hex color '{hex}'. Expected #rrggbb or #rgb");
        }

        match digits.len() {
            6 => {
                let r = u8::from_str_radix(&digits[0..2], 16)
                    .context(format!("Invalid red channel in hex color '{hex}'"))?;
                let g = u8::from_str_radix(&digits[2..4], 16)
                    .context(format!("Invalid green channel in hex color '{hex}'"))?;
                let b = u8::from_str_radix(&digits[4..6], 16)
                    .context(format!("Invalid blue channel in hex color '{hex}'"))?;
                Ok(Self::new(r, g, b))
            }
            3 => {
                let channel = |i: usize| -> Result<u8> {
                    let v = u8::from_str_radix(&digits[i..=i], 16)
                        .context(format!("Invalid digit in hex color '{hex}'"))?;
                    Ok(v * 17)
                };
                Ok(Self::new(channel(0)?, channel(1)?, channel(2)?))
            }
            _ => anyhow::bail!("Invalid hex color '{hex}'. Expected #rrggbb or #rgb"),
        }
    }

    /// Converts the color to a lowercase "#rrggbb" string.
    ///
    /// # Examples
    ///
    /// ```
    /// use quilt_planner::models::RgbColor;
    ///
    /// assert_eq!(RgbColor::new(0, 102, 255).to_hex(), "#0066ff");
    /// ```
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Normalizes any accepted hex spelling to lowercase "#rrggbb".
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a valid hex color.
    pub fn normalize(hex: &str) -> Result<String> {
        Ok(Self::from_hex(hex)?.to_hex())
    }

    /// Converts the color to a Ratatui Color for terminal rendering.
    #[cfg(feature = "ratatui")]
    #[must_use]
    pub const fn to_ratatui_color(&self) -> ratatui::style::Color {
        ratatui::style::Color::Rgb(self.r, self.g, self.b)
    }

    /// Returns a dimmed version of the color at the given percentage.
    ///
    /// * `percent` - Brightness percentage (0-100). 0 = black, 100 = original color.
    #[must_use]
    pub const fn dim(&self, percent: u8) -> Self {
        let percent = if percent > 100 { 100 } else { percent };
        Self {
            r: (self.r as u16 * percent as u16 / 100) as u8,
            g: (self.g as u16 * percent as u16 / 100) as u8,
            b: (self.b as u16 * percent as u16 / 100) as u8,
        }
    }

    /// Perceived brightness (ITU-R BT.601 weights), 0-255.
    #[must_use]
    pub fn luminance(&self) -> u8 {
        let y = 0.299 * f32::from(self.r) + 0.587 * f32::from(self.g) + 0.114 * f32::from(self.b);
        y.round().clamp(0.0, 255.0) as u8
    }

    /// Black or white, whichever reads better on top of this color.
    #[must_use]
    pub fn contrast_text(&self) -> Self {
        if self.luminance() > 140 {
            Self::new(0, 0, 0)
        } else {
            Self::new(255, 255, 255)
        }
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Default for RgbColor {
    /// Default color is white (#ffffff)
    fn default() -> Self {
        Self::new(255, 255, 255)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_valid() {
        assert_eq!(RgbColor::from_hex("#FF0000").unwrap(), RgbColor::new(255, 0, 0));
        assert_eq!(RgbColor::from_hex("00ff00").unwrap(), RgbColor::new(0, 255, 0));
        assert_eq!(RgbColor::from_hex("  #d4af37 ").unwrap(), RgbColor::new(212, 175, 55));
    }

    #[test]
    fn test_from_hex_shorthand() {
        assert_eq!(RgbColor::from_hex("#fff").unwrap(), RgbColor::new(255, 255, 255));
        assert_eq!(RgbColor::from_hex("abc").unwrap(), RgbColor::new(170, 187, 204));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(RgbColor::from_hex("").is_err());
        assert!(RgbColor::from_hex("#GG0000").is_err());
        assert!(RgbColor::from_hex("#12345").is_err());
        assert!(RgbColor::from_hex("#1234567").is_err());
        assert!(RgbColor::from_hex("#ééé").is_err());
        assert!(RgbColor::from_hex("__fabric__").is_err());
    }

    #[test]
    fn test_normalize_lowercases() {
        assert_eq!(RgbColor::normalize("#FFCC00").unwrap(), "#ffcc00");
        assert_eq!(RgbColor::normalize("#0A5").unwrap(), "#00aa55");
    }

    #[test]
    fn test_dim() {
        assert_eq!(RgbColor::new(200, 100, 50).dim(50), RgbColor::new(100, 50, 25));
        assert_eq!(RgbColor::new(200, 100, 50).dim(150), RgbColor::new(200, 100, 50));
    }

    #[test]
    fn test_contrast_text() {
        assert_eq!(RgbColor::new(255, 255, 255).contrast_text(), RgbColor::new(0, 0, 0));
        assert_eq!(RgbColor::new(0, 0, 0).contrast_text(), RgbColor::new(255, 255, 255));
        assert_eq!(RgbColor::new(85, 85, 85).contrast_text(), RgbColor::new(255, 255, 255));
    }

    #[test]
    fn test_display_matches_to_hex() {
        let color = RgbColor::new(18, 52, 86);
        assert_eq!(color.to_string(), "#123456");
    }
}

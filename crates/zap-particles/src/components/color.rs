use serde::{Deserialize, Serialize};

use crate::api::error::ParticleError;

/// RGBA color with components in 0.0 - 1.0.
///
/// Serialized as a hex string (`#rrggbb` or `#aarrggbb`) so host
/// configuration can use the same notation as CSS.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a color from RGBA components (0.0 - 1.0).
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color from RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGB u8 values (0-255) with full opacity.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba8(r, g, b, 255)
    }

    /// Create a color from RGBA u8 values (0-255).
    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create a color with the given alpha value.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Parse `#rgb`, `#rrggbb` or `#aarrggbb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Result<Self, ParticleError> {
        let digits = hex.trim().trim_start_matches('#');
        let invalid = || ParticleError::InvalidColor(hex.to_string());
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        match digits.len() {
            3 => {
                let nibble = |i: usize| {
                    u8::from_str_radix(&digits[i..i + 1], 16)
                        .map(|n| n * 17)
                        .map_err(|_| invalid())
                };
                Ok(Self::rgb8(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Ok(Self::rgb8(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::rgba8(byte(2)?, byte(4)?, byte(6)?, byte(0)?)),
            _ => Err(invalid()),
        }
    }

    /// Quantize to 8-bit RGBA.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// CSS `rgba()` notation, for canvas fill styles.
    pub fn to_css(self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("rgba({}, {}, {}, {:.3})", r, g, b, self.a.clamp(0.0, 1.0))
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const DODGER_BLUE: Self = Self::rgb8(0x1e, 0x90, 0xff);
    pub const CORNFLOWER_BLUE: Self = Self::rgb8(0x64, 0x95, 0xed);
    pub const PALE_VIOLET_RED: Self = Self::rgb8(0xdb, 0x70, 0x93);
    pub const LIGHT_PINK: Self = Self::rgb8(0xff, 0xb6, 0xc1);
    pub const GOLDENROD: Self = Self::rgb8(0xda, 0xa5, 0x20);
    pub const GOLD: Self = Self::rgb8(0xff, 0xd7, 0x00);
    pub const RED: Self = Self::rgb8(0xff, 0x00, 0x00);
    pub const LAWN_GREEN: Self = Self::rgb8(0x7c, 0xfc, 0x00);
}

/// Palette used when the host supplies no colors.
pub const DEFAULT_PALETTE: [Color; 7] = [
    Color::DODGER_BLUE,
    Color::CORNFLOWER_BLUE,
    Color::PALE_VIOLET_RED,
    Color::LIGHT_PINK,
    Color::GOLDENROD,
    Color::GOLD,
    Color::RED,
];

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl TryFrom<String> for Color {
    type Error = ParticleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        let [r, g, b, a] = color.to_rgba8();
        if a == 255 {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", a, r, g, b)
        }
    }
}

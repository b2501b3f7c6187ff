use serde::{de, Deserialize, Deserializer};

/// A colour, expressed in RGB, CMYK or grey colour spaces
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceCMYK colour; c, m, y, and k range from 0.0 to 1.0
    CMYK { c: f32, m: f32, y: f32, k: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parse a `#rrggbb` (or `rrggbb`) hex string into an RGB colour
    pub fn from_hex(hex: &str) -> Option<Colour> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Colour::new_rgb_bytes(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl<T: Into<f32>> From<(T, T, T)> for Colour {
    fn from(c: (T, T, T)) -> Self {
        Colour::RGB {
            r: c.0.into(),
            g: c.1.into(),
            b: c.2.into(),
        }
    }
}

impl<'de> Deserialize<'de> for Colour {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Colour::from_hex(&hex)
            .ok_or_else(|| de::Error::custom(format!("invalid hex colour `{hex}`")))
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    /// Deep clinical blue used for borders and headings
    pub const NAVY: Colour = Colour::RGB {
        r: 0x1a as f32 / 255.0,
        g: 0x52 as f32 / 255.0,
        b: 0x76 as f32 / 255.0,
    };
    /// Muted blue-grey used for labels
    pub const SLATE: Colour = Colour::RGB {
        r: 0x5d as f32 / 255.0,
        g: 0x6d as f32 / 255.0,
        b: 0x7e as f32 / 255.0,
    };
    /// Near-black used for body text
    pub const INK: Colour = Colour::RGB {
        r: 0x2c as f32 / 255.0,
        g: 0x3e as f32 / 255.0,
        b: 0x50 as f32 / 255.0,
    };
    /// Teal accent used for handwritten-style values
    pub const TEAL: Colour = Colour::RGB {
        r: 0x14 as f32 / 255.0,
        g: 0x8f as f32 / 255.0,
        b: 0x77 as f32 / 255.0,
    };
}

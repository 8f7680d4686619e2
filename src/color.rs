//! RGB color value and the packed color-table codec.
//!
//! Console color tables store each entry as a `u32` with red in the low byte,
//! then green, then blue; the top byte is unused.

use std::fmt;

/// One 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Decode a packed color-table entry. The top byte is ignored.
    pub const fn from_packed(color: u32) -> Self {
        Self {
            r: (color & 0xff) as u8,
            g: ((color >> 8) & 0xff) as u8,
            b: ((color >> 16) & 0xff) as u8,
        }
    }

    /// Encode as a packed color-table entry.
    pub const fn to_packed(self) -> u32 {
        (self.r as u32) | ((self.g as u32) << 8) | ((self.b as u32) << 16)
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(input: &str) -> Result<Self, String> {
        let trimmed = input.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("invalid hex color `{input}` (expected #RRGGBB)"));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| format!("invalid hex color `{input}`"))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Rgb> for crossterm::style::Color {
    fn from(color: Rgb) -> Self {
        crossterm::style::Color::Rgb {
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }
}

/// Pack a background/foreground index pair into one attribute byte.
///
/// The high nibble holds the background index, the low nibble the foreground.
pub fn pack_attribute(background: usize, foreground: usize) -> Option<u8> {
    if background > 0xf || foreground > 0xf {
        return None;
    }
    Some(((background as u8) << 4) | foreground as u8)
}

/// Split an attribute byte into `(background, foreground)` indices.
pub fn unpack_attribute(attribute: u8) -> (usize, usize) {
    (usize::from(attribute >> 4), usize::from(attribute & 0xf))
}

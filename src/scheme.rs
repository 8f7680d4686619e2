//! Canonical in-memory color scheme model.
//!
//! Every format parser produces a [`ColorScheme`], and every console target
//! consumes one. Values are built once per resolution and never mutated.

use crate::color::{unpack_attribute, Rgb};
use crate::error::SchemeError;

/// Number of entries in a console color table.
pub const COLOR_TABLE_SIZE: usize = 16;

/// Default palette index used for the screen background.
pub const DEFAULT_BACKGROUND_INDEX: usize = 0;

/// Default palette index used for the screen foreground.
pub const DEFAULT_FOREGROUND_INDEX: usize = 7;

/// A 16-entry indexed palette.
pub type ColorTable = [Rgb; COLOR_TABLE_SIZE];

/// Popup (pop-over window) text/fill pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupColors {
    pub foreground: Rgb,
    pub background: Rgb,
}

/// Screen attribute colors resolved for a scheme.
///
/// `cursor` and `popup` stay `None` when the source format does not define
/// them; targets must not substitute a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleAttributes {
    pub background: Rgb,
    pub foreground: Rgb,
    pub cursor: Option<Rgb>,
    pub popup: Option<PopupColors>,
}

impl ConsoleAttributes {
    /// Attributes taken from `table` at the option indices, with no cursor or popup.
    pub fn from_table(table: &ColorTable, options: &SchemeParseOptions) -> Self {
        Self {
            background: table[options.background_index()],
            foreground: table[options.foreground_index()],
            cursor: None,
            popup: None,
        }
    }
}

/// A resolved, named color scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorScheme {
    name: String,
    table: ColorTable,
    attributes: ConsoleAttributes,
}

impl ColorScheme {
    pub fn new(name: impl Into<String>, table: ColorTable, attributes: ConsoleAttributes) -> Self {
        Self {
            name: name.into(),
            table,
            attributes,
        }
    }

    /// Build a scheme whose attributes come from `options`' palette indices.
    pub fn with_indexed_attributes(
        name: impl Into<String>,
        table: ColorTable,
        options: &SchemeParseOptions,
    ) -> Self {
        let attributes = ConsoleAttributes::from_table(&table, options);
        Self::new(name, table, attributes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &ColorTable {
        &self.table
    }

    pub fn attributes(&self) -> &ConsoleAttributes {
        &self.attributes
    }

    /// Palette entry at `index`, or `None` past the end of the table.
    pub fn color(&self, index: usize) -> Option<Rgb> {
        self.table.get(index).copied()
    }

    /// First palette index holding exactly `color`.
    pub fn index_of(&self, color: Rgb) -> Option<usize> {
        self.table.iter().position(|entry| *entry == color)
    }
}

/// Caller configuration for attribute lookups during parsing.
///
/// Indices are validated at construction, so every value of this type holds
/// two indices inside the color table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemeParseOptions {
    background_index: usize,
    foreground_index: usize,
}

impl Default for SchemeParseOptions {
    fn default() -> Self {
        Self {
            background_index: DEFAULT_BACKGROUND_INDEX,
            foreground_index: DEFAULT_FOREGROUND_INDEX,
        }
    }
}

impl SchemeParseOptions {
    /// Build options from explicit indices; both must be below 16.
    pub fn new(background_index: usize, foreground_index: usize) -> Result<Self, SchemeError> {
        Ok(Self {
            background_index: checked_index("background", background_index)?,
            foreground_index: checked_index("foreground", foreground_index)?,
        })
    }

    /// Decode a packed attribute byte: high nibble background, low nibble foreground.
    pub fn from_packed(attribute: u8) -> Self {
        let (background_index, foreground_index) = unpack_attribute(attribute);
        Self {
            background_index,
            foreground_index,
        }
    }

    /// Parse a `--hex-color` style argument such as `1a`, `0x1A`, or `7`.
    pub fn from_hex_str(input: &str) -> Result<Self, SchemeError> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.is_empty() || digits.len() > 2 {
            return Err(SchemeError::InvalidOption(format!(
                "hex color `{input}` must be one or two hex digits"
            )));
        }
        let attribute = u8::from_str_radix(digits, 16).map_err(|_| {
            SchemeError::InvalidOption(format!("hex color `{input}` is not hexadecimal"))
        })?;
        Ok(Self::from_packed(attribute))
    }

    pub fn with_background_index(self, index: usize) -> Result<Self, SchemeError> {
        Self::new(index, self.foreground_index)
    }

    pub fn with_foreground_index(self, index: usize) -> Result<Self, SchemeError> {
        Self::new(self.background_index, index)
    }

    pub fn background_index(&self) -> usize {
        self.background_index
    }

    pub fn foreground_index(&self) -> usize {
        self.foreground_index
    }
}

fn checked_index(which: &str, index: usize) -> Result<usize, SchemeError> {
    if index < COLOR_TABLE_SIZE {
        Ok(index)
    } else {
        Err(SchemeError::InvalidOption(format!(
            "{which} index {index} is outside the color table (0-15)"
        )))
    }
}

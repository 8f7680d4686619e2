//! Windows Terminal scheme objects (`.json`).
//!
//! The same document shape is used for reading `.json` schemes and for the
//! profile-export target, so it lives here with both directions.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::scheme::{ColorScheme, ConsoleAttributes, SchemeParseOptions, COLOR_TABLE_SIZE};
use crate::schemes::SchemeParser;

/// One `schemes[]` entry of a Windows Terminal settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminalSchemeDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_color: Option<String>,
    pub black: String,
    pub red: String,
    pub green: String,
    pub yellow: String,
    pub blue: String,
    pub purple: String,
    pub cyan: String,
    pub white: String,
    pub bright_black: String,
    pub bright_red: String,
    pub bright_green: String,
    pub bright_yellow: String,
    pub bright_blue: String,
    pub bright_purple: String,
    pub bright_cyan: String,
    pub bright_white: String,
}

impl TerminalSchemeDocument {
    /// Palette entries in index order, paired with their JSON field names.
    fn palette(&self) -> [(&'static str, &str); COLOR_TABLE_SIZE] {
        [
            ("black", &self.black),
            ("red", &self.red),
            ("green", &self.green),
            ("yellow", &self.yellow),
            ("blue", &self.blue),
            ("purple", &self.purple),
            ("cyan", &self.cyan),
            ("white", &self.white),
            ("brightBlack", &self.bright_black),
            ("brightRed", &self.bright_red),
            ("brightGreen", &self.bright_green),
            ("brightYellow", &self.bright_yellow),
            ("brightBlue", &self.bright_blue),
            ("brightPurple", &self.bright_purple),
            ("brightCyan", &self.bright_cyan),
            ("brightWhite", &self.bright_white),
        ]
    }

    /// Document describing `scheme`.
    pub fn from_scheme(scheme: &ColorScheme) -> Self {
        let hex = |index: usize| scheme.table()[index].to_hex();
        let attributes = scheme.attributes();
        Self {
            name: scheme.name().to_string(),
            foreground: Some(attributes.foreground.to_hex()),
            background: Some(attributes.background.to_hex()),
            cursor_color: attributes.cursor.map(Rgb::to_hex),
            black: hex(0),
            red: hex(1),
            green: hex(2),
            yellow: hex(3),
            blue: hex(4),
            purple: hex(5),
            cyan: hex(6),
            white: hex(7),
            bright_black: hex(8),
            bright_red: hex(9),
            bright_green: hex(10),
            bright_yellow: hex(11),
            bright_blue: hex(12),
            bright_purple: hex(13),
            bright_cyan: hex(14),
            bright_white: hex(15),
        }
    }

    /// Build a scheme; absent foreground/background fall back to the option indices.
    pub fn into_scheme(
        self,
        scheme_name: &str,
        options: &SchemeParseOptions,
    ) -> Result<ColorScheme, String> {
        let mut table = [Rgb::BLACK; COLOR_TABLE_SIZE];
        for (entry, (field, value)) in table.iter_mut().zip(self.palette()) {
            *entry = Rgb::from_hex(value).map_err(|e| format!("{field}: {e}"))?;
        }
        let optional = |field: &str, value: &Option<String>| {
            value
                .as_deref()
                .map(|text| Rgb::from_hex(text).map_err(|e| format!("{field}: {e}")))
                .transpose()
        };
        let attributes = ConsoleAttributes {
            background: optional("background", &self.background)?
                .unwrap_or(table[options.background_index()]),
            foreground: optional("foreground", &self.foreground)?
                .unwrap_or(table[options.foreground_index()]),
            cursor: optional("cursorColor", &self.cursor_color)?,
            popup: None,
        };
        Ok(ColorScheme::new(scheme_name, table, attributes))
    }
}

/// Render `scheme` as pretty-printed Windows Terminal JSON.
pub fn to_json_string(scheme: &ColorScheme) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&TerminalSchemeDocument::from_scheme(scheme))
}

/// Parser for Windows Terminal JSON scheme files.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSchemeParser;

impl SchemeParser for JsonSchemeParser {
    fn name(&self) -> &'static str {
        "JSON File Parser"
    }

    fn file_extension(&self) -> &'static str {
        ".json"
    }

    fn decode(
        &self,
        scheme_name: &str,
        bytes: &[u8],
        options: &SchemeParseOptions,
    ) -> Result<ColorScheme, String> {
        let document: TerminalSchemeDocument =
            serde_json::from_slice(bytes).map_err(|e| format!("invalid JSON scheme: {e}"))?;
        document.into_scheme(scheme_name, options)
    }
}

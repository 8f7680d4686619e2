//! INI scheme format (`.ini`).
//!
//! ```ini
//! [table]
//! DARK_BLACK = 12,12,12
//! DARK_RED = #c50f1f
//! ; ...all sixteen entries...
//!
//! [screen]
//! FOREGROUND = DARK_WHITE
//! BACKGROUND = DARK_BLACK
//!
//! [popup]
//! FOREGROUND = DARK_MAGENTA
//! BACKGROUND = BRIGHT_WHITE
//! ```
//!
//! `[screen]` and `[popup]` reference table entries by key. A missing screen
//! entry falls back to the parse-option index; popup colors are only set when
//! both popup entries are present.

use std::collections::HashMap;
use std::fmt::{self, Write as _};

use crate::color::Rgb;
use crate::scheme::{
    ColorScheme, ColorTable, ConsoleAttributes, PopupColors, SchemeParseOptions, COLOR_TABLE_SIZE,
};
use crate::schemes::SchemeParser;

/// Table keys in palette-index order.
pub const TABLE_KEYS: [&str; COLOR_TABLE_SIZE] = [
    "DARK_BLACK",
    "DARK_RED",
    "DARK_GREEN",
    "DARK_YELLOW",
    "DARK_BLUE",
    "DARK_MAGENTA",
    "DARK_CYAN",
    "DARK_WHITE",
    "BRIGHT_BLACK",
    "BRIGHT_RED",
    "BRIGHT_GREEN",
    "BRIGHT_YELLOW",
    "BRIGHT_BLUE",
    "BRIGHT_MAGENTA",
    "BRIGHT_CYAN",
    "BRIGHT_WHITE",
];

const TABLE_SECTION: &str = "table";
const SCREEN_SECTION: &str = "screen";
const POPUP_SECTION: &str = "popup";
const FOREGROUND_KEY: &str = "FOREGROUND";
const BACKGROUND_KEY: &str = "BACKGROUND";

/// Parser for INI scheme files.
#[derive(Debug, Default, Clone, Copy)]
pub struct IniSchemeParser;

impl SchemeParser for IniSchemeParser {
    fn name(&self) -> &'static str {
        "INI File Parser"
    }

    fn file_extension(&self) -> &'static str {
        ".ini"
    }

    fn decode(
        &self,
        scheme_name: &str,
        bytes: &[u8],
        options: &SchemeParseOptions,
    ) -> Result<ColorScheme, String> {
        let text = std::str::from_utf8(bytes).map_err(|_| "INI scheme is not UTF-8".to_string())?;
        let document = IniDocument::parse(text)?;

        let mut table = [Rgb::BLACK; COLOR_TABLE_SIZE];
        for (entry, key) in table.iter_mut().zip(TABLE_KEYS) {
            let value = document
                .get(TABLE_SECTION, key)
                .ok_or_else(|| format!("missing [{TABLE_SECTION}] entry {key}"))?;
            *entry = parse_color_value(value).map_err(|e| format!("{key}: {e}"))?;
        }

        let background = match document.get(SCREEN_SECTION, BACKGROUND_KEY) {
            Some(name) => lookup_table_color(&table, name)?,
            None => table[options.background_index()],
        };
        let foreground = match document.get(SCREEN_SECTION, FOREGROUND_KEY) {
            Some(name) => lookup_table_color(&table, name)?,
            None => table[options.foreground_index()],
        };
        let popup = match (
            document.get(POPUP_SECTION, FOREGROUND_KEY),
            document.get(POPUP_SECTION, BACKGROUND_KEY),
        ) {
            (Some(fg), Some(bg)) => Some(PopupColors {
                foreground: lookup_table_color(&table, fg)?,
                background: lookup_table_color(&table, bg)?,
            }),
            (None, None) => None,
            _ => {
                tracing::debug!(
                    scheme = scheme_name,
                    "ignoring [popup] section without both FOREGROUND and BACKGROUND"
                );
                None
            }
        };

        Ok(ColorScheme::new(
            scheme_name,
            table,
            ConsoleAttributes {
                background,
                foreground,
                cursor: None,
                popup,
            },
        ))
    }
}

/// Minimal INI reader: lowercase section names, uppercase keys.
#[derive(Debug, Default)]
struct IniDocument {
    entries: HashMap<(String, String), String>,
}

impl IniDocument {
    fn parse(text: &str) -> Result<Self, String> {
        let mut entries = HashMap::new();
        let mut section: Option<String> = None;
        for (number, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }
            if let Some(header) = line.strip_prefix('[') {
                let name = header
                    .strip_suffix(']')
                    .ok_or_else(|| format!("line {}: unterminated section header", number + 1))?;
                section = Some(name.trim().to_ascii_lowercase());
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(format!("line {}: expected KEY = VALUE", number + 1));
            };
            let Some(current) = &section else {
                return Err(format!("line {}: entry outside of any section", number + 1));
            };
            entries.insert(
                (current.clone(), key.trim().to_ascii_uppercase()),
                value.trim().to_string(),
            );
        }
        Ok(Self { entries })
    }

    fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.entries
            .get(&(section.to_string(), key.to_string()))
            .map(String::as_str)
    }
}

/// Parse `r,g,b` (decimal) or `#rrggbb`.
fn parse_color_value(value: &str) -> Result<Rgb, String> {
    if value.starts_with('#') {
        return Rgb::from_hex(value);
    }
    let channels: Vec<&str> = value.split(',').map(str::trim).collect();
    let &[r, g, b] = channels.as_slice() else {
        return Err(format!("invalid color `{value}` (expected r,g,b or #rrggbb)"));
    };
    let channel = |text: &str| {
        text.parse::<u8>()
            .map_err(|_| format!("invalid color channel `{text}` in `{value}`"))
    };
    Ok(Rgb::new(channel(r)?, channel(g)?, channel(b)?))
}

fn lookup_table_color(table: &ColorTable, name: &str) -> Result<Rgb, String> {
    TABLE_KEYS
        .iter()
        .position(|key| key.eq_ignore_ascii_case(name.trim()))
        .map(|index| table[index])
        .ok_or_else(|| format!("unknown color name `{name}`"))
}

/// Serialize `scheme` into INI scheme text.
///
/// Screen and popup entries are only written when their colors appear in the
/// table, since the format references colors by table key.
pub fn to_ini_string(scheme: &ColorScheme) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_ini(&mut out, scheme);
    out
}

fn write_ini(out: &mut String, scheme: &ColorScheme) -> fmt::Result {
    writeln!(out, "[{TABLE_SECTION}]")?;
    for (key, color) in TABLE_KEYS.iter().zip(scheme.table()) {
        writeln!(out, "{key} = {},{},{}", color.r, color.g, color.b)?;
    }

    let key_for = |color: Rgb| scheme.index_of(color).map(|index| TABLE_KEYS[index]);
    let attributes = scheme.attributes();
    let mut pairs = vec![(SCREEN_SECTION, attributes.foreground, attributes.background)];
    if let Some(popup) = attributes.popup {
        pairs.push((POPUP_SECTION, popup.foreground, popup.background));
    }
    for (section, foreground, background) in pairs {
        if let (Some(fg), Some(bg)) = (key_for(foreground), key_for(background)) {
            write!(
                out,
                "\n[{section}]\n{FOREGROUND_KEY} = {fg}\n{BACKGROUND_KEY} = {bg}\n"
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::{distinct_table, sample_scheme};

    const CAMPBELL: &str = "\
; Campbell
[table]
DARK_BLACK = 12,12,12
DARK_RED = 197,15,31
DARK_GREEN = 19,161,14
DARK_YELLOW = 193,156,0
DARK_BLUE = 0,55,218
DARK_MAGENTA = 136,23,152
DARK_CYAN = 58,150,221
DARK_WHITE = 204,204,204
BRIGHT_BLACK = 118,118,118
BRIGHT_RED = 231,72,86
BRIGHT_GREEN = 22,198,12
BRIGHT_YELLOW = 249,241,165
BRIGHT_BLUE = 59,120,255
BRIGHT_MAGENTA = 180,0,158
bright_cyan = #61d6d6
BRIGHT_WHITE = 242, 242, 242

[screen]
FOREGROUND = DARK_WHITE
BACKGROUND = DARK_BLACK

[popup]
FOREGROUND = dark_magenta
BACKGROUND = BRIGHT_WHITE
";

    fn decode(text: &str) -> Result<ColorScheme, String> {
        IniSchemeParser.decode("campbell", text.as_bytes(), &SchemeParseOptions::default())
    }

    #[test]
    fn parses_table_screen_and_popup() {
        let scheme = decode(CAMPBELL).unwrap();
        assert_eq!(scheme.color(1), Some(Rgb::new(197, 15, 31)));
        assert_eq!(scheme.color(14), Some(Rgb::new(0x61, 0xd6, 0xd6)));
        assert_eq!(scheme.color(15), Some(Rgb::new(242, 242, 242)));
        let attributes = scheme.attributes();
        assert_eq!(attributes.foreground, Rgb::new(204, 204, 204));
        assert_eq!(attributes.background, Rgb::new(12, 12, 12));
        assert_eq!(
            attributes.popup,
            Some(PopupColors {
                foreground: Rgb::new(136, 23, 152),
                background: Rgb::new(242, 242, 242),
            })
        );
        assert_eq!(attributes.cursor, None);
    }

    #[test]
    fn missing_screen_section_uses_option_indices() {
        let table_only = CAMPBELL.split("[screen]").next().unwrap();
        let options = SchemeParseOptions::new(4, 11).unwrap();
        let scheme = IniSchemeParser
            .decode("campbell", table_only.as_bytes(), &options)
            .unwrap();
        assert_eq!(scheme.attributes().background, Rgb::new(0, 55, 218));
        assert_eq!(scheme.attributes().foreground, Rgb::new(249, 241, 165));
        assert_eq!(scheme.attributes().popup, None);
    }

    #[test]
    fn missing_table_entry_is_rejected() {
        let text = CAMPBELL.replace("DARK_CYAN = 58,150,221\n", "");
        let err = decode(&text).unwrap_err();
        assert!(err.contains("DARK_CYAN"), "got: {err}");
    }

    #[test]
    fn bad_values_are_rejected() {
        let text = CAMPBELL.replace("197,15,31", "197,15");
        assert!(decode(&text).unwrap_err().contains("DARK_RED"));
        let text = CAMPBELL.replace("197,15,31", "300,15,31");
        assert!(decode(&text).is_err());
        let text = CAMPBELL.replace("FOREGROUND = DARK_WHITE", "FOREGROUND = MAUVE");
        assert!(decode(&text).unwrap_err().contains("MAUVE"));
    }

    #[test]
    fn structural_errors_are_rejected() {
        assert!(decode("DARK_BLACK = 0,0,0").unwrap_err().contains("outside"));
        assert!(decode("[table\n").unwrap_err().contains("unterminated"));
        assert!(decode("[table]\nDARK_BLACK\n").unwrap_err().contains("KEY = VALUE"));
        assert!(IniSchemeParser
            .decode("x", &[0xff, 0xfe], &SchemeParseOptions::default())
            .is_err());
    }

    #[test]
    fn writer_output_parses_back_to_same_scheme() {
        let original = sample_scheme();
        let text = to_ini_string(&original);
        assert!(text.starts_with("[table]\nDARK_BLACK = 0,255,0\n"));
        let parsed = decode(&text).unwrap();
        assert_eq!(parsed.table(), original.table());
        assert_eq!(parsed.attributes().foreground, original.attributes().foreground);
        assert_eq!(parsed.attributes().popup, original.attributes().popup);
    }

    #[test]
    fn writer_emits_screen_then_popup_sections() {
        let text = to_ini_string(&sample_scheme());
        assert!(
            text.ends_with(
                "BRIGHT_WHITE = 240,15,15\n\
                 \n[screen]\nFOREGROUND = DARK_WHITE\nBACKGROUND = DARK_BLACK\n\
                 \n[popup]\nFOREGROUND = DARK_MAGENTA\nBACKGROUND = BRIGHT_WHITE\n"
            ),
            "got: {text}"
        );
    }

    #[test]
    fn writer_skips_screen_colors_outside_table() {
        let table = distinct_table();
        let scheme = ColorScheme::new(
            "loose",
            table,
            ConsoleAttributes {
                background: Rgb::new(1, 1, 1),
                foreground: table[7],
                cursor: None,
                popup: None,
            },
        );
        let text = to_ini_string(&scheme);
        assert!(!text.contains("[screen]"));
        assert!(!text.contains("[popup]"));
    }
}

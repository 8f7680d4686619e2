//! iTerm2 color presets (`.itermcolors`).
//!
//! The file is an Apple XML property list whose root dictionary maps
//! `Ansi 0 Color` … `Ansi 15 Color` (plus optional `Foreground Color`,
//! `Background Color`, and `Cursor Color`) to dictionaries holding
//! `Red Component`, `Green Component`, and `Blue Component` reals in `0..=1`.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::color::Rgb;
use crate::scheme::{ColorScheme, ConsoleAttributes, SchemeParseOptions, COLOR_TABLE_SIZE};
use crate::schemes::SchemeParser;

/// Parser for iTerm2 `.itermcolors` presets.
#[derive(Debug, Default, Clone, Copy)]
pub struct ItermSchemeParser;

impl SchemeParser for ItermSchemeParser {
    fn name(&self) -> &'static str {
        "iTerm Color Preset Parser"
    }

    fn file_extension(&self) -> &'static str {
        ".itermcolors"
    }

    fn decode(
        &self,
        scheme_name: &str,
        bytes: &[u8],
        options: &SchemeParseOptions,
    ) -> Result<ColorScheme, String> {
        let text =
            std::str::from_utf8(bytes).map_err(|_| "iTerm preset is not UTF-8".to_string())?;
        let root = parse_plist(text)?;
        let PlistValue::Dict(entries) = root else {
            return Err("plist root is not a <dict>".to_string());
        };
        let lookup = |key: &str| -> Result<Option<Rgb>, String> {
            entries
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| color_from_dict(key, value))
                .transpose()
        };

        let mut table = [Rgb::BLACK; COLOR_TABLE_SIZE];
        for (index, entry) in table.iter_mut().enumerate() {
            let key = format!("Ansi {index} Color");
            *entry = lookup(&key)?.ok_or_else(|| format!("missing `{key}`"))?;
        }

        let attributes = ConsoleAttributes {
            background: lookup("Background Color")?.unwrap_or(table[options.background_index()]),
            foreground: lookup("Foreground Color")?.unwrap_or(table[options.foreground_index()]),
            cursor: lookup("Cursor Color")?,
            popup: None,
        };
        Ok(ColorScheme::new(scheme_name, table, attributes))
    }
}

fn color_from_dict(key: &str, value: &PlistValue) -> Result<Rgb, String> {
    let PlistValue::Dict(components) = value else {
        return Err(format!("`{key}` is not a <dict>"));
    };
    let component = |name: &str| -> Result<u8, String> {
        match components.iter().find(|(component, _)| component == name) {
            Some((_, PlistValue::Real(value))) => Ok(unit_to_channel(*value)),
            Some(_) => Err(format!("`{key}` / `{name}` is not a number")),
            None => Err(format!("`{key}` is missing `{name}`")),
        }
    };
    Ok(Rgb::new(
        component("Red Component")?,
        component("Green Component")?,
        component("Blue Component")?,
    ))
}

/// Map a `0..=1` component to a channel byte; out-of-range values saturate.
fn unit_to_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

// ---------------------------------------------------------------------------
// Property-list reader
// ---------------------------------------------------------------------------

/// Deepest `<dict>` nesting accepted. Presets use three levels.
const MAX_DICT_DEPTH: usize = 32;

#[derive(Debug, Clone, PartialEq)]
enum PlistValue {
    Dict(Vec<(String, PlistValue)>),
    Real(f64),
    /// Strings, booleans, arrays, and other values this format never reads.
    Other,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Open(String),
    Close(String),
    Empty(String),
    Text(String),
}

fn tokenize(text: &str) -> Result<Vec<Token>, String> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);
    let mut tokens = Vec::new();
    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("invalid XML at byte {}: {e}", reader.buffer_position()))?;
        match event {
            Event::Start(tag) => tokens.push(Token::Open(tag_name(tag.name().as_ref()))),
            Event::End(tag) => tokens.push(Token::Close(tag_name(tag.name().as_ref()))),
            Event::Empty(tag) => tokens.push(Token::Empty(tag_name(tag.name().as_ref()))),
            Event::Text(text) => {
                let unescaped = text.unescape().map_err(|e| format!("invalid XML text: {e}"))?;
                tokens.push(Token::Text(unescaped.into_owned()));
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(tokens)
}

fn tag_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

fn parse_plist(text: &str) -> Result<PlistValue, String> {
    let tokens = tokenize(text)?;
    let mut cursor = TokenCursor {
        tokens: &tokens,
        pos: 0,
    };
    cursor.consume(&Token::Open("plist".to_string()))?;
    let root = cursor.value(0)?;
    cursor.consume(&Token::Close("plist".to_string()))?;
    Ok(root)
}

struct TokenCursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl TokenCursor<'_> {
    fn next(&mut self) -> Result<&Token, String> {
        let token = self
            .tokens
            .get(self.pos)
            .ok_or_else(|| "unexpected end of plist".to_string())?;
        self.pos += 1;
        Ok(token)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn consume(&mut self, wanted: &Token) -> Result<(), String> {
        let found = self.next()?;
        if found == wanted {
            Ok(())
        } else {
            Err(format!("expected {wanted:?}, found {found:?}"))
        }
    }

    /// Text content up to the closing `tag`; empty elements yield "".
    fn text_until_close(&mut self, tag: &str) -> Result<String, String> {
        let text = match self.peek() {
            Some(Token::Text(text)) => {
                let text = text.clone();
                self.pos += 1;
                text
            }
            _ => String::new(),
        };
        self.consume(&Token::Close(tag.to_string()))?;
        Ok(text)
    }

    fn value(&mut self, depth: usize) -> Result<PlistValue, String> {
        match self.next()?.clone() {
            Token::Open(tag) if tag == "dict" => {
                if depth >= MAX_DICT_DEPTH {
                    return Err("plist nesting too deep".to_string());
                }
                self.dict_entries(depth + 1)
            }
            Token::Open(tag) if tag == "real" || tag == "integer" => {
                let text = self.text_until_close(&tag)?;
                text.trim()
                    .parse::<f64>()
                    .map(PlistValue::Real)
                    .map_err(|_| format!("invalid <{tag}> value `{text}`"))
            }
            Token::Open(tag) => {
                self.skip_element(&tag)?;
                Ok(PlistValue::Other)
            }
            Token::Empty(tag) if tag == "dict" => Ok(PlistValue::Dict(Vec::new())),
            Token::Empty(_) => Ok(PlistValue::Other),
            other => Err(format!("expected a plist value, found {other:?}")),
        }
    }

    fn dict_entries(&mut self, depth: usize) -> Result<PlistValue, String> {
        let mut entries = Vec::new();
        loop {
            match self.next()?.clone() {
                Token::Close(tag) if tag == "dict" => return Ok(PlistValue::Dict(entries)),
                Token::Open(tag) if tag == "key" => {
                    let key = self.text_until_close("key")?;
                    let value = self.value(depth)?;
                    entries.push((key, value));
                }
                other => return Err(format!("expected <key> in <dict>, found {other:?}")),
            }
        }
    }

    /// Consume tokens through the close tag matching an already-read `tag`.
    fn skip_element(&mut self, tag: &str) -> Result<(), String> {
        let mut depth = 1usize;
        while depth > 0 {
            match self.next()? {
                Token::Open(name) if name == tag => depth += 1,
                Token::Close(name) if name == tag => depth -= 1,
                _ => {}
            }
        }
        Ok(())
    }
}

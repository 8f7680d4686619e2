//! xterm-style OSC color sequences.
//!
//! Palette entries use OSC 4, the default foreground and background use OSC
//! 10 and 11, and the cursor uses OSC 12. Every sequence is terminated with
//! ST (`ESC \`).

use std::io::Write;

use crate::color::Rgb;
use crate::error::TargetError;
use crate::scheme::{ColorScheme, ColorTable, ConsoleAttributes};
use crate::targets::ConsoleTarget;

const OSC: &str = "\x1b]";
const ST: &str = "\x1b\\";

const OSC_FOREGROUND: u8 = 10;
const OSC_BACKGROUND: u8 = 11;
const OSC_CURSOR: u8 = 12;

fn xparse_color(color: Rgb) -> String {
    format!("rgb:{:02x}/{:02x}/{:02x}", color.r, color.g, color.b)
}

/// OSC 4 sequence setting palette slot `index`.
pub fn palette_entry(index: usize, color: Rgb) -> String {
    format!("{OSC}4;{index};{}{ST}", xparse_color(color))
}

/// OSC 10/11/12 sequence for a dynamic color.
fn dynamic_color(code: u8, color: Rgb) -> String {
    format!("{OSC}{code};{}{ST}", xparse_color(color))
}

/// Linux virtual-console palette sequence (`ESC ] P n rrggbb`).
pub fn linux_palette_entry(index: usize, color: Rgb) -> String {
    format!(
        "{OSC}P{index:x}{:02x}{:02x}{:02x}",
        color.r, color.g, color.b
    )
}

pub fn encode_palette(table: &ColorTable) -> String {
    table
        .iter()
        .enumerate()
        .map(|(index, color)| palette_entry(index, *color))
        .collect()
}

/// Foreground, background, then cursor when the scheme defines one.
pub fn encode_attributes(attributes: &ConsoleAttributes) -> String {
    let mut out = dynamic_color(OSC_FOREGROUND, attributes.foreground);
    out.push_str(&dynamic_color(OSC_BACKGROUND, attributes.background));
    if let Some(cursor) = attributes.cursor {
        out.push_str(&dynamic_color(OSC_CURSOR, cursor));
    }
    out
}

/// Full sequence stream for `scheme`.
pub fn encode_scheme(scheme: &ColorScheme) -> String {
    let mut out = encode_palette(scheme.table());
    out.push_str(&encode_attributes(scheme.attributes()));
    out
}

/// Writes a scheme as escape sequences to an output stream.
///
/// Useful for terminals that are not the controlling terminal of this
/// process, e.g. when redirected into a shell startup file.
pub struct EscapeSequenceTarget<W: Write> {
    out: W,
}

impl<W: Write> EscapeSequenceTarget<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ConsoleTarget for EscapeSequenceTarget<W> {
    fn name(&self) -> &'static str {
        "escape sequences"
    }

    fn apply_color_scheme(&mut self, scheme: &ColorScheme, _quiet: bool) -> Result<(), TargetError> {
        // The sequences are the output; no confirmation line is ever added.
        self.out.write_all(encode_scheme(scheme).as_bytes())?;
        self.out.flush()?;
        tracing::debug!(scheme = scheme.name(), "wrote escape sequences");
        Ok(())
    }
}

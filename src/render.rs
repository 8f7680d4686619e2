//! Terminal output for the binary: status lines, the scheme listing, and the
//! current color table.

use std::io::{self, Write};

use crossterm::style::{
    Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor, Stylize,
};
use crossterm::terminal;
use crossterm::QueueableCommand;

use crate::schemes::catalog::CatalogEntry;

const LABEL_ERROR: &str = "error:";
const LABEL_WARNING: &str = "warning:";
/// Palette entries previewed per scheme in the listing.
const SWATCH_COUNT: usize = 8;
const SWATCH: &str = "  ";
/// Fallback width when the terminal size is unknown.
const DEFAULT_COLUMNS: u16 = 80;
const TABLE_SAMPLE: &str = " gYw ";
const TABLE_FOREGROUNDS: u8 = 16;
const TABLE_BACKGROUNDS: u8 = 8;
const TABLE_LABEL_WIDTH: usize = 8;

/// Writes user-facing messages, with or without color.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Print an error (to stderr).
    pub fn error(&self, msg: &str) {
        if self.color {
            eprintln!("{} {msg}", LABEL_ERROR.with(Color::Red).bold());
        } else {
            eprintln!("{LABEL_ERROR} {msg}");
        }
    }

    pub fn warn(&self, msg: &str) {
        if self.color {
            eprintln!("{} {msg}", LABEL_WARNING.with(Color::Yellow).bold());
        } else {
            eprintln!("{LABEL_WARNING} {msg}");
        }
    }

    /// Print every catalog entry to stdout with a row of color swatches.
    pub fn scheme_listing(&self, entries: &[CatalogEntry]) -> io::Result<()> {
        let columns = terminal::size()
            .map(|(columns, _)| columns)
            .unwrap_or(DEFAULT_COLUMNS);
        let mut stdout = io::stdout().lock();
        write_scheme_listing(&mut stdout, entries, self.color, columns)
    }

    /// Print the live palette as a foreground/background grid. Always colored,
    /// since the grid is only useful as a color sample.
    pub fn color_table(&self) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        write_color_table(&mut stdout)
    }
}

/// Write a grid with one row per foreground (terminal default, then palette
/// 0-15) and one column per background (default, then palette 0-7).
///
/// Colors are referenced by palette index, so the grid shows whatever the
/// terminal currently has loaded.
pub fn write_color_table<W: Write>(out: &mut W) -> io::Result<()> {
    let column = TABLE_SAMPLE.len();
    out.queue(Print(format!("{:TABLE_LABEL_WIDTH$}{:^column$}", "", "def")))?;
    for background in 0..TABLE_BACKGROUNDS {
        out.queue(Print(format!("{:^column$}", format!("bg{background}"))))?;
    }
    out.queue(Print("\n"))?;

    let foregrounds = std::iter::once(None).chain((0..TABLE_FOREGROUNDS).map(Some));
    for foreground in foregrounds {
        let label = foreground.map_or_else(|| "default".to_string(), |index| format!("fg {index}"));
        out.queue(Print(format!("{label:<TABLE_LABEL_WIDTH$}")))?;
        let backgrounds = std::iter::once(None).chain((0..TABLE_BACKGROUNDS).map(Some));
        for background in backgrounds {
            if let Some(index) = foreground {
                out.queue(SetForegroundColor(Color::AnsiValue(index)))?;
            }
            if let Some(index) = background {
                out.queue(SetBackgroundColor(Color::AnsiValue(index)))?;
            }
            out.queue(Print(TABLE_SAMPLE))?;
            out.queue(ResetColor)?;
        }
        out.queue(Print("\n"))?;
    }
    out.flush()
}

/// Write one line per entry: the file name padded to a shared column, then
/// swatches of the first eight palette entries when `color` is set.
pub fn write_scheme_listing<W: Write>(
    out: &mut W,
    entries: &[CatalogEntry],
    color: bool,
    columns: u16,
) -> io::Result<()> {
    let name_width = entries
        .iter()
        .map(|entry| entry.file_name.chars().count())
        .max()
        .unwrap_or(0);
    let swatch_width = SWATCH_COUNT * SWATCH.len();
    // Swatches only fit when name, gap, and blocks share one row.
    let show_swatches = color && name_width + 1 + swatch_width <= usize::from(columns);

    for entry in entries {
        out.queue(Print(format!("{:<name_width$}", entry.file_name)))?;
        if show_swatches {
            out.queue(Print(" "))?;
            for swatch in entry.scheme.table().iter().take(SWATCH_COUNT) {
                out.queue(SetBackgroundColor((*swatch).into()))?;
                out.queue(Print(SWATCH))?;
            }
            out.queue(ResetColor)?;
        }
        out.queue(Print("\n"))?;
    }
    out.flush()
}

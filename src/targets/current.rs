//! Apply a scheme to the live terminal this process is attached to.

use std::fs::OpenOptions;
use std::io::Write;

use crossterm::tty::IsTty;

use crate::error::TargetError;
use crate::scheme::{ColorScheme, ColorTable, ConsoleAttributes};
use crate::targets::escape::{encode_attributes, encode_palette, linux_palette_entry};
use crate::targets::ConsoleTarget;

const CONTROLLING_TERMINAL: &str = "/dev/tty";

/// Handle to the running console session.
pub trait SessionConsole {
    /// Replace all 16 palette entries.
    fn set_palette(&mut self, table: &ColorTable) -> Result<(), TargetError>;

    /// Set default foreground/background, and the cursor when present.
    fn set_screen_colors(&mut self, attributes: &ConsoleAttributes) -> Result<(), TargetError>;
}

/// Which sequence dialect the session understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionDialect {
    /// Linux virtual console: palette only, via `ESC ] P`.
    LinuxConsole,
    /// Terminal emulators with OSC 4/10/11/12 support.
    Xterm,
}

impl SessionDialect {
    pub fn from_term(term: Option<&str>) -> Self {
        match term {
            Some("linux") => Self::LinuxConsole,
            _ => Self::Xterm,
        }
    }
}

/// The controlling terminal, opened on first use.
pub struct TerminalSession {
    dialect: SessionDialect,
    tty: Option<Box<dyn Write>>,
    /// Last palette pushed, used to spot attributes the dialect cannot carry.
    palette: Option<ColorTable>,
}

impl TerminalSession {
    pub fn new(dialect: SessionDialect) -> Self {
        Self {
            dialect,
            tty: None,
            palette: None,
        }
    }

    /// Session that writes to `writer` instead of the controlling terminal.
    pub fn with_writer(dialect: SessionDialect, writer: impl Write + 'static) -> Self {
        Self {
            dialect,
            tty: Some(Box::new(writer)),
            palette: None,
        }
    }

    /// Session whose dialect follows `$TERM`.
    pub fn from_env() -> Self {
        let term = std::env::var("TERM").ok();
        Self::new(SessionDialect::from_term(term.as_deref()))
    }

    fn tty(&mut self) -> Result<&mut Box<dyn Write>, TargetError> {
        if self.tty.is_none() {
            let file = OpenOptions::new()
                .write(true)
                .open(CONTROLLING_TERMINAL)
                .map_err(|e| TargetError::NoSession(format!("{CONTROLLING_TERMINAL}: {e}")))?;
            if !file.is_tty() {
                return Err(TargetError::NoSession(format!(
                    "{CONTROLLING_TERMINAL} is not a terminal"
                )));
            }
            self.tty = Some(Box::new(file));
        }
        self.tty
            .as_mut()
            .ok_or_else(|| TargetError::NoSession("terminal handle unavailable".to_string()))
    }

    fn write(&mut self, sequence: &str) -> Result<(), TargetError> {
        let tty = self.tty()?;
        tty.write_all(sequence.as_bytes())?;
        tty.flush()?;
        Ok(())
    }
}

impl SessionConsole for TerminalSession {
    fn set_palette(&mut self, table: &ColorTable) -> Result<(), TargetError> {
        let encoded = match self.dialect {
            SessionDialect::LinuxConsole => table
                .iter()
                .enumerate()
                .map(|(index, color)| linux_palette_entry(index, *color))
                .collect(),
            SessionDialect::Xterm => encode_palette(table),
        };
        self.write(&encoded)?;
        self.palette = Some(*table);
        Ok(())
    }

    fn set_screen_colors(&mut self, attributes: &ConsoleAttributes) -> Result<(), TargetError> {
        match self.dialect {
            SessionDialect::LinuxConsole => {
                if self
                    .palette
                    .is_some_and(|table| linux_console_drops_attributes(&table, attributes))
                {
                    tracing::warn!(
                        background = %attributes.background,
                        foreground = %attributes.foreground,
                        "linux console keeps entries 0 and 7 as screen colors; scheme colors not applied"
                    );
                } else {
                    tracing::debug!("linux console has no dynamic colors; keeping screen attributes");
                }
                Ok(())
            }
            SessionDialect::Xterm => self.write(&encode_attributes(attributes)),
        }
    }
}

/// Whether `attributes` ask for screen colors the Linux console cannot show.
///
/// The console always draws with palette entries 0 and 7, so anything else is
/// lost.
pub fn linux_console_drops_attributes(table: &ColorTable, attributes: &ConsoleAttributes) -> bool {
    attributes.background != table[0] || attributes.foreground != table[7]
}

/// Pushes a scheme into the current session.
pub struct CurrentSessionTarget<S: SessionConsole, W: Write> {
    session: S,
    out: W,
}

impl<S: SessionConsole, W: Write> CurrentSessionTarget<S, W> {
    pub fn new(session: S, out: W) -> Self {
        Self { session, out }
    }

    pub fn into_parts(self) -> (S, W) {
        (self.session, self.out)
    }
}

impl<S: SessionConsole, W: Write> ConsoleTarget for CurrentSessionTarget<S, W> {
    fn name(&self) -> &'static str {
        "current session"
    }

    fn apply_color_scheme(&mut self, scheme: &ColorScheme, quiet: bool) -> Result<(), TargetError> {
        self.session.set_palette(scheme.table())?;
        self.session.set_screen_colors(scheme.attributes())?;
        if !quiet {
            writeln!(self.out, "Applied scheme `{}` to the current session", scheme.name())?;
        }
        Ok(())
    }
}

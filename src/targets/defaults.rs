//! Persistent console defaults.
//!
//! New sessions read their initial palette from a defaults store. The file
//! store keeps colors in packed `0x00BBGGRR` form and attribute pairs as
//! packed `background << 4 | foreground` bytes. Screen colors are also kept
//! as packed RGB so schemes whose background is not a table entry survive.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::{pack_attribute, Rgb};
use crate::error::TargetError;
use crate::scheme::ColorScheme;
use crate::targets::ConsoleTarget;

/// File name used for the defaults store inside the colortool config directory.
pub const DEFAULTS_FILE_NAME: &str = "console-defaults.toml";

/// Serialized form of a scheme in the defaults store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleDefaults {
    pub scheme: String,
    pub color_table: Vec<u32>,
    pub background: u32,
    pub foreground: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_colors: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popup_colors: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_color: Option<u32>,
}

impl ConsoleDefaults {
    /// Attribute bytes are only recorded when both colors sit in the table.
    pub fn from_scheme(scheme: &ColorScheme) -> Self {
        let attribute_byte = |pair: &str, background: Rgb, foreground: Rgb| {
            let packed = scheme
                .index_of(background)
                .zip(scheme.index_of(foreground))
                .and_then(|(bg, fg)| pack_attribute(bg, fg));
            if packed.is_none() {
                tracing::warn!(
                    scheme = scheme.name(),
                    pair,
                    "colors are not table entries; attribute byte not stored"
                );
            }
            packed
        };
        let attributes = scheme.attributes();
        Self {
            scheme: scheme.name().to_string(),
            color_table: scheme.table().iter().map(|c| c.to_packed()).collect(),
            background: attributes.background.to_packed(),
            foreground: attributes.foreground.to_packed(),
            screen_colors: attribute_byte("screen", attributes.background, attributes.foreground),
            popup_colors: attributes
                .popup
                .and_then(|popup| attribute_byte("popup", popup.background, popup.foreground)),
            cursor_color: attributes.cursor.map(Rgb::to_packed),
        }
    }
}

/// Destination for console defaults.
pub trait DefaultsStore {
    /// Where the defaults go, for user-facing messages.
    fn location(&self) -> String;

    fn store(&mut self, defaults: &ConsoleDefaults) -> Result<(), TargetError>;
}

/// TOML file defaults store.
#[derive(Debug, Clone)]
pub struct FileDefaultsStore {
    path: PathBuf,
}

impl FileDefaultsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read back stored defaults; `Ok(None)` when nothing has been stored yet.
    pub fn load(&self) -> Result<Option<ConsoleDefaults>, TargetError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        toml::from_str(&text)
            .map(Some)
            .map_err(|e| TargetError::Encode(format!("{}: {e}", self.path.display())))
    }
}

impl DefaultsStore for FileDefaultsStore {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn store(&mut self, defaults: &ConsoleDefaults) -> Result<(), TargetError> {
        let text =
            toml::to_string_pretty(defaults).map_err(|e| TargetError::Encode(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, text)?;
        tracing::debug!(path = %self.path.display(), "stored console defaults");
        Ok(())
    }
}

/// Stand-in store for runs where no defaults location could be determined.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredDefaultsStore;

impl DefaultsStore for UnconfiguredDefaultsStore {
    fn location(&self) -> String {
        "(unset)".to_string()
    }

    fn store(&mut self, _: &ConsoleDefaults) -> Result<(), TargetError> {
        Err(TargetError::NotConfigured(
            "no location for console defaults; set [defaults].path or COLORTOOL_DEFAULTS_PATH"
                .to_string(),
        ))
    }
}

/// Writes a scheme to the persistent defaults store.
pub struct DefaultConsoleTarget<D: DefaultsStore, W: Write> {
    store: D,
    out: W,
}

impl<D: DefaultsStore, W: Write> DefaultConsoleTarget<D, W> {
    pub fn new(store: D, out: W) -> Self {
        Self { store, out }
    }

    pub fn into_parts(self) -> (D, W) {
        (self.store, self.out)
    }
}

impl<D: DefaultsStore, W: Write> ConsoleTarget for DefaultConsoleTarget<D, W> {
    fn name(&self) -> &'static str {
        "console defaults"
    }

    fn apply_color_scheme(&mut self, scheme: &ColorScheme, quiet: bool) -> Result<(), TargetError> {
        self.store.store(&ConsoleDefaults::from_scheme(scheme))?;
        if !quiet {
            writeln!(
                self.out,
                "Wrote scheme `{}` to console defaults ({})",
                scheme.name(),
                self.store.location()
            )?;
        }
        Ok(())
    }
}

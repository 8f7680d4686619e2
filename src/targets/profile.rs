//! Export a scheme as a terminal profile fragment.

use std::io::Write;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::TargetError;
use crate::scheme::ColorScheme;
use crate::schemes::formats::{ini, json};
use crate::targets::ConsoleTarget;

/// Serialization used for profile export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileFormat {
    /// A Windows Terminal `schemes[]` object.
    #[default]
    WindowsTerminal,
    /// The INI scheme format this tool also reads.
    Ini,
}

impl ProfileFormat {
    pub fn render(self, scheme: &ColorScheme) -> Result<String, TargetError> {
        match self {
            Self::WindowsTerminal => json::to_json_string(scheme)
                .map(|mut text| {
                    text.push('\n');
                    text
                })
                .map_err(|e| TargetError::Encode(e.to_string())),
            Self::Ini => Ok(ini::to_ini_string(scheme)),
        }
    }
}

/// Writes the rendered profile to `path`, or to the output stream when no
/// path is configured.
pub struct ProfileExportTarget<W: Write> {
    format: ProfileFormat,
    path: Option<PathBuf>,
    out: W,
}

impl<W: Write> ProfileExportTarget<W> {
    pub fn new(format: ProfileFormat, path: Option<PathBuf>, out: W) -> Self {
        Self { format, path, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ConsoleTarget for ProfileExportTarget<W> {
    fn name(&self) -> &'static str {
        "profile export"
    }

    fn apply_color_scheme(&mut self, scheme: &ColorScheme, quiet: bool) -> Result<(), TargetError> {
        let rendered = self.format.render(scheme)?;
        let Some(path) = &self.path else {
            self.out.write_all(rendered.as_bytes())?;
            self.out.flush()?;
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, rendered)?;
        tracing::debug!(path = %path.display(), format = ?self.format, "exported profile");
        if !quiet {
            writeln!(
                self.out,
                "Exported scheme `{}` to {}",
                scheme.name(),
                path.display()
            )?;
        }
        Ok(())
    }
}

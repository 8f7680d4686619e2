//! Console targets that receive a resolved scheme.
//!
//! A target turns one [`ColorScheme`] into an environment-specific effect.
//! Callers pass an explicit, ordered list of targets to [`apply_targets`];
//! each one succeeds or fails on its own.

pub mod current;
pub mod defaults;
pub mod escape;
pub mod profile;

use std::fmt;
use std::path::PathBuf;

use crate::error::TargetError;
use crate::scheme::ColorScheme;

pub use current::{CurrentSessionTarget, SessionConsole, TerminalSession};
pub use defaults::{
    DefaultConsoleTarget, DefaultsStore, FileDefaultsStore, UnconfiguredDefaultsStore,
};
pub use escape::EscapeSequenceTarget;
pub use profile::{ProfileExportTarget, ProfileFormat};

// ---------------------------------------------------------------------------
// ConsoleTarget trait
// ---------------------------------------------------------------------------

/// A sink a color scheme can be applied to.
pub trait ConsoleTarget {
    /// Short label used in reports and log lines.
    fn name(&self) -> &'static str;

    /// Apply `scheme`. `quiet` suppresses confirmation output only; the
    /// effect itself is unchanged.
    fn apply_color_scheme(&mut self, scheme: &ColorScheme, quiet: bool) -> Result<(), TargetError>;
}

// ---------------------------------------------------------------------------
// Target selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Current,
    Defaults,
    Escape,
    Profile,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Current => "current",
            Self::Defaults => "defaults",
            Self::Escape => "escape",
            Self::Profile => "profile",
        })
    }
}

/// Which targets a run should touch.
///
/// `properties` covers the live-session family; `xterm` and `terminal`
/// replace the session with escape output or profile export respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSelection {
    pub defaults: bool,
    pub properties: bool,
    pub xterm: bool,
    pub terminal: bool,
}

impl Default for TargetSelection {
    fn default() -> Self {
        Self {
            defaults: false,
            properties: true,
            xterm: false,
            terminal: false,
        }
    }
}

impl TargetSelection {
    /// Ordered target kinds: defaults first, then at most one session-family kind.
    pub fn kinds(&self) -> Vec<TargetKind> {
        let mut kinds = Vec::with_capacity(2);
        if self.defaults {
            kinds.push(TargetKind::Defaults);
        }
        if self.properties {
            kinds.push(if self.xterm {
                TargetKind::Escape
            } else if self.terminal {
                TargetKind::Profile
            } else {
                TargetKind::Current
            });
        }
        kinds
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

/// Environment handles needed to build the stock targets.
///
/// A missing `defaults_path` does not stop the run; the defaults target
/// reports [`TargetError::NotConfigured`] when applied.
#[derive(Debug, Clone, Default)]
pub struct TargetSettings {
    pub defaults_path: Option<PathBuf>,
    pub export_path: Option<PathBuf>,
    pub export_format: ProfileFormat,
}

/// Build stock targets for `kinds`, in order, writing user output to stdout.
pub fn build_targets(kinds: &[TargetKind], settings: &TargetSettings) -> Vec<Box<dyn ConsoleTarget>> {
    kinds
        .iter()
        .map(|kind| -> Box<dyn ConsoleTarget> {
            let out = std::io::stdout();
            match kind {
                TargetKind::Current => {
                    Box::new(CurrentSessionTarget::new(TerminalSession::from_env(), out))
                }
                TargetKind::Defaults => match &settings.defaults_path {
                    Some(path) => {
                        Box::new(DefaultConsoleTarget::new(FileDefaultsStore::new(path), out))
                    }
                    None => Box::new(DefaultConsoleTarget::new(UnconfiguredDefaultsStore, out)),
                },
                TargetKind::Escape => Box::new(EscapeSequenceTarget::new(out)),
                TargetKind::Profile => Box::new(ProfileExportTarget::new(
                    settings.export_format,
                    settings.export_path.clone(),
                    out,
                )),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Application
// ---------------------------------------------------------------------------

/// Outcome of applying a scheme to one target.
#[derive(Debug)]
pub struct TargetReport {
    pub target: &'static str,
    pub result: Result<(), TargetError>,
}

impl TargetReport {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Apply `scheme` to every target in order. A failing target never prevents
/// later targets from running.
pub fn apply_targets(
    scheme: &ColorScheme,
    targets: &mut [Box<dyn ConsoleTarget>],
    quiet: bool,
) -> Vec<TargetReport> {
    targets
        .iter_mut()
        .map(|target| {
            let result = target.apply_color_scheme(scheme, quiet);
            if let Err(e) = &result {
                tracing::warn!(sink = target.name(), error = %e, "failed to apply scheme");
            }
            TargetReport {
                target: target.name(),
                result,
            }
        })
        .collect()
}

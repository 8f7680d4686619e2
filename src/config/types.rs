//! Configuration data model.
//!
//! Every section is optional in the file; missing keys take the defaults
//! defined here.

use std::path::PathBuf;

use serde::Deserialize;

use crate::scheme::{DEFAULT_BACKGROUND_INDEX, DEFAULT_FOREGROUND_INDEX};
use crate::targets::ProfileFormat;

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub parse: ParseConfig,
    pub output: OutputConfig,
    pub defaults: DefaultsConfig,
    pub export: ExportConfig,
}

/// `[parse]`: how scheme files are interpreted.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ParseConfig {
    /// Table index used as the background when a format has no explicit one.
    pub background_index: usize,
    /// Table index used as the foreground when a format has no explicit one.
    pub foreground_index: usize,
    /// Log why candidate files failed to parse.
    pub report_errors: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            background_index: DEFAULT_BACKGROUND_INDEX,
            foreground_index: DEFAULT_FOREGROUND_INDEX,
            report_errors: false,
        }
    }
}

/// `[output]`
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    pub quiet: bool,
}

/// `[defaults]`: location of the persistent console defaults store.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Filled from the config directory at load time when unset.
    pub path: Option<PathBuf>,
}

/// `[export]`: profile export destination.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExportConfig {
    /// `None` writes the profile to stdout.
    pub path: Option<PathBuf>,
    pub format: ProfileFormat,
}

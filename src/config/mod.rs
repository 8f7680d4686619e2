//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. CLI flags (applied by the binary after loading)
//! 2. Environment variables (`COLORTOOL_BACKGROUND_INDEX`,
//!    `COLORTOOL_FOREGROUND_INDEX`, `COLORTOOL_DEFAULTS_PATH`)
//! 3. TOML file specified via --config CLI flag
//! 4. ./colortool.toml in the current directory
//! 5. $XDG_CONFIG_HOME/colortool/colortool.toml (or ~/.config/colortool/colortool.toml)
//! 6. Built-in defaults

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::scheme::SchemeParseOptions;
use crate::targets::defaults::DEFAULTS_FILE_NAME;

mod defaults;
mod env;
mod sources;
mod types;

use defaults::CONFIG_DIR_NAME;
use env::apply_env_overrides;
use sources::{read_config_text_with_sources, ConfigSource};
pub use types::{Config, DefaultsConfig, ExportConfig, OutputConfig, ParseConfig};

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from --config flag).
pub fn load_config(path_override: Option<&str>) -> Result<Config, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<Config, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (config_text, source) =
        read_config_text_with_sources(path_override, &read_file, &config_root)?;
    match &source {
        ConfigSource::Explicit(path) | ConfigSource::Global(path) => {
            tracing::debug!(path = %path.display(), "loaded config file");
        }
        ConfigSource::Local => tracing::debug!("loaded ./colortool.toml"),
        ConfigSource::BuiltInDefaults => tracing::debug!("no config file; using defaults"),
    }

    let mut config: Config = toml::from_str(&config_text)?;
    apply_env_overrides(&mut config, &env_lookup)?;
    if config.defaults.path.is_none() {
        config.defaults.path =
            config_root().map(|dir| dir.join(CONFIG_DIR_NAME).join(DEFAULTS_FILE_NAME));
    }
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    config.parse_options().map(|_| ())
}

impl Config {
    /// Parse options built from `[parse]`.
    pub fn parse_options(&self) -> Result<SchemeParseOptions, ConfigError> {
        SchemeParseOptions::new(self.parse.background_index, self.parse.foreground_index)
            .map_err(|e| ConfigError::Invalid(format!("[parse] {e}")))
    }
}

/// Base directory for per-user config: `$XDG_CONFIG_HOME`, else `~/.config`.
pub fn config_root_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .or_else(dirs::config_dir)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

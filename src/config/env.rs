//! Environment overrides.
//!
//! Variables sit above every config file and below CLI flags.

use std::path::PathBuf;

use crate::error::ConfigError;

use super::defaults::{ENV_BACKGROUND_INDEX, ENV_DEFAULTS_PATH, ENV_FOREGROUND_INDEX};
use super::Config;

pub(super) fn apply_env_overrides<FEnv>(config: &mut Config, env_lookup: &FEnv) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(index) = env_index(env_lookup, ENV_BACKGROUND_INDEX)? {
        config.parse.background_index = index;
    }
    if let Some(index) = env_index(env_lookup, ENV_FOREGROUND_INDEX)? {
        config.parse.foreground_index = index;
    }
    if let Some(path) = non_empty(env_lookup(ENV_DEFAULTS_PATH)) {
        config.defaults.path = Some(PathBuf::from(path));
    }
    Ok(())
}

fn env_index<FEnv>(env_lookup: &FEnv, name: &str) -> Result<Option<usize>, ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    let Some(value) = non_empty(env_lookup(name)) else {
        return Ok(None);
    };
    value.parse::<usize>().map(Some).map_err(|_| {
        ConfigError::Invalid(format!(
            "invalid {name} value `{value}`: expected a color table index"
        ))
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

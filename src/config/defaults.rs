//! Default configuration constants.

/// Name of the config directory and file stem.
pub(super) const CONFIG_DIR_NAME: &str = "colortool";
/// File name looked up in the working directory and the config directory.
pub(super) const CONFIG_FILE_NAME: &str = "colortool.toml";

pub(super) const ENV_BACKGROUND_INDEX: &str = "COLORTOOL_BACKGROUND_INDEX";
pub(super) const ENV_FOREGROUND_INDEX: &str = "COLORTOOL_FOREGROUND_INDEX";
pub(super) const ENV_DEFAULTS_PATH: &str = "COLORTOOL_DEFAULTS_PATH";

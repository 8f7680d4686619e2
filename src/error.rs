//! Unified error types for scheme resolution, target application, and config.

use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// SchemeError
// ---------------------------------------------------------------------------

/// Terminal outcome of a failed scheme resolution.
///
/// `NotFound` and `Malformed` are deliberately distinct so callers can tell
/// "no such file" apart from "file present but unreadable as a scheme".
#[derive(Debug)]
pub enum SchemeError {
    /// No candidate path existed for any eligible parser.
    NotFound { name: String },
    /// A file was found but violated its format's structure.
    Malformed { path: PathBuf, reason: String },
    /// The name carried an extension no registered parser handles.
    UnsupportedExtension { name: String, extension: String },
    /// Caller-supplied parse options were out of range.
    InvalidOption(String),
}

impl fmt::Display for SchemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { name } => write!(f, "could not find or load scheme `{name}`"),
            Self::Malformed { path, reason } => {
                write!(f, "invalid scheme file {}: {reason}", path.display())
            }
            Self::UnsupportedExtension { name, extension } => {
                write!(f, "unsupported scheme extension `{extension}` in `{name}`")
            }
            Self::InvalidOption(msg) => write!(f, "invalid option: {msg}"),
        }
    }
}

impl std::error::Error for SchemeError {}

// ---------------------------------------------------------------------------
// TargetError
// ---------------------------------------------------------------------------

/// Errors raised while applying a scheme to one console target.
#[derive(Debug)]
pub enum TargetError {
    /// No live terminal session is attached to this process.
    NoSession(String),
    /// Reading or writing the sink failed.
    Io(std::io::Error),
    /// The scheme could not be rendered into the sink's format.
    Encode(String),
    /// The target has no destination configured for this run.
    NotConfigured(String),
}

impl fmt::Display for TargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSession(msg) => write!(f, "no terminal session: {msg}"),
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Encode(msg) => write!(f, "encode: {msg}"),
            Self::NotConfigured(msg) => write!(f, "not configured: {msg}"),
        }
    }
}

impl std::error::Error for TargetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::NoSession(_) | Self::Encode(_) | Self::NotConfigured(_) => None,
        }
    }
}

impl From<std::io::Error> for TargetError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_error_display_distinguishes_missing_and_malformed() {
        let missing = SchemeError::NotFound {
            name: "campbell".into(),
        };
        assert_eq!(
            missing.to_string(),
            "could not find or load scheme `campbell`"
        );

        let malformed = SchemeError::Malformed {
            path: PathBuf::from("schemes/bad.plt"),
            reason: "expected 64 bytes, found 12".into(),
        };
        let text = malformed.to_string();
        assert!(text.starts_with("invalid scheme file"), "got: {text}");
        assert!(text.contains("bad.plt"));
        assert!(text.contains("expected 64 bytes"));
    }

    #[test]
    fn scheme_error_unsupported_extension_names_extension() {
        let e = SchemeError::UnsupportedExtension {
            name: "solarized.xyz".into(),
            extension: ".xyz".into(),
        };
        assert_eq!(
            e.to_string(),
            "unsupported scheme extension `.xyz` in `solarized.xyz`"
        );
    }

    #[test]
    fn target_error_from_io_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let e = TargetError::from(io_err);
        assert!(e.to_string().starts_with("io:"), "got: {e}");
        assert!(std::error::Error::source(&e).is_some());
    }

    #[test]
    fn config_error_from_toml() {
        let toml_err: toml::de::Error = toml::from_str::<toml::Value>("x = [unclosed").unwrap_err();
        let e = ConfigError::from(toml_err);
        assert!(e.to_string().starts_with("toml:"));
    }

    #[test]
    fn config_error_invalid_message() {
        let e = ConfigError::Invalid("foreground_index out of range".into());
        assert_eq!(e.to_string(), "invalid config: foreground_index out of range");
    }
}

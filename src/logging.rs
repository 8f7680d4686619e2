//! Diagnostic logging setup.
//!
//! Library code logs through `tracing`; the binary installs a stderr `fmt`
//! subscriber so stdout stays reserved for escape sequences and exports.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive string.
pub const LOG_ENV_VAR: &str = "COLORTOOL_LOG";

/// Directive used when `COLORTOOL_LOG` is unset or invalid.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "colortool=debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_crate_level() {
        assert_eq!(default_directive(false), "warn");
        assert_eq!(default_directive(true), "colortool=debug");
    }

    #[test]
    fn init_is_idempotent() {
        init(false);
        init(true);
        tracing::debug!("still alive after double init");
    }
}

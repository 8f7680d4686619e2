//! Version and build stamp for `colortool --version` and the `--help` footer.
//!
//! `build.rs` exports the commit and build time as compile-time env vars.
//! The commit reads `unknown` when built outside a git checkout.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Short commit hash of the checkout colortool was built from.
pub const GIT_COMMIT: &str = env!("COLORTOOL_BUILD_GIT_HASH");

/// UTC time the binary was compiled.
pub const BUILD_TIMESTAMP: &str = env!("COLORTOOL_BUILD_TIMESTAMP");

/// Footer clap appends after the flag list in `--help`.
pub const HELP_BUILD_METADATA: &str = concat!(
    "Build metadata:\n  commit: ",
    env!("COLORTOOL_BUILD_GIT_HASH"),
    "\n  built: ",
    env!("COLORTOOL_BUILD_TIMESTAMP")
);

/// Text printed by `-V/--version`: name and version, then commit and build time.
pub fn cli_version_text() -> String {
    format!("colortool {VERSION}\ncommit: {GIT_COMMIT}\nbuilt: {BUILD_TIMESTAMP}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_text_is_three_lines() {
        let text = cli_version_text();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], format!("colortool {VERSION}"));
        assert_eq!(lines[1], format!("commit: {GIT_COMMIT}"));
        assert!(lines[2].starts_with("built: "));
    }

    #[test]
    fn help_footer_carries_commit_and_build_time() {
        assert!(HELP_BUILD_METADATA.starts_with("Build metadata:"));
        assert!(HELP_BUILD_METADATA.contains(GIT_COMMIT));
        assert!(HELP_BUILD_METADATA.contains(BUILD_TIMESTAMP));
    }
}

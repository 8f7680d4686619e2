//! Scheme lookup and pluggable format parsers.
//!
//! Each supported file format implements [`SchemeParser`]. The
//! [`SchemeRegistry`] holds an explicit, ordered list of parsers, picks the
//! eligible ones for a requested name, and returns the first scheme that
//! parses.

pub mod catalog;
pub mod formats;
pub mod registry;
pub mod search;

use std::path::{Path, PathBuf};

use crate::scheme::{ColorScheme, SchemeParseOptions};

pub use registry::SchemeRegistry;
pub use search::SchemeLocator;

// ---------------------------------------------------------------------------
// ParseOutcome
// ---------------------------------------------------------------------------

/// Result of asking one parser for one scheme name.
#[derive(Debug)]
pub enum ParseOutcome {
    /// The file was found and decoded.
    Parsed(ColorScheme),
    /// No candidate path existed for this parser's extension.
    Missing,
    /// A file was found but is not a valid scheme in this format.
    Rejected { path: PathBuf, reason: String },
}

// ---------------------------------------------------------------------------
// SchemeParser trait
// ---------------------------------------------------------------------------

/// A scheme file format.
///
/// Implementors supply the format identity and a pure [`decode`] step; the
/// provided [`parse_scheme`] handles file lookup, reading, and diagnostics.
///
/// [`decode`]: SchemeParser::decode
/// [`parse_scheme`]: SchemeParser::parse_scheme
pub trait SchemeParser {
    /// Human-readable format name shown in help output.
    fn name(&self) -> &'static str;

    /// File extension including the leading dot, e.g. `.plt`.
    fn file_extension(&self) -> &'static str;

    /// Turn file bytes into a scheme called `scheme_name`, or explain why not.
    fn decode(
        &self,
        scheme_name: &str,
        bytes: &[u8],
        options: &SchemeParseOptions,
    ) -> Result<ColorScheme, String>;

    /// Locate `name` (extension already stripped), read it, and decode it.
    fn parse_scheme(
        &self,
        locator: &SchemeLocator,
        name: &str,
        options: &SchemeParseOptions,
        report_errors: bool,
    ) -> ParseOutcome {
        let Some(path) = locator.find(name, self.file_extension()) else {
            return ParseOutcome::Missing;
        };
        let result = std::fs::read(&path)
            .map_err(|e| format!("failed to read file: {e}"))
            .and_then(|bytes| self.decode(&display_name(name), &bytes, options));
        match result {
            Ok(scheme) => ParseOutcome::Parsed(scheme),
            Err(reason) => {
                if report_errors {
                    tracing::warn!(
                        parser = self.name(),
                        path = %path.display(),
                        "{reason}"
                    );
                }
                ParseOutcome::Rejected { path, reason }
            }
        }
    }
}

/// Scheme display name: the final path component of the requested name.
pub fn display_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|file| file.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string())
}

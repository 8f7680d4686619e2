//! Scheme resolution across every registered file format.
//!
//! A name resolves by asking each parser in turn to locate and decode it.
//! The first decoded scheme wins; a file that exists but fails to decode is
//! reported as malformed rather than missing.

use std::path::Path;

use crate::error::SchemeError;
use crate::scheme::{ColorScheme, SchemeParseOptions};
use crate::schemes::formats::{IniSchemeParser, ItermSchemeParser, JsonSchemeParser, PltSchemeParser};
use crate::schemes::{ParseOutcome, SchemeLocator, SchemeParser};

/// Ordered collection of scheme parsers.
///
/// Resolution tries parsers in registration order and returns the first
/// scheme that decodes.
pub struct SchemeRegistry {
    locator: SchemeLocator,
    parsers: Vec<Box<dyn SchemeParser>>,
}

impl SchemeRegistry {
    /// Empty registry; parsers must be added with [`register`](Self::register).
    pub fn new(locator: SchemeLocator) -> Self {
        Self {
            locator,
            parsers: Vec::new(),
        }
    }

    /// Registry holding every built-in format: INI, JSON, iTerm, then PLT.
    pub fn with_builtin_parsers(locator: SchemeLocator) -> Self {
        let mut registry = Self::new(locator);
        registry.register(IniSchemeParser);
        registry.register(JsonSchemeParser);
        registry.register(ItermSchemeParser);
        registry.register(PltSchemeParser);
        registry
    }

    /// Append a parser; it is tried after every earlier registration.
    pub fn register(&mut self, parser: impl SchemeParser + 'static) {
        self.parsers.push(Box::new(parser));
    }

    pub fn parser_names(&self) -> Vec<&'static str> {
        self.parsers.iter().map(|p| p.name()).collect()
    }

    pub fn locator(&self) -> &SchemeLocator {
        &self.locator
    }

    /// Resolve `name` to a scheme.
    ///
    /// A recognised extension on `name` restricts the search to the parsers
    /// for that extension and is stripped before path lookup. An extension
    /// no parser claims fails immediately.
    pub fn resolve(
        &self,
        name: &str,
        options: &SchemeParseOptions,
        report_errors: bool,
    ) -> Result<ColorScheme, SchemeError> {
        let (lookup_name, eligible) = self.eligible_parsers(name)?;
        tracing::debug!(
            name,
            lookup_name,
            parsers = ?eligible.iter().map(|p| p.name()).collect::<Vec<_>>(),
            "resolving scheme"
        );

        let mut first_rejection = None;
        for parser in eligible {
            match parser.parse_scheme(&self.locator, lookup_name, options, report_errors) {
                ParseOutcome::Parsed(scheme) => {
                    tracing::debug!(parser = parser.name(), scheme = scheme.name(), "scheme resolved");
                    return Ok(scheme);
                }
                ParseOutcome::Missing => {}
                ParseOutcome::Rejected { path, reason } => {
                    if first_rejection.is_none() {
                        first_rejection = Some(SchemeError::Malformed { path, reason });
                    }
                }
            }
        }

        Err(first_rejection.unwrap_or_else(|| SchemeError::NotFound {
            name: name.to_string(),
        }))
    }

    /// Name to search for and the parsers allowed to handle it.
    fn eligible_parsers<'a>(
        &self,
        name: &'a str,
    ) -> Result<(&'a str, Vec<&dyn SchemeParser>), SchemeError> {
        let extension = Path::new(name)
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .filter(|ext| !ext.is_empty());

        let Some(extension) = extension else {
            return Ok((name, self.parsers.iter().map(|p| p.as_ref()).collect()));
        };

        let dotted = format!(".{extension}");
        let matching: Vec<&dyn SchemeParser> = self
            .parsers
            .iter()
            .map(|p| p.as_ref())
            .filter(|p| p.file_extension().eq_ignore_ascii_case(&dotted))
            .collect();
        if matching.is_empty() {
            return Err(SchemeError::UnsupportedExtension {
                name: name.to_string(),
                extension: dotted,
            });
        }
        let stem = name.get(..name.len() - dotted.len()).unwrap_or(name);
        Ok((stem, matching))
    }
}

impl Default for SchemeRegistry {
    fn default() -> Self {
        Self::with_builtin_parsers(SchemeLocator::from_current_exe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::testsupport::{uniform_plt, TestTempDir};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Parser that records how often it was consulted and never finds files.
    struct CountingParser {
        extension: &'static str,
        calls: Arc<AtomicUsize>,
    }

    impl CountingParser {
        fn new(extension: &'static str) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    extension,
                    calls: Arc::clone(&calls),
                },
                calls,
            )
        }
    }

    impl SchemeParser for CountingParser {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn file_extension(&self) -> &'static str {
            self.extension
        }

        fn decode(&self, _: &str, _: &[u8], _: &SchemeParseOptions) -> Result<ColorScheme, String> {
            Err("unused".to_string())
        }

        fn parse_scheme(
            &self,
            _: &SchemeLocator,
            _: &str,
            _: &SchemeParseOptions,
            _: bool,
        ) -> ParseOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ParseOutcome::Missing
        }
    }

    fn locator_for(dir: &TestTempDir) -> SchemeLocator {
        SchemeLocator::new(dir.path())
    }

    #[test]
    fn builtin_order_is_ini_json_iterm_plt() {
        let registry = SchemeRegistry::with_builtin_parsers(SchemeLocator::default());
        assert_eq!(
            registry.parser_names(),
            vec![
                "INI File Parser",
                "JSON File Parser",
                "iTerm Color Preset Parser",
                "PLT File Parser"
            ]
        );
    }

    #[test]
    fn extension_restricts_parsers_case_insensitively() {
        let (plt, plt_calls) = CountingParser::new(".plt");
        let (ini, ini_calls) = CountingParser::new(".ini");
        let mut registry = SchemeRegistry::new(SchemeLocator::default());
        registry.register(ini);
        registry.register(plt);

        let err = registry
            .resolve("/nowhere/scheme.PLT", &SchemeParseOptions::default(), false)
            .unwrap_err();
        assert!(matches!(err, SchemeError::NotFound { .. }));
        assert_eq!(plt_calls.load(Ordering::SeqCst), 1);
        assert_eq!(ini_calls.load(Ordering::SeqCst), 0);

        registry
            .resolve("/nowhere/scheme", &SchemeParseOptions::default(), false)
            .unwrap_err();
        assert_eq!(plt_calls.load(Ordering::SeqCst), 2);
        assert_eq!(ini_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unknown_extension_fails_before_any_parser_runs() {
        let (plt, calls) = CountingParser::new(".plt");
        let mut registry = SchemeRegistry::new(SchemeLocator::default());
        registry.register(plt);
        let err = registry
            .resolve("scheme.xyz", &SchemeParseOptions::default(), false)
            .unwrap_err();
        match err {
            SchemeError::UnsupportedExtension { name, extension } => {
                assert_eq!(name, "scheme.xyz");
                assert_eq!(extension, ".xyz");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn resolves_by_stripped_name_and_display_name() {
        let dir = TestTempDir::new("registry-resolve");
        let path = dir.write_bytes("ocean.plt", &uniform_plt(0x3f));
        let registry = SchemeRegistry::with_builtin_parsers(locator_for(&dir));

        let with_ext = path.to_string_lossy().into_owned();
        let scheme = registry
            .resolve(&with_ext, &SchemeParseOptions::default(), false)
            .unwrap();
        assert_eq!(scheme.name(), "ocean");
        assert_eq!(scheme.color(3), Some(Rgb::WHITE));

        let bare = dir.child("ocean").to_string_lossy().into_owned();
        let scheme = registry
            .resolve(&bare, &SchemeParseOptions::default(), false)
            .unwrap();
        assert_eq!(scheme.name(), "ocean");
    }

    #[test]
    fn malformed_file_is_distinct_from_missing() {
        let dir = TestTempDir::new("registry-malformed");
        let path = dir.write_bytes("short.plt", &[0u8; 10]);
        let registry = SchemeRegistry::with_builtin_parsers(locator_for(&dir));

        let err = registry
            .resolve(&path.to_string_lossy(), &SchemeParseOptions::default(), true)
            .unwrap_err();
        match err {
            SchemeError::Malformed { path: found, reason } => {
                assert_eq!(found, path);
                assert!(reason.contains("expected 64 bytes"), "got: {reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let missing = dir.child("absent").to_string_lossy().into_owned();
        let err = registry
            .resolve(&missing, &SchemeParseOptions::default(), false)
            .unwrap_err();
        assert!(matches!(err, SchemeError::NotFound { name } if name == missing));
    }

    #[test]
    fn later_parser_wins_when_earlier_rejects() {
        let dir = TestTempDir::new("registry-fallthrough");
        dir.write_text("mixed.ini", "[table]\nDARK_BLACK = nonsense\n");
        dir.write_bytes("mixed.plt", &uniform_plt(0));
        let registry = SchemeRegistry::with_builtin_parsers(locator_for(&dir));

        let name = dir.child("mixed").to_string_lossy().into_owned();
        let scheme = registry
            .resolve(&name, &SchemeParseOptions::default(), false)
            .unwrap();
        assert_eq!(scheme.color(0), Some(Rgb::BLACK));
    }

    #[test]
    fn trailing_dot_counts_as_no_extension() {
        let (plt, calls) = CountingParser::new(".plt");
        let mut registry = SchemeRegistry::new(SchemeLocator::default());
        registry.register(plt);
        let err = registry
            .resolve("/nowhere/scheme.", &SchemeParseOptions::default(), false)
            .unwrap_err();
        assert!(matches!(err, SchemeError::NotFound { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

//! Enumeration of the bundled `schemes` directory.

use std::path::Path;

use crate::scheme::{ColorScheme, SchemeParseOptions};
use crate::schemes::SchemeRegistry;

/// One loadable scheme found in the schemes directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// File name as it appears on disk, extension included.
    pub file_name: String,
    pub scheme: ColorScheme,
}

/// Every file in the registry's schemes directory that resolves to a scheme,
/// sorted by file name.
///
/// Unreadable directories yield an empty list. Files no parser accepts are
/// skipped.
pub fn list_schemes(registry: &SchemeRegistry) -> Vec<CatalogEntry> {
    let Some(dir) = registry.locator().schemes_dir() else {
        return Vec::new();
    };
    list_schemes_in(registry, &dir)
}

fn list_schemes_in(registry: &SchemeRegistry, dir: &Path) -> Vec<CatalogEntry> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "schemes directory unavailable");
            return Vec::new();
        }
    };

    let mut paths: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    paths.sort();

    let options = SchemeParseOptions::default();
    paths
        .into_iter()
        .filter_map(|path| {
            let file_name = path.file_name()?.to_string_lossy().into_owned();
            match registry.resolve(&path.to_string_lossy(), &options, false) {
                Ok(scheme) => Some(CatalogEntry { file_name, scheme }),
                Err(e) => {
                    tracing::debug!(file = %file_name, error = %e, "skipping scheme");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemes::SchemeLocator;
    use crate::testsupport::{uniform_plt, TestTempDir};

    #[test]
    fn lists_loadable_schemes_sorted() {
        let dir = TestTempDir::new("catalog-list");
        dir.write_bytes("schemes/zeta.plt", &uniform_plt(0x3f));
        dir.write_bytes("schemes/alpha.plt", &uniform_plt(0));
        dir.write_bytes("schemes/broken.plt", &[1, 2, 3]);
        dir.write_text("schemes/readme.txt", "not a scheme");
        std::fs::create_dir_all(dir.child("schemes/nested.plt")).unwrap();

        let registry = SchemeRegistry::with_builtin_parsers(SchemeLocator::new(dir.path()));
        let entries = list_schemes(&registry);
        let names: Vec<_> = entries.iter().map(|e| e.file_name.as_str()).collect();
        assert_eq!(names, vec!["alpha.plt", "zeta.plt"]);
        assert_eq!(entries[0].scheme.name(), "alpha");
    }

    #[test]
    fn missing_directory_lists_nothing() {
        let dir = TestTempDir::new("catalog-empty");
        let registry = SchemeRegistry::with_builtin_parsers(SchemeLocator::new(dir.path()));
        assert!(list_schemes(&registry).is_empty());
        assert!(list_schemes(&SchemeRegistry::new(SchemeLocator::default())).is_empty());
    }
}

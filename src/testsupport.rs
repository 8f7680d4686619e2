//! Shared test fixtures for parser, locator, and target test modules.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::color::Rgb;
use crate::scheme::{ColorScheme, ColorTable, ConsoleAttributes, PopupColors, COLOR_TABLE_SIZE};

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!(
            "colortool-{prefix}-{}-{millis}-{suffix}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    /// Root directory path for this fixture.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build a child path under the fixture root.
    pub fn child(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }

    /// Write raw bytes to a child path, creating parent directories as needed.
    pub fn write_bytes(&self, relative: &str, content: &[u8]) -> PathBuf {
        let path = self.child(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }

    /// Write UTF-8 text to a child path.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        self.write_bytes(relative, content.as_bytes())
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// A table with 16 distinct colors: entry `i` is `(i*16, 255 - i*16, i)`.
pub fn distinct_table() -> ColorTable {
    let mut table = [Rgb::BLACK; COLOR_TABLE_SIZE];
    for (index, entry) in table.iter_mut().enumerate() {
        let step = (index * 16) as u8;
        *entry = Rgb::new(step, 255 - step, index as u8);
    }
    table
}

/// Scheme over [`distinct_table`] with every attribute populated.
pub fn sample_scheme() -> ColorScheme {
    let table = distinct_table();
    ColorScheme::new(
        "sample",
        table,
        ConsoleAttributes {
            background: table[0],
            foreground: table[7],
            cursor: Some(Rgb::new(0xfe, 0xdc, 0xba)),
            popup: Some(PopupColors {
                foreground: table[5],
                background: table[15],
            }),
        },
    )
}

/// A 64-byte PLT image where every byte is `value`.
pub fn uniform_plt(value: u8) -> Vec<u8> {
    vec![value; COLOR_TABLE_SIZE * 4]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_dir_fixture_writes_and_resolves_paths() {
        let fixture = TestTempDir::new("fixture");
        let file = fixture.write_text("nested/file.txt", "hello");
        assert_eq!(fs::read_to_string(file).unwrap(), "hello");
    }

    #[test]
    fn distinct_table_has_no_duplicates() {
        let table = distinct_table();
        for (i, a) in table.iter().enumerate() {
            for b in table.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}

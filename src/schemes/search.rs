//! Scheme file search paths.
//!
//! For a bare name `name` and a parser extension `ext`, candidates are probed
//! in this order, where `exe` is the directory of the running executable:
//! 1. `./name`
//! 2. `./name.ext`
//! 3. `./schemes/name`
//! 4. `./schemes/name.ext`
//! 5. `exe/schemes/name`
//! 6. `exe/schemes/name.ext`
//! 7. `name` verbatim
//!
//! An absolute `name` skips the list and probes only `name.ext`.

use std::path::{Path, PathBuf};

/// Directory name that holds bundled schemes, both under the working
/// directory and next to the executable.
pub const SCHEMES_DIR_NAME: &str = "schemes";

/// Locates scheme files on disk.
#[derive(Debug, Clone, Default)]
pub struct SchemeLocator {
    exe_dir: Option<PathBuf>,
}

impl SchemeLocator {
    /// Locator that treats `exe_dir` as the executable's directory.
    pub fn new(exe_dir: impl Into<PathBuf>) -> Self {
        Self {
            exe_dir: Some(exe_dir.into()),
        }
    }

    /// Locator anchored at the directory of the running executable.
    ///
    /// When the executable path cannot be determined, the `exe/schemes`
    /// candidates are skipped.
    pub fn from_current_exe() -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        if exe_dir.is_none() {
            tracing::debug!("executable directory unavailable; skipping exe-relative schemes");
        }
        Self { exe_dir }
    }

    /// The `schemes` directory next to the executable.
    pub fn schemes_dir(&self) -> Option<PathBuf> {
        self.exe_dir
            .as_ref()
            .map(|dir| dir.join(SCHEMES_DIR_NAME))
    }

    /// Lazily yield candidate paths for `name` in probe order.
    pub fn search_paths(&self, name: &str, extension: &str) -> SearchPaths {
        let absolute = Path::new(name).is_absolute();
        SearchPaths {
            name: name.to_string(),
            file_name: format!("{name}{extension}"),
            exe_schemes: self.schemes_dir(),
            step: if absolute { Step::AbsoluteOnly } else { Step::Cwd },
        }
    }

    /// First candidate that exists as a regular file.
    pub fn find(&self, name: &str, extension: &str) -> Option<PathBuf> {
        let found = self
            .search_paths(name, extension)
            .inspect(|candidate| tracing::trace!(path = %candidate.display(), "probing scheme path"))
            .find(|candidate| candidate.is_file());
        if let Some(path) = &found {
            tracing::debug!(name, extension, path = %path.display(), "located scheme file");
        }
        found
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Cwd,
    CwdWithExtension,
    CwdSchemes,
    CwdSchemesWithExtension,
    ExeSchemes,
    ExeSchemesWithExtension,
    Verbatim,
    AbsoluteOnly,
    Done,
}

/// Iterator over scheme candidate paths, produced by [`SchemeLocator::search_paths`].
#[derive(Debug, Clone)]
pub struct SearchPaths {
    name: String,
    file_name: String,
    exe_schemes: Option<PathBuf>,
    step: Step,
}

impl Iterator for SearchPaths {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let (candidate, next) = match self.step {
                Step::Cwd => (Some(Path::new(".").join(&self.name)), Step::CwdWithExtension),
                Step::CwdWithExtension => (
                    Some(Path::new(".").join(&self.file_name)),
                    Step::CwdSchemes,
                ),
                Step::CwdSchemes => (
                    Some(Path::new(".").join(SCHEMES_DIR_NAME).join(&self.name)),
                    Step::CwdSchemesWithExtension,
                ),
                Step::CwdSchemesWithExtension => (
                    Some(Path::new(".").join(SCHEMES_DIR_NAME).join(&self.file_name)),
                    Step::ExeSchemes,
                ),
                Step::ExeSchemes => (
                    self.exe_schemes.as_ref().map(|dir| dir.join(&self.name)),
                    Step::ExeSchemesWithExtension,
                ),
                Step::ExeSchemesWithExtension => (
                    self.exe_schemes.as_ref().map(|dir| dir.join(&self.file_name)),
                    Step::Verbatim,
                ),
                Step::Verbatim => (Some(PathBuf::from(&self.name)), Step::Done),
                Step::AbsoluteOnly => (Some(PathBuf::from(&self.file_name)), Step::Done),
                Step::Done => return None,
            };
            self.step = next;
            if candidate.is_some() {
                return candidate;
            }
        }
    }
}

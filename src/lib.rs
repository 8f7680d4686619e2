//! colortool: resolve console color schemes and apply them.
//!
//! A scheme file (`.ini`, `.json`, `.itermcolors`, or `.plt`) is located by
//! name, decoded into a canonical 16-color [`scheme::ColorScheme`], and then
//! applied to one or more [`targets`]: the live terminal session, the
//! persistent console defaults, a raw escape-sequence stream, or an exported
//! terminal profile.
//!
//! # Quick start
//!
//! ```no_run
//! use colortool::scheme::SchemeParseOptions;
//! use colortool::schemes::{SchemeLocator, SchemeRegistry};
//! use colortool::targets::{apply_targets, ConsoleTarget, EscapeSequenceTarget};
//!
//! let registry = SchemeRegistry::with_builtin_parsers(SchemeLocator::from_current_exe());
//! let scheme = registry
//!     .resolve("campbell", &SchemeParseOptions::default(), true)
//!     .unwrap();
//! let mut targets: Vec<Box<dyn ConsoleTarget>> =
//!     vec![Box::new(EscapeSequenceTarget::new(std::io::stdout()))];
//! for report in apply_targets(&scheme, &mut targets, false) {
//!     println!("{}: {:?}", report.target, report.result);
//! }
//! ```

pub mod build_info;
pub mod color;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod scheme;
pub mod schemes;
pub mod targets;
#[cfg(test)]
pub mod testsupport;

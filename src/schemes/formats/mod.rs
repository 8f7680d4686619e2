//! Built-in scheme file formats.

pub mod ini;
pub mod iterm;
pub mod json;
pub mod plt;

pub use ini::IniSchemeParser;
pub use iterm::ItermSchemeParser;
pub use json::JsonSchemeParser;
pub use plt::PltSchemeParser;

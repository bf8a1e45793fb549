//! Generator configuration
//!
//! Fixed values live in [`constants`]; user preferences in [`runtime`] are
//! read from `CFC_*` environment variables and an optional TOML file.

pub mod constants;
mod error;
pub mod runtime;

pub use error::ConfigError;
pub use runtime::{GeneratorPreferences, LoggingPreferences};

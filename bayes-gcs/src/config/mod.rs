//! Configuration loading
//!
//! Reads the station configuration from a TOML file. Missing sections and
//! keys fall back to the defaults in `bayes_core::config`.

mod loader;

pub use loader::{load, ConfigError};

//! TOML configuration loader

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::info;

use bayes_core::config::{GcsConfig, ValidationError};

/// File read when no path is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "bayes.toml";

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// File is not valid TOML or has unknown or mistyped keys
    #[error("invalid configuration in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// Values are out of range
    #[error("invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
}

/// Load the configuration
///
/// An explicit path must exist. Without one, `bayes.toml` in the working
/// directory is used if present and the built-in defaults otherwise. The
/// result is not validated; command line overrides come first.
pub fn load(path: Option<&Path>) -> Result<GcsConfig, ConfigError> {
    let (path, explicit) = match path {
        Some(p) => (p, true),
        None => (Path::new(DEFAULT_CONFIG_PATH), false),
    };

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if !explicit && e.kind() == ErrorKind::NotFound => {
            info!("No {} found, using defaults", DEFAULT_CONFIG_PATH);
            return Ok(GcsConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config = parse(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Parse configuration text
pub fn parse(text: &str) -> Result<GcsConfig, toml::de::Error> {
    toml::from_str(text)
}

//! Top-level error type

use bayes_core::orientation::FrameSetError;
use bayes_display::DisplayError;
use bayes_hal::LinkError;

use crate::config::ConfigError;

/// Errors that stop the ground station
#[derive(Debug, thiserror::Error)]
pub enum GcsError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("serial link: {0}")]
    Link(#[from] LinkError),
    #[error("geometry: {0}")]
    Geometry(#[from] FrameSetError),
    #[error(transparent)]
    Display(#[from] DisplayError),
    #[error("failed to start operator input: {0}")]
    Input(#[source] std::io::Error),
}

//! Display backend trait
//!
//! Defines the interface for the places a dashboard is shown.

use crate::screen::Screen;

/// Display backend errors
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    /// Writing to the output failed
    #[error("display write failed: {0}")]
    Io(#[from] std::io::Error),
    /// Backend was used before it was ready
    #[error("display not ready")]
    NotReady,
}

/// Display backend trait
///
/// Receives a complete composed screen once per tick.
pub trait DisplayBackend {
    /// Show the screen, replacing whatever was shown before
    fn present(&mut self, screen: &Screen) -> Result<(), DisplayError>;

    /// Get the display dimensions
    ///
    /// Returns (columns, rows) in character units
    fn dimensions(&self) -> (usize, usize);

    /// Check if the display is ready
    fn is_ready(&self) -> bool;
}

//! Configuration type definitions

use bayes_hal::LinkConfig;
use tracing::warn;

use crate::console::CONSOLE_CAPACITY;
use crate::monitor::DEFAULT_STALE_AFTER_MS;
use crate::orientation::frame::{DEFAULT_BODY_LENGTH, DEFAULT_FIN_SPAN};
use crate::orientation::{FrameSetError, ReferenceFrame};
use crate::state::ServoLimits;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default tick period in milliseconds
pub const DEFAULT_TICK_MS: u32 = 40;

/// Shortest accepted tick period
pub const MIN_TICK_MS: u32 = 10;

/// Longest accepted tick period
pub const MAX_TICK_MS: u32 = 1000;

/// Tick periods giving a smooth display without starving the link
pub const TARGET_TICK_MS: core::ops::RangeInclusive<u32> = 25..=40;

/// Default cap on lines handled per tick
pub const DEFAULT_MAX_LINES_PER_TICK: usize = 64;

/// Root configuration
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct GcsConfig {
    pub link: LinkConfig,
    pub engine: EngineConfig,
    pub geometry: GeometryConfig,
    pub servo: ServoLimits,
}

/// Tick loop configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct EngineConfig {
    /// Tick period in milliseconds
    pub tick_ms: u32,
    /// Maximum lines handled in one tick
    pub max_lines_per_tick: usize,
    /// Telemetry age after which the link shows as stale
    pub stale_after_ms: u64,
    /// Console lines shown on the dashboard
    pub console_lines: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            max_lines_per_tick: DEFAULT_MAX_LINES_PER_TICK,
            stale_after_ms: DEFAULT_STALE_AFTER_MS,
            console_lines: CONSOLE_CAPACITY,
        }
    }
}

/// Reference segment preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GeometryKind {
    /// Single nose vector
    Nose,
    /// Body axis plus both fin pairs
    #[default]
    Triad,
}

/// Reference geometry configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct GeometryConfig {
    pub kind: GeometryKind,
    /// Longitudinal segment length
    pub body_length: f64,
    /// Fin pair span (triad only)
    pub fin_span: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            kind: GeometryKind::Triad,
            body_length: DEFAULT_BODY_LENGTH,
            fin_span: DEFAULT_FIN_SPAN,
        }
    }
}

impl GeometryConfig {
    /// Build the reference segments for this configuration
    pub fn reference_frame(&self) -> Result<ReferenceFrame, FrameSetError> {
        match self.kind {
            GeometryKind::Nose => ReferenceFrame::nose(self.body_length),
            GeometryKind::Triad => ReferenceFrame::triad(self.body_length, self.fin_span),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("link.port must not be empty")]
    EmptyPort,
    #[error("link.baudrate must be positive")]
    ZeroBaudrate,
    #[error("engine.tick_ms = {0} is outside 10..=1000")]
    TickOutOfRange(u32),
    #[error("engine.max_lines_per_tick must be at least 1")]
    NoLinesPerTick,
    #[error("engine.console_lines = {0} exceeds the console capacity of 16")]
    ConsoleTooLong(usize),
    #[error("invalid geometry: {0}")]
    Geometry(#[from] FrameSetError),
    #[error("servo limits need positive travel and a tolerance below it")]
    ServoLimits,
}

impl GcsConfig {
    /// Check the configuration for values the station cannot run with
    ///
    /// A tick period outside the target range is accepted with a warning.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.link.port.trim().is_empty() {
            return Err(ValidationError::EmptyPort);
        }
        if self.link.baudrate == 0 {
            return Err(ValidationError::ZeroBaudrate);
        }

        let tick_ms = self.engine.tick_ms;
        if !(MIN_TICK_MS..=MAX_TICK_MS).contains(&tick_ms) {
            return Err(ValidationError::TickOutOfRange(tick_ms));
        }
        if !TARGET_TICK_MS.contains(&tick_ms) {
            warn!(
                "Tick period {} ms is outside the {}-{} ms target",
                tick_ms,
                TARGET_TICK_MS.start(),
                TARGET_TICK_MS.end()
            );
        }

        if self.engine.max_lines_per_tick == 0 {
            return Err(ValidationError::NoLinesPerTick);
        }
        if self.engine.console_lines > CONSOLE_CAPACITY {
            return Err(ValidationError::ConsoleTooLong(self.engine.console_lines));
        }

        self.geometry.reference_frame()?;

        if !self.servo.is_valid() {
            return Err(ValidationError::ServoLimits);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::BodyAxis;

    #[test]
    fn test_defaults_validate() {
        let config = GcsConfig::default();
        assert_eq!(config.link.port, "/dev/ttyACM0");
        assert_eq!(config.link.baudrate, 115_200);
        assert_eq!(config.engine.tick_ms, 40);
        assert_eq!(config.engine.max_lines_per_tick, 64);
        assert_eq!(config.engine.console_lines, 16);
        assert_eq!(config.geometry.kind, GeometryKind::Triad);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tick_range() {
        let mut config = GcsConfig::default();
        config.engine.tick_ms = 5;
        assert_eq!(config.validate(), Err(ValidationError::TickOutOfRange(5)));

        config.engine.tick_ms = 1001;
        assert_eq!(config.validate(), Err(ValidationError::TickOutOfRange(1001)));

        // Outside the target but still usable
        config.engine.tick_ms = 100;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_port() {
        let mut config = GcsConfig::default();
        config.link.port = String::from("  ");
        assert_eq!(config.validate(), Err(ValidationError::EmptyPort));
    }

    #[test]
    fn test_rejects_zero_lines_per_tick() {
        let mut config = GcsConfig::default();
        config.engine.max_lines_per_tick = 0;
        assert_eq!(config.validate(), Err(ValidationError::NoLinesPerTick));
    }

    #[test]
    fn test_rejects_long_console() {
        let mut config = GcsConfig::default();
        config.engine.console_lines = CONSOLE_CAPACITY + 1;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::ConsoleTooLong(_))
        ));
    }

    #[test]
    fn test_rejects_bad_geometry() {
        let mut config = GcsConfig::default();
        config.geometry.fin_span = 0.0;
        assert_eq!(
            config.validate(),
            Err(ValidationError::Geometry(FrameSetError::Degenerate(
                BodyAxis::LateralY
            )))
        );
    }

    #[test]
    fn test_rejects_bad_servo_limits() {
        let mut config = GcsConfig::default();
        config.servo.travel_deg = -5.0;
        assert_eq!(config.validate(), Err(ValidationError::ServoLimits));
    }

    #[test]
    fn test_nose_geometry() {
        let geometry = GeometryConfig {
            kind: GeometryKind::Nose,
            body_length: 2.0,
            ..GeometryConfig::default()
        };
        let frame = geometry.reference_frame().unwrap();
        assert_eq!(frame.segments().len(), 1);
        // Fin span is unused for the nose preset
        let geometry = GeometryConfig {
            fin_span: 0.0,
            ..geometry
        };
        assert!(geometry.reference_frame().is_ok());
    }
}

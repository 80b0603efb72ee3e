//! Link monitoring
//!
//! Tracks telemetry freshness and per-line outcome counters for display.

pub mod health;
pub mod stats;

pub use health::{LinkHealth, LinkStatus, DEFAULT_STALE_AFTER_MS};
pub use stats::{IgnoredCounts, TelemetryStats};

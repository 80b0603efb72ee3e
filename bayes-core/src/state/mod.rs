//! Vehicle state
//!
//! Holds the latest validated telemetry sample together with the geometry
//! derived from it. Only whole samples are ever stored; a bad frame leaves
//! the previous state in place.

pub mod servo;
pub mod vehicle;

pub use servo::{ServoLimits, ServoReading, ServoStatus};
pub use vehicle::{VehicleState, VehicleStateStore};

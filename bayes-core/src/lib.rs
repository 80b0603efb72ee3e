//! Hardware-agnostic ground station logic
//!
//! This crate contains everything between the serial link and the screen:
//!
//! - Orientation model (quaternion to rotated body-frame geometry)
//! - Vehicle state store (latest validated sample plus derived geometry)
//! - Command dispatcher (pilot intents to single wire bytes)
//! - Link health, frame statistics and the operator console
//! - The [`GroundStation`] engine driving all of the above once per tick
//! - Configuration type definitions

#![deny(unsafe_code)]

pub mod command;
pub mod config;
pub mod console;
pub mod engine;
pub mod monitor;
pub mod orientation;
pub mod state;

pub use command::{CommandDispatcher, CommandError};
pub use engine::{GroundStation, LineOutcome, TickReport};
pub use orientation::{OrientationError, OrientationGeometry, OrientationModel, ReferenceFrame};
pub use state::{VehicleState, VehicleStateStore};
pub use config::GcsConfig;
pub use console::{Console, ConsoleEntry, ConsoleSource};
pub use monitor::{LinkHealth, LinkStatus, TelemetryStats};

//! Dashboard rendering for the Bayes ground station
//!
//! This crate provides:
//! - `DisplayBackend` trait for the places a dashboard can go (terminal, log)
//! - `Screen`, a fixed-size character buffer
//! - `Dashboard`, which lays out the station state on a `Screen`
//!
//! # Architecture
//!
//! The engine in `bayes-core` knows nothing about presentation. Once per tick
//! the binary takes a [`StationView`] of the engine, lets the [`Dashboard`]
//! compose a [`Screen`] from it, and hands the screen to whichever backend
//! is active.

pub mod backend;
pub mod dashboard;
pub mod screen;
pub mod terminal;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use dashboard::{Dashboard, StationView};
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
pub use terminal::{HeadlessBackend, TerminalBackend};

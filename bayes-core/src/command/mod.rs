//! Pilot command dispatch

mod dispatcher;

pub use dispatcher::{CommandDispatcher, CommandError};

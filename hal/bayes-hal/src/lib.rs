//! Bayes Transport Abstraction Layer
//!
//! This crate defines the transport traits the ground station core is written
//! against. The flight computer is reached over a bidirectional byte stream
//! (USB CDC-ACM serial in practice); the core only ever sees complete text
//! lines coming in and raw command bytes going out.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Ground station (bayes-core, bayes-gcs) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  bayes-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  SerialLink   │       │   MockLink    │
//! │  (bayes-gcs)  │       │ (feature mock)│
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`link::LineSource`] - non-blocking line reception
//! - [`link::CommandSink`] - command byte transmission
//! - [`link::Link`] - both directions on one port

#![deny(unsafe_code)]

pub mod line;
pub mod link;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export key types at crate root for convenience
pub use line::{LineAssembler, ReceivedLine, MAX_LINE_LEN};
pub use link::{CommandSink, DataBits, LineSource, Link, LinkConfig, LinkError, Parity, StopBits};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockLink;

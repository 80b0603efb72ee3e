//! Configuration types
//!
//! Station configuration as loaded from TOML by the binary. Serde derives
//! sit behind the `serde` feature.

pub mod types;

pub use types::*;

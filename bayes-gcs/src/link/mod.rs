//! Transport implementations

mod serial;

pub use serial::SerialLink;

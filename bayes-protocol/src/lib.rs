//! Bayes Telemetry Protocol
//!
//! This crate defines the line-oriented protocol spoken by the Bayes flight
//! computer over its USB serial port, as seen from the ground station.
//!
//! # Protocol Overview
//!
//! Inbound, the vehicle emits one line per message:
//! ```text
//! {"quats":[w,x,y,z],"servo":[s1,s2,s3,s4]}     telemetry frame (JSON object)
//! IMU Init Success                              anything else: console text
//! ```
//!
//! Outbound, the ground station sends single raw bytes:
//! ```text
//! 'P'  PREFLIGHT - alignment active, servos locked
//! 'O'  OVERRIDE  - gyro integration active, servos live
//! ```
//!
//! Frames cut short by read chunking are expected and are dropped silently.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod commands;
pub mod frame;
pub mod telemetry;

pub use commands::PilotCommand;
pub use frame::{decode_line, Decoded, DiagnosticEvent, IgnoreReason, FRAME_START};
pub use telemetry::{ServoChannel, TelemetrySample, WireQuaternion, SERVO_CHANNELS};

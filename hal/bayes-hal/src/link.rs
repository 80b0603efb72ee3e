//! Serial link abstractions
//!
//! Provides traits for the line-oriented telemetry stream and the
//! single-byte command channel, so the core can run against a real serial
//! port or an in-memory link.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::line::ReceivedLine;

/// Transport errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    /// The link is not open
    #[error("link is closed")]
    Closed,
    /// A complete line arrived but was not valid UTF-8 (the line is consumed)
    #[error("discarded {len} bytes of non UTF-8 input")]
    InvalidUtf8 { len: usize },
    /// Too many bytes arrived without a line terminator (the bytes are consumed)
    #[error("discarded {len} bytes without a line terminator")]
    Overflow { len: usize },
    /// Opening the underlying device failed
    #[error("failed to open {port}: {reason}")]
    Open { port: String, reason: String },
    /// Read or write on the underlying device failed
    #[error("I/O error: {0}")]
    Io(String),
}

impl LinkError {
    /// Check if this error only affects a single line of input
    ///
    /// Line errors are routine on a chunked stream and must never stop the
    /// read loop.
    pub fn is_line_error(&self) -> bool {
        matches!(self, LinkError::InvalidUtf8 { .. } | LinkError::Overflow { .. })
    }

    /// Number of input bytes consumed by a line error, 0 otherwise
    pub fn consumed(&self) -> usize {
        match self {
            LinkError::InvalidUtf8 { len } | LinkError::Overflow { len } => *len,
            _ => 0,
        }
    }
}

impl From<std::io::Error> for LinkError {
    fn from(e: std::io::Error) -> Self {
        LinkError::Io(e.to_string())
    }
}

/// Line receiver
///
/// Implementations buffer partial lines internally across calls; callers
/// only ever observe complete lines.
pub trait LineSource {
    /// Number of received bytes not yet returned as lines
    ///
    /// Includes bytes still held by the device driver and bytes already
    /// staged as a partial line. Never blocks.
    fn bytes_pending(&mut self) -> Result<usize, LinkError>;

    /// Read the next complete line, terminator stripped
    ///
    /// The returned line carries the number of raw bytes it took off the
    /// stream. Returns `Ok(None)` if no complete line is available. Never
    /// waits for more data to arrive.
    fn read_line(&mut self) -> Result<Option<ReceivedLine>, LinkError>;
}

/// Command transmitter
pub trait CommandSink {
    /// Check if the link is open for writing
    fn is_open(&self) -> bool;

    /// Write all bytes to the link
    fn write_all(&mut self, data: &[u8]) -> Result<(), LinkError>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), LinkError>;

    /// Close the link; further writes fail with [`LinkError::Closed`]
    fn close(&mut self);
}

/// Combined link interface
///
/// For ports that provide both directions on a single device.
pub trait Link: LineSource + CommandSink {}

// Blanket implementation
impl<T: LineSource + CommandSink> Link for T {}

/// Default device path of the flight computer's USB serial port
pub const DEFAULT_PORT: &str = "/dev/ttyACM0";

/// Default bit rate
pub const DEFAULT_BAUDRATE: u32 = 115_200;

/// Link configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct LinkConfig {
    /// Device path or port name
    pub port: String,
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            port: String::from(DEFAULT_PORT),
            baudrate: DEFAULT_BAUDRATE,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

impl LinkConfig {
    /// Short human readable label, e.g. `/dev/ttyACM0 @ 115200 8N1`
    pub fn label(&self) -> String {
        let bits = match self.data_bits {
            DataBits::Seven => '7',
            DataBits::Eight => '8',
        };
        let parity = match self.parity {
            Parity::None => 'N',
            Parity::Even => 'E',
            Parity::Odd => 'O',
        };
        let stop = match self.stop_bits {
            StopBits::One => '1',
            StopBits::Two => '2',
        };
        format!("{} @ {} {}{}{}", self.port, self.baudrate, bits, parity, stop)
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StopBits {
    One,
    Two,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_label() {
        let config = LinkConfig::default();
        assert_eq!(config.label(), "/dev/ttyACM0 @ 115200 8N1");
    }

    #[test]
    fn test_line_errors() {
        assert!(LinkError::InvalidUtf8 { len: 4 }.is_line_error());
        assert!(LinkError::Overflow { len: 600 }.is_line_error());
        assert!(!LinkError::Closed.is_line_error());
        assert!(!LinkError::Io(String::from("gone")).is_line_error());
    }

    #[test]
    fn test_consumed() {
        assert_eq!(LinkError::InvalidUtf8 { len: 7 }.consumed(), 7);
        assert_eq!(LinkError::Closed.consumed(), 0);
    }
}

//! Serial port link
//!
//! Reads only what the OS reports as pending, so a tick never waits on the
//! vehicle. Partial lines stay in the assembler until their terminator
//! arrives.

use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

use serialport::SerialPort;
use tracing::{debug, info};

use bayes_hal::{
    CommandSink, DataBits, LineAssembler, LineSource, LinkConfig, LinkError, Parity,
    ReceivedLine, StopBits,
};

/// Upper bound for a single blocking call on the port
const PORT_TIMEOUT: Duration = Duration::from_millis(10);

/// Bytes read from the OS per call
const READ_CHUNK: usize = 1024;

/// Flight computer link over a serial port
pub struct SerialLink {
    port: Option<Box<dyn SerialPort>>,
    assembler: LineAssembler,
    label: String,
}

impl SerialLink {
    /// Open the configured port
    pub fn open(config: &LinkConfig) -> Result<Self, LinkError> {
        let port = serialport::new(config.port.as_str(), config.baudrate)
            .data_bits(match config.data_bits {
                DataBits::Seven => serialport::DataBits::Seven,
                DataBits::Eight => serialport::DataBits::Eight,
            })
            .parity(match config.parity {
                Parity::None => serialport::Parity::None,
                Parity::Even => serialport::Parity::Even,
                Parity::Odd => serialport::Parity::Odd,
            })
            .stop_bits(match config.stop_bits {
                StopBits::One => serialport::StopBits::One,
                StopBits::Two => serialport::StopBits::Two,
            })
            .timeout(PORT_TIMEOUT)
            .open()
            .map_err(|e| LinkError::Open {
                port: config.port.clone(),
                reason: e.to_string(),
            })?;

        let label = config.label();
        info!("Opened {}", label);

        Ok(Self {
            port: Some(port),
            assembler: LineAssembler::new(),
            label,
        })
    }

    /// Port description, e.g. `/dev/ttyACM0 @ 115200 8N1`
    pub fn label(&self) -> &str {
        &self.label
    }

    fn port(&mut self) -> Result<&mut Box<dyn SerialPort>, LinkError> {
        self.port.as_mut().ok_or(LinkError::Closed)
    }

    /// Move one chunk of pending OS bytes into the assembler
    ///
    /// Returns the number of bytes moved; 0 if nothing was pending.
    fn fill(&mut self) -> Result<usize, LinkError> {
        let port = self.port()?;
        let pending = port.bytes_to_read().map_err(port_error)? as usize;
        if pending == 0 {
            return Ok(0);
        }

        let mut buf = [0u8; READ_CHUNK];
        let want = pending.min(READ_CHUNK);
        match port.read(&mut buf[..want]) {
            Ok(n) => {
                self.assembler.extend(&buf[..n]);
                Ok(n)
            }
            Err(e) if e.kind() == ErrorKind::TimedOut => Ok(0),
            Err(e) => Err(e.into()),
        }
    }
}

fn port_error(e: serialport::Error) -> LinkError {
    LinkError::Io(e.to_string())
}

impl LineSource for SerialLink {
    fn bytes_pending(&mut self) -> Result<usize, LinkError> {
        let staged = self.assembler.staged_len();
        let pending = self.port()?.bytes_to_read().map_err(port_error)? as usize;
        Ok(pending + staged)
    }

    fn read_line(&mut self) -> Result<Option<ReceivedLine>, LinkError> {
        while !self.assembler.has_line() {
            if self.fill()? == 0 {
                break;
            }
        }
        self.assembler.next_line()
    }
}

impl CommandSink for SerialLink {
    fn is_open(&self) -> bool {
        self.port.is_some()
    }

    fn write_all(&mut self, data: &[u8]) -> Result<(), LinkError> {
        self.port()?.write_all(data)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), LinkError> {
        self.port()?.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        if self.port.take().is_some() {
            self.assembler.clear();
            debug!("Closed {}", self.label);
        }
    }
}

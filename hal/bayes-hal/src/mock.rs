//! In-memory link
//!
//! Stands in for the flight computer's serial port in tests: inbound bytes
//! are injected by the test, outbound bytes are recorded for inspection.

use std::collections::VecDeque;

use crate::line::{LineAssembler, ReceivedLine};
use crate::link::{CommandSink, LineSource, LinkError};

/// In-memory link with injectable RX and recorded TX
#[derive(Debug)]
pub struct MockLink {
    rx: VecDeque<u8>,
    assembler: LineAssembler,
    tx: Vec<u8>,
    open: bool,
    close_calls: usize,
}

impl Default for MockLink {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLink {
    /// Create an open link with empty buffers
    pub fn new() -> Self {
        Self {
            rx: VecDeque::new(),
            assembler: LineAssembler::new(),
            tx: Vec::new(),
            open: true,
            close_calls: 0,
        }
    }

    /// Create a link that reports itself closed
    pub fn closed() -> Self {
        Self {
            open: false,
            ..Self::new()
        }
    }

    /// Inject raw bytes as if received from the vehicle
    pub fn inject(&mut self, data: &[u8]) {
        self.rx.extend(data);
    }

    /// Inject a line followed by `\n`
    pub fn inject_line(&mut self, line: &str) {
        self.inject(line.as_bytes());
        self.inject(b"\n");
    }

    /// All bytes written so far
    pub fn written(&self) -> &[u8] {
        &self.tx
    }

    /// Take and clear the written bytes
    pub fn take_written(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.tx)
    }

    /// Force the open state
    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Number of times `close` was called
    pub fn close_calls(&self) -> usize {
        self.close_calls
    }
}

impl LineSource for MockLink {
    fn bytes_pending(&mut self) -> Result<usize, LinkError> {
        if !self.open {
            return Err(LinkError::Closed);
        }
        Ok(self.rx.len() + self.assembler.staged_len())
    }

    fn read_line(&mut self) -> Result<Option<ReceivedLine>, LinkError> {
        if !self.open {
            return Err(LinkError::Closed);
        }
        if !self.assembler.has_line() && !self.rx.is_empty() {
            let (front, back) = self.rx.as_slices();
            self.assembler.extend(front);
            self.assembler.extend(back);
            self.rx.clear();
        }
        self.assembler.next_line()
    }
}

impl CommandSink for MockLink {
    fn is_open(&self) -> bool {
        self.open
    }

    fn write_all(&mut self, data: &[u8]) -> Result<(), LinkError> {
        if !self.open {
            return Err(LinkError::Closed);
        }
        self.tx.extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), LinkError> {
        // No-op: writes land in the buffer immediately
        Ok(())
    }

    fn close(&mut self) {
        self.open = false;
        self.close_calls += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inject_and_read() {
        let mut link = MockLink::new();
        link.inject_line("boot: init ok");
        assert_eq!(link.bytes_pending(), Ok(14));
        assert_eq!(
            link.read_line(),
            Ok(Some(ReceivedLine::new("boot: init ok", 14)))
        );
        assert_eq!(link.read_line(), Ok(None));
        assert_eq!(link.bytes_pending(), Ok(0));
    }

    #[test]
    fn test_write_recorded() {
        let mut link = MockLink::new();
        link.write_all(b"P").unwrap();
        link.write_all(b"O").unwrap();
        assert_eq!(link.written(), b"PO");
        assert_eq!(link.take_written(), b"PO".to_vec());
        assert!(link.written().is_empty());
    }

    #[test]
    fn test_closed_link_rejects_io() {
        let mut link = MockLink::closed();
        assert!(!link.is_open());
        assert_eq!(link.write_all(b"P"), Err(LinkError::Closed));
        assert_eq!(link.read_line(), Err(LinkError::Closed));
    }

    #[test]
    fn test_close_counts() {
        let mut link = MockLink::new();
        link.close();
        assert!(!link.is_open());
        assert_eq!(link.close_calls(), 1);
    }
}

//! Partial-line staging shared by link implementations
//!
//! Bytes arrive from the device in arbitrary chunks. The assembler keeps
//! them until a `\n` terminator shows up, then hands out the line with
//! `\n` or `\r\n` stripped.

use tracing::debug;

use crate::link::LinkError;

/// Maximum accepted line length in bytes (excluding terminator)
///
/// A telemetry frame is well under 200 bytes; anything longer without a
/// terminator is line noise or a lost newline.
pub const MAX_LINE_LEN: usize = 512;

/// One line taken from the stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedLine {
    /// Line content, terminator stripped
    pub text: String,
    /// Raw bytes taken off the stream, terminator included
    pub consumed: usize,
}

impl ReceivedLine {
    pub fn new(text: impl Into<String>, consumed: usize) -> Self {
        Self {
            text: text.into(),
            consumed,
        }
    }
}

/// Staging buffer that splits a byte stream into lines
#[derive(Debug, Clone, Default)]
pub struct LineAssembler {
    staged: Vec<u8>,
}

impl LineAssembler {
    /// Create an empty assembler
    pub fn new() -> Self {
        Self { staged: Vec::new() }
    }

    /// Append received bytes
    pub fn extend(&mut self, bytes: &[u8]) {
        self.staged.extend_from_slice(bytes);
    }

    /// Number of staged bytes not yet returned as lines
    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }

    /// Check if a complete line is staged
    pub fn has_line(&self) -> bool {
        self.staged.contains(&b'\n')
    }

    /// Drop all staged bytes
    pub fn clear(&mut self) {
        self.staged.clear();
    }

    /// Take the next complete line
    ///
    /// Returns `Ok(None)` if no terminator has been staged yet. Invalid UTF-8
    /// and over-long lines are consumed and reported as line errors.
    pub fn next_line(&mut self) -> Result<Option<ReceivedLine>, LinkError> {
        let Some(end) = self.staged.iter().position(|&b| b == b'\n') else {
            if self.staged.len() > MAX_LINE_LEN {
                let len = self.staged.len();
                self.staged.clear();
                debug!("Discarding {} bytes without line terminator", len);
                return Err(LinkError::Overflow { len });
            }
            return Ok(None);
        };

        let consumed = end + 1;
        let mut raw: Vec<u8> = self.staged.drain(..consumed).collect();
        raw.pop();
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }

        if raw.len() > MAX_LINE_LEN {
            return Err(LinkError::Overflow { len: consumed });
        }

        String::from_utf8(raw)
            .map(|text| Some(ReceivedLine { text, consumed }))
            .map_err(|_| LinkError::InvalidUtf8 { len: consumed })
    }
}

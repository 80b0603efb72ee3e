//! Terminal and headless backends

use std::io::Write;
use std::time::{Duration, Instant};

use tracing::info;

use crate::backend::{DisplayBackend, DisplayError};
use crate::screen::{Screen, SCREEN_COLS, SCREEN_ROWS};

/// Cursor home followed by clear screen
const CLEAR: &str = "\x1b[H\x1b[2J";
const REVERSE: &str = "\x1b[7m";
const RESET: &str = "\x1b[0m";

/// Full-screen dashboard on an ANSI terminal
///
/// Redraws the whole screen on every dirty frame. Highlights are drawn in
/// reverse video.
#[derive(Debug)]
pub struct TerminalBackend<W: Write> {
    out: W,
    frames: u64,
}

impl<W: Write> TerminalBackend<W> {
    pub fn new(out: W) -> Self {
        Self { out, frames: 0 }
    }

    /// Frames written so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Give back the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_row(&mut self, line: &str, highlight: Option<(usize, usize)>) -> std::io::Result<()> {
        match highlight {
            Some((start, end)) => {
                let byte_at = |col: usize| {
                    line.char_indices()
                        .nth(col)
                        .map_or(line.len(), |(i, _)| i)
                };
                let end = byte_at(end);
                let start = byte_at(start).min(end);
                write!(
                    self.out,
                    "{}{}{}{}{}",
                    &line[..start],
                    REVERSE,
                    &line[start..end],
                    RESET,
                    &line[end..]
                )?;
            }
            None => self.out.write_all(line.as_bytes())?,
        }
        self.out.write_all(b"\r\n")
    }
}

impl<W: Write> DisplayBackend for TerminalBackend<W> {
    fn present(&mut self, screen: &Screen) -> Result<(), DisplayError> {
        if !screen.is_dirty() {
            return Ok(());
        }

        self.out.write_all(CLEAR.as_bytes())?;
        for (row, line) in screen.lines().enumerate() {
            self.write_row(line, screen.get_highlight(row))?;
        }
        self.out.flush()?;
        self.frames += 1;
        Ok(())
    }

    fn dimensions(&self) -> (usize, usize) {
        (SCREEN_COLS, SCREEN_ROWS)
    }

    fn is_ready(&self) -> bool {
        true
    }
}

/// Backend for runs without a terminal
///
/// Logs the header and attitude rows through `tracing`, at most once per
/// interval.
#[derive(Debug)]
pub struct HeadlessBackend {
    interval: Duration,
    last_log: Option<Instant>,
    logged: u64,
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl HeadlessBackend {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_log: None,
            logged: 0,
        }
    }

    /// Summaries logged so far
    pub fn logged(&self) -> u64 {
        self.logged
    }
}

impl DisplayBackend for HeadlessBackend {
    fn present(&mut self, screen: &Screen) -> Result<(), DisplayError> {
        let now = Instant::now();
        if let Some(last) = self.last_log {
            if now.duration_since(last) < self.interval {
                return Ok(());
            }
        }
        self.last_log = Some(now);
        self.logged += 1;

        let header = screen.get_line(0).unwrap_or_default();
        let attitude = screen.get_line(2).unwrap_or_default();
        info!("{} | {}", header, attitude);
        Ok(())
    }

    fn dimensions(&self) -> (usize, usize) {
        (SCREEN_COLS, SCREEN_ROWS)
    }

    fn is_ready(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_writes_clear_and_rows() {
        let mut screen = Screen::new();
        screen.set_line(0, "BAYES 3.5 GCS");
        screen.set_line(1, "S1  60.0 SAT");
        screen.set_highlight(1, 9, 12);

        let mut term = TerminalBackend::new(Vec::new());
        term.present(&screen).unwrap();
        assert_eq!(term.frames(), 1);

        let out = String::from_utf8(term.into_inner()).unwrap();
        assert!(out.starts_with(CLEAR));
        assert!(out.contains("BAYES 3.5 GCS\r\n"));
        assert!(out.contains("S1  60.0 \x1b[7mSAT\x1b[0m\r\n"));
        assert_eq!(out.matches("\r\n").count(), SCREEN_ROWS);
    }

    #[test]
    fn test_terminal_skips_clean_screen() {
        let mut screen = Screen::new();
        screen.mark_clean();

        let mut term = TerminalBackend::new(Vec::new());
        term.present(&screen).unwrap();
        assert_eq!(term.frames(), 0);
        assert!(term.into_inner().is_empty());
    }

    #[test]
    fn test_highlight_after_multibyte_chars() {
        let mut screen = Screen::new();
        screen.set_line(0, "a°b°c");
        screen.set_highlight(0, 2, 3);

        let mut term = TerminalBackend::new(Vec::new());
        term.present(&screen).unwrap();
        let out = String::from_utf8(term.into_inner()).unwrap();
        assert!(out.contains("a°\x1b[7mb\x1b[0m°c"));
    }

    #[test]
    fn test_headless_rate_limit() {
        let screen = Screen::new();

        let mut headless = HeadlessBackend::new(Duration::from_secs(3600));
        headless.present(&screen).unwrap();
        headless.present(&screen).unwrap();
        assert_eq!(headless.logged(), 1);

        let mut headless = HeadlessBackend::new(Duration::ZERO);
        headless.present(&screen).unwrap();
        headless.present(&screen).unwrap();
        assert_eq!(headless.logged(), 2);
    }
}

//! Screen buffer types
//!
//! Provides a character-based screen buffer for text-mode displays.

use heapless::String;

/// Number of character rows
pub const SCREEN_ROWS: usize = 36;

/// Number of character columns
pub const SCREEN_COLS: usize = 80;

/// Bytes reserved per row (any char fits in 4 UTF-8 bytes)
const LINE_CAPACITY: usize = SCREEN_COLS * 4;

/// Screen buffer for text-mode displays
///
/// Rows hold at most [`SCREEN_COLS`] characters; longer text is cut at a
/// character boundary.
#[derive(Clone, Debug)]
pub struct Screen {
    lines: [String<LINE_CAPACITY>; SCREEN_ROWS],
    /// Highlight per row as (start_col, end_col), end exclusive
    highlights: [Option<(usize, usize)>; SCREEN_ROWS],
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new empty screen
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            highlights: [None; SCREEN_ROWS],
            dirty: true,
        }
    }

    /// Clear the entire screen
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.highlights = [None; SCREEN_ROWS];
        self.dirty = true;
    }

    /// Set the content of a specific row
    pub fn set_line(&mut self, row: usize, text: &str) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        let cut = text
            .char_indices()
            .nth(SCREEN_COLS)
            .map_or(text.len(), |(i, _)| i);
        line.clear();
        // Fits: at most SCREEN_COLS chars of at most 4 bytes each
        let _ = line.push_str(&text[..cut]);
        self.dirty = true;
    }

    /// Get the content of a specific row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Set highlight region for a row, in columns
    pub fn set_highlight(&mut self, row: usize, start_col: usize, end_col: usize) {
        let end_col = end_col.min(SCREEN_COLS);
        if row < SCREEN_ROWS && start_col < end_col {
            self.highlights[row] = Some((start_col, end_col));
            self.dirty = true;
        }
    }

    /// Get highlight region for a row
    pub fn get_highlight(&self, row: usize) -> Option<(usize, usize)> {
        self.highlights.get(row).copied().flatten()
    }

    /// Check if screen needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark screen as clean (after rendering)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Get all lines as an iterator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    /// Index of the first row containing `needle`
    pub fn find(&self, needle: &str) -> Option<usize> {
        self.lines().position(|line| line.contains(needle))
    }

    /// Get number of rows
    pub const fn rows(&self) -> usize {
        SCREEN_ROWS
    }

    /// Get number of columns
    pub const fn cols(&self) -> usize {
        SCREEN_COLS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_line() {
        let mut screen = Screen::new();
        screen.mark_clean();
        screen.set_line(2, "ATTITUDE");
        assert_eq!(screen.get_line(2), Some("ATTITUDE"));
        assert_eq!(screen.get_line(0), Some(""));
        assert!(screen.is_dirty());
    }

    #[test]
    fn test_out_of_range_row_ignored() {
        let mut screen = Screen::new();
        screen.set_line(SCREEN_ROWS, "lost");
        assert_eq!(screen.get_line(SCREEN_ROWS), None);
        assert_eq!(screen.find("lost"), None);
    }

    #[test]
    fn test_truncates_at_char_boundary() {
        let mut screen = Screen::new();
        let long = "°".repeat(SCREEN_COLS + 5);
        screen.set_line(0, &long);
        assert_eq!(screen.get_line(0).unwrap().chars().count(), SCREEN_COLS);

        let ascii = "x".repeat(SCREEN_COLS * 2);
        screen.set_line(1, &ascii);
        assert_eq!(screen.get_line(1).unwrap().len(), SCREEN_COLS);
    }

    #[test]
    fn test_highlight_and_clear() {
        let mut screen = Screen::new();
        screen.set_highlight(3, 70, 200);
        assert_eq!(screen.get_highlight(3), Some((70, SCREEN_COLS)));

        screen.set_highlight(4, 5, 5);
        assert_eq!(screen.get_highlight(4), None);

        // Entirely off screen
        screen.set_highlight(5, 90, 97);
        assert_eq!(screen.get_highlight(5), None);

        screen.set_line(3, "S1");
        screen.clear();
        assert_eq!(screen.get_highlight(3), None);
        assert_eq!(screen.get_line(3), Some(""));
    }
}

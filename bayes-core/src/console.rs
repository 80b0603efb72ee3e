//! Operator console
//!
//! Fixed-size history of vehicle text and station notices. The oldest entry
//! is evicted once the buffer is full.

use heapless::Deque;

/// Number of entries kept
pub const CONSOLE_CAPACITY: usize = 16;

/// Origin of a console entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleSource {
    /// Free-form text from the flight computer
    Vehicle,
    /// Station-side problem worth the operator's attention
    Warning,
    /// Command sent or refused
    Command,
}

impl ConsoleSource {
    /// Short prefix for display
    pub fn tag(self) -> &'static str {
        match self {
            ConsoleSource::Vehicle => "FC",
            ConsoleSource::Warning => "!!",
            ConsoleSource::Command => ">>",
        }
    }
}

/// One console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleEntry {
    pub source: ConsoleSource,
    pub text: String,
    /// Engine time the entry was recorded at
    pub at_ms: u64,
}

/// Ring buffer of recent console entries
#[derive(Debug, Default)]
pub struct Console {
    entries: Deque<ConsoleEntry, CONSOLE_CAPACITY>,
    total: u64,
}

impl Console {
    /// Create an empty console
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, evicting the oldest if full
    pub fn push(&mut self, source: ConsoleSource, text: impl Into<String>, at_ms: u64) {
        if self.entries.is_full() {
            self.entries.pop_front();
        }
        let entry = ConsoleEntry {
            source,
            text: text.into(),
            at_ms,
        };
        // Cannot fail: a slot was freed above
        let _ = self.entries.push_back(entry);
        self.total += 1;
    }

    /// Number of entries held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no entries are held
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries ever pushed
    pub fn total(&self) -> u64 {
        self.total
    }

    /// All held entries, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &ConsoleEntry> {
        self.entries.iter()
    }

    /// Up to `n` most recent entries, oldest first
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &ConsoleEntry> {
        self.entries.iter().skip(self.entries.len().saturating_sub(n))
    }

    /// Most recent entry
    pub fn last(&self) -> Option<&ConsoleEntry> {
        self.entries.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_last() {
        let mut console = Console::new();
        assert!(console.is_empty());

        console.push(ConsoleSource::Vehicle, "boot: init ok", 5);
        let last = console.last().unwrap();
        assert_eq!(last.source, ConsoleSource::Vehicle);
        assert_eq!(last.text, "boot: init ok");
        assert_eq!(last.at_ms, 5);
    }

    #[test]
    fn test_evicts_oldest() {
        let mut console = Console::new();
        for i in 0..(CONSOLE_CAPACITY + 3) {
            console.push(ConsoleSource::Vehicle, format!("line {}", i), i as u64);
        }

        assert_eq!(console.len(), CONSOLE_CAPACITY);
        assert_eq!(console.total(), (CONSOLE_CAPACITY + 3) as u64);
        assert_eq!(console.iter().next().unwrap().text, "line 3");
        assert_eq!(
            console.last().unwrap().text,
            format!("line {}", CONSOLE_CAPACITY + 2)
        );
    }

    #[test]
    fn test_recent() {
        let mut console = Console::new();
        console.push(ConsoleSource::Vehicle, "a", 0);
        console.push(ConsoleSource::Warning, "b", 1);
        console.push(ConsoleSource::Command, "c", 2);

        let texts: Vec<_> = console.recent(2).map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["b", "c"]);

        let texts: Vec<_> = console.recent(10).map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["a", "b", "c"]);
    }
}

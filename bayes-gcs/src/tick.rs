//! Fixed-period tick source

use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

/// Sleeps until each tick deadline and reports elapsed milliseconds
#[derive(Debug)]
pub struct Ticker {
    start: Instant,
    period: Duration,
    next: Instant,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        let start = Instant::now();
        Self {
            start,
            period,
            next: start + period,
        }
    }

    /// Milliseconds since the ticker was created
    pub fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Wait for the next deadline
    ///
    /// If the caller fell more than a period behind, the schedule restarts
    /// from now instead of firing a burst of late ticks.
    pub fn wait(&mut self) -> u64 {
        let now = Instant::now();
        if let Some(remaining) = self.next.checked_duration_since(now) {
            thread::sleep(remaining);
            self.next += self.period;
        } else if now.duration_since(self.next) > self.period {
            debug!("Tick overrun by {:?}", now.duration_since(self.next));
            self.next = now + self.period;
        } else {
            self.next += self.period;
        }
        self.now_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_advances_time() {
        let mut ticker = Ticker::new(Duration::from_millis(5));
        let first = ticker.wait();
        let second = ticker.wait();
        assert!(first >= 5);
        assert!(second >= 10);
    }

    #[test]
    fn test_overrun_resyncs() {
        let mut ticker = Ticker::new(Duration::from_millis(1));
        thread::sleep(Duration::from_millis(20));
        let before = Instant::now();
        ticker.wait();
        // Next deadline is one period ahead, not in the past
        assert!(ticker.next > before);
    }
}

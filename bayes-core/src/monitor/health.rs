//! Telemetry freshness
//!
//! The vehicle streams at roughly 20-100 Hz. A gap of a second means the
//! cable, the port or the flight computer has a problem.

/// Default age after which telemetry counts as stale
pub const DEFAULT_STALE_AFTER_MS: u64 = 1000;

/// Freshness of the telemetry stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    /// No sample accepted yet
    NoData,
    /// Last sample is recent
    Live,
    /// Last sample is older than the stale threshold
    Stale,
}

impl LinkStatus {
    /// Short display label
    pub fn label(self) -> &'static str {
        match self {
            LinkStatus::NoData => "NO DATA",
            LinkStatus::Live => "LIVE",
            LinkStatus::Stale => "STALE",
        }
    }
}

/// Freshness tracker
#[derive(Debug, Clone)]
pub struct LinkHealth {
    /// Age threshold for [`LinkStatus::Stale`]
    stale_after_ms: u64,
    /// Time of the last accepted sample
    last_sample_ms: Option<u64>,
    /// Latest time seen
    now_ms: u64,
}

impl Default for LinkHealth {
    fn default() -> Self {
        Self::new(DEFAULT_STALE_AFTER_MS)
    }
}

impl LinkHealth {
    /// Create a tracker with the given stale threshold
    pub fn new(stale_after_ms: u64) -> Self {
        Self {
            stale_after_ms,
            last_sample_ms: None,
            now_ms: 0,
        }
    }

    /// Record an accepted sample
    pub fn sample_received(&mut self, now_ms: u64) {
        self.update_time(now_ms);
        self.last_sample_ms = Some(now_ms);
    }

    /// Advance the clock
    ///
    /// Time never runs backwards; an older timestamp is ignored.
    pub fn update_time(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Age of the last sample
    pub fn ms_since_sample(&self) -> Option<u64> {
        self.last_sample_ms
            .map(|t| self.now_ms.saturating_sub(t))
    }

    /// Current freshness
    pub fn status(&self) -> LinkStatus {
        match self.ms_since_sample() {
            None => LinkStatus::NoData,
            Some(age) if age >= self.stale_after_ms => LinkStatus::Stale,
            Some(_) => LinkStatus::Live,
        }
    }
}

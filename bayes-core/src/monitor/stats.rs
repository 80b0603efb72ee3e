//! Per-line outcome counters

use bayes_protocol::IgnoreReason;

/// Ignored lines by reason
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IgnoredCounts {
    pub empty: u64,
    pub truncated: u64,
    pub malformed: u64,
    pub missing_key: u64,
    pub bad_shape: u64,
}

impl IgnoredCounts {
    /// Sum over all reasons
    pub fn total(&self) -> u64 {
        self.empty + self.truncated + self.malformed + self.missing_key + self.bad_shape
    }
}

/// Running counters since start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TelemetryStats {
    /// Lines handed to the decoder
    pub lines: u64,
    /// Samples accepted into the vehicle state
    pub samples: u64,
    /// Console text lines
    pub diagnostics: u64,
    /// Lines dropped by the decoder
    pub ignored: IgnoredCounts,
    /// Lines the link could not deliver as text (bad UTF-8, overflow)
    pub undecodable: u64,
    /// Samples rejected for an unusable quaternion
    pub rejected: u64,
    /// Commands written to the link
    pub commands_sent: u64,
    /// Commands not written
    pub commands_refused: u64,
}

impl TelemetryStats {
    /// Count an ignored line
    pub fn record_ignored(&mut self, reason: IgnoreReason) {
        let counter = match reason {
            IgnoreReason::Empty => &mut self.ignored.empty,
            IgnoreReason::Truncated => &mut self.ignored.truncated,
            IgnoreReason::Malformed => &mut self.ignored.malformed,
            IgnoreReason::MissingKey(_) => &mut self.ignored.missing_key,
            IgnoreReason::BadShape(_) => &mut self.ignored.bad_shape,
        };
        *counter += 1;
    }

    /// Lines that produced no sample and no console text
    pub fn dropped(&self) -> u64 {
        self.ignored.total() + self.undecodable + self.rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_ignored() {
        let mut stats = TelemetryStats::default();
        stats.record_ignored(IgnoreReason::Truncated);
        stats.record_ignored(IgnoreReason::Truncated);
        stats.record_ignored(IgnoreReason::MissingKey("servo"));
        stats.record_ignored(IgnoreReason::BadShape("quats"));

        assert_eq!(stats.ignored.truncated, 2);
        assert_eq!(stats.ignored.missing_key, 1);
        assert_eq!(stats.ignored.bad_shape, 1);
        assert_eq!(stats.ignored.total(), 4);
    }

    #[test]
    fn test_dropped_includes_link_and_orientation() {
        let mut stats = TelemetryStats::default();
        stats.record_ignored(IgnoreReason::Malformed);
        stats.undecodable = 2;
        stats.rejected = 3;
        assert_eq!(stats.dropped(), 6);
    }
}

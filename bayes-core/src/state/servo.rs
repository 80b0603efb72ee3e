//! Fin servo range checks
//!
//! The flight computer limits each fin to a fixed travel around center.
//! A channel sitting at either end stop is flagged so the operator sees the
//! controller saturating.

use bayes_protocol::{ServoChannel, TelemetrySample, SERVO_CHANNELS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Servo center position in degrees
pub const DEFAULT_CENTER_DEG: f64 = 90.0;

/// Maximum deflection either side of center in degrees
pub const DEFAULT_TRAVEL_DEG: f64 = 30.0;

/// Distance from an end stop still counted as saturated
pub const DEFAULT_TOLERANCE_DEG: f64 = 0.1;

/// Actuator range configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ServoLimits {
    pub center_deg: f64,
    pub travel_deg: f64,
    pub tolerance_deg: f64,
}

impl Default for ServoLimits {
    fn default() -> Self {
        Self {
            center_deg: DEFAULT_CENTER_DEG,
            travel_deg: DEFAULT_TRAVEL_DEG,
            tolerance_deg: DEFAULT_TOLERANCE_DEG,
        }
    }
}

impl ServoLimits {
    /// Lowest commanded angle
    pub fn min_deg(&self) -> f64 {
        self.center_deg - self.travel_deg
    }

    /// Highest commanded angle
    pub fn max_deg(&self) -> f64 {
        self.center_deg + self.travel_deg
    }

    /// Check that the limits describe a usable range
    pub fn is_valid(&self) -> bool {
        self.center_deg.is_finite()
            && self.travel_deg.is_finite()
            && self.tolerance_deg.is_finite()
            && self.travel_deg > 0.0
            && self.tolerance_deg >= 0.0
            && self.tolerance_deg < self.travel_deg
    }

    /// Classify one angle
    pub fn classify(&self, angle_deg: f64) -> ServoStatus {
        if angle_deg <= self.min_deg() + self.tolerance_deg
            || angle_deg >= self.max_deg() - self.tolerance_deg
        {
            ServoStatus::Saturated
        } else {
            ServoStatus::Nominal
        }
    }

    /// Readings for all channels of a sample
    pub fn readings(&self, sample: &TelemetrySample) -> [ServoReading; SERVO_CHANNELS] {
        ServoChannel::ALL.map(|channel| {
            let angle_deg = sample.servo(channel);
            ServoReading {
                channel,
                angle_deg,
                deflection_deg: angle_deg - self.center_deg,
                status: self.classify(angle_deg),
            }
        })
    }
}

/// Range status of one servo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServoStatus {
    /// Inside the travel range
    Nominal,
    /// At or beyond an end stop
    Saturated,
}

/// One servo channel of the current state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServoReading {
    pub channel: ServoChannel,
    /// Reported angle in degrees
    pub angle_deg: f64,
    /// Angle relative to center
    pub deflection_deg: f64,
    pub status: ServoStatus,
}

impl ServoReading {
    /// Check if this channel is at an end stop
    pub fn is_saturated(&self) -> bool {
        self.status == ServoStatus::Saturated
    }
}

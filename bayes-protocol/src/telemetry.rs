//! Telemetry sample types

/// Number of fin servo channels reported per frame
pub const SERVO_CHANNELS: usize = 4;

/// Attitude quaternion exactly as transmitted
///
/// The flight computer sends the scalar part first: `[w, x, y, z]`. Keep the
/// components named so the order can never be confused with the vector-first
/// `[x, y, z, w]` layout many rotation libraries use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireQuaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl WireQuaternion {
    /// The identity rotation
    pub const IDENTITY: Self = Self {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Build from a scalar-first `[w, x, y, z]` array
    pub fn from_scalar_first(q: [f64; 4]) -> Self {
        Self {
            w: q[0],
            x: q[1],
            y: q[2],
            z: q[3],
        }
    }

    /// Components in wire order `[w, x, y, z]`
    pub fn to_scalar_first(&self) -> [f64; 4] {
        [self.w, self.x, self.y, self.z]
    }

    /// Components in vector-first order `[x, y, z, w]`
    pub fn to_vector_first(&self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Squared magnitude
    pub fn norm_squared(&self) -> f64 {
        self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Check that every component is finite
    pub fn is_finite(&self) -> bool {
        self.to_scalar_first().iter().all(|c| c.is_finite())
    }
}

/// Fin servo channel
///
/// Index order is fixed by the flight computer's output mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServoChannel {
    S1,
    S2,
    S3,
    S4,
}

impl ServoChannel {
    /// All channels in wire order
    pub const ALL: [ServoChannel; SERVO_CHANNELS] = [
        ServoChannel::S1,
        ServoChannel::S2,
        ServoChannel::S3,
        ServoChannel::S4,
    ];

    /// Position within the `servo` array
    pub fn index(self) -> usize {
        match self {
            ServoChannel::S1 => 0,
            ServoChannel::S2 => 1,
            ServoChannel::S3 => 2,
            ServoChannel::S4 => 3,
        }
    }

    /// Short display label
    pub fn label(self) -> &'static str {
        match self {
            ServoChannel::S1 => "S1",
            ServoChannel::S2 => "S2",
            ServoChannel::S3 => "S3",
            ServoChannel::S4 => "S4",
        }
    }
}

/// One validated telemetry frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySample {
    /// Vehicle attitude, not necessarily normalized by the sender
    pub quaternion: WireQuaternion,
    /// Servo angles in degrees, indexed by [`ServoChannel::index`]
    pub servo_deflections: [f64; SERVO_CHANNELS],
}

impl TelemetrySample {
    /// Servo angle of one channel in degrees
    pub fn servo(&self, channel: ServoChannel) -> f64 {
        self.servo_deflections[channel.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_orders() {
        let q = WireQuaternion::from_scalar_first([0.1, 0.2, 0.3, 0.4]);
        assert_eq!(q.w, 0.1);
        assert_eq!(q.to_scalar_first(), [0.1, 0.2, 0.3, 0.4]);
        assert_eq!(q.to_vector_first(), [0.2, 0.3, 0.4, 0.1]);
    }

    #[test]
    fn test_norm_squared() {
        assert_eq!(WireQuaternion::IDENTITY.norm_squared(), 1.0);
        let q = WireQuaternion::from_scalar_first([1.0, 1.0, 1.0, 1.0]);
        assert_eq!(q.norm_squared(), 4.0);
    }

    #[test]
    fn test_finite() {
        assert!(WireQuaternion::IDENTITY.is_finite());
        let q = WireQuaternion::from_scalar_first([f64::NAN, 0.0, 0.0, 0.0]);
        assert!(!q.is_finite());
    }

    #[test]
    fn test_servo_channel_lookup() {
        let sample = TelemetrySample {
            quaternion: WireQuaternion::IDENTITY,
            servo_deflections: [60.0, 90.0, 95.0, 120.0],
        };
        assert_eq!(sample.servo(ServoChannel::S1), 60.0);
        assert_eq!(sample.servo(ServoChannel::S4), 120.0);
        for (i, channel) in ServoChannel::ALL.iter().enumerate() {
            assert_eq!(channel.index(), i);
        }
    }
}

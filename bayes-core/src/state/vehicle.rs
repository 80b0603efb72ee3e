//! Latest vehicle state

use tracing::trace;

use bayes_protocol::{TelemetrySample, SERVO_CHANNELS};

use super::servo::{ServoLimits, ServoReading};
use crate::orientation::{OrientationError, OrientationGeometry, OrientationModel};

/// A validated sample and everything derived from it
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleState {
    /// Sample as decoded from the wire
    pub sample: TelemetrySample,
    /// Geometry computed from `sample.quaternion`
    pub geometry: OrientationGeometry,
    /// Servo readings computed from `sample.servo_deflections`
    pub servos: [ServoReading; SERVO_CHANNELS],
    /// Number of accepted samples including this one
    pub sequence: u64,
    /// Engine time the sample was accepted at
    pub received_at_ms: u64,
}

impl VehicleState {
    /// Check if any servo is at an end stop
    pub fn any_saturated(&self) -> bool {
        self.servos.iter().any(|s| s.is_saturated())
    }
}

/// Owner of the single current vehicle state
///
/// A new state is fully built before it replaces the old one, so readers
/// never see a sample paired with geometry from another sample.
#[derive(Debug, Clone, Default)]
pub struct VehicleStateStore {
    model: OrientationModel,
    limits: ServoLimits,
    current: Option<VehicleState>,
    accepted: u64,
}

impl VehicleStateStore {
    /// Create an empty store
    pub fn new(model: OrientationModel, limits: ServoLimits) -> Self {
        Self {
            model,
            limits,
            current: None,
            accepted: 0,
        }
    }

    /// Orientation model used for updates
    pub fn model(&self) -> &OrientationModel {
        &self.model
    }

    /// Servo limits used for updates
    pub fn limits(&self) -> &ServoLimits {
        &self.limits
    }

    /// Latest state, `None` before the first accepted sample
    pub fn current(&self) -> Option<&VehicleState> {
        self.current.as_ref()
    }

    /// Number of samples accepted so far
    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Replace the current state with one built from `sample`
    ///
    /// If the orientation cannot be computed the current state is kept
    /// unchanged and the error is returned for the caller to report.
    pub fn update(
        &mut self,
        sample: TelemetrySample,
        now_ms: u64,
    ) -> Result<&VehicleState, OrientationError> {
        let geometry = self.model.apply(&sample.quaternion)?;
        let servos = self.limits.readings(&sample);
        let sequence = self.accepted + 1;

        trace!("Accepted sample {}", sequence);

        self.accepted = sequence;
        Ok(self.current.insert(VehicleState {
            sample,
            geometry,
            servos,
            sequence,
            received_at_ms: now_ms,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bayes_protocol::WireQuaternion;

    fn sample(q: [f64; 4], servo: [f64; 4]) -> TelemetrySample {
        TelemetrySample {
            quaternion: WireQuaternion::from_scalar_first(q),
            servo_deflections: servo,
        }
    }

    #[test]
    fn test_empty_before_first_sample() {
        let store = VehicleStateStore::default();
        assert!(store.current().is_none());
        assert_eq!(store.accepted(), 0);
    }

    #[test]
    fn test_update_replaces_servos_completely() {
        let mut store = VehicleStateStore::default();
        store
            .update(sample([1.0, 0.0, 0.0, 0.0], [90.0; 4]), 10)
            .unwrap();
        store
            .update(sample([1.0, 0.0, 0.0, 0.0], [60.0, 90.0, 90.0, 120.0]), 20)
            .unwrap();

        let state = store.current().unwrap();
        assert_eq!(state.sample.servo_deflections, [60.0, 90.0, 90.0, 120.0]);
        assert_eq!(state.servos[0].angle_deg, 60.0);
        assert_eq!(state.servos[3].angle_deg, 120.0);
        assert!(state.any_saturated());
        assert_eq!(state.sequence, 2);
        assert_eq!(state.received_at_ms, 20);
    }

    #[test]
    fn test_degenerate_quaternion_keeps_previous_state() {
        let mut store = VehicleStateStore::default();
        store
            .update(sample([1.0, 0.0, 0.0, 0.0], [95.0; 4]), 10)
            .unwrap();
        let before = store.current().cloned();

        let err = store
            .update(sample([0.0, 0.0, 0.0, 0.0], [70.0; 4]), 20)
            .unwrap_err();
        assert!(matches!(err, OrientationError::Degenerate { .. }));
        assert_eq!(store.current().cloned(), before);
        assert_eq!(store.accepted(), 1);
    }

    #[test]
    fn test_overflowing_quaternion_keeps_previous_state() {
        let mut store = VehicleStateStore::default();
        store
            .update(sample([1.0, 0.0, 0.0, 0.0], [95.0; 4]), 10)
            .unwrap();
        let before = store.current().cloned();

        let err = store
            .update(sample([1e200, 1e200, 0.0, 0.0], [70.0; 4]), 20)
            .unwrap_err();
        assert_eq!(err, OrientationError::Unbounded);
        assert_eq!(store.current().cloned(), before);
    }

    #[test]
    fn test_geometry_matches_sample() {
        let mut store = VehicleStateStore::default();
        let q = [0.7071, 0.0, 0.0, 0.7071];
        store.update(sample(q, [90.0; 4]), 0).unwrap();
        let expected = store
            .model()
            .apply(&WireQuaternion::from_scalar_first(q))
            .unwrap();
        assert_eq!(store.current().unwrap().geometry, expected);
    }
}

//! Quaternion to geometry conversion

use nalgebra::{Point3, Quaternion, UnitQuaternion, Vector4};

use bayes_protocol::WireQuaternion;

use super::frame::{BodyAxis, ReferenceFrame};

/// Smallest quaternion magnitude accepted as a rotation
pub const MIN_QUATERNION_NORM: f64 = 1e-6;

/// Errors converting a quaternion into a rotation
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum OrientationError {
    /// A component is NaN or infinite
    #[error("quaternion has a non-finite component")]
    NonFinite,
    /// Components are finite but the magnitude overflows
    #[error("quaternion magnitude is not finite")]
    Unbounded,
    /// Magnitude too small to normalize
    #[error("quaternion magnitude {norm:e} is too small to define a rotation")]
    Degenerate { norm: f64 },
}

/// Euler attitude in degrees (roll about X, pitch about Y, yaw about Z)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Attitude {
    pub roll_deg: f64,
    pub pitch_deg: f64,
    pub yaw_deg: f64,
}

/// A reference segment after rotation into the world frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotatedSegment {
    pub axis: BodyAxis,
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

/// Geometry derived from one attitude sample
///
/// Built in one piece by [`OrientationModel::apply`] and never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientationGeometry {
    /// Normalized rotation the geometry was built from
    pub rotation: UnitQuaternion<f64>,
    /// Rotated segments, same order as the reference frame
    pub segments: Vec<RotatedSegment>,
    /// Rotated nose tip
    pub nose: Point3<f64>,
    /// Euler angles of the rotation
    pub attitude: Attitude,
}

impl OrientationGeometry {
    /// First rotated segment for the given axis
    pub fn segment(&self, axis: BodyAxis) -> Option<&RotatedSegment> {
        self.segments.iter().find(|s| s.axis == axis)
    }
}

/// Maps attitude quaternions onto a configurable set of reference segments
#[derive(Debug, Clone, Default)]
pub struct OrientationModel {
    frame: ReferenceFrame,
}

impl OrientationModel {
    /// Create a model for the given reference segments
    pub fn new(frame: ReferenceFrame) -> Self {
        Self { frame }
    }

    /// Reference segments this model rotates
    pub fn frame(&self) -> &ReferenceFrame {
        &self.frame
    }

    /// Convert a wire quaternion into a unit rotation
    ///
    /// The wire order is scalar-first `[w, x, y, z]`; nalgebra stores its
    /// quaternion coordinates vector-first `[i, j, k, w]`, so the components
    /// are reordered here before anything else touches them. The result is
    /// normalized regardless of what the sender did.
    pub fn rotation(q: &WireQuaternion) -> Result<UnitQuaternion<f64>, OrientationError> {
        if !q.is_finite() {
            return Err(OrientationError::NonFinite);
        }

        let [x, y, z, w] = q.to_vector_first();
        let raw = Quaternion::from(Vector4::new(x, y, z, w));

        let norm = raw.norm();
        if !norm.is_finite() {
            return Err(OrientationError::Unbounded);
        }
        if norm <= MIN_QUATERNION_NORM {
            return Err(OrientationError::Degenerate { norm });
        }
        Ok(UnitQuaternion::new_normalize(raw))
    }

    /// Rotate every reference segment by the given attitude
    pub fn apply(&self, q: &WireQuaternion) -> Result<OrientationGeometry, OrientationError> {
        let rotation = Self::rotation(q)?;

        let segments = self
            .frame
            .segments()
            .iter()
            .map(|s| RotatedSegment {
                axis: s.axis,
                start: rotation.transform_point(&s.start),
                end: rotation.transform_point(&s.end),
            })
            .collect::<Vec<_>>();

        let nose = segments[self.frame.nose_index()].end;

        let (roll, pitch, yaw) = rotation.euler_angles();
        let attitude = Attitude {
            roll_deg: roll.to_degrees(),
            pitch_deg: pitch.to_degrees(),
            yaw_deg: yaw.to_degrees(),
        };

        Ok(OrientationGeometry {
            rotation,
            segments,
            nose,
            attitude,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn wire(w: f64, x: f64, y: f64, z: f64) -> WireQuaternion {
        WireQuaternion::from_scalar_first([w, x, y, z])
    }

    fn triad() -> OrientationModel {
        OrientationModel::new(ReferenceFrame::triad(1.0, 0.5).unwrap())
    }

    #[test]
    fn test_identity_leaves_segments_unchanged() {
        let model = triad();
        let geometry = model.apply(&WireQuaternion::IDENTITY).unwrap();

        for (rotated, reference) in geometry.segments.iter().zip(model.frame().segments()) {
            assert_eq!(rotated.axis, reference.axis);
            assert_eq!(rotated.start, reference.start);
            assert_eq!(rotated.end, reference.end);
        }
        assert_eq!(geometry.nose, model.frame().nose_tip());
        assert!(geometry.attitude.roll_deg.abs() < EPS);
        assert!(geometry.attitude.pitch_deg.abs() < EPS);
        assert!(geometry.attitude.yaw_deg.abs() < EPS);
    }

    #[test]
    fn test_roll_90_moves_y_onto_z() {
        // 90 degree roll about body X, sent scalar-first
        let geometry = triad().apply(&wire(0.7071, 0.7071, 0.0, 0.0)).unwrap();

        let fins_y = geometry.segment(BodyAxis::LateralY).unwrap();
        assert!(fins_y.end.x.abs() < 1e-4);
        assert!(fins_y.end.y.abs() < 1e-4);
        assert!((fins_y.end.z - 0.25).abs() < 1e-4);

        // Nose stays on the roll axis
        assert!((geometry.nose - Point3::new(0.5, 0.0, 0.0)).norm() < 1e-4);
        assert!((geometry.attitude.roll_deg - 90.0).abs() < 1e-2);
    }

    #[test]
    fn test_vector_first_misread_would_differ() {
        // Reading [w, x, y, z] as [x, y, z, w] turns the same numbers into a
        // 180 degree turn about (1, 1, 0), which sends Y onto X instead
        let misread = wire(0.0, 0.7071, 0.7071, 0.0);
        let geometry = triad().apply(&misread).unwrap();
        let fins_y = geometry.segment(BodyAxis::LateralY).unwrap();
        assert!((fins_y.end.x - 0.25).abs() < 1e-4);
        assert!(fins_y.end.z.abs() < 1e-4);
    }

    #[test]
    fn test_yaw_90_turns_nose_to_y() {
        let geometry = OrientationModel::new(ReferenceFrame::nose(1.0).unwrap())
            .apply(&wire(0.7071, 0.0, 0.0, 0.7071))
            .unwrap();
        assert!((geometry.nose - Point3::new(0.0, 1.0, 0.0)).norm() < 1e-4);
        assert!((geometry.attitude.yaw_deg - 90.0).abs() < 1e-2);
    }

    #[test]
    fn test_unnormalized_input_is_normalized() {
        let model = triad();
        let scaled = model.apply(&wire(2.0, 0.0, 0.0, 0.0)).unwrap();
        let unit = model.apply(&WireQuaternion::IDENTITY).unwrap();
        assert_eq!(scaled.nose, unit.nose);
    }

    #[test]
    fn test_zero_quaternion_rejected() {
        let err = triad().apply(&wire(0.0, 0.0, 0.0, 0.0)).unwrap_err();
        assert_eq!(err, OrientationError::Degenerate { norm: 0.0 });
    }

    #[test]
    fn test_tiny_quaternion_rejected() {
        let err = triad().apply(&wire(1e-9, 0.0, 0.0, 0.0)).unwrap_err();
        assert!(matches!(err, OrientationError::Degenerate { .. }));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert_eq!(
            triad().apply(&wire(f64::NAN, 0.0, 0.0, 0.0)),
            Err(OrientationError::NonFinite)
        );
        assert_eq!(
            triad().apply(&wire(1.0, f64::INFINITY, 0.0, 0.0)),
            Err(OrientationError::NonFinite)
        );
    }

    #[test]
    fn test_overflowing_magnitude_rejected() {
        assert_eq!(
            triad().apply(&wire(1e200, 1e200, 0.0, 0.0)),
            Err(OrientationError::Unbounded)
        );
        assert_eq!(
            OrientationModel::rotation(&wire(-1e300, 0.0, 0.0, 1e300)),
            Err(OrientationError::Unbounded)
        );

        // Large but representable magnitudes still normalize
        let big = OrientationModel::rotation(&wire(1e150, 1e150, 0.0, 0.0)).unwrap();
        let small = OrientationModel::rotation(&wire(1.0, 1.0, 0.0, 0.0)).unwrap();
        assert!(big.angle_to(&small) < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_rotation_preserves_lengths_and_orthogonality(
            q in prop::array::uniform4(-1.0f64..1.0)
                .prop_filter("near-zero quaternion", |q| q.iter().map(|c| c * c).sum::<f64>() > 0.01)
        ) {
            let model = triad();
            let geometry = model.apply(&WireQuaternion::from_scalar_first(q)).unwrap();

            let dirs: Vec<_> = geometry.segments.iter().map(|s| s.end - s.start).collect();
            for (rotated, reference) in dirs.iter().zip(model.frame().segments()) {
                prop_assert!((rotated.norm() - reference.length()).abs() < EPS);
            }
            prop_assert!(dirs[0].dot(&dirs[1]).abs() < EPS);
            prop_assert!(dirs[0].dot(&dirs[2]).abs() < EPS);
            prop_assert!(dirs[1].dot(&dirs[2]).abs() < EPS);
        }

        #[test]
        fn prop_nose_matches_longitudinal_end(q in prop::array::uniform4(0.1f64..1.0)) {
            let geometry = triad().apply(&WireQuaternion::from_scalar_first(q)).unwrap();
            let body = geometry.segment(BodyAxis::Longitudinal).unwrap();
            prop_assert_eq!(geometry.nose, body.end);
        }
    }
}

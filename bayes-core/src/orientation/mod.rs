//! Orientation model
//!
//! Turns the vehicle's attitude quaternion into 3D geometry the renderer can
//! draw directly: a fixed set of body-frame reference segments, rotated.

pub mod frame;
pub mod model;

pub use frame::{BodyAxis, FrameSetError, ReferenceFrame, ReferenceSegment};
pub use model::{
    Attitude, OrientationError, OrientationGeometry, OrientationModel, RotatedSegment,
    MIN_QUATERNION_NORM,
};

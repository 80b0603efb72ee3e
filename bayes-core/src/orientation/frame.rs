//! Body-frame reference segments
//!
//! The vehicle body frame has +X along the longitudinal axis (tail to nose)
//! with Y and Z spanning the two fin pairs.

use nalgebra::{Point3, Vector3};

/// Default longitudinal segment length
pub const DEFAULT_BODY_LENGTH: f64 = 1.0;

/// Default fin pair span
pub const DEFAULT_FIN_SPAN: f64 = 0.5;

/// Errors building a reference frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FrameSetError {
    /// No segments given
    #[error("reference frame has no segments")]
    Empty,
    /// No longitudinal segment to take the nose from
    #[error("reference frame has no longitudinal segment")]
    NoLongitudinal,
    /// More than one longitudinal segment
    #[error("reference frame has more than one longitudinal segment")]
    MultipleLongitudinal,
    /// An endpoint is NaN or infinite
    #[error("{0} segment has a non-finite endpoint")]
    NonFinite(BodyAxis),
    /// Start and end coincide
    #[error("{0} segment has zero length")]
    Degenerate(BodyAxis),
}

/// Which body axis a segment represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyAxis {
    /// Tail to nose
    Longitudinal,
    /// Fin pair spanning body Y
    LateralY,
    /// Fin pair spanning body Z
    LateralZ,
}

impl BodyAxis {
    /// Short display label
    pub fn label(self) -> &'static str {
        match self {
            BodyAxis::Longitudinal => "body",
            BodyAxis::LateralY => "fins-y",
            BodyAxis::LateralZ => "fins-z",
        }
    }
}

impl core::fmt::Display for BodyAxis {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// A fixed segment in body coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceSegment {
    pub axis: BodyAxis,
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl ReferenceSegment {
    /// Create a segment
    pub fn new(axis: BodyAxis, start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { axis, start, end }
    }

    /// Segment centred on the origin along `direction`, `length` long
    fn centred(axis: BodyAxis, direction: Vector3<f64>, length: f64) -> Self {
        let half = direction * (length / 2.0);
        Self::new(axis, Point3::from(-half), Point3::from(half))
    }

    /// Vector from start to end
    pub fn direction(&self) -> Vector3<f64> {
        self.end - self.start
    }

    /// Euclidean length
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }
}

/// A validated set of reference segments
///
/// Always holds exactly one longitudinal segment, whose end is the nose tip.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceFrame {
    segments: Vec<ReferenceSegment>,
    nose_index: usize,
}

impl Default for ReferenceFrame {
    fn default() -> Self {
        Self {
            segments: vec![
                ReferenceSegment::centred(BodyAxis::Longitudinal, Vector3::x(), DEFAULT_BODY_LENGTH),
                ReferenceSegment::centred(BodyAxis::LateralY, Vector3::y(), DEFAULT_FIN_SPAN),
                ReferenceSegment::centred(BodyAxis::LateralZ, Vector3::z(), DEFAULT_FIN_SPAN),
            ],
            nose_index: 0,
        }
    }
}

impl ReferenceFrame {
    /// Build a frame from arbitrary segments
    pub fn new(segments: Vec<ReferenceSegment>) -> Result<Self, FrameSetError> {
        if segments.is_empty() {
            return Err(FrameSetError::Empty);
        }

        for segment in &segments {
            let finite = segment.start.iter().chain(segment.end.iter()).all(|c| c.is_finite());
            if !finite {
                return Err(FrameSetError::NonFinite(segment.axis));
            }
            if segment.length() <= f64::EPSILON {
                return Err(FrameSetError::Degenerate(segment.axis));
            }
        }

        let mut longitudinal = segments
            .iter()
            .enumerate()
            .filter(|(_, s)| s.axis == BodyAxis::Longitudinal)
            .map(|(i, _)| i);
        let nose_index = longitudinal.next().ok_or(FrameSetError::NoLongitudinal)?;
        if longitudinal.next().is_some() {
            return Err(FrameSetError::MultipleLongitudinal);
        }

        Ok(Self {
            segments,
            nose_index,
        })
    }

    /// Single nose vector from the origin along +X
    pub fn nose(length: f64) -> Result<Self, FrameSetError> {
        Self::new(vec![ReferenceSegment::new(
            BodyAxis::Longitudinal,
            Point3::origin(),
            Point3::new(length, 0.0, 0.0),
        )])
    }

    /// Body axis plus both fin pairs, all centred on the origin
    pub fn triad(length: f64, fin_span: f64) -> Result<Self, FrameSetError> {
        Self::new(vec![
            ReferenceSegment::centred(BodyAxis::Longitudinal, Vector3::x(), length),
            ReferenceSegment::centred(BodyAxis::LateralY, Vector3::y(), fin_span),
            ReferenceSegment::centred(BodyAxis::LateralZ, Vector3::z(), fin_span),
        ])
    }

    /// All segments in declaration order
    pub fn segments(&self) -> &[ReferenceSegment] {
        &self.segments
    }

    /// Index of the longitudinal segment
    pub fn nose_index(&self) -> usize {
        self.nose_index
    }

    /// Unrotated nose tip
    pub fn nose_tip(&self) -> Point3<f64> {
        self.segments[self.nose_index].end
    }
}

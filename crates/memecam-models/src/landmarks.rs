//! Landmark points and fixed-size landmark sets.
//!
//! Detectors emit landmarks as normalized image coordinates in `[0, 1]`,
//! with `y` growing downward. Sets are positionally indexed, so the length
//! is part of the type: a face set always holds [`FACE_LANDMARK_COUNT`]
//! points and a hand set [`HAND_LANDMARK_COUNT`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use thiserror::Error;

/// Points in a face mesh set (468 mesh points + 10 iris points).
pub const FACE_LANDMARK_COUNT: usize = 478;

/// Points in a hand set.
pub const HAND_LANDMARK_COUNT: usize = 21;

/// Single landmark in normalized image space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct LandmarkPoint {
    pub x: f64,
    pub y: f64,
    /// Relative depth; 0 when the detector only reports 2D points.
    #[serde(default)]
    pub z: f64,
}

impl LandmarkPoint {
    /// Create a 2D point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Create a 3D point.
    pub const fn with_depth(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<(f64, f64)> for LandmarkPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// A landmark sequence had the wrong number of points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected {expected} landmarks, got {actual}")]
pub struct LandmarkShapeError {
    pub expected: usize,
    pub actual: usize,
}

/// Fixed-size landmark set.
///
/// Built through [`LandmarkSet::new`], which rejects any sequence whose
/// length is not exactly `N`. Derefs to `[LandmarkPoint]` so geometry code
/// can work on plain slices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<LandmarkPoint>",
    into = "Vec<LandmarkPoint>"
)]
pub struct LandmarkSet<const N: usize> {
    points: Box<[LandmarkPoint; N]>,
}

/// 478-point face mesh.
pub type FaceLandmarks = LandmarkSet<FACE_LANDMARK_COUNT>;

/// 21-point hand skeleton.
pub type HandLandmarks = LandmarkSet<HAND_LANDMARK_COUNT>;

impl<const N: usize> LandmarkSet<N> {
    /// Number of points every set of this type holds.
    pub const LEN: usize = N;

    /// Validate and wrap a point sequence.
    pub fn new(points: Vec<LandmarkPoint>) -> Result<Self, LandmarkShapeError> {
        let actual = points.len();
        let points: Box<[LandmarkPoint; N]> = points
            .try_into()
            .map_err(|_| LandmarkShapeError { expected: N, actual })?;
        Ok(Self { points })
    }

    /// Point at a fixed index.
    ///
    /// Panics if `index >= N`; callers index with compile-time constants.
    #[inline]
    pub fn point(&self, index: usize) -> LandmarkPoint {
        self.points[index]
    }

    /// Borrow the points as a fixed-size array.
    pub fn as_array(&self) -> &[LandmarkPoint; N] {
        &self.points
    }

    /// Copy the points into a `Vec`.
    pub fn to_vec(&self) -> Vec<LandmarkPoint> {
        self.points.to_vec()
    }
}

impl<const N: usize> Deref for LandmarkSet<N> {
    type Target = [LandmarkPoint];

    fn deref(&self) -> &Self::Target {
        self.points.as_slice()
    }
}

impl<const N: usize> AsRef<[LandmarkPoint]> for LandmarkSet<N> {
    fn as_ref(&self) -> &[LandmarkPoint] {
        self.points.as_slice()
    }
}

impl<const N: usize> TryFrom<Vec<LandmarkPoint>> for LandmarkSet<N> {
    type Error = LandmarkShapeError;

    fn try_from(points: Vec<LandmarkPoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl<const N: usize> From<LandmarkSet<N>> for Vec<LandmarkPoint> {
    fn from(set: LandmarkSet<N>) -> Self {
        Vec::from(set.points as Box<[LandmarkPoint]>)
    }
}

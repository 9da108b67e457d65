//! Landmark detector seams.
//!
//! The pipeline never touches a vision model directly. Hosts plug in a face
//! and (optionally) a hand detector through these traits; both are called
//! synchronously with strictly increasing timestamps.

use memecam_models::{HandLandmarks, Handedness, LandmarkPoint, HAND_LANDMARK_COUNT};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::VisionResult;

/// Face landmark detector for a video stream.
#[cfg_attr(test, mockall::automock(type Frame = ();))]
pub trait FaceLandmarker {
    /// Host frame type (pixels, texture handle, recorded sample).
    type Frame;

    /// Detect at most one face in `frame`.
    ///
    /// Returns the raw points as produced by the model. The pipeline validates
    /// the point count itself.
    fn detect_for_video(
        &mut self,
        frame: &Self::Frame,
        timestamp_ms: f64,
    ) -> VisionResult<Option<Vec<LandmarkPoint>>>;

    /// Release model resources. Called exactly once.
    fn close(&mut self);

    /// Detector name for logging.
    fn name(&self) -> &'static str;
}

/// Hand landmark detector for a video stream.
#[cfg_attr(test, mockall::automock(type Frame = ();))]
pub trait HandLandmarker {
    type Frame;

    /// Detect zero to two hands in `frame`.
    fn detect_for_video(
        &mut self,
        frame: &Self::Frame,
        timestamp_ms: f64,
    ) -> VisionResult<Vec<DetectedHand>>;

    /// Release model resources. Called exactly once.
    fn close(&mut self);

    /// Detector name for logging.
    fn name(&self) -> &'static str;
}

pub type BoxedFaceLandmarker<F> = Box<dyn FaceLandmarker<Frame = F>>;
pub type BoxedHandLandmarker<F> = Box<dyn HandLandmarker<Frame = F>>;

/// One validated hand.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedHand {
    pub landmarks: HandLandmarks,
    pub handedness: Option<Handedness>,
}

impl DetectedHand {
    pub fn new(landmarks: HandLandmarks) -> Self {
        Self {
            landmarks,
            handedness: None,
        }
    }

    pub fn with_handedness(mut self, handedness: Handedness) -> Self {
        self.handedness = Some(handedness);
        self
    }
}

/// Top classification entry for one hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandednessCategory {
    pub category_name: String,
    #[serde(default)]
    pub score: f32,
}

/// Hand detector output as hosts deliver it.
///
/// Some detector bindings hand back a bare list of point lists, others a
/// result object with a `handLandmarks` field plus per-hand handedness.
/// Both are normalized to [`DetectedHand`] here so nothing downstream has
/// to care.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HandDetectorOutput {
    Sets(Vec<Vec<LandmarkPoint>>),
    #[serde(rename_all = "camelCase")]
    Result {
        hand_landmarks: Vec<Vec<LandmarkPoint>>,
        #[serde(default)]
        handedness: Vec<Vec<HandednessCategory>>,
    },
}

impl HandDetectorOutput {
    /// Validate every set. Sets without exactly 21 points are dropped.
    pub fn into_hands(self) -> Vec<DetectedHand> {
        let (sets, handedness) = match self {
            HandDetectorOutput::Sets(sets) => (sets, Vec::new()),
            HandDetectorOutput::Result {
                hand_landmarks,
                handedness,
            } => (hand_landmarks, handedness),
        };

        sets.into_iter()
            .enumerate()
            .filter_map(|(i, points)| match HandLandmarks::new(points) {
                Ok(landmarks) => Some(DetectedHand {
                    landmarks,
                    handedness: handedness.get(i).and_then(|c| parse_handedness(c)),
                }),
                Err(err) => {
                    warn!(
                        hand = i,
                        expected = HAND_LANDMARK_COUNT,
                        actual = err.actual,
                        "Dropping malformed hand landmark set"
                    );
                    crate::metrics::record_malformed_landmarks("hand");
                    None
                }
            })
            .collect()
    }
}

fn parse_handedness(categories: &[HandednessCategory]) -> Option<Handedness> {
    let top = categories.first()?;
    match top.category_name.to_lowercase().as_str() {
        "left" => Some(Handedness::Left),
        "right" => Some(Handedness::Right),
        _ => None,
    }
}

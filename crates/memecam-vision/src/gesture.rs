//! Hand gesture analysis over 21-point hand landmarks.
//!
//! Each hand is labeled from fingertip spread around the wrist. When a face is
//! visible, its lowest landmark acts as a chin anchor and a wrist close enough
//! to it overrides the spread-based label with `on_chin`.

use memecam_models::{HandAnalysis, HandGesture, HandLandmarks, LandmarkPoint, HAND_LANDMARK_COUNT};
use tracing::debug;

use crate::config::GestureThresholds;
use crate::detector::DetectedHand;
use crate::geometry::{
    average_tip_distance_to_wrist, distance, lowest_point, vertical_range, INDEX_TIP, MIDDLE_TIP,
    PINKY_TIP, RING_TIP, WRIST,
};

/// Chin anchor derived from a face mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChinReference {
    /// Face landmark with the largest `y`.
    pub point: LandmarkPoint,
    /// Vertical span of the face landmarks.
    pub face_height: f64,
}

impl ChinReference {
    /// Build a chin reference from face points. `None` for an empty face.
    pub fn from_face(points: &[LandmarkPoint]) -> Option<Self> {
        let point = lowest_point(points)?;
        let (min_y, max_y) = vertical_range(points)?;
        Some(Self {
            point,
            face_height: max_y - min_y,
        })
    }

    /// Wrist-to-chin radius inside which a hand counts as on the chin.
    pub fn radius(&self, thresholds: &GestureThresholds) -> f64 {
        thresholds
            .on_chin_floor
            .max(self.face_height * thresholds.on_chin_face_fraction)
    }

    /// Whether `wrist` sits on the chin. A flat face never matches.
    pub fn contains(&self, wrist: LandmarkPoint, thresholds: &GestureThresholds) -> bool {
        self.face_height > 0.0 && distance(wrist, self.point) < self.radius(thresholds)
    }
}

/// Label a hand from its spread measurements alone.
///
/// `avg` is the mean tip-to-wrist distance, `index` the index tip distance and
/// `others` the mean of the middle, ring and pinky tip distances.
pub fn gesture_from_spread(
    avg: f64,
    index: f64,
    others: f64,
    thresholds: &GestureThresholds,
) -> HandGesture {
    if avg > thresholds.open {
        HandGesture::Open
    } else if avg < thresholds.fist {
        HandGesture::Fist
    } else if index > others * thresholds.index_up_ratio && index > thresholds.index_up_min {
        HandGesture::IndexUp
    } else {
        HandGesture::Unknown
    }
}

/// Classifies hands into [`HandGesture`] labels.
#[derive(Debug, Clone, Default)]
pub struct HandGestureAnalyzer {
    thresholds: GestureThresholds,
}

impl HandGestureAnalyzer {
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &GestureThresholds {
        &self.thresholds
    }

    /// Analyze every hand in order, using the face (if any) as chin reference.
    ///
    /// Returns one result per input hand. Hands without exactly 21 points
    /// are labeled `unknown`.
    pub fn analyze<H: AsRef<[LandmarkPoint]>>(
        &self,
        face: Option<&[LandmarkPoint]>,
        hands: &[H],
    ) -> Vec<HandAnalysis> {
        if hands.is_empty() {
            return Vec::new();
        }

        let chin = face.and_then(ChinReference::from_face);
        hands
            .iter()
            .map(|hand| {
                let points = hand.as_ref();
                HandAnalysis {
                    landmarks: points.to_vec(),
                    gesture: self.gesture_for(points, chin.as_ref()),
                    handedness: None,
                }
            })
            .collect()
    }

    /// Analyze validated detector hands, carrying handedness through.
    pub fn analyze_detected(
        &self,
        face: Option<&[LandmarkPoint]>,
        hands: &[DetectedHand],
    ) -> Vec<HandAnalysis> {
        let chin = face.and_then(ChinReference::from_face);
        hands
            .iter()
            .map(|hand| HandAnalysis {
                landmarks: hand.landmarks.to_vec(),
                gesture: self.classify_hand(&hand.landmarks, chin.as_ref()),
                handedness: hand.handedness,
            })
            .collect()
    }

    fn gesture_for(&self, points: &[LandmarkPoint], chin: Option<&ChinReference>) -> HandGesture {
        match HandLandmarks::new(points.to_vec()) {
            Ok(hand) => self.classify_hand(&hand, chin),
            Err(err) => {
                debug!(
                    expected = HAND_LANDMARK_COUNT,
                    actual = err.actual,
                    "Malformed hand landmarks, labeling unknown"
                );
                HandGesture::Unknown
            }
        }
    }

    /// Label one well-formed hand.
    pub fn classify_hand(&self, hand: &HandLandmarks, chin: Option<&ChinReference>) -> HandGesture {
        let wrist = hand.point(WRIST);

        if let Some(chin) = chin {
            if chin.contains(wrist, &self.thresholds) {
                return HandGesture::OnChin;
            }
        }

        let avg = average_tip_distance_to_wrist(hand);
        let index = distance(wrist, hand.point(INDEX_TIP));
        let others = [MIDDLE_TIP, RING_TIP, PINKY_TIP]
            .iter()
            .map(|&tip| distance(wrist, hand.point(tip)))
            .sum::<f64>()
            / 3.0;

        gesture_from_spread(avg, index, others, &self.thresholds)
    }
}

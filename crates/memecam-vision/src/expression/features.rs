//! Expression features from 478-point face mesh landmarks.
//!
//! Reduces a face mesh to a [`FeatureVector`] of six integer measurements.
//! Inputs with fewer than 478 points produce [`FeatureVector::ZERO`].
//!
//! # Landmarks used (face mesh indexing)
//!
//! - 13 / 14: inner lip top / bottom
//! - 7 / 10: mouth width reference
//! - 88 / 318: mouth corners
//! - 1: nose tip
//! - 159 / 145, 386 / 374: left / right eyelid top and bottom
//! - 36 / 266: left / right eyebrow
//! - 33 / 263: left / right eye outer corner

use memecam_models::{FeatureVector, LandmarkPoint, FACE_LANDMARK_COUNT};
use tracing::trace;

use crate::geometry::distance;

pub const MOUTH_TOP: usize = 13;
pub const MOUTH_BOTTOM: usize = 14;
pub const MOUTH_LEFT: usize = 7;
pub const MOUTH_RIGHT: usize = 10;
pub const MOUTH_LEFT_CORNER: usize = 88;
pub const MOUTH_RIGHT_CORNER: usize = 318;
pub const NOSE_TIP: usize = 1;
pub const LEFT_EYE_TOP: usize = 159;
pub const LEFT_EYE_BOTTOM: usize = 145;
pub const RIGHT_EYE_TOP: usize = 386;
pub const RIGHT_EYE_BOTTOM: usize = 374;
pub const LEFT_EYEBROW: usize = 36;
pub const RIGHT_EYEBROW: usize = 266;
pub const LEFT_EYE_CORNER: usize = 33;
pub const RIGHT_EYE_CORNER: usize = 263;

/// Mouth widths below this are treated as degenerate.
const MIN_MOUTH_WIDTH: f64 = 1e-6;

const SMILE_SCALE: f64 = 200.0;
const EYES_SCALE: f64 = 200.0;
const EYEBROW_SCALE: f64 = 300.0;

/// Extract the six expression features from a face mesh.
pub fn extract_features(points: &[LandmarkPoint]) -> FeatureVector {
    if points.len() < FACE_LANDMARK_COUNT {
        trace!(points = points.len(), "Too few face landmarks, using zero features");
        return FeatureVector::ZERO;
    }

    let p = |i: usize| points[i];

    // Mouth opening relative to mouth width
    let mouth_height = distance(p(MOUTH_TOP), p(MOUTH_BOTTOM));
    let mouth_width = distance(p(MOUTH_LEFT), p(MOUTH_RIGHT));
    let mouth_open = if mouth_width < MIN_MOUTH_WIDTH {
        100.0
    } else {
        (mouth_height / mouth_width * 100.0).min(100.0)
    };

    // Corners above the nose tip count toward the smile; corners below add nothing
    let nose_y = p(NOSE_TIP).y;
    let left_lift = (nose_y - p(MOUTH_LEFT_CORNER).y).max(0.0);
    let right_lift = (nose_y - p(MOUTH_RIGHT_CORNER).y).max(0.0);
    let smile = ((left_lift + right_lift) * SMILE_SCALE).min(100.0);

    let left_eye_height = distance(p(LEFT_EYE_TOP), p(LEFT_EYE_BOTTOM));
    let right_eye_height = distance(p(RIGHT_EYE_TOP), p(RIGHT_EYE_BOTTOM));
    let eyes_wide = ((left_eye_height + right_eye_height) * EYES_SCALE).min(100.0);

    let left_eye = p(LEFT_EYE_CORNER);
    let right_eye = p(RIGHT_EYE_CORNER);
    let left_eyebrow_raised = brow_lift(left_eye, p(LEFT_EYEBROW));
    let right_eyebrow_raised = brow_lift(right_eye, p(RIGHT_EYEBROW));

    let head_tilt = (right_eye.y - left_eye.y)
        .atan2(right_eye.x - left_eye.x)
        .to_degrees();

    FeatureVector {
        mouth_open: round_half_up(mouth_open),
        smile: round_half_up(smile),
        eyes_wide: round_half_up(eyes_wide),
        left_eyebrow_raised: round_half_up(left_eyebrow_raised),
        right_eyebrow_raised: round_half_up(right_eyebrow_raised),
        head_tilt: round_half_up(head_tilt),
    }
}

/// Eyebrow height above the eye corner, scaled into `[0, 100]`.
fn brow_lift(eye: LandmarkPoint, eyebrow: LandmarkPoint) -> f64 {
    ((eye.y - eyebrow.y) * EYEBROW_SCALE).clamp(0.0, 100.0)
}

/// Round to the nearest integer with halves going toward +inf.
///
/// Non-finite values become 0.
fn round_half_up(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    (value + 0.5).floor() as i32
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Relaxed face: closed mouth, corners below the nose, level eyes.
    pub(crate) fn neutral_face() -> Vec<LandmarkPoint> {
        let mut points = vec![LandmarkPoint::new(0.5, 0.5); FACE_LANDMARK_COUNT];
        points[MOUTH_TOP] = LandmarkPoint::new(0.5, 0.70);
        points[MOUTH_BOTTOM] = LandmarkPoint::new(0.5, 0.70);
        points[MOUTH_LEFT] = LandmarkPoint::new(0.4, 0.70);
        points[MOUTH_RIGHT] = LandmarkPoint::new(0.6, 0.70);
        points[NOSE_TIP] = LandmarkPoint::new(0.5, 0.60);
        points[MOUTH_LEFT_CORNER] = LandmarkPoint::new(0.42, 0.70);
        points[MOUTH_RIGHT_CORNER] = LandmarkPoint::new(0.58, 0.70);
        points[LEFT_EYE_TOP] = LandmarkPoint::new(0.4, 0.40);
        points[LEFT_EYE_BOTTOM] = LandmarkPoint::new(0.4, 0.42);
        points[RIGHT_EYE_TOP] = LandmarkPoint::new(0.6, 0.40);
        points[RIGHT_EYE_BOTTOM] = LandmarkPoint::new(0.6, 0.42);
        points[LEFT_EYE_CORNER] = LandmarkPoint::new(0.35, 0.41);
        points[RIGHT_EYE_CORNER] = LandmarkPoint::new(0.65, 0.41);
        points[LEFT_EYEBROW] = LandmarkPoint::new(0.38, 0.40);
        points[RIGHT_EYEBROW] = LandmarkPoint::new(0.62, 0.40);
        points
    }

    #[test]
    fn test_short_input_yields_zero_vector() {
        assert_eq!(extract_features(&[]), FeatureVector::ZERO);
        let short = vec![LandmarkPoint::new(0.5, 0.5); FACE_LANDMARK_COUNT - 1];
        assert_eq!(extract_features(&short), FeatureVector::ZERO);
    }

    #[test]
    fn test_neutral_face_features() {
        let features = extract_features(&neutral_face());
        assert_eq!(features.mouth_open, 0);
        assert_eq!(features.smile, 0);
        // (0.02 + 0.02) * 200 = 8
        assert_eq!(features.eyes_wide, 8);
        // 0.01 * 300 = 3
        assert_eq!(features.left_eyebrow_raised, 3);
        assert_eq!(features.right_eyebrow_raised, 3);
        assert_eq!(features.head_tilt, 0);
    }

    #[test]
    fn test_mouth_open_ratio_and_cap() {
        let mut points = neutral_face();
        // height 0.1 over width 0.2 = 50
        points[MOUTH_BOTTOM] = LandmarkPoint::new(0.5, 0.80);
        assert_eq!(extract_features(&points).mouth_open, 50);

        // height 0.3 over width 0.2 caps at 100
        points[MOUTH_BOTTOM] = LandmarkPoint::new(0.5, 1.0);
        assert_eq!(extract_features(&points).mouth_open, 100);
    }

    #[test]
    fn test_zero_width_mouth_saturates() {
        let mut points = neutral_face();
        points[MOUTH_LEFT] = LandmarkPoint::new(0.5, 0.70);
        points[MOUTH_RIGHT] = LandmarkPoint::new(0.5, 0.70);
        let features = extract_features(&points);
        assert_eq!(features.mouth_open, 100);
    }

    #[test]
    fn test_smile_counts_only_raised_corners() {
        let mut points = neutral_face();
        // left corner 0.1 above the nose, right corner below it
        points[MOUTH_LEFT_CORNER] = LandmarkPoint::new(0.42, 0.50);
        let features = extract_features(&points);
        assert_eq!(features.smile, 20);

        points[MOUTH_RIGHT_CORNER] = LandmarkPoint::new(0.58, 0.20);
        assert_eq!(extract_features(&points).smile, 100);
    }

    #[test]
    fn test_lowered_brow_clamps_to_zero() {
        let mut points = neutral_face();
        points[LEFT_EYEBROW] = LandmarkPoint::new(0.38, 0.50);
        let features = extract_features(&points);
        assert_eq!(features.left_eyebrow_raised, 0);
        assert_eq!(features.right_eyebrow_raised, 3);
    }

    #[test]
    fn test_raised_brow_clamps_to_hundred() {
        let mut points = neutral_face();
        points[RIGHT_EYEBROW] = LandmarkPoint::new(0.62, 0.01);
        assert_eq!(extract_features(&points).right_eyebrow_raised, 100);
    }

    #[test]
    fn test_head_tilt_degrees() {
        let mut points = neutral_face();
        // Right eye corner 45 degrees below the left one
        points[LEFT_EYE_CORNER] = LandmarkPoint::new(0.4, 0.4);
        points[RIGHT_EYE_CORNER] = LandmarkPoint::new(0.6, 0.6);
        assert_eq!(extract_features(&points).head_tilt, 45);

        points[RIGHT_EYE_CORNER] = LandmarkPoint::new(0.6, 0.2);
        assert_eq!(extract_features(&points).head_tilt, -45);
    }

    #[test]
    fn test_nan_input_never_propagates() {
        let mut points = neutral_face();
        points[NOSE_TIP] = LandmarkPoint::new(f64::NAN, f64::NAN);
        points[LEFT_EYE_CORNER] = LandmarkPoint::new(f64::NAN, f64::NAN);
        let features = extract_features(&points);
        assert_eq!(features.smile, 0);
        assert_eq!(features.head_tilt, 0);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(15.5), 16);
        assert_eq!(round_half_up(-15.5), -15);
        assert_eq!(round_half_up(59.4), 59);
        assert_eq!(round_half_up(f64::NAN), 0);
        assert_eq!(round_half_up(f64::INFINITY), 0);
    }
}

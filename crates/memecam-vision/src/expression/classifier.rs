//! Ordered rule table mapping feature vectors to expression identifiers.
//!
//! Rules overlap on purpose. They are evaluated top to bottom and the first
//! match wins, so a frame that is both a broad smile and wide-eyed/open
//! mouthed resolves to `cachorro_piada`. Reordering the table changes
//! classification outcomes.

use memecam_models::{ExpressionId, FeatureVector, LandmarkPoint};

use super::features::extract_features;

type Predicate = fn(&FeatureVector) -> bool;

/// Rules in evaluation order. `neutral` is the fallback and has no rule.
const RULES: &[(ExpressionId, Predicate)] = &[
    (ExpressionId::CachorroPiada, is_broad_closed_smile),
    (ExpressionId::NazareConfusa, is_wide_open),
    (ExpressionId::Confused, is_tilted_with_brow),
    (ExpressionId::Shocked, is_open_without_smile),
    (ExpressionId::Surprised, is_brow_raised),
    (ExpressionId::NeutralSmile, is_slight_smile),
];

fn is_broad_closed_smile(v: &FeatureVector) -> bool {
    v.smile > 60 && v.eyes_wide > 30 && v.mouth_open < 40
}

fn is_wide_open(v: &FeatureVector) -> bool {
    v.mouth_open > 70 && v.eyes_wide > 70
}

fn is_tilted_with_brow(v: &FeatureVector) -> bool {
    v.head_tilt.abs() > 15 && v.left_eyebrow_raised > 50
}

fn is_open_without_smile(v: &FeatureVector) -> bool {
    v.mouth_open > 60 && v.smile < 30
}

fn is_brow_raised(v: &FeatureVector) -> bool {
    v.left_eyebrow_raised > 60 || v.right_eyebrow_raised > 60
}

fn is_slight_smile(v: &FeatureVector) -> bool {
    v.smile > 30 && v.smile < 60
}

/// Classify a feature vector. Total and side-effect free.
pub fn classify(vector: &FeatureVector) -> ExpressionId {
    RULES
        .iter()
        .find(|(_, matches)| matches(vector))
        .map(|(id, _)| *id)
        .unwrap_or(ExpressionId::Neutral)
}

/// Extract features from a face mesh and classify them.
pub fn classify_landmarks(points: &[LandmarkPoint]) -> (FeatureVector, ExpressionId) {
    let features = extract_features(points);
    (features, classify(&features))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(
        smile: i32,
        eyes_wide: i32,
        mouth_open: i32,
        left_brow: i32,
        right_brow: i32,
        head_tilt: i32,
    ) -> FeatureVector {
        FeatureVector {
            mouth_open,
            smile,
            eyes_wide,
            left_eyebrow_raised: left_brow,
            right_eyebrow_raised: right_brow,
            head_tilt,
        }
    }

    #[test]
    fn test_zero_vector_is_neutral() {
        assert_eq!(classify(&FeatureVector::ZERO), ExpressionId::Neutral);
    }

    #[test]
    fn test_short_landmarks_classify_neutral() {
        let (features, id) = classify_landmarks(&[LandmarkPoint::new(0.5, 0.5); 10]);
        assert!(features.is_zero());
        assert_eq!(id, ExpressionId::Neutral);
    }

    #[test]
    fn test_broad_smile_scenario() {
        let v = vector(70, 40, 20, 10, 10, 0);
        assert_eq!(classify(&v), ExpressionId::CachorroPiada);
    }

    #[test]
    fn test_relaxed_face_scenario() {
        let v = vector(10, 10, 0, 0, 0, 0);
        assert_eq!(classify(&v), ExpressionId::Neutral);
    }

    #[test]
    fn test_rule_one_beats_rule_two() {
        // smile=70, eyesWide=80, mouthOpen=35 satisfies rule 1; with mouthOpen
        // raised past 70 only rule 2 would hold, so check both sides.
        let both = vector(70, 80, 35, 0, 0, 0);
        assert_eq!(classify(&both), ExpressionId::CachorroPiada);

        let wide_open = vector(70, 80, 75, 0, 0, 0);
        assert_eq!(classify(&wide_open), ExpressionId::NazareConfusa);
    }

    #[test]
    fn test_rule_two_boundary_is_strict() {
        let v = vector(0, 70, 70, 0, 0, 0);
        // Falls through nazare_confusa to shocked (mouth > 60, smile < 30)
        assert_eq!(classify(&v), ExpressionId::Shocked);

        let quiet = vector(40, 70, 70, 0, 0, 0);
        assert_eq!(classify(&quiet), ExpressionId::NeutralSmile);
    }

    #[test]
    fn test_confused_needs_tilt_and_left_brow() {
        assert_eq!(classify(&vector(0, 0, 0, 55, 0, 20)), ExpressionId::Confused);
        assert_eq!(classify(&vector(0, 0, 0, 55, 0, -20)), ExpressionId::Confused);
        assert_eq!(classify(&vector(0, 0, 0, 55, 0, 15)), ExpressionId::Neutral);
        // Right brow alone never triggers confused
        assert_eq!(classify(&vector(0, 0, 0, 0, 55, 20)), ExpressionId::Neutral);
    }

    #[test]
    fn test_shocked() {
        assert_eq!(classify(&vector(10, 20, 65, 0, 0, 0)), ExpressionId::Shocked);
        assert_eq!(classify(&vector(30, 20, 65, 0, 0, 0)), ExpressionId::Neutral);
    }

    #[test]
    fn test_surprised_either_brow() {
        assert_eq!(classify(&vector(0, 0, 0, 61, 0, 0)), ExpressionId::Surprised);
        assert_eq!(classify(&vector(0, 0, 0, 0, 61, 0)), ExpressionId::Surprised);
        assert_eq!(classify(&vector(0, 0, 0, 60, 60, 0)), ExpressionId::Neutral);
    }

    #[test]
    fn test_neutral_smile_open_interval() {
        assert_eq!(classify(&vector(31, 0, 0, 0, 0, 0)), ExpressionId::NeutralSmile);
        assert_eq!(classify(&vector(59, 0, 0, 0, 0, 0)), ExpressionId::NeutralSmile);
        assert_eq!(classify(&vector(30, 0, 0, 0, 0, 0)), ExpressionId::Neutral);
        assert_eq!(classify(&vector(60, 0, 0, 0, 0, 0)), ExpressionId::Neutral);
        // Big smile without wide eyes misses rule 1 and rule 6
        assert_eq!(classify(&vector(70, 10, 0, 0, 0, 0)), ExpressionId::Neutral);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let inputs = [
            vector(70, 40, 20, 10, 10, 0),
            vector(0, 80, 90, 0, 0, 0),
            vector(45, 0, 0, 0, 0, -30),
            FeatureVector::ZERO,
        ];
        for v in inputs {
            let first = classify(&v);
            let second = classify(&v);
            assert_eq!(first, second, "classify must be stable for {:?}", v);
        }
    }

    #[test]
    fn test_rule_table_order_matches_catalog() {
        let ordered: Vec<ExpressionId> = RULES.iter().map(|(id, _)| *id).collect();
        assert_eq!(&ordered[..], &ExpressionId::ALL[..ExpressionId::ALL.len() - 1]);
    }
}

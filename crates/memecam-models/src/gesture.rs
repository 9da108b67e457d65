//! Hand gesture labels and per-hand analysis results.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::landmarks::LandmarkPoint;

/// Discrete gesture for one hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum HandGesture {
    /// Fingers spread away from the wrist.
    Open,
    /// Fingertips curled close to the wrist.
    Fist,
    /// Index finger extended well past the others.
    IndexUp,
    /// Wrist resting near the chin.
    OnChin,
    /// No rule matched, or the hand set was malformed.
    #[default]
    Unknown,
}

impl HandGesture {
    pub fn as_str(&self) -> &'static str {
        match self {
            HandGesture::Open => "open",
            HandGesture::Fist => "fist",
            HandGesture::IndexUp => "index_up",
            HandGesture::OnChin => "on_chin",
            HandGesture::Unknown => "unknown",
        }
    }
}

impl fmt::Display for HandGesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which hand the detector believes it saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Handedness {
    Left,
    Right,
}

/// Gesture result for one detected hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HandAnalysis {
    /// The hand's points, as received.
    pub landmarks: Vec<LandmarkPoint>,
    pub gesture: HandGesture,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handedness: Option<Handedness>,
}

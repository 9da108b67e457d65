//! Change notifications delivered to the UI layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::expression::ExpressionId;
use crate::landmarks::LandmarkPoint;
use crate::session::SessionId;

/// Raw landmark coordinates for a debug overlay.
///
/// Purely visual; never feeds back into classification.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverlayLandmarks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face: Option<Vec<LandmarkPoint>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hands: Vec<Vec<LandmarkPoint>>,
}

/// Emitted once each time the classified state changes.
///
/// `None` on either side means "no face".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StateChange {
    pub session_id: SessionId,
    pub previous: Option<ExpressionId>,
    pub current: Option<ExpressionId>,
    /// Detector timestamp of the frame that caused the change.
    pub timestamp_ms: f64,
    /// Present only when the debug overlay is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<OverlayLandmarks>,
}

impl StateChange {
    /// True if the change is a face disappearing.
    pub fn is_face_lost(&self) -> bool {
        self.previous.is_some() && self.current.is_none()
    }
}

//! Pipeline metrics.
//!
//! Recorded through the `metrics` facade; nothing is exported unless the host
//! installs a recorder.

use metrics::{counter, histogram};

use memecam_models::{ExpressionId, HandGesture};

/// Metric names as constants for consistency.
pub mod names {
    // Frame metrics
    pub const FRAMES_TOTAL: &str = "memecam_frames_total";
    pub const FRAME_PROCESSING_SECONDS: &str = "memecam_frame_processing_seconds";

    // Detector metrics
    pub const DETECTOR_ERRORS_TOTAL: &str = "memecam_detector_errors_total";
    pub const MALFORMED_LANDMARKS_TOTAL: &str = "memecam_malformed_landmarks_total";

    // Classification metrics
    pub const STATE_CHANGES_TOTAL: &str = "memecam_state_changes_total";
    pub const HAND_GESTURES_TOTAL: &str = "memecam_hand_gestures_total";
}

/// What happened to a frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Dropped by the throttle.
    Throttled,
    /// Ran through the detectors.
    Processed,
    /// Timestamp not strictly increasing.
    Rejected,
    /// Face detector failed for this frame.
    Failed,
    /// Delivered after the pipeline was shut down.
    AfterShutdown,
}

impl FrameOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameOutcome::Throttled => "throttled",
            FrameOutcome::Processed => "processed",
            FrameOutcome::Rejected => "rejected",
            FrameOutcome::Failed => "failed",
            FrameOutcome::AfterShutdown => "after_shutdown",
        }
    }
}

/// Record a frame callback outcome.
pub fn record_frame(outcome: FrameOutcome) {
    let labels = [("outcome", outcome.as_str().to_string())];
    counter!(names::FRAMES_TOTAL, &labels).increment(1);
}

/// Record detector + classification time for a processed frame.
pub fn record_frame_duration(duration_secs: f64) {
    histogram!(names::FRAME_PROCESSING_SECONDS).record(duration_secs);
}

/// Record a per-frame detector failure.
pub fn record_detector_error(detector: &str) {
    let labels = [("detector", detector.to_string())];
    counter!(names::DETECTOR_ERRORS_TOTAL, &labels).increment(1);
}

/// Record a landmark set with the wrong number of points.
pub fn record_malformed_landmarks(kind: &str) {
    let labels = [("kind", kind.to_string())];
    counter!(names::MALFORMED_LANDMARKS_TOTAL, &labels).increment(1);
}

/// Record an emitted state change. `None` is recorded as `none`.
pub fn record_state_change(state: Option<ExpressionId>) {
    let state = state.map(|id| id.as_str()).unwrap_or("none");
    let labels = [("state", state.to_string())];
    counter!(names::STATE_CHANGES_TOTAL, &labels).increment(1);
}

/// Record a classified hand gesture.
pub fn record_hand_gesture(gesture: HandGesture) {
    let labels = [("gesture", gesture.as_str().to_string())];
    counter!(names::HAND_GESTURES_TOTAL, &labels).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_labels() {
        assert_eq!(FrameOutcome::Throttled.as_str(), "throttled");
        assert_eq!(FrameOutcome::Processed.as_str(), "processed");
        assert_eq!(FrameOutcome::Rejected.as_str(), "rejected");
        assert_eq!(FrameOutcome::Failed.as_str(), "failed");
        assert_eq!(FrameOutcome::AfterShutdown.as_str(), "after_shutdown");
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_frame(FrameOutcome::Processed);
        record_state_change(None);
        record_state_change(Some(ExpressionId::Shocked));
        record_hand_gesture(HandGesture::OnChin);
        record_detector_error("hand");
        record_malformed_landmarks("face");
        record_frame_duration(0.004);
    }
}

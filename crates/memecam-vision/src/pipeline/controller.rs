//! Frame pipeline controller.
//!
//! One [`FramePipeline`] per camera session. It owns the detectors, the
//! throttle, the last emitted expression and the session statistics, and is
//! the only thing that emits [`StateChange`] notifications.
//!
//! ```text
//! on_frame ─► throttle ─► timestamp check ─► face detector ─► features ─► classify ─┐
//!                                         └─► hand detector ─► gesture analyzer ───┴─► dedup ─► listeners
//! ```

use std::time::Instant;

use memecam_models::{
    ExpressionId, FaceLandmarks, FeatureVector, HandAnalysis, LandmarkPoint, OverlayLandmarks,
    SessionId, StateChange, FACE_LANDMARK_COUNT,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::detector::{BoxedFaceLandmarker, BoxedHandLandmarker, DetectedHand};
use crate::device::{DeviceProfile, HostInfo};
use crate::error::{VisionError, VisionResult};
use crate::expression::{classify, extract_features};
use crate::gesture::HandGestureAnalyzer;
use crate::metrics::{self, FrameOutcome};

use super::session_log::SessionLogger;
use super::throttle::FrameThrottle;

/// Receives every emitted state change.
pub trait StateListener {
    fn on_state_change(&mut self, change: &StateChange);
}

impl<T: FnMut(&StateChange)> StateListener for T {
    fn on_state_change(&mut self, change: &StateChange) {
        self(change)
    }
}

/// Result of one processed frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOutput {
    /// Zero-based callback index, counting throttled frames.
    pub frame_index: u64,
    pub timestamp_ms: f64,
    /// Current state after this frame. `None` means no face.
    pub state: Option<ExpressionId>,
    /// Features of the detected face, if any.
    pub features: Option<FeatureVector>,
    pub hands: Vec<HandAnalysis>,
    /// Set only when this frame changed the state.
    pub change: Option<StateChange>,
}

/// Session counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub frames_seen: u64,
    pub frames_processed: u64,
    pub frames_throttled: u64,
    pub timestamps_rejected: u64,
    pub face_failures: u64,
    pub hand_failures: u64,
    pub notifications: u64,
}

/// Per-session frame pipeline.
///
/// Generic over the host frame type `F`; detectors are boxed trait objects so
/// hosts can swap implementations without touching the pipeline.
pub struct FramePipeline<F> {
    session_id: SessionId,
    config: PipelineConfig,
    profile: DeviceProfile,
    face: BoxedFaceLandmarker<F>,
    hand: Option<BoxedHandLandmarker<F>>,
    analyzer: HandGestureAnalyzer,
    throttle: FrameThrottle,
    state: Option<ExpressionId>,
    last_timestamp_ms: Option<f64>,
    listeners: Vec<Box<dyn StateListener>>,
    logger: SessionLogger,
    stats: PipelineStats,
    shut_down: bool,
}

impl<F> FramePipeline<F> {
    /// Create a pipeline from already-built detectors.
    ///
    /// A hand detector passed while hand tracking is disabled is closed
    /// immediately.
    pub fn new(
        config: PipelineConfig,
        host: &HostInfo,
        face: BoxedFaceLandmarker<F>,
        hand: Option<BoxedHandLandmarker<F>>,
    ) -> VisionResult<Self> {
        config.validate()?;

        let hand = match hand {
            Some(mut hand) if !config.hand_tracking => {
                debug!(detector = hand.name(), "Hand tracking disabled, closing hand detector");
                hand.close();
                None
            }
            other => other,
        };

        Ok(Self::build(config, host, face, hand))
    }

    /// Load detectors and create a pipeline.
    ///
    /// A face loader failure is fatal. A hand loader failure is logged and the
    /// pipeline runs face-only. The hand loader is not called when hand
    /// tracking is disabled; it may return `Ok(None)` when no hand model is
    /// available.
    pub fn initialize<LF, LH>(
        config: PipelineConfig,
        host: &HostInfo,
        load_face: LF,
        load_hand: LH,
    ) -> VisionResult<Self>
    where
        LF: FnOnce() -> VisionResult<BoxedFaceLandmarker<F>>,
        LH: FnOnce() -> VisionResult<Option<BoxedHandLandmarker<F>>>,
    {
        config.validate()?;

        let face = load_face().map_err(|err| match err {
            VisionError::DetectorInit(_) => err,
            other => VisionError::detector_init(other.to_string()),
        })?;

        let (hand, hand_err) = if config.hand_tracking {
            match load_hand() {
                Ok(hand) => (hand, None),
                Err(err) => (None, Some(err)),
            }
        } else {
            (None, None)
        };

        let pipeline = Self::build(config, host, face, hand);
        if let Some(err) = hand_err {
            pipeline
                .logger
                .log_warning(&format!("hand detector unavailable, continuing face-only: {err}"));
        }
        Ok(pipeline)
    }

    fn build(
        config: PipelineConfig,
        host: &HostInfo,
        face: BoxedFaceLandmarker<F>,
        hand: Option<BoxedHandLandmarker<F>>,
    ) -> Self {
        let session_id = SessionId::new();
        let profile = DeviceProfile::detect(host, &config);
        profile.log();

        let logger = SessionLogger::new(&session_id, profile.class.as_str());
        logger.log_start(&format!(
            "face={}, hand={}, stride={}",
            face.name(),
            hand.as_ref().map(|h| h.name()).unwrap_or("none"),
            profile.stride
        ));

        Self {
            session_id,
            analyzer: HandGestureAnalyzer::new(config.gestures),
            throttle: FrameThrottle::new(profile.stride),
            config,
            profile,
            face,
            hand,
            state: None,
            last_timestamp_ms: None,
            listeners: Vec::new(),
            logger,
            stats: PipelineStats::default(),
            shut_down: false,
        }
    }

    /// Register a listener for state changes.
    pub fn add_listener(&mut self, listener: impl StateListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Handle one frame callback.
    ///
    /// Returns `None` for throttled frames, rejected timestamps, frames whose
    /// face detection failed, and every frame after shutdown.
    pub fn on_frame(&mut self, frame: &F, timestamp_ms: f64) -> Option<PipelineOutput> {
        if self.shut_down {
            debug!(timestamp_ms, "Frame after shutdown ignored");
            metrics::record_frame(FrameOutcome::AfterShutdown);
            return None;
        }

        self.stats.frames_seen += 1;
        let frame_index = self.throttle.frame_count();
        if !self.throttle.should_process() {
            self.stats.frames_throttled += 1;
            metrics::record_frame(FrameOutcome::Throttled);
            return None;
        }

        if !self.accept_timestamp(timestamp_ms) {
            self.stats.timestamps_rejected += 1;
            metrics::record_frame(FrameOutcome::Rejected);
            return None;
        }

        let span = self.logger.frame_span(frame_index, timestamp_ms);
        let _enter = span.enter();
        let started = Instant::now();

        let face_points = match self.face.detect_for_video(frame, timestamp_ms) {
            Ok(points) => points,
            Err(err) => {
                self.stats.face_failures += 1;
                self.logger
                    .log_warning(&format!("face detection failed, skipping frame: {err}"));
                metrics::record_detector_error("face");
                metrics::record_frame(FrameOutcome::Failed);
                return None;
            }
        };
        let hands = self.detect_hands(frame, timestamp_ms);

        let features = face_points.as_deref().map(face_features);
        let state = features.as_ref().map(classify);
        let hand_results = self.analyzer.analyze_detected(face_points.as_deref(), &hands);
        for hand in &hand_results {
            metrics::record_hand_gesture(hand.gesture);
        }

        let change = self.transition(state, timestamp_ms, face_points.as_deref(), &hand_results);

        self.stats.frames_processed += 1;
        metrics::record_frame(FrameOutcome::Processed);
        metrics::record_frame_duration(started.elapsed().as_secs_f64());

        Some(PipelineOutput {
            frame_index,
            timestamp_ms,
            state,
            features,
            hands: hand_results,
            change,
        })
    }

    /// Close both detectors and reset the state. Later calls do nothing.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;

        self.face.close();
        if let Some(hand) = self.hand.as_mut() {
            hand.close();
        }
        self.state = None;

        self.throttle.log_summary();
        self.logger.log_shutdown(&format!(
            "processed={}, notifications={}",
            self.stats.frames_processed, self.stats.notifications
        ));
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Last emitted state. `None` means no face.
    pub fn state(&self) -> Option<ExpressionId> {
        self.state
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    pub fn device_profile(&self) -> &DeviceProfile {
        &self.profile
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn has_hand_tracking(&self) -> bool {
        self.hand.is_some()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    fn accept_timestamp(&mut self, timestamp_ms: f64) -> bool {
        let in_order = match self.last_timestamp_ms {
            Some(last) => timestamp_ms > last,
            None => true,
        };
        if !timestamp_ms.is_finite() || !in_order {
            self.logger.log_warning(&format!(
                "timestamp {timestamp_ms} not after {:?}, frame rejected",
                self.last_timestamp_ms
            ));
            return false;
        }
        self.last_timestamp_ms = Some(timestamp_ms);
        true
    }

    fn detect_hands(&mut self, frame: &F, timestamp_ms: f64) -> Vec<DetectedHand> {
        let Some(hand) = self.hand.as_mut() else {
            return Vec::new();
        };

        match hand.detect_for_video(frame, timestamp_ms) {
            Ok(hands) => hands,
            Err(err) => {
                self.stats.hand_failures += 1;
                self.logger
                    .log_warning(&format!("hand detection failed, continuing without hands: {err}"));
                metrics::record_detector_error("hand");
                Vec::new()
            }
        }
    }

    fn transition(
        &mut self,
        next: Option<ExpressionId>,
        timestamp_ms: f64,
        face: Option<&[LandmarkPoint]>,
        hands: &[HandAnalysis],
    ) -> Option<StateChange> {
        if next == self.state {
            return None;
        }

        let previous = std::mem::replace(&mut self.state, next);
        let landmarks = self.config.debug_overlay.then(|| OverlayLandmarks {
            face: face.map(<[LandmarkPoint]>::to_vec),
            hands: hands.iter().map(|h| h.landmarks.clone()).collect(),
        });
        let change = StateChange {
            session_id: self.session_id.clone(),
            previous,
            current: next,
            timestamp_ms,
            landmarks,
        };

        info!(
            previous = state_label(previous),
            current = state_label(next),
            timestamp_ms,
            "Expression state changed"
        );
        self.stats.notifications += 1;
        metrics::record_state_change(next);

        for listener in &mut self.listeners {
            listener.on_state_change(&change);
        }
        Some(change)
    }
}

impl<F> Drop for FramePipeline<F> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Features for one face, zero when the set has the wrong length.
fn face_features(points: &[LandmarkPoint]) -> FeatureVector {
    match FaceLandmarks::new(points.to_vec()) {
        Ok(face) => extract_features(&face),
        Err(err) => {
            debug!(
                expected = FACE_LANDMARK_COUNT,
                actual = err.actual,
                "Malformed face landmarks, using zero features"
            );
            metrics::record_malformed_landmarks("face");
            FeatureVector::ZERO
        }
    }
}

fn state_label(state: Option<ExpressionId>) -> &'static str {
    state.map(|id| id.as_str()).unwrap_or("none")
}

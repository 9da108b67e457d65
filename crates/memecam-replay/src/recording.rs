//! Recorded landmark streams.
//!
//! A recording is a JSON lines file, one frame per line:
//!
//! ```text
//! {"timestampMs": 0.0, "face": [{"x":0.5,"y":0.4}, ...], "hands": [[...21 points...]]}
//! {"timestampMs": 33.3, "face": null, "hands": {"handLandmarks": [...], "handedness": [...]}}
//! {"timestampMs": 66.6, "faceError": "model stalled"}
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. The detector
//! implementations here read each frame's landmarks back out, so a recording
//! drives the pipeline exactly as a live detector would.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use memecam_models::LandmarkPoint;
use memecam_vision::{
    DetectedHand, FaceLandmarker, HandDetectorOutput, HandLandmarker, VisionError, VisionResult,
};

/// One recorded detector frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedFrame {
    pub timestamp_ms: f64,
    #[serde(default)]
    pub face: Option<Vec<LandmarkPoint>>,
    #[serde(default)]
    pub hands: Option<HandDetectorOutput>,
    /// Simulated face detector failure for this frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face_error: Option<String>,
    /// Simulated hand detector failure for this frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hand_error: Option<String>,
}

/// A parsed recording.
#[derive(Debug, Clone, Default)]
pub struct Recording {
    frames: Vec<RecordedFrame>,
}

impl Recording {
    /// Parse JSON lines. Errors name the 1-based line.
    pub fn parse(text: &str) -> Result<Self> {
        let mut frames = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let frame: RecordedFrame = serde_json::from_str(line)
                .with_context(|| format!("invalid recorded frame on line {}", idx + 1))?;
            frames.push(frame);
        }
        debug!(frames = frames.len(), "Recording parsed");
        Ok(Self { frames })
    }

    /// Read and parse a recording file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read recording {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("failed to parse recording {}", path.display()))
    }

    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Face detector that returns the face stored in each recorded frame.
#[derive(Debug, Default)]
pub struct RecordedFaceLandmarker {
    closed: bool,
}

impl FaceLandmarker for RecordedFaceLandmarker {
    type Frame = RecordedFrame;

    fn detect_for_video(
        &mut self,
        frame: &RecordedFrame,
        _timestamp_ms: f64,
    ) -> VisionResult<Option<Vec<LandmarkPoint>>> {
        if self.closed {
            return Err(VisionError::detection_failed("face landmarker is closed"));
        }
        if let Some(message) = &frame.face_error {
            return Err(VisionError::detection_failed(message.clone()));
        }
        Ok(frame.face.clone())
    }

    fn close(&mut self) {
        self.closed = true;
    }

    fn name(&self) -> &'static str {
        "recorded_face"
    }
}

/// Hand detector that returns the hands stored in each recorded frame.
#[derive(Debug, Default)]
pub struct RecordedHandLandmarker {
    closed: bool,
}

impl HandLandmarker for RecordedHandLandmarker {
    type Frame = RecordedFrame;

    fn detect_for_video(
        &mut self,
        frame: &RecordedFrame,
        _timestamp_ms: f64,
    ) -> VisionResult<Vec<DetectedHand>> {
        if self.closed {
            return Err(VisionError::detection_failed("hand landmarker is closed"));
        }
        if let Some(message) = &frame.hand_error {
            return Err(VisionError::detection_failed(message.clone()));
        }
        Ok(frame
            .hands
            .clone()
            .map(HandDetectorOutput::into_hands)
            .unwrap_or_default())
    }

    fn close(&mut self) {
        self.closed = true;
    }

    fn name(&self) -> &'static str {
        "recorded_hand"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn points(n: usize) -> String {
        let point = r#"{"x":0.5,"y":0.5}"#;
        format!("[{}]", vec![point; n].join(","))
    }

    #[test]
    fn test_parse_skips_blank_and_comment_lines() {
        let text = format!(
            "# recorded on a laptop\n\n{{\"timestampMs\": 0, \"face\": {}}}\n{{\"timestampMs\": 33.3}}\n",
            points(478)
        );
        let recording = Recording::parse(&text).unwrap();
        assert_eq!(recording.len(), 2);
        assert_eq!(recording.frames()[0].face.as_ref().map(Vec::len), Some(478));
        assert!(recording.frames()[1].face.is_none());
        assert!(recording.frames()[1].hands.is_none());
    }

    #[test]
    fn test_parse_error_names_line() {
        let text = "{\"timestampMs\": 0}\n\n{\"timestampMs\": \"soon\"}\n";
        let err = Recording::parse(text).unwrap_err();
        assert!(err.to_string().contains("line 3"), "unexpected error: {err}");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{\"timestampMs\": 1.0, \"hands\": [{}]}}", points(21)).unwrap();
        writeln!(file, "{{\"timestampMs\": 2.0, \"faceError\": \"stalled\"}}").unwrap();

        let recording = Recording::load(file.path()).unwrap();
        assert_eq!(recording.len(), 2);
        assert_eq!(recording.frames()[1].face_error.as_deref(), Some("stalled"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Recording::load(&dir.path().join("missing.jsonl")).unwrap_err();
        assert!(err.to_string().contains("failed to read recording"));
    }

    #[test]
    fn test_recorded_landmarkers_replay_frames() {
        let text = format!(
            "{{\"timestampMs\": 0, \"face\": {}, \"hands\": {{\"handLandmarks\": [{}, {}]}}}}",
            points(478),
            points(21),
            points(4)
        );
        let recording = Recording::parse(&text).unwrap();
        let frame = &recording.frames()[0];

        let mut face = RecordedFaceLandmarker::default();
        assert_eq!(face.detect_for_video(frame, 0.0).unwrap().map(|f| f.len()), Some(478));

        let mut hand = RecordedHandLandmarker::default();
        assert_eq!(hand.detect_for_video(frame, 0.0).unwrap().len(), 1);
    }

    #[test]
    fn test_simulated_errors_and_close() {
        let recording =
            Recording::parse("{\"timestampMs\": 0, \"faceError\": \"gpu lost\", \"handError\": \"oom\"}")
                .unwrap();
        let frame = &recording.frames()[0];

        let mut face = RecordedFaceLandmarker::default();
        assert!(matches!(
            face.detect_for_video(frame, 0.0),
            Err(VisionError::DetectionFailed(_))
        ));
        let mut hand = RecordedHandLandmarker::default();
        assert!(hand.detect_for_video(frame, 0.0).is_err());

        let clean = RecordedFrame {
            timestamp_ms: 1.0,
            face: None,
            hands: None,
            face_error: None,
            hand_error: None,
        };
        face.close();
        assert!(face.detect_for_video(&clean, 1.0).is_err());
    }
}

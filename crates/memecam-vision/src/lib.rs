//! Expression and hand gesture classification over detector landmarks.
//!
//! This crate provides:
//! - Six-feature extraction from 478-point face meshes
//! - An ordered rule classifier mapping features to expression identifiers
//! - Hand gesture labeling with a chin-proximity override
//! - A per-session frame pipeline with device-aware throttling and
//!   deduplicated change notifications
//! - Detector traits and adapters that keep model bindings at the edge

pub mod config;
pub mod detector;
pub mod device;
pub mod error;
pub mod expression;
pub mod geometry;
pub mod gesture;
pub mod metrics;
pub mod pipeline;


pub use config::{DeviceOverride, GestureThresholds, PipelineConfig};
pub use detector::{
    BoxedFaceLandmarker, BoxedHandLandmarker, DetectedHand, FaceLandmarker, HandDetectorOutput,
    HandLandmarker,
};
pub use device::{DeviceClass, DeviceProfile, HostInfo};
pub use error::{VisionError, VisionResult};
pub use expression::{classify, classify_landmarks, extract_features};
pub use gesture::{ChinReference, HandGestureAnalyzer};
pub use pipeline::{FramePipeline, PipelineOutput, PipelineStats, StateListener};

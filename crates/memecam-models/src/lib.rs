//! Shared data models for memecam.
//!
//! This crate provides Serde-serializable types for:
//! - Landmark points and fixed-size face/hand landmark sets
//! - Expression identifiers and feature vectors
//! - Hand gesture labels and analyses
//! - Session identity and UI change notifications

pub mod expression;
pub mod gesture;
pub mod landmarks;
pub mod notification;
pub mod session;

// Re-export common types
pub use expression::{ExpressionId, ExpressionIdParseError, FeatureVector};
pub use gesture::{HandAnalysis, HandGesture, Handedness};
pub use landmarks::{
    FaceLandmarks, HandLandmarks, LandmarkPoint, LandmarkSet, LandmarkShapeError,
    FACE_LANDMARK_COUNT, HAND_LANDMARK_COUNT,
};
pub use notification::{OverlayLandmarks, StateChange};
pub use session::SessionId;

//! Error types for landmark classification.

use thiserror::Error;

/// Result type for vision operations.
pub type VisionResult<T> = Result<T, VisionError>;

/// Errors that can occur while running the frame pipeline.
///
/// Insufficient or malformed landmark data is never an error here; it
/// degrades to neutral results instead.
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("Detector initialization failed: {0}")]
    DetectorInit(String),

    #[error("Landmark detection failed: {0}")]
    DetectionFailed(String),

    #[error("Invalid pipeline configuration: {0}")]
    InvalidConfig(String),
}

impl VisionError {
    /// Create a detector initialization error.
    pub fn detector_init(message: impl Into<String>) -> Self {
        Self::DetectorInit(message.into())
    }

    /// Create a per-frame detection failure error.
    pub fn detection_failed(message: impl Into<String>) -> Self {
        Self::DetectionFailed(message.into())
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

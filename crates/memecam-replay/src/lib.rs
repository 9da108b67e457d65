//! Replay host for the memecam frame pipeline.
//!
//! This crate provides:
//! - JSON lines recordings of detector output
//! - Detector implementations that read landmarks back out of a recording
//! - A display-rate replay loop driving the pipeline end to end

pub mod config;
pub mod recording;
pub mod runner;

pub use config::ReplayConfig;
pub use recording::{RecordedFaceLandmarker, RecordedFrame, RecordedHandLandmarker, Recording};
pub use runner::{replay, ReplaySummary};

//! Per-session frame orchestration.

pub mod controller;
pub mod session_log;
pub mod throttle;

pub use controller::{FramePipeline, PipelineOutput, PipelineStats, StateListener};
pub use session_log::SessionLogger;
pub use throttle::{FrameThrottle, ThrottleStats};

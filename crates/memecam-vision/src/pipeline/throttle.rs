//! Frame throttling for constrained devices.
//!
//! Runs the detectors on one frame out of every `stride` callbacks and skips
//! the rest. The first callback always runs.
//!
//! # Usage
//! ```rust
//! use memecam_vision::pipeline::throttle::FrameThrottle;
//!
//! let mut throttle = FrameThrottle::new(3);
//! let processed: Vec<bool> = (0..6).map(|_| throttle.should_process()).collect();
//! assert_eq!(processed, [true, false, false, true, false, false]);
//! ```

use tracing::{debug, info};

/// Statistics for monitoring throttle behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThrottleStats {
    /// Callbacks that ran detection
    pub processed: u64,
    /// Callbacks skipped by the throttle
    pub skipped: u64,
}

impl ThrottleStats {
    /// Fraction of callbacks skipped.
    pub fn skip_ratio(&self) -> f64 {
        let total = self.processed + self.skipped;
        if total > 0 {
            self.skipped as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Every-Nth-frame counter.
#[derive(Debug, Clone)]
pub struct FrameThrottle {
    stride: u32,
    /// Total callbacks seen
    frame_count: u64,
    stats: ThrottleStats,
}

impl FrameThrottle {
    /// Create a throttle. A stride of 0 is treated as 1.
    pub fn new(stride: u32) -> Self {
        Self {
            stride: stride.max(1),
            frame_count: 0,
            stats: ThrottleStats::default(),
        }
    }

    /// No throttling.
    pub fn every_frame() -> Self {
        Self::new(1)
    }

    /// Advance the counter and report whether this callback should run.
    pub fn should_process(&mut self) -> bool {
        let frame_idx = self.frame_count;
        self.frame_count += 1;

        if frame_idx % self.stride as u64 == 0 {
            self.stats.processed += 1;
            true
        } else {
            self.stats.skipped += 1;
            debug!(frame = frame_idx, stride = self.stride, "Frame skipped by throttle");
            false
        }
    }

    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Total callbacks seen so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn stats(&self) -> ThrottleStats {
        self.stats
    }

    /// Log summary statistics.
    pub fn log_summary(&self) {
        info!(
            stride = self.stride,
            processed = self.stats.processed,
            skipped = self.stats.skipped,
            skip_ratio = format!("{:.1}%", self.stats.skip_ratio() * 100.0),
            "Frame throttle summary"
        );
    }
}

impl Default for FrameThrottle {
    fn default() -> Self {
        Self::every_frame()
    }
}

//! Display-rate replay loop.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use tokio::time::MissedTickBehavior;
use tracing::info;

use memecam_models::ExpressionId;
use memecam_vision::{FramePipeline, PipelineStats};

use crate::recording::{RecordedFrame, Recording};

/// What a replay run did.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplaySummary {
    /// Frames handed to the pipeline.
    pub frames_delivered: usize,
    /// Frames that produced an output.
    pub frames_processed: usize,
    /// Change notifications emitted.
    pub changes: usize,
    /// State after the last delivered frame.
    pub final_state: Option<ExpressionId>,
    /// Stopped early by the shutdown signal.
    pub interrupted: bool,
    pub stats: PipelineStats,
}

/// Feed every recorded frame to `pipeline`, one per tick.
///
/// A slow frame delays the following ticks; frames are never queued or
/// dropped by the host. Stops early when `shutdown` resolves.
pub async fn replay<S>(
    recording: &Recording,
    interval: Duration,
    pipeline: &mut FramePipeline<RecordedFrame>,
    shutdown: S,
) -> ReplaySummary
where
    S: Future,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    let mut summary = ReplaySummary::default();
    for frame in recording.frames() {
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                info!(delivered = summary.frames_delivered, "Replay interrupted");
                summary.interrupted = true;
                break;
            }
            _ = ticker.tick() => {}
        }

        summary.frames_delivered += 1;
        if let Some(output) = pipeline.on_frame(frame, frame.timestamp_ms) {
            summary.frames_processed += 1;
            if output.change.is_some() {
                summary.changes += 1;
            }
        }
    }

    summary.final_state = pipeline.state();
    summary.stats = pipeline.stats();
    summary
}

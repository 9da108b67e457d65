//! Replay host configuration.

use std::path::PathBuf;
use std::time::Duration;

use memecam_vision::{HostInfo, PipelineConfig};

const DEFAULT_FPS: f64 = 30.0;

/// Replay host configuration.
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// JSON lines recording to replay
    pub recording_path: Option<PathBuf>,
    /// Display refresh rate driving the frame tick
    pub fps: f64,
    /// Host description used for device classification
    pub host: HostInfo,
    /// Render Prometheus metrics at exit
    pub metrics: bool,
    /// Pipeline configuration
    pub pipeline: PipelineConfig,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            recording_path: None,
            fps: DEFAULT_FPS,
            host: HostInfo::default(),
            metrics: false,
            pipeline: PipelineConfig::default(),
        }
    }
}

impl ReplayConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            recording_path: std::env::var("MEMECAM_REPLAY_FILE").ok().map(PathBuf::from),
            fps: std::env::var("MEMECAM_REPLAY_FPS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_FPS),
            host: HostInfo {
                viewport_width: std::env::var("MEMECAM_VIEWPORT_WIDTH")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(0),
                user_agent: std::env::var("MEMECAM_USER_AGENT").unwrap_or_default(),
            },
            metrics: std::env::var("MEMECAM_METRICS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
            pipeline: PipelineConfig::from_env(),
        }
    }

    /// Environment config, with the first CLI argument taking over the
    /// recording path.
    pub fn from_env_and_args(mut args: impl Iterator<Item = String>) -> Self {
        let mut config = Self::from_env();
        if let Some(path) = args.next() {
            config.recording_path = Some(PathBuf::from(path));
        }
        config
    }

    /// Time between frame ticks. Unusable rates fall back to 30 fps.
    pub fn frame_interval(&self) -> Duration {
        let fps = if self.fps.is_finite() && self.fps > 0.0 {
            self.fps
        } else {
            DEFAULT_FPS
        };
        Duration::from_secs_f64(1.0 / fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_interval() {
        let config = ReplayConfig::default();
        let interval = config.frame_interval();
        assert!((interval.as_secs_f64() - 1.0 / 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_bad_fps_falls_back() {
        for fps in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let config = ReplayConfig {
                fps,
                ..Default::default()
            };
            assert!((config.frame_interval().as_secs_f64() - 1.0 / 30.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_cli_argument_sets_recording() {
        let config = ReplayConfig::from_env_and_args(vec!["session.jsonl".to_string()].into_iter());
        assert_eq!(config.recording_path, Some(PathBuf::from("session.jsonl")));
    }
}

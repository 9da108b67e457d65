//! Configuration for the frame pipeline and the gesture analyzer.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{VisionError, VisionResult};

/// Tunable thresholds for hand gesture classification.
///
/// All distances are in normalized image units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureThresholds {
    /// Mean tip-to-wrist distance above which a hand is open (default: 0.12)
    pub open: f64,

    /// Mean tip-to-wrist distance below which a hand is a fist (default: 0.06)
    pub fist: f64,

    /// Index tip must reach this multiple of the other fingers' mean (default: 1.35)
    pub index_up_ratio: f64,

    /// Minimum index tip distance for index_up (default: 0.08)
    pub index_up_min: f64,

    /// Smallest wrist-to-chin distance that counts as on_chin (default: 0.08)
    pub on_chin_floor: f64,

    /// On-chin radius as a fraction of face height (default: 0.25)
    pub on_chin_face_fraction: f64,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            open: 0.12,
            fist: 0.06,
            index_up_ratio: 1.35,
            index_up_min: 0.08,
            on_chin_floor: 0.08,
            on_chin_face_fraction: 0.25,
        }
    }
}

impl GestureThresholds {
    /// Check that every threshold is usable.
    pub fn validate(&self) -> VisionResult<()> {
        let fields = [
            ("open", self.open),
            ("fist", self.fist),
            ("index_up_ratio", self.index_up_ratio),
            ("index_up_min", self.index_up_min),
            ("on_chin_floor", self.on_chin_floor),
            ("on_chin_face_fraction", self.on_chin_face_fraction),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(VisionError::invalid_config(format!(
                    "gesture threshold {name} must be positive, got {value}"
                )));
            }
        }
        if self.fist >= self.open {
            return Err(VisionError::invalid_config(format!(
                "fist threshold ({}) must be below open threshold ({})",
                self.fist, self.open
            )));
        }
        Ok(())
    }
}

/// Forces the device class instead of detecting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeviceOverride {
    /// Detect from viewport width and user agent.
    #[default]
    Auto,
    /// Always throttle.
    Constrained,
    /// Never throttle.
    Unconstrained,
}

impl FromStr for DeviceOverride {
    type Err = VisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(DeviceOverride::Auto),
            "constrained" | "mobile" => Ok(DeviceOverride::Constrained),
            "unconstrained" | "desktop" => Ok(DeviceOverride::Unconstrained),
            other => Err(VisionError::invalid_config(format!(
                "unknown device override: {other}"
            ))),
        }
    }
}

/// Configuration for the frame pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Process every Nth frame on constrained devices (default: 3)
    pub throttle_factor: u32,

    /// Device class override (default: auto)
    pub device_override: DeviceOverride,

    /// Viewports narrower than this count as constrained (default: 768)
    pub constrained_viewport_width: u32,

    /// Run the hand detector when one is available (default: true)
    pub hand_tracking: bool,

    /// Attach raw landmarks to change notifications (default: false)
    pub debug_overlay: bool,

    /// Gesture thresholds
    pub gestures: GestureThresholds,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            throttle_factor: 3,
            device_override: DeviceOverride::Auto,
            constrained_viewport_width: 768,
            hand_tracking: true,
            debug_overlay: false,
            gestures: GestureThresholds::default(),
        }
    }
}

impl PipelineConfig {
    /// Desktop configuration: every frame, hands on.
    pub fn desktop() -> Self {
        Self {
            device_override: DeviceOverride::Unconstrained,
            ..Default::default()
        }
    }

    /// Low-power configuration: throttled, face only.
    pub fn low_power() -> Self {
        Self {
            device_override: DeviceOverride::Constrained,
            hand_tracking: false,
            ..Default::default()
        }
    }

    /// Create config from environment variables.
    ///
    /// Missing or unparseable values keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let gesture_defaults = defaults.gestures;

        Self {
            throttle_factor: env_parse("MEMECAM_THROTTLE_FACTOR").unwrap_or(defaults.throttle_factor),
            device_override: env_parse("MEMECAM_DEVICE").unwrap_or(defaults.device_override),
            constrained_viewport_width: env_parse("MEMECAM_CONSTRAINED_WIDTH")
                .unwrap_or(defaults.constrained_viewport_width),
            hand_tracking: env_parse("MEMECAM_HAND_TRACKING").unwrap_or(defaults.hand_tracking),
            debug_overlay: env_parse("MEMECAM_DEBUG_OVERLAY").unwrap_or(defaults.debug_overlay),
            gestures: GestureThresholds {
                open: env_parse("MEMECAM_GESTURE_OPEN").unwrap_or(gesture_defaults.open),
                fist: env_parse("MEMECAM_GESTURE_FIST").unwrap_or(gesture_defaults.fist),
                index_up_ratio: env_parse("MEMECAM_GESTURE_INDEX_UP_RATIO")
                    .unwrap_or(gesture_defaults.index_up_ratio),
                index_up_min: env_parse("MEMECAM_GESTURE_INDEX_UP_MIN")
                    .unwrap_or(gesture_defaults.index_up_min),
                on_chin_floor: env_parse("MEMECAM_GESTURE_ON_CHIN_FLOOR")
                    .unwrap_or(gesture_defaults.on_chin_floor),
                on_chin_face_fraction: env_parse("MEMECAM_GESTURE_ON_CHIN_FRACTION")
                    .unwrap_or(gesture_defaults.on_chin_face_fraction),
            },
        }
    }

    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self) -> VisionResult<()> {
        if self.throttle_factor == 0 {
            return Err(VisionError::invalid_config("throttle_factor must be at least 1"));
        }
        self.gestures.validate()
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

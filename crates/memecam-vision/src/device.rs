//! Host device classification.
//!
//! Decides once per session whether the host is constrained (phone, tablet,
//! narrow viewport) and therefore how aggressively frames are throttled.
//!
//! # Usage
//! ```rust
//! use memecam_vision::config::PipelineConfig;
//! use memecam_vision::device::{DeviceProfile, HostInfo};
//!
//! let host = HostInfo::new(390, "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)");
//! let profile = DeviceProfile::detect(&host, &PipelineConfig::default());
//! assert_eq!(profile.stride, 3);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

use crate::config::{DeviceOverride, PipelineConfig};

/// User agent fragments that mark a mobile browser.
const MOBILE_SIGNATURES: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
    "mobile",
];

/// What the host tells us about itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostInfo {
    /// Viewport width in CSS pixels. 0 when unknown.
    pub viewport_width: u32,
    /// Browser user agent string. Empty when unknown.
    pub user_agent: String,
}

impl HostInfo {
    pub fn new(viewport_width: u32, user_agent: impl Into<String>) -> Self {
        Self {
            viewport_width,
            user_agent: user_agent.into(),
        }
    }

    /// Whether the user agent carries a mobile signature (case-insensitive).
    pub fn has_mobile_user_agent(&self) -> bool {
        let ua = self.user_agent.to_lowercase();
        MOBILE_SIGNATURES.iter().any(|sig| ua.contains(sig))
    }
}

/// Coarse device class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    /// Phones and small viewports: throttled.
    Constrained,
    /// Everything else: every frame.
    Unconstrained,
}

impl DeviceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceClass::Constrained => "constrained",
            DeviceClass::Unconstrained => "unconstrained",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Device class plus the frame stride it implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceProfile {
    pub class: DeviceClass,
    /// Process one frame out of every `stride`.
    pub stride: u32,
    /// Whether the class came from configuration rather than detection.
    pub overridden: bool,
}

impl DeviceProfile {
    /// Classify the host. A configured override always wins.
    pub fn detect(host: &HostInfo, config: &PipelineConfig) -> Self {
        let (class, overridden) = match config.device_override {
            DeviceOverride::Constrained => (DeviceClass::Constrained, true),
            DeviceOverride::Unconstrained => (DeviceClass::Unconstrained, true),
            DeviceOverride::Auto => {
                let narrow = host.viewport_width > 0
                    && host.viewport_width < config.constrained_viewport_width;
                if narrow || host.has_mobile_user_agent() {
                    (DeviceClass::Constrained, false)
                } else {
                    (DeviceClass::Unconstrained, false)
                }
            }
        };

        let stride = match class {
            DeviceClass::Constrained => config.throttle_factor.max(1),
            DeviceClass::Unconstrained => 1,
        };

        Self {
            class,
            stride,
            overridden,
        }
    }

    pub fn is_constrained(&self) -> bool {
        self.class == DeviceClass::Constrained
    }

    /// Log the detected profile.
    pub fn log(&self) {
        info!(
            class = %self.class,
            stride = self.stride,
            overridden = self.overridden,
            "Device profile detected"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESKTOP_UA: &str =
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

    #[test]
    fn test_wide_desktop_is_unconstrained() {
        let profile = DeviceProfile::detect(&HostInfo::new(1440, DESKTOP_UA), &PipelineConfig::default());
        assert_eq!(profile.class, DeviceClass::Unconstrained);
        assert_eq!(profile.stride, 1);
        assert!(!profile.overridden);
    }

    #[test]
    fn test_narrow_viewport_is_constrained() {
        let profile = DeviceProfile::detect(&HostInfo::new(767, DESKTOP_UA), &PipelineConfig::default());
        assert!(profile.is_constrained());
        assert_eq!(profile.stride, 3);

        let edge = DeviceProfile::detect(&HostInfo::new(768, DESKTOP_UA), &PipelineConfig::default());
        assert!(!edge.is_constrained());
    }

    #[test]
    fn test_mobile_user_agent_is_constrained() {
        for ua in [
            "Mozilla/5.0 (Linux; Android 14; Pixel 8)",
            "Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X)",
            "Opera/9.80 (J2ME/MIDP; Opera Mini/9.80)",
            "SOMETHING MOBILE",
        ] {
            let host = HostInfo::new(1920, ua);
            assert!(host.has_mobile_user_agent(), "{ua} should look mobile");
            assert!(DeviceProfile::detect(&host, &PipelineConfig::default()).is_constrained());
        }
    }

    #[test]
    fn test_unknown_host_is_unconstrained() {
        let profile = DeviceProfile::detect(&HostInfo::default(), &PipelineConfig::default());
        assert_eq!(profile.class, DeviceClass::Unconstrained);
    }

    #[test]
    fn test_override_wins() {
        let phone = HostInfo::new(390, "iPhone");
        let profile = DeviceProfile::detect(&phone, &PipelineConfig::desktop());
        assert_eq!(profile.class, DeviceClass::Unconstrained);
        assert_eq!(profile.stride, 1);
        assert!(profile.overridden);

        let desktop = HostInfo::new(1920, DESKTOP_UA);
        let profile = DeviceProfile::detect(&desktop, &PipelineConfig::low_power());
        assert!(profile.is_constrained());
        assert!(profile.overridden);
    }

    #[test]
    fn test_custom_throttle_factor() {
        let config = PipelineConfig {
            throttle_factor: 5,
            ..PipelineConfig::low_power()
        };
        assert_eq!(DeviceProfile::detect(&HostInfo::default(), &config).stride, 5);
    }

    #[test]
    fn test_device_class_display() {
        assert_eq!(DeviceClass::Constrained.to_string(), "constrained");
        assert_eq!(DeviceClass::Unconstrained.to_string(), "unconstrained");
    }
}

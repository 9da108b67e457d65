//! Expression identifiers and the per-frame feature vector.
//!
//! The identifier set is closed. Each identifier names the meme shown for
//! the matching expression:
//!
//! - `cachorro_piada`: broad closed-mouth smile
//! - `nazare_confusa`: mouth and eyes wide open
//! - `confused`: tilted head with a raised brow
//! - `shocked`: open mouth without a smile
//! - `surprised`: raised brows
//! - `neutral_smile`: slight smile
//! - `neutral`: everything else

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Classified expression for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionId {
    /// Nothing distinctive.
    #[default]
    Neutral,
    /// Slight smile.
    NeutralSmile,
    /// Broad closed-mouth smile.
    CachorroPiada,
    /// Mouth and eyes both wide open.
    NazareConfusa,
    /// Head tilted with the left brow raised.
    Confused,
    /// Mouth open, not smiling.
    Shocked,
    /// Either brow raised high.
    Surprised,
}

impl ExpressionId {
    /// All identifiers, in classifier evaluation order (fallback last).
    pub const ALL: &'static [ExpressionId] = &[
        ExpressionId::CachorroPiada,
        ExpressionId::NazareConfusa,
        ExpressionId::Confused,
        ExpressionId::Shocked,
        ExpressionId::Surprised,
        ExpressionId::NeutralSmile,
        ExpressionId::Neutral,
    ];

    /// Wire name of the identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpressionId::Neutral => "neutral",
            ExpressionId::NeutralSmile => "neutral_smile",
            ExpressionId::CachorroPiada => "cachorro_piada",
            ExpressionId::NazareConfusa => "nazare_confusa",
            ExpressionId::Confused => "confused",
            ExpressionId::Shocked => "shocked",
            ExpressionId::Surprised => "surprised",
        }
    }
}

impl fmt::Display for ExpressionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExpressionId {
    type Err = ExpressionIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpressionId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ExpressionIdParseError(s.to_string()))
    }
}

#[derive(Debug, Error)]
#[error("Unknown expression id: {0}")]
pub struct ExpressionIdParseError(String);

/// Six scalar measurements summarizing one face.
///
/// Percent-like fields are in `[0, 100]`; `head_tilt` is the eye-line roll
/// in degrees. All values are already rounded to integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeatureVector {
    pub mouth_open: i32,
    pub smile: i32,
    pub eyes_wide: i32,
    pub left_eyebrow_raised: i32,
    pub right_eyebrow_raised: i32,
    pub head_tilt: i32,
}

impl FeatureVector {
    /// Vector used when a face has too few landmarks.
    pub const ZERO: FeatureVector = FeatureVector {
        mouth_open: 0,
        smile: 0,
        eyes_wide: 0,
        left_eyebrow_raised: 0,
        right_eyebrow_raised: 0,
        head_tilt: 0,
    };

    /// True if every field is zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

//! Face expression analysis: feature extraction and classification.
//!
//! ```text
//! 478 face points ──► extract_features ──► FeatureVector ──► classify ──► ExpressionId
//! ```

pub mod classifier;
pub mod features;

pub use classifier::{classify, classify_landmarks};
pub use features::extract_features;

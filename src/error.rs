//! Error types for rollout evaluation

use thiserror::Error;

/// Result type for rollout operations
pub type RolloutResult<T> = Result<T, RolloutError>;

/// Rollout evaluation errors
#[derive(Debug, Error)]
pub enum RolloutError {
    /// The entropy source failed to produce random bytes.
    ///
    /// Only random evaluation can fail this way. The draw is not retried
    /// and the failure is never mapped to a default decision.
    #[error("Entropy source failure: {0}")]
    Entropy(String),

    /// Threshold outside the [0.0, 1.0] rollout range
    #[error("Invalid rollout threshold {threshold}, expected a fraction in 0.0..=1.0")]
    InvalidThreshold {
        /// The rejected threshold value
        threshold: f64,
    },
}

impl RolloutError {
    /// Create a new entropy failure error
    pub fn entropy<S: Into<String>>(msg: S) -> Self {
        Self::Entropy(msg.into())
    }

    /// Check if this error is an entropy source failure
    pub fn is_entropy(&self) -> bool {
        matches!(self, Self::Entropy(_))
    }
}

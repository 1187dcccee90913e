//! Feature flag definition and evaluation
//!
//! A [`Flag`] pairs a name with a rollout threshold and exposes two
//! evaluation operations: deterministic evaluation against a
//! [`Subject`](crate::Subject) and random evaluation against an entropy
//! source.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::trace;

use crate::bucket;
use crate::entropy::{EntropySource, OsEntropy};
use crate::error::{RolloutError, RolloutResult};
use crate::subject::Subject;

/// Bytes drawn per random evaluation, matching the digest width used by
/// deterministic evaluation.
const RANDOM_SAMPLE_BYTES: usize = bucket::MAX_SAMPLE_BYTES;

/// A named percentage rollout.
///
/// Immutable after construction and safe to share read-only across
/// threads; evaluation holds no state and recomputes the bucket position
/// on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flag {
    /// Flag name, unique per distinct rollout
    name: String,

    /// Target fraction of subjects enabled, nominally in [0.0, 1.0]
    threshold: f64,
}

impl Flag {
    /// Create a new feature flag.
    ///
    /// The threshold is the fraction of subjects the flag should be
    /// enabled for: 1.0 means everyone, 0.0 means no one. The range is
    /// not validated: a threshold below 0.0 makes the flag always-off
    /// for bucketed subjects and above 1.0 always-on. Use
    /// [`Flag::try_new`] to reject out-of-range values instead.
    ///
    /// The name decorrelates flags from each other: two flags with
    /// different names bucket the same subject independently. An empty
    /// name is accepted, but such flags no longer decorrelate.
    ///
    /// # Examples
    ///
    /// ```
    /// use rollout::Flag;
    ///
    /// let flag = Flag::new("new-checkout", 0.25);
    /// assert_eq!(flag.threshold(), 0.25);
    /// ```
    pub fn new(name: impl Into<String>, threshold: f64) -> Self {
        Self {
            name: name.into(),
            threshold,
        }
    }

    /// Create a new feature flag, rejecting thresholds outside [0.0, 1.0].
    ///
    /// # Errors
    ///
    /// Returns [`RolloutError::InvalidThreshold`] when `threshold` is not
    /// a fraction in `0.0..=1.0` (NaN included).
    pub fn try_new(name: impl Into<String>, threshold: f64) -> RolloutResult<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(RolloutError::InvalidThreshold { threshold });
        }
        Ok(Self::new(name, threshold))
    }

    /// Get the flag name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the rollout threshold
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Byte encoding of the name, mixed into the digest to decorrelate
    /// flags from each other
    pub fn offset(&self) -> &[u8] {
        self.name.as_bytes()
    }

    /// Evaluate the flag deterministically for a subject.
    ///
    /// The same subject identifier always produces the same decision for
    /// the same flag. Subjects reporting
    /// [`always_enabled`](Subject::always_enabled) short-circuit to
    /// `true` without any hashing.
    ///
    /// The bucket position is derived from
    /// `SHA-256(identifier || offset)`; the comparison against the
    /// threshold is strict, so a position exactly equal to the threshold
    /// is not enabled. At threshold 0.0 nothing is enabled (position 0
    /// excluded); at 1.0 everything is (position is always below 1).
    pub fn enabled_for<S: Subject + ?Sized>(&self, subject: &S) -> bool {
        if subject.always_enabled() {
            trace!(flag = %self.name, "always-enabled subject, skipping bucketing");
            return true;
        }

        let mut hasher = Sha256::new();
        hasher.update(subject.identifier());
        hasher.update(self.offset());
        let digest = hasher.finalize();

        let position = bucket::position(digest.as_slice());
        let enabled = self.threshold > position;
        trace!(
            flag = %self.name,
            digest = %hex::encode(digest),
            position = position,
            enabled = enabled,
            "deterministic evaluation"
        );
        enabled
    }

    /// Evaluate the flag randomly, without subject identity.
    ///
    /// Draws fresh entropy from the operating system on every call, so
    /// there is no per-call guarantee; over many independent calls the
    /// enabled fraction converges to the threshold. Intended for
    /// anonymous, uncorrelated sampling.
    ///
    /// # Errors
    ///
    /// Returns [`RolloutError::Entropy`] if the OS entropy source fails.
    /// The failure is not retried and never mapped to a default decision.
    pub fn enabled(&self) -> RolloutResult<bool> {
        self.enabled_with(&mut OsEntropy)
    }

    /// Evaluate the flag randomly against a caller-supplied entropy source.
    ///
    /// This is [`Flag::enabled`] with the entropy capability injected,
    /// letting tests substitute a deterministic source.
    ///
    /// # Errors
    ///
    /// Returns [`RolloutError::Entropy`] if the source fails to produce
    /// bytes.
    pub fn enabled_with<E: EntropySource>(&self, source: &mut E) -> RolloutResult<bool> {
        let mut sample = [0u8; RANDOM_SAMPLE_BYTES];
        source.fill(&mut sample)?;

        let position = bucket::position(&sample);
        let enabled = self.threshold > position;
        trace!(
            flag = %self.name,
            position = position,
            enabled = enabled,
            "random evaluation"
        );
        Ok(enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::FixedEntropy;

    struct TestSubject {
        id: Vec<u8>,
        always: bool,
    }

    impl Subject for TestSubject {
        fn identifier(&self) -> &[u8] {
            &self.id
        }

        fn always_enabled(&self) -> bool {
            self.always
        }
    }

    #[test]
    fn test_new_keeps_threshold_unvalidated() {
        let flag = Flag::new("over", 1.5);
        assert_eq!(flag.threshold(), 1.5);

        let flag = Flag::new("under", -0.5);
        assert_eq!(flag.threshold(), -0.5);
    }

    #[test]
    fn test_try_new_validates_range() {
        assert!(Flag::try_new("ok", 0.0).is_ok());
        assert!(Flag::try_new("ok", 1.0).is_ok());
        assert!(Flag::try_new("over", 1.01).is_err());
        assert!(Flag::try_new("under", -0.01).is_err());
        assert!(Flag::try_new("nan", f64::NAN).is_err());
    }

    #[test]
    fn test_offset_is_name_bytes() {
        let flag = Flag::new("feature", 0.5);
        assert_eq!(flag.offset(), b"feature");
        assert_eq!(flag.name(), "feature");
    }

    #[test]
    fn test_determinism() {
        let flag = Flag::new("stable", 0.5);
        let subject = TestSubject {
            id: b"user-42".to_vec(),
            always: false,
        };

        let first = flag.enabled_for(&subject);
        for _ in 0..100 {
            assert_eq!(flag.enabled_for(&subject), first);
        }
    }

    #[test]
    fn test_always_enabled_wins_over_zero_threshold() {
        let flag = Flag::new("anything", 0.0);
        let subject = TestSubject {
            id: b"admin".to_vec(),
            always: true,
        };

        assert!(flag.enabled_for(&subject));
    }

    #[test]
    fn test_empty_identifier_is_accepted() {
        let flag = Flag::new("feature", 1.0);
        let subject = TestSubject {
            id: Vec::new(),
            always: false,
        };

        // Hashed as-is; threshold 1.0 admits every bucket position
        assert!(flag.enabled_for(&subject));
    }

    #[test]
    fn test_threshold_extremes() {
        let everyone = Flag::new("everyone", 1.0);
        let no_one = Flag::new("no-one", 0.0);

        for i in 0..50 {
            let subject = TestSubject {
                id: format!("user-{}", i).into_bytes(),
                always: false,
            };
            assert!(everyone.enabled_for(&subject));
            assert!(!no_one.enabled_for(&subject));
        }
    }

    #[test]
    fn test_enabled_with_is_reproducible() {
        let flag = Flag::new("sampled", 0.5);

        let mut low = FixedEntropy::new(vec![0x00]);
        assert!(flag.enabled_with(&mut low).unwrap());

        let mut high = FixedEntropy::new(vec![0xFF]);
        assert!(!flag.enabled_with(&mut high).unwrap());
    }

    #[test]
    fn test_serde_round_trip() {
        let flag = Flag::new("serialized", 0.33);
        let json = serde_json::to_string(&flag).unwrap();
        let back: Flag = serde_json::from_str(&json).unwrap();

        assert_eq!(back, flag);

        let subject = TestSubject {
            id: b"user-7".to_vec(),
            always: false,
        };
        assert_eq!(back.enabled_for(&subject), flag.enabled_for(&subject));
    }
}

//! Entropy source capability for random evaluation
//!
//! Randomness is injected rather than read from ambient global state:
//! production code uses [`OsEntropy`], tests can substitute
//! [`FixedEntropy`] to make random evaluation reproducible.

use rand::TryRngCore;
use rand::rngs::OsRng;

use crate::error::{RolloutError, RolloutResult};

/// Source of random bytes for non-deterministic evaluation
pub trait EntropySource {
    /// Fill `buf` with random bytes.
    ///
    /// A failed draw must surface as an error; it is never substituted
    /// with a default byte pattern.
    fn fill(&mut self, buf: &mut [u8]) -> RolloutResult<()>;
}

/// Operating system entropy source.
///
/// Backed by the OS cryptographically secure generator. Stateless, so
/// any number of threads can hold their own copy; the OS serializes the
/// underlying draws.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> RolloutResult<()> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| RolloutError::entropy(e.to_string()))
    }
}

/// Fixed-pattern entropy source for reproducible tests.
///
/// Repeats the configured pattern to fill any request; an empty pattern
/// fills with zeroes. Never fails.
#[derive(Debug, Clone, Default)]
pub struct FixedEntropy {
    pattern: Vec<u8>,
}

impl FixedEntropy {
    /// Create a source that repeats `pattern`
    pub fn new(pattern: impl Into<Vec<u8>>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl EntropySource for FixedEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> RolloutResult<()> {
        if self.pattern.is_empty() {
            buf.fill(0);
            return Ok(());
        }

        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = self.pattern[i % self.pattern.len()];
        }
        Ok(())
    }
}

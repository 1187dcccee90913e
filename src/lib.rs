//! # Rollout
//!
//! Deterministic percentage-based feature rollout with stable subject
//! bucketing.
//!
//! Given a named flag and a target rollout fraction, the crate decides
//! whether the flag is on for a given subject (a user, session, or
//! group) such that the same subject always receives the same decision
//! for the same flag, and different flags bucket the same subject
//! independently.
//!
//! ## Features
//!
//! - **Deterministic bucketing**: `SHA-256(identifier || name)` maps each
//!   subject to a stable position in [0, 1) compared against the flag's
//!   threshold
//! - **Flag independence**: the flag name is mixed into the digest, so
//!   two flags at the same threshold enable different subjects
//! - **Always-enabled override**: subjects can bypass bucketing entirely
//!   (admin and test accounts)
//! - **Random sampling**: threshold-based evaluation without subject
//!   identity, converging on the target fraction over many calls
//! - **Injectable entropy**: the random source is a capability, so tests
//!   can substitute a fixed source
//!
//! ## Quick Start
//!
//! ```rust
//! use rollout::{Flag, Subject};
//!
//! struct User {
//!     id: String,
//! }
//!
//! impl Subject for User {
//!     fn identifier(&self) -> &[u8] {
//!         self.id.as_bytes()
//!     }
//! }
//!
//! // Roll out to 25% of users
//! let flag = Flag::new("new-checkout", 0.25);
//! let user = User {
//!     id: "user-123".to_string(),
//! };
//!
//! if flag.enabled_for(&user) {
//!     // serve the new checkout flow
//! }
//! ```
//!
//! ## Random Evaluation
//!
//! For anonymous sampling without a stable identity, draw fresh entropy
//! per call:
//!
//! ```rust
//! use rollout::Flag;
//!
//! # fn main() -> rollout::RolloutResult<()> {
//! let flag = Flag::new("sampled-tracing", 0.01);
//!
//! if flag.enabled()? {
//!     // roughly 1% of calls land here
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Bucket Stability
//!
//! Bucket positions are derived from the digest by taking one bit per
//! byte (the most-significant bit) and scaling the accumulated integer
//! into [0, 1). The concatenation order (`identifier` then name bytes),
//! the 256-bit digest, and the strict threshold comparison are all part
//! of the stability contract: previously assigned buckets do not shift
//! across releases or re-implementations.

mod bucket;

pub mod entropy;
pub mod error;
pub mod flag;
pub mod subject;

pub use entropy::{EntropySource, FixedEntropy, OsEntropy};
pub use error::{RolloutError, RolloutResult};
pub use flag::Flag;
pub use subject::Subject;

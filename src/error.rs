//! Error types for contract violations and configuration mistakes.
//!
//! Every fatal condition in this crate (spec §7) is reported synchronously as
//! a `Result::Err`; nothing is retried or silently truncated. Budget limits
//! (`max_diameter`, `max_layer_size_to_explore`) are not errors — they show up
//! as `BfsResult::bfs_completed() == false` on an `Ok` result.

use thiserror::Error;

/// Fatal contract or configuration violation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CayleyError {
    /// BFS was invoked on a graph whose generator set is not inverse-closed.
    #[error("generator set is not inverse-closed; symmetric BFS requires every generator's inverse to also be present")]
    NotInverseClosed,

    /// A generator row is not a permutation of `0..n`.
    #[error("generator {generator_index} is not a permutation of 0..n")]
    NotAPermutation {
        /// Index of the offending generator.
        generator_index: usize,
    },

    /// A central state, start state, or generator row has the wrong length.
    #[error("length mismatch: expected {expected}, found {found}")]
    LengthMismatch {
        /// Length required by `n`.
        expected: usize,
        /// Length actually supplied.
        found: usize,
    },

    /// An element value exceeds the packed-mode alphabet width.
    #[error("state {state_index} position {position} has value {value} which does not fit in {width} bits")]
    ValueOutOfAlphabet {
        /// Row index within the batch being encoded.
        state_index: usize,
        /// Column (state position) of the offending value.
        position: usize,
        /// The offending value.
        value: u64,
        /// Configured/derived packed bit width.
        width: u32,
    },

    /// A configuration value was non-positive or otherwise out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Human-readable explanation.
        reason: &'static str,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CayleyError>;

//! The error returned when the raw data for an optimal tree is malformed.

use thiserror::Error;

/// Input that can't be turned into an optimal BST. Construction is aborted
/// before any tree is built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInput {
    /// The keys, values, key probabilities, and miss probabilities don't line up.
    /// There must be one value and one key probability per key, and one more
    /// miss probability than there are keys.
    #[error("{keys} keys, {values} values, {key_probs} key probs, and {miss_probs} miss probs")]
    LengthMismatch {
        /// Number of keys supplied.
        keys: usize,
        /// Number of values supplied.
        values: usize,
        /// Number of key probabilities supplied.
        key_probs: usize,
        /// Number of miss probabilities supplied.
        miss_probs: usize,
    },

    /// All of the probabilities together don't add up to 1.
    #[error("probabilities total to {total}")]
    ProbabilityTotal {
        /// What the probabilities actually summed to.
        total: f64,
    },
}

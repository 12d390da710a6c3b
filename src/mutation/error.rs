//! Error type for variant generation

use std::error;
use std::fmt;

/// Invalid-parameter failures surfaced by [`generate`](crate::mutation::generate).
///
/// All variants are fatal to the call; none are retried. Oversized sample
/// sizes are not errors — they clamp to the exhaustive upper bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// The input sequence was empty.
    EmptySequence,

    /// A mode name did not match any known mutation mode.
    UnsupportedMode(String),

    /// The mutation count exceeds the sequence length.
    KOutOfRange {
        /// The requested mutation count
        k: usize,
        /// The sequence length (upper bound)
        len: usize,
    },
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySequence => write!(f, "Input sequence must not be empty"),
            Self::UnsupportedMode(name) => write!(f, "Unsupported mutation mode: '{name}'"),
            Self::KOutOfRange { k, len } => {
                write!(f, "Mutation count k = {k} out of range for sequence of length {len}")
            }
        }
    }
}

impl error::Error for GenerateError {}

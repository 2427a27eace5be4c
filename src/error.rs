//! Error types for the coltrans library.

use thiserror::Error;

/// Errors produced by the coltrans library.
#[derive(Debug, Error)]
pub enum TranspositionError {
    /// Key string is empty.
    #[error("Key must be at least 1 character long")]
    EmptyKey,
    /// Numeric key is not an exact permutation of `1..=N`, or could not be
    /// parsed at all.
    #[error("{}", permutation_message(.expected, .reason))]
    InvalidPermutation {
        /// Number of values parsed from the key; `None` when parsing failed.
        expected: Option<usize>,
        /// What was wrong with the parsed values.
        reason: String,
    },
    /// Text key does not meet the configured character policy.
    #[error("Key contains characters outside the allowed set: {0:?}")]
    InvalidKeyCharacters(char),
    /// Padding must be empty or a single character.
    #[error("Padding must be empty or exactly one character, got {0:?}")]
    InvalidPaddingChar(String),
    /// An I/O failure while reading or writing a payload.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PartialEq for TranspositionError {
    fn eq(&self, other: &Self) -> bool {
        use TranspositionError::*;
        match (self, other) {
            (EmptyKey, EmptyKey) => true,
            (
                InvalidPermutation {
                    expected: a,
                    reason: ra,
                },
                InvalidPermutation {
                    expected: b,
                    reason: rb,
                },
            ) => a == b && ra == rb,
            (InvalidKeyCharacters(a), InvalidKeyCharacters(b)) => a == b,
            (InvalidPaddingChar(a), InvalidPaddingChar(b)) => a == b,
            (Io(a), Io(b)) => a.kind() == b.kind(),
            _ => false,
        }
    }
}

fn permutation_message(expected: &Option<usize>, reason: &str) -> String {
    match expected {
        Some(n) => format!("Numeric key must be a permutation of 1..{}: {}", n, reason),
        None => format!("Numeric key could not be parsed: {}", reason),
    }
}

/// A convenience `Result` alias using [`TranspositionError`].
pub type Result<T> = std::result::Result<T, TranspositionError>;

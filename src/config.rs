//! Cipher options.
//!
//! [`CipherOptions`] gathers the caller-chosen knobs that sit around a key:
//! how to read it, which character pads short text rows, how strictly key
//! characters are checked, and how large a byte sample the step tracer
//! takes.

use crate::error::{Result, TranspositionError};
use crate::key_order::{KeyCharPolicy, KeyMode};

/// Default padding character for text encryption.
pub const DEFAULT_PADDING: char = 'X';

/// Default number of leading bytes traced for visualisation.
pub const DEFAULT_SAMPLE_LEN: usize = 50;

/// Options applied by [`ColumnarTransposition`](crate::ColumnarTransposition).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CipherOptions {
    /// How the key string is interpreted.
    pub mode: KeyMode,
    /// Text padding; `None` leaves the last row short.
    pub padding: Option<char>,
    /// Character check run on text keys before resolution.
    pub key_chars: KeyCharPolicy,
    /// Bytes taken from the front of a buffer for step tracing.
    pub sample_len: usize,
}

impl Default for CipherOptions {
    fn default() -> Self {
        CipherOptions {
            mode: KeyMode::Text,
            padding: Some(DEFAULT_PADDING),
            key_chars: KeyCharPolicy::Alphanumeric,
            sample_len: DEFAULT_SAMPLE_LEN,
        }
    }
}

impl CipherOptions {
    pub fn with_mode(mut self, mode: KeyMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_padding(mut self, padding: Option<char>) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_key_chars(mut self, policy: KeyCharPolicy) -> Self {
        self.key_chars = policy;
        self
    }

    pub fn with_sample_len(mut self, sample_len: usize) -> Self {
        self.sample_len = sample_len;
        self
    }

    /// Parses a padding string: empty means no padding, otherwise exactly
    /// one character.
    ///
    /// # Errors
    /// Returns [`TranspositionError::InvalidPaddingChar`] for longer strings.
    ///
    /// ```
    /// use coltrans::CipherOptions;
    ///
    /// assert_eq!(CipherOptions::padding_from_str("").unwrap(), None);
    /// assert_eq!(CipherOptions::padding_from_str("Q").unwrap(), Some('Q'));
    /// assert!(CipherOptions::padding_from_str("QQ").is_err());
    /// ```
    pub fn padding_from_str(padding: &str) -> Result<Option<char>> {
        let mut chars = padding.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Ok(None),
            (Some(c), None) => Ok(Some(c)),
            _ => Err(TranspositionError::InvalidPaddingChar(padding.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = CipherOptions::default();
        assert_eq!(opts.mode, KeyMode::Text);
        assert_eq!(opts.padding, Some('X'));
        assert_eq!(opts.key_chars, KeyCharPolicy::Alphanumeric);
        assert_eq!(opts.sample_len, 50);
    }

    #[test]
    fn test_builders() {
        let opts = CipherOptions::default()
            .with_mode(KeyMode::Numeric)
            .with_padding(None)
            .with_key_chars(KeyCharPolicy::Any)
            .with_sample_len(8);
        assert_eq!(opts.mode, KeyMode::Numeric);
        assert_eq!(opts.padding, None);
        assert_eq!(opts.key_chars, KeyCharPolicy::Any);
        assert_eq!(opts.sample_len, 8);
    }

    #[test]
    fn test_padding_multibyte_char() {
        assert_eq!(CipherOptions::padding_from_str("é").unwrap(), Some('é'));
        assert_eq!(
            CipherOptions::padding_from_str("ab"),
            Err(TranspositionError::InvalidPaddingChar("ab".to_string()))
        );
    }
}

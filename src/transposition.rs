//! ColumnarTransposition: a key resolved once under a set of options.
//!
//! Runs the key character check, resolves the column order, and exposes
//! the text codec, byte codec and step tracer against that order.

use crate::byte_codec;
use crate::config::CipherOptions;
use crate::error::Result;
use crate::key_order::{check_key_chars, KeyOrder};
use crate::step_tracer::{self, ByteTrace, Direction};
use crate::text_codec::{self, CipherResult};

/// Columnar transposition cipher bound to one key.
///
/// # Examples
///
/// ```
/// use coltrans::{CipherOptions, ColumnarTransposition};
///
/// let cipher = ColumnarTransposition::new("ZEBRA", CipherOptions::default()).unwrap();
/// let enc = cipher.encrypt_text("KRIPTOGRAFI");
/// let dec = cipher.decrypt_text_unpadded(enc.text());
/// assert_eq!(dec, "KRIPTOGRAFI");
/// ```
#[derive(Debug, Clone)]
pub struct ColumnarTransposition {
    key: KeyOrder,
    options: CipherOptions,
}

impl ColumnarTransposition {
    /// Checks and resolves `key` under `options`.
    ///
    /// # Errors
    /// - [`TranspositionError::EmptyKey`](crate::TranspositionError::EmptyKey)
    ///   if `key` is empty.
    /// - [`TranspositionError::InvalidKeyCharacters`](crate::TranspositionError::InvalidKeyCharacters)
    ///   if `key` fails the configured character policy.
    /// - [`TranspositionError::InvalidPermutation`](crate::TranspositionError::InvalidPermutation)
    ///   if a numeric key is not a permutation of `1..=N`.
    ///
    /// ```
    /// use coltrans::{CipherOptions, ColumnarTransposition, KeyMode};
    ///
    /// assert!(ColumnarTransposition::new("", CipherOptions::default()).is_err());
    /// let numeric = CipherOptions::default().with_mode(KeyMode::Numeric);
    /// assert!(ColumnarTransposition::new("1 2 4", numeric).is_err());
    /// ```
    pub fn new(key: &str, options: CipherOptions) -> Result<Self> {
        check_key_chars(key, options.mode, options.key_chars)?;
        let key = KeyOrder::resolve(key, options.mode)?;
        Ok(ColumnarTransposition { key, options })
    }

    pub fn key(&self) -> &KeyOrder {
        &self.key
    }

    pub fn options(&self) -> &CipherOptions {
        &self.options
    }

    /// Encrypts text, padding with the configured padding character.
    pub fn encrypt_text(&self, plaintext: &str) -> CipherResult {
        text_codec::encrypt_text_with_order(plaintext, &self.key, self.options.padding)
    }

    /// Decrypts text. The result's text has trailing whitespace stripped.
    pub fn decrypt_text(&self, ciphertext: &str) -> CipherResult {
        text_codec::decrypt_text_with_order(ciphertext, &self.key)
    }

    /// Decrypts text and strips trailing configured padding characters.
    pub fn decrypt_text_unpadded(&self, ciphertext: &str) -> String {
        let result = self.decrypt_text(ciphertext);
        text_codec::strip_padding(result.text(), self.options.padding).to_string()
    }

    /// Encrypts a byte buffer, zero-padding it to a full rectangle.
    pub fn encrypt_bytes(&self, data: &[u8]) -> Vec<u8> {
        byte_codec::encrypt_bytes_with_order(data, &self.key)
    }

    /// Decrypts a byte buffer; the output is as long as the input.
    pub fn decrypt_bytes(&self, data: &[u8]) -> Vec<u8> {
        byte_codec::decrypt_bytes_with_order(data, &self.key)
    }

    /// Traces the configured sample prefix of `data`.
    pub fn trace_bytes(&self, data: &[u8], direction: Direction) -> ByteTrace {
        step_tracer::trace_prefix(data, self.options.sample_len, &self.key, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranspositionError;
    use crate::key_order::{KeyCharPolicy, KeyMode};

    #[test]
    fn test_rejects_non_alphanumeric_text_key() {
        assert_eq!(
            ColumnarTransposition::new("MY-KEY", CipherOptions::default()).unwrap_err(),
            TranspositionError::InvalidKeyCharacters('-')
        );
        let relaxed = CipherOptions::default().with_key_chars(KeyCharPolicy::Any);
        assert!(ColumnarTransposition::new("MY-KEY", relaxed).is_ok());
    }

    #[test]
    fn test_numeric_options() {
        let opts = CipherOptions::default().with_mode(KeyMode::Numeric);
        let cipher = ColumnarTransposition::new("4 1 3 2", opts).unwrap();
        assert_eq!(cipher.key().order(), &[3, 0, 2, 1]);
        assert_eq!(cipher.options().mode, KeyMode::Numeric);
        assert_eq!(
            ColumnarTransposition::new("1 1 2", opts).unwrap_err(),
            TranspositionError::InvalidPermutation {
                expected: Some(3),
                reason: "value 1 appears more than once".to_string(),
            }
        );
    }

    #[test]
    fn test_text_padding_from_options() {
        let opts = CipherOptions::default().with_padding(Some('Q'));
        let cipher = ColumnarTransposition::new("KEY", opts).unwrap();
        let enc = cipher.encrypt_text("HELLO");
        assert_eq!(enc.raw_text(), "HELLOQ");
        assert_eq!(cipher.decrypt_text_unpadded(enc.text()), "HELLO");
    }

    #[test]
    fn test_bytes_and_trace() {
        let cipher = ColumnarTransposition::new(
            "KEY",
            CipherOptions::default().with_sample_len(4),
        )
        .unwrap();
        let enc = cipher.encrypt_bytes(b"DEFEND");
        assert_eq!(enc, b"ENDEFD");
        assert_eq!(cipher.decrypt_bytes(&enc), b"DEFEND");

        let trace = cipher.trace_bytes(b"DEFEND", Direction::Encrypt);
        assert_eq!(trace.grid().num_rows(), 2);
        assert_eq!(trace.fill_steps().iter().filter(|s| s.value.is_some()).count(), 4);
    }
}

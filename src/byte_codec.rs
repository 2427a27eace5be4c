//! ByteCodec: columnar transposition over byte buffers by index arithmetic.
//!
//! Produces the same permutation as the text codec without materialising a
//! grid, so payload size only costs one output allocation.
//!
//! Byte padding is always `0x00`, independent of any text padding character.
//! Encryption rounds the output up to a full rectangle; decryption returns a
//! buffer exactly as long as its input. A caller that needs the original
//! unpadded length back must track it separately: decrypting padded
//! ciphertext leaves the zero padding at the tail of the recovered buffer.

use log::trace;

use crate::error::Result;
use crate::key_order::{KeyMode, KeyOrder};

/// Padding byte written into cells past the end of the input.
pub const PADDING_BYTE: u8 = 0x00;

/// Resolves `key` and encrypts `data`.
///
/// # Errors
/// Any key resolution error from [`KeyOrder::resolve`].
///
/// # Examples
///
/// ```
/// use coltrans::{encrypt_bytes, KeyMode};
///
/// let out = encrypt_bytes(b"DEFEND", "KEY", KeyMode::Text).unwrap();
/// assert_eq!(out, b"ENDEFD");
/// ```
pub fn encrypt_bytes(data: &[u8], key: &str, mode: KeyMode) -> Result<Vec<u8>> {
    let key = KeyOrder::resolve(key, mode)?;
    Ok(encrypt_bytes_with_order(data, &key))
}

/// Resolves `key` and decrypts `data`.
///
/// # Errors
/// Any key resolution error from [`KeyOrder::resolve`].
pub fn decrypt_bytes(data: &[u8], key: &str, mode: KeyMode) -> Result<Vec<u8>> {
    let key = KeyOrder::resolve(key, mode)?;
    Ok(decrypt_bytes_with_order(data, &key))
}

/// Encrypts `data` with an already resolved key.
///
/// The output holds `num_rows * num_cols` bytes; cells past the end of
/// `data` are filled with [`PADDING_BYTE`].
pub fn encrypt_bytes_with_order(data: &[u8], key: &KeyOrder) -> Vec<u8> {
    let num_cols = key.num_cols();
    let num_rows = key.num_rows(data.len());
    let total_len = num_rows * num_cols;
    trace!(
        "Encrypting {} bytes ({} padding) with {} columns",
        data.len(),
        total_len - data.len(),
        num_cols
    );

    let mut output = Vec::with_capacity(total_len);
    for &col in key.order() {
        for row in 0..num_rows {
            let src = row * num_cols + col;
            output.push(data.get(src).copied().unwrap_or(PADDING_BYTE));
        }
    }
    output
}

/// Decrypts `data` with an already resolved key.
///
/// The output is exactly `data.len()` bytes. Source bytes whose destination
/// falls past the end are dropped, and positions never written keep
/// [`PADDING_BYTE`].
pub fn decrypt_bytes_with_order(data: &[u8], key: &KeyOrder) -> Vec<u8> {
    let num_cols = key.num_cols();
    let num_rows = key.num_rows(data.len());
    let len = data.len();
    trace!("Decrypting {} bytes with {} columns", len, num_cols);

    let mut output = vec![PADDING_BYTE; len];
    let mut src = 0;
    'columns: for &col in key.order() {
        for row in 0..num_rows {
            if src >= len {
                break 'columns;
            }
            let dest = row * num_cols + col;
            if dest < len {
                output[dest] = data[src];
            }
            src += 1;
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: &str) -> KeyOrder {
        KeyOrder::resolve(k, KeyMode::Text).unwrap()
    }

    #[test]
    fn test_encrypt_matches_text_known_answer() {
        assert_eq!(encrypt_bytes_with_order(b"DEFEND", &key("KEY")), b"ENDEFD");
    }

    #[test]
    fn test_encrypt_pads_with_zero() {
        let out = encrypt_bytes_with_order(b"HELLO", &key("KEY"));
        assert_eq!(out.len(), 6);
        // column 2 is read last; its second row is past the input
        assert_eq!(out, b"EOHLL\0");
    }

    #[test]
    fn test_encrypt_empty() {
        assert!(encrypt_bytes_with_order(b"", &key("KEY")).is_empty());
        assert!(decrypt_bytes_with_order(b"", &key("KEY")).is_empty());
    }

    #[test]
    fn test_decrypt_full_rectangle() {
        assert_eq!(decrypt_bytes_with_order(b"ENDEFD", &key("KEY")), b"DEFEND");
    }

    #[test]
    fn test_decrypt_keeps_input_length() {
        let k = key("TEST");
        let original: Vec<u8> = (1..=10).collect();
        let enc = encrypt_bytes_with_order(&original, &k);
        assert_eq!(enc.len(), 12);
        let dec = decrypt_bytes_with_order(&enc, &k);
        assert_eq!(dec.len(), 12);
        assert_eq!(&dec[..10], &original[..]);
        assert_eq!(&dec[10..], &[0, 0]);
    }

    #[test]
    fn test_decrypt_unpadded_input_drops_overflow() {
        // 5 bytes under a 3-column key: rows = 2, destinations 5 is past the end
        let out = decrypt_bytes_with_order(b"ABCDE", &key("KEY"));
        assert_eq!(out.len(), 5);
        // col 1 <- A,B ; col 0 <- C,D ; col 2 <- E (row 0), row 1 dropped
        assert_eq!(out, b"CAEDB");
    }

    #[test]
    fn test_roundtrip_various_lengths() {
        let k = key("SECRET");
        for len in 0..40usize {
            let data: Vec<u8> = (0..len).map(|i| (i * 37 % 251) as u8).collect();
            let enc = encrypt_bytes_with_order(&data, &k);
            assert_eq!(enc.len() % k.num_cols(), 0);
            let dec = decrypt_bytes_with_order(&enc, &k);
            assert_eq!(&dec[..len], &data[..], "roundtrip failed for len {}", len);
        }
    }

    #[test]
    fn test_numeric_key() {
        let enc = encrypt_bytes(b"ABCDEF", "2 1 3", KeyMode::Numeric).unwrap();
        assert_eq!(enc, b"BEADCF");
        let dec = decrypt_bytes(&enc, "213", KeyMode::Numeric).unwrap();
        assert_eq!(dec, b"ABCDEF");
    }

    #[test]
    fn test_invalid_key_propagates() {
        assert!(encrypt_bytes(b"abc", "1 1", KeyMode::Numeric).is_err());
        assert!(decrypt_bytes(b"abc", "", KeyMode::Text).is_err());
    }
}

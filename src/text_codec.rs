//! TextCodec: grid-based columnar transposition over characters.
//!
//! Encryption writes the (optionally padded) plaintext into the grid row by
//! row, then reads columns in key order. Decryption writes the ciphertext
//! column by column in key order, then reads rows. Both directions keep the
//! grid and the ordered fill/read steps for visualisation.

use log::trace;
use serde::Serialize;

use crate::error::Result;
use crate::grid::{fill_by_columns, fill_row_major, read_by_columns, read_row_major, Grid, Step};
use crate::key_order::{KeyMode, KeyOrder};

/// Result of one text encryption or decryption.
///
/// For encryption, [`text`](Self::text) is the ciphertext and
/// [`raw_text`](Self::raw_text) the padded plaintext that was written into
/// the grid. For decryption, `text` is the recovered plaintext with trailing
/// whitespace stripped and `raw_text` the literal row-major reconstruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CipherResult {
    text: String,
    raw_text: String,
    grid: Grid<char>,
    order: Vec<usize>,
    fill_steps: Vec<Step<char>>,
    read_steps: Vec<Step<char>>,
    display_key: Vec<String>,
}

impl CipherResult {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn grid(&self) -> &Grid<char> {
        &self.grid
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Cell writes in visitation order.
    pub fn fill_steps(&self) -> &[Step<char>] {
        &self.fill_steps
    }

    /// Cell reads in visitation order.
    pub fn read_steps(&self) -> &[Step<char>] {
        &self.read_steps
    }

    pub fn display_key(&self) -> &[String] {
        &self.display_key
    }

    /// Consumes the result, keeping only the output text.
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Resolves `key` and encrypts `plaintext`.
///
/// # Errors
/// Any key resolution error from [`KeyOrder::resolve`].
///
/// # Examples
///
/// ```
/// use coltrans::{encrypt_text, KeyMode};
///
/// let result = encrypt_text("DEFEND", "KEY", KeyMode::Text, None).unwrap();
/// assert_eq!(result.text(), "ENDEFD");
/// ```
pub fn encrypt_text(
    plaintext: &str,
    key: &str,
    mode: KeyMode,
    padding: Option<char>,
) -> Result<CipherResult> {
    let key = KeyOrder::resolve(key, mode)?;
    Ok(encrypt_text_with_order(plaintext, &key, padding))
}

/// Resolves `key` and decrypts `ciphertext`.
///
/// # Errors
/// Any key resolution error from [`KeyOrder::resolve`].
///
/// # Examples
///
/// ```
/// use coltrans::{decrypt_text, KeyMode};
///
/// let result = decrypt_text("ENDEFD", "KEY", KeyMode::Text).unwrap();
/// assert_eq!(result.text(), "DEFEND");
/// ```
pub fn decrypt_text(ciphertext: &str, key: &str, mode: KeyMode) -> Result<CipherResult> {
    let key = KeyOrder::resolve(key, mode)?;
    Ok(decrypt_text_with_order(ciphertext, &key))
}

/// Encrypts `plaintext` with an already resolved key.
///
/// With `padding` set, the plaintext is right-padded to fill the last row.
/// Without it, trailing cells stay absent and contribute nothing to the
/// ciphertext.
pub fn encrypt_text_with_order(
    plaintext: &str,
    key: &KeyOrder,
    padding: Option<char>,
) -> CipherResult {
    let mut chars: Vec<char> = plaintext.chars().collect();
    let num_cols = key.num_cols();
    let num_rows = key.num_rows(chars.len());
    trace!(
        "Encrypting {} chars into a {}x{} grid",
        chars.len(),
        num_rows,
        num_cols
    );

    if let Some(pad) = padding {
        chars.resize(num_rows * num_cols, pad);
    }
    let padded_text: String = chars.iter().collect();

    let mut grid = Grid::new(num_rows, num_cols);
    let fill_steps = fill_row_major(&mut grid, chars.into_iter().map(Some));
    let read_steps = read_by_columns(&grid, key.order());
    let ciphertext: String = read_steps.iter().filter_map(|s| s.value).collect();

    CipherResult {
        text: ciphertext,
        raw_text: padded_text,
        grid,
        order: key.order().to_vec(),
        fill_steps,
        read_steps,
        display_key: key.display_key().to_vec(),
    }
}

/// Decrypts `ciphertext` with an already resolved key.
pub fn decrypt_text_with_order(ciphertext: &str, key: &KeyOrder) -> CipherResult {
    let chars: Vec<char> = ciphertext.chars().collect();
    let num_cols = key.num_cols();
    let num_rows = key.num_rows(chars.len());
    trace!(
        "Decrypting {} chars from a {}x{} grid",
        chars.len(),
        num_rows,
        num_cols
    );

    let mut grid = Grid::new(num_rows, num_cols);
    let fill_steps = fill_by_columns(&mut grid, key.order(), chars.into_iter().map(Some));
    let read_steps = read_row_major(&grid);
    let raw_plaintext: String = read_steps.iter().filter_map(|s| s.value).collect();

    CipherResult {
        text: raw_plaintext.trim_end().to_string(),
        raw_text: raw_plaintext,
        grid,
        order: key.order().to_vec(),
        fill_steps,
        read_steps,
        display_key: key.display_key().to_vec(),
    }
}

/// Removes every trailing `padding` character from `text`.
pub fn strip_padding(text: &str, padding: Option<char>) -> &str {
    match padding {
        Some(pad) => text.trim_end_matches(pad),
        None => text,
    }
}

//! KeyOrderResolver: turns a raw key into a validated column permutation.
//!
//! Two key modes are supported:
//!
//! - [`KeyMode::Text`]: each character is one column. Columns are read in
//!   order of their case-folded character, and equal characters keep their
//!   left-to-right order (stable sort). `APPLE` resolves to `[0, 4, 3, 1, 2]`.
//! - [`KeyMode::Numeric`]: the key spells the column order directly as a
//!   permutation of `1..=N`, e.g. `"4 1 3 2"` or `"4132"`.

use log::debug;
use serde::Serialize;

use crate::error::{Result, TranspositionError};

/// How a key string is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum KeyMode {
    /// A keyword; one column per character.
    #[default]
    Text,
    /// An explicit permutation of `1..=N`.
    Numeric,
}

/// Character policy applied to text keys before resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyCharPolicy {
    /// Only alphanumeric characters are accepted.
    #[default]
    Alphanumeric,
    /// Any character is accepted.
    Any,
}

/// A resolved key: the column permutation plus its display form.
///
/// Invariant: `order` contains every index in `[0, num_cols)` exactly once,
/// and `display_key.len() == order.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyOrder {
    mode: KeyMode,
    order: Vec<usize>,
    display_key: Vec<String>,
}

impl KeyOrder {
    /// Resolves `key` under `mode` into a column order.
    ///
    /// # Errors
    /// - [`TranspositionError::EmptyKey`] if `key` is empty.
    /// - [`TranspositionError::InvalidPermutation`] if a numeric key is not
    ///   an exact permutation of `1..=N`.
    ///
    /// # Examples
    ///
    /// ```
    /// use coltrans::{KeyMode, KeyOrder};
    ///
    /// let key = KeyOrder::resolve("KEY", KeyMode::Text).unwrap();
    /// assert_eq!(key.order(), &[1, 0, 2]);
    ///
    /// let key = KeyOrder::resolve("4 1 3 2", KeyMode::Numeric).unwrap();
    /// assert_eq!(key.order(), &[3, 0, 2, 1]);
    /// ```
    pub fn resolve(key: &str, mode: KeyMode) -> Result<Self> {
        if key.is_empty() {
            return Err(TranspositionError::EmptyKey);
        }

        let resolved = match mode {
            KeyMode::Text => Self::from_text(key),
            KeyMode::Numeric => Self::from_numeric(key)?,
        };
        debug!(
            "Resolved {:?} key into {} columns: {:?}",
            mode,
            resolved.num_cols(),
            resolved.order
        );
        Ok(resolved)
    }

    fn from_text(key: &str) -> Self {
        let chars: Vec<char> = key.chars().collect();
        let mut order: Vec<usize> = (0..chars.len()).collect();
        // sort_by_cached_key is stable; equal letters keep their position order
        order.sort_by_cached_key(|&i| chars[i].to_uppercase().collect::<String>());

        KeyOrder {
            mode: KeyMode::Text,
            order,
            display_key: chars.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn from_numeric(key: &str) -> Result<Self> {
        let values = parse_numeric(key)?;
        let num_cols = values.len();

        let mut seen = vec![false; num_cols];
        for &v in &values {
            if v == 0 || v > num_cols {
                return Err(TranspositionError::InvalidPermutation {
                    expected: Some(num_cols),
                    reason: format!("value {} is out of range", v),
                });
            }
            if seen[v - 1] {
                return Err(TranspositionError::InvalidPermutation {
                    expected: Some(num_cols),
                    reason: format!("value {} appears more than once", v),
                });
            }
            seen[v - 1] = true;
        }

        Ok(KeyOrder {
            mode: KeyMode::Numeric,
            order: values.iter().map(|v| v - 1).collect(),
            display_key: (1..=num_cols).map(|n| n.to_string()).collect(),
        })
    }

    /// Column indices in read order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Number of grid columns.
    pub fn num_cols(&self) -> usize {
        self.order.len()
    }

    /// Key mode this order was resolved under.
    pub fn mode(&self) -> KeyMode {
        self.mode
    }

    /// Column headers for display: the key's characters in text mode,
    /// `"1".."N"` in numeric mode.
    pub fn display_key(&self) -> &[String] {
        &self.display_key
    }

    /// Number of grid rows needed to hold `len` items.
    pub fn num_rows(&self, len: usize) -> usize {
        len.div_ceil(self.num_cols())
    }
}

/// Checks a key's characters before resolution.
///
/// Numeric keys may only contain ASCII digits, whitespace and commas. Text
/// keys are checked against `policy`.
///
/// # Errors
/// - [`TranspositionError::EmptyKey`] if `key` is empty.
/// - [`TranspositionError::InvalidKeyCharacters`] with the first offending
///   character.
pub fn check_key_chars(key: &str, mode: KeyMode, policy: KeyCharPolicy) -> Result<()> {
    if key.is_empty() {
        return Err(TranspositionError::EmptyKey);
    }
    let offending = match (mode, policy) {
        (KeyMode::Numeric, _) => key.chars().find(|c| !is_numeric_key_char(*c)),
        (KeyMode::Text, KeyCharPolicy::Alphanumeric) => {
            key.chars().find(|c| !c.is_alphanumeric())
        }
        (KeyMode::Text, KeyCharPolicy::Any) => None,
    };
    match offending {
        Some(c) => Err(TranspositionError::InvalidKeyCharacters(c)),
        None => Ok(()),
    }
}

fn is_numeric_key_char(c: char) -> bool {
    c.is_ascii_digit() || c.is_whitespace() || c == ','
}

/// Parses a numeric key into its 1-based values.
///
/// With any whitespace or comma present, runs of digits are multi-digit
/// numbers. Otherwise every digit is its own value.
fn parse_numeric(key: &str) -> Result<Vec<usize>> {
    if let Some(c) = key.chars().find(|c| !is_numeric_key_char(*c)) {
        return Err(TranspositionError::InvalidPermutation {
            expected: None,
            reason: format!("unexpected character {:?}", c),
        });
    }

    let separated = key.chars().any(|c| c.is_whitespace() || c == ',');
    let values: Vec<usize> = if separated {
        key.split(|c: char| !c.is_ascii_digit())
            .filter(|run| !run.is_empty())
            .map(|run| {
                run.parse::<usize>()
                    .map_err(|_| TranspositionError::InvalidPermutation {
                        expected: None,
                        reason: format!("value {} is too large", run),
                    })
            })
            .collect::<Result<_>>()?
    } else {
        key.chars()
            .filter_map(|c| c.to_digit(10))
            .map(|d| d as usize)
            .collect()
    };

    if values.is_empty() {
        return Err(TranspositionError::InvalidPermutation {
            expected: None,
            reason: "no numbers found".to_string(),
        });
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_of(key: &str, mode: KeyMode) -> Vec<usize> {
        KeyOrder::resolve(key, mode).unwrap().order().to_vec()
    }

    #[test]
    fn test_text_order_basic() {
        assert_eq!(order_of("KEY", KeyMode::Text), vec![1, 0, 2]);
        assert_eq!(order_of("ZEBRA", KeyMode::Text), vec![4, 2, 1, 3, 0]);
    }

    #[test]
    fn test_text_order_duplicates_keep_position() {
        assert_eq!(order_of("APPLE", KeyMode::Text), vec![0, 4, 3, 1, 2]);
        assert_eq!(order_of("LEVEL", KeyMode::Text), vec![1, 3, 0, 4, 2]);
    }

    #[test]
    fn test_text_order_case_folded() {
        assert_eq!(order_of("bAa", KeyMode::Text), vec![1, 2, 0]);
        assert_eq!(order_of("key", KeyMode::Text), order_of("KEY", KeyMode::Text));
    }

    #[test]
    fn test_text_display_key_keeps_case() {
        let key = KeyOrder::resolve("KeY", KeyMode::Text).unwrap();
        assert_eq!(key.display_key(), &["K", "e", "Y"]);
        assert_eq!(key.num_cols(), 3);
        assert_eq!(key.mode(), KeyMode::Text);
    }

    #[test]
    fn test_numeric_separated() {
        assert_eq!(order_of("4 1 3 2", KeyMode::Numeric), vec![3, 0, 2, 1]);
        assert_eq!(order_of("2,1", KeyMode::Numeric), vec![1, 0]);
        assert_eq!(order_of(" 3 ,1,  2 ", KeyMode::Numeric), vec![2, 0, 1]);
    }

    #[test]
    fn test_numeric_multi_digit() {
        let key = "10 9 8 7 6 5 4 3 2 1";
        assert_eq!(
            order_of(key, KeyMode::Numeric),
            vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0]
        );
    }

    #[test]
    fn test_numeric_contiguous_digits() {
        assert_eq!(order_of("4132", KeyMode::Numeric), vec![3, 0, 2, 1]);
    }

    #[test]
    fn test_numeric_display_key() {
        let key = KeyOrder::resolve("3 1 2", KeyMode::Numeric).unwrap();
        assert_eq!(key.display_key(), &["1", "2", "3"]);
    }

    #[test]
    fn test_numeric_duplicate_rejected() {
        assert!(matches!(
            KeyOrder::resolve("1 1 2", KeyMode::Numeric),
            Err(TranspositionError::InvalidPermutation { .. })
        ));
    }

    #[test]
    fn test_numeric_omission_rejected() {
        assert!(matches!(
            KeyOrder::resolve("1 2 4", KeyMode::Numeric),
            Err(TranspositionError::InvalidPermutation { .. })
        ));
        assert!(matches!(
            KeyOrder::resolve("0 1", KeyMode::Numeric),
            Err(TranspositionError::InvalidPermutation { .. })
        ));
    }

    #[test]
    fn test_numeric_unparsable_rejected() {
        for key in ["a b", ", ,", "12x"] {
            assert!(
                matches!(
                    KeyOrder::resolve(key, KeyMode::Numeric),
                    Err(TranspositionError::InvalidPermutation { .. })
                ),
                "key {:?} should be rejected",
                key
            );
        }
    }

    #[test]
    fn test_unparsable_numeric_has_no_range() {
        let err = KeyOrder::resolve(", ,", KeyMode::Numeric).unwrap_err();
        assert_eq!(
            err,
            TranspositionError::InvalidPermutation {
                expected: None,
                reason: "no numbers found".to_string(),
            }
        );
        assert_eq!(err.to_string(), "Numeric key could not be parsed: no numbers found");
    }

    #[test]
    fn test_empty_key_rejected() {
        assert_eq!(
            KeyOrder::resolve("", KeyMode::Text),
            Err(TranspositionError::EmptyKey)
        );
        assert_eq!(
            KeyOrder::resolve("", KeyMode::Numeric),
            Err(TranspositionError::EmptyKey)
        );
    }

    #[test]
    fn test_num_rows() {
        let key = KeyOrder::resolve("KEY", KeyMode::Text).unwrap();
        assert_eq!(key.num_rows(0), 0);
        assert_eq!(key.num_rows(2), 1);
        assert_eq!(key.num_rows(6), 2);
        assert_eq!(key.num_rows(7), 3);
    }

    #[test]
    fn test_check_key_chars() {
        assert!(check_key_chars("Secret42", KeyMode::Text, KeyCharPolicy::Alphanumeric).is_ok());
        assert_eq!(
            check_key_chars("my key", KeyMode::Text, KeyCharPolicy::Alphanumeric),
            Err(TranspositionError::InvalidKeyCharacters(' '))
        );
        assert!(check_key_chars("my key!", KeyMode::Text, KeyCharPolicy::Any).is_ok());
        assert!(check_key_chars("4, 1 3", KeyMode::Numeric, KeyCharPolicy::Any).is_ok());
        assert_eq!(
            check_key_chars("4-1", KeyMode::Numeric, KeyCharPolicy::Alphanumeric),
            Err(TranspositionError::InvalidKeyCharacters('-'))
        );
        assert_eq!(
            check_key_chars("", KeyMode::Text, KeyCharPolicy::Any),
            Err(TranspositionError::EmptyKey)
        );
    }
}

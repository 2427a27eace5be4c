//! Columnar transposition cipher engine with replayable step traces.
//!
//! A payload is written into a rectangular grid and read back out in a
//! column order derived from a key. Alongside the transformed payload, the
//! text codec and the step tracer record every cell visit in order so an
//! external visualiser can animate the transformation.
//!
//! This is a classical teaching cipher. It offers no confidentiality
//! against a capable adversary.
//!
//! # Architecture
//!
//! ```text
//! KeyOrder      (key + mode -> validated column permutation)
//!     ↓
//! text_codec    (grid fill/read over chars, full step traces)
//! byte_codec    (index arithmetic over bytes, no grid)
//! step_tracer   (grid traces of a small byte sample)
//!     ↓
//! ColumnarTransposition (key resolved once under CipherOptions)
//! ```
//!
//! # Examples
//!
//! Encrypt and decrypt text:
//!
//! ```
//! use coltrans::{decrypt_text, encrypt_text, KeyMode};
//!
//! let enc = encrypt_text("DEFEND", "KEY", KeyMode::Text, None).unwrap();
//! assert_eq!(enc.text(), "ENDEFD");
//!
//! let dec = decrypt_text(enc.text(), "KEY", KeyMode::Text).unwrap();
//! assert_eq!(dec.text(), "DEFEND");
//! ```
//!
//! Encrypt bytes with a numeric key:
//!
//! ```
//! use coltrans::{decrypt_bytes, encrypt_bytes, KeyMode};
//!
//! let data = [1u8, 2, 3, 4, 5];
//! let enc = encrypt_bytes(&data, "3 1 2", KeyMode::Numeric).unwrap();
//! assert_eq!(enc.len(), 6);
//!
//! let dec = decrypt_bytes(&enc, "3 1 2", KeyMode::Numeric).unwrap();
//! assert_eq!(&dec[..data.len()], &data);
//! ```

#![deny(clippy::all)]

pub mod byte_codec;
pub mod config;
pub mod error;
pub mod grid;
pub mod key_order;
pub mod step_tracer;
pub mod text_codec;

mod transposition;

pub use byte_codec::{decrypt_bytes, encrypt_bytes, PADDING_BYTE};
pub use config::CipherOptions;
pub use error::{Result, TranspositionError};
pub use grid::{CellValue, Grid, Phase, Step};
pub use key_order::{check_key_chars, KeyCharPolicy, KeyMode, KeyOrder};
pub use step_tracer::{trace_bytes, trace_prefix, ByteTrace, Direction};
pub use text_codec::{decrypt_text, encrypt_text, CipherResult};
pub use transposition::ColumnarTransposition;

//! StepTracer: grid traces of a small byte sample for visualisation.
//!
//! Runs the text codec's grid visitation orders over bytes. Every cell of
//! the rectangle is visited; cells past the end of the sample are recorded
//! as absent rather than as `0x00`, so the animation can show them empty.
//!
//! This is for small samples only. Bulk transformation goes through
//! [`byte_codec`](crate::byte_codec).

use log::trace;
use serde::Serialize;

use crate::error::Result;
use crate::grid::{fill_by_columns, fill_row_major, read_by_columns, read_row_major, Grid, Step};
use crate::key_order::{KeyMode, KeyOrder};

/// Which transformation a trace replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    /// Row-major fill, key-order column read.
    Encrypt,
    /// Key-order column fill, row-major read.
    Decrypt,
}

/// Grid and ordered steps for a traced byte sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ByteTrace {
    direction: Direction,
    grid: Grid<u8>,
    fill_steps: Vec<Step<u8>>,
    read_steps: Vec<Step<u8>>,
    order: Vec<usize>,
    display_key: Vec<String>,
}

impl ByteTrace {
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn grid(&self) -> &Grid<u8> {
        &self.grid
    }

    pub fn fill_steps(&self) -> &[Step<u8>] {
        &self.fill_steps
    }

    pub fn read_steps(&self) -> &[Step<u8>] {
        &self.read_steps
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn display_key(&self) -> &[String] {
        &self.display_key
    }

    /// Bytes produced by the read phase, skipping absent cells.
    pub fn output(&self) -> Vec<u8> {
        self.read_steps.iter().filter_map(|s| s.value).collect()
    }
}

/// Resolves `key` and traces `sample` in `direction`.
///
/// # Errors
/// Any key resolution error from [`KeyOrder::resolve`].
pub fn trace_bytes(
    sample: &[u8],
    key: &str,
    mode: KeyMode,
    direction: Direction,
) -> Result<ByteTrace> {
    let key = KeyOrder::resolve(key, mode)?;
    Ok(trace_bytes_with_order(sample, &key, direction))
}

/// Traces at most the first `sample_len` bytes of `data`.
///
/// # Examples
///
/// ```
/// use coltrans::{trace_prefix, Direction, KeyMode, KeyOrder};
///
/// let key = KeyOrder::resolve("KEY", KeyMode::Text).unwrap();
/// let trace = trace_prefix(b"DEFEND AT DAWN", 6, &key, Direction::Encrypt);
/// assert_eq!(trace.output(), b"ENDEFD");
/// ```
pub fn trace_prefix(
    data: &[u8],
    sample_len: usize,
    key: &KeyOrder,
    direction: Direction,
) -> ByteTrace {
    let sample = &data[..data.len().min(sample_len)];
    trace_bytes_with_order(sample, key, direction)
}

/// Traces `sample` with an already resolved key.
pub fn trace_bytes_with_order(sample: &[u8], key: &KeyOrder, direction: Direction) -> ByteTrace {
    let num_cols = key.num_cols();
    let num_rows = key.num_rows(sample.len());
    let total = num_rows * num_cols;
    trace!(
        "Tracing {:?} of {} sample bytes on a {}x{} grid",
        direction,
        sample.len(),
        num_rows,
        num_cols
    );

    let cells = sample
        .iter()
        .copied()
        .map(Some)
        .chain(std::iter::repeat(None))
        .take(total);

    let mut grid = Grid::new(num_rows, num_cols);
    let (fill_steps, read_steps) = match direction {
        Direction::Encrypt => {
            let fill = fill_row_major(&mut grid, cells);
            let read = read_by_columns(&grid, key.order());
            (fill, read)
        }
        Direction::Decrypt => {
            let fill = fill_by_columns(&mut grid, key.order(), cells);
            let read = read_row_major(&grid);
            (fill, read)
        }
    };

    ByteTrace {
        direction,
        grid,
        fill_steps,
        read_steps,
        order: key.order().to_vec(),
        display_key: key.display_key().to_vec(),
    }
}

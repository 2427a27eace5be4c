//! Grid and step records shared by the traced codecs.
//!
//! A [`Grid`] is the `num_rows x num_cols` matrix a payload is written into.
//! Every cell starts absent; a cell stays absent when the payload runs out
//! before reaching it. A [`Step`] records one cell visit in the exact order
//! the algorithm makes it, so a visualiser can replay a fill sequence onto
//! an empty grid and arrive at the final one.

use std::fmt;

use serde::Serialize;

/// Values that can sit in a grid cell.
pub trait CellValue: Copy + PartialEq + fmt::Debug + Serialize {
    /// Short human-readable rendering used in step descriptions.
    fn render(&self) -> String;
}

impl CellValue for char {
    fn render(&self) -> String {
        format!("'{}'", self)
    }
}

impl CellValue for u8 {
    fn render(&self) -> String {
        format!("0x{:02X}", self)
    }
}

/// Rectangular cell matrix. `None` marks an absent cell, which is distinct
/// from any value (including the byte `0x00`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid<T: CellValue> {
    num_cols: usize,
    rows: Vec<Vec<Option<T>>>,
}

impl<T: CellValue> Grid<T> {
    /// Creates a grid with every cell absent.
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        Grid {
            num_cols,
            rows: vec![vec![None; num_cols]; num_rows],
        }
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Returns the cell at `(row, col)`, or `None` if it is absent or out of
    /// bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        self.rows.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Writes `value` into `(row, col)`. Returns `false` and leaves the
    /// grid untouched if the position is out of bounds.
    pub(crate) fn set(&mut self, row: usize, col: usize, value: Option<T>) -> bool {
        match self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Row-major view of the cells.
    pub fn rows(&self) -> &[Vec<Option<T>>] {
        &self.rows
    }

    /// Applies `steps` in order, the way a visualiser replays a fill phase.
    ///
    /// Steps outside the grid are skipped. Returns the number of steps
    /// applied.
    pub fn replay(&mut self, steps: &[Step<T>]) -> usize {
        let mut applied = 0;
        for step in steps {
            if self.set(step.row, step.col, step.value) {
                applied += 1;
            }
        }
        applied
    }
}

/// Which half of a transformation a step belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// Payload is written into the grid.
    Write,
    /// Output is read back out of the grid.
    Read,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Write => write!(f, "write"),
            Phase::Read => write!(f, "read"),
        }
    }
}

/// One visited cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Step<T: CellValue> {
    pub row: usize,
    pub col: usize,
    pub value: Option<T>,
}

impl<T: CellValue> Step<T> {
    pub fn new(row: usize, col: usize, value: Option<T>) -> Self {
        Step { row, col, value }
    }

    /// Describes the step as the `index`-th (1-based) of `total` in `phase`.
    ///
    /// ```
    /// use coltrans::{Phase, Step};
    ///
    /// let step = Step::new(0, 2, Some('E'));
    /// assert_eq!(
    ///     step.describe(3, 6, Phase::Write),
    ///     "Step 3/6: write -> (row 0, col 2) = 'E'"
    /// );
    /// ```
    pub fn describe(&self, index: usize, total: usize, phase: Phase) -> String {
        let value = match self.value {
            Some(v) => v.render(),
            None => "empty".to_string(),
        };
        format!(
            "Step {}/{}: {} -> (row {}, col {}) = {}",
            index, total, phase, self.row, self.col, value
        )
    }
}

/// Fills `grid` row-major from `values`, stopping when `values` runs out.
pub(crate) fn fill_row_major<T, I>(grid: &mut Grid<T>, values: I) -> Vec<Step<T>>
where
    T: CellValue,
    I: IntoIterator<Item = Option<T>>,
{
    let positions = row_major_positions(grid.num_rows(), grid.num_cols());
    let mut steps = Vec::new();
    for ((row, col), value) in positions.zip(values) {
        grid.set(row, col, value);
        steps.push(Step::new(row, col, value));
    }
    steps
}

/// Fills `grid` column by column in `order`, each column top to bottom,
/// stopping when `values` runs out.
pub(crate) fn fill_by_columns<T, I>(grid: &mut Grid<T>, order: &[usize], values: I) -> Vec<Step<T>>
where
    T: CellValue,
    I: IntoIterator<Item = Option<T>>,
{
    let positions = column_order_positions(grid.num_rows(), order);
    let mut steps = Vec::new();
    for ((row, col), value) in positions.zip(values) {
        grid.set(row, col, value);
        steps.push(Step::new(row, col, value));
    }
    steps
}

/// Reads every cell row-major.
pub(crate) fn read_row_major<T: CellValue>(grid: &Grid<T>) -> Vec<Step<T>> {
    row_major_positions(grid.num_rows(), grid.num_cols())
        .map(|(row, col)| Step::new(row, col, grid.get(row, col)))
        .collect()
}

/// Reads every cell column by column in `order`.
pub(crate) fn read_by_columns<T: CellValue>(grid: &Grid<T>, order: &[usize]) -> Vec<Step<T>> {
    column_order_positions(grid.num_rows(), order)
        .map(|(row, col)| Step::new(row, col, grid.get(row, col)))
        .collect()
}

fn row_major_positions(num_rows: usize, num_cols: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..num_rows).flat_map(move |row| (0..num_cols).map(move |col| (row, col)))
}

fn column_order_positions(
    num_rows: usize,
    order: &[usize],
) -> impl Iterator<Item = (usize, usize)> + '_ {
    order
        .iter()
        .flat_map(move |&col| (0..num_rows).map(move |row| (row, col)))
}

//! Schema and data grids.
//!
//! Both grids are addressed by `(row, column)`, 0-based. Reads outside the stored cells return
//! blank text instead of failing: rows may be ragged and trailing cells may be missing.

use crate::Cell;

/// Dense grid produced by encoding.
pub type Grid = Vec<Vec<Cell>>;

/// Grid of schema keys, padded with blanks to a rectangle at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaGrid {
    keys: Vec<Vec<String>>,
    width: usize,
}

impl SchemaGrid {
    /// Copies `rows`, padding every row to the widest observed row.
    pub fn new<S: AsRef<str>>(rows: &[Vec<S>]) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let keys = rows
            .iter()
            .map(|row| {
                let mut padded: Vec<String> =
                    row.iter().map(|key| key.as_ref().to_string()).collect();
                padded.resize(width, String::new());
                padded
            })
            .collect();
        Self { keys, width }
    }

    /// Returns the number of rows.
    pub fn height(&self) -> usize {
        self.keys.len()
    }

    /// Returns the number of columns of every row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the rows of keys.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.keys
    }

    /// Returns the key at `(row, column)`, or blank outside the grid.
    pub fn key(&self, row: usize, column: usize) -> &str {
        self.keys
            .get(row)
            .and_then(|keys| keys.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Returns the column width of the struct anchored at `(row, column)`: the anchor plus
    /// the blank cells that follow it on the same row.
    pub fn span(&self, row: usize, column: usize) -> usize {
        let trailing = (column + 1..self.width)
            .take_while(|&c| self.key(row, c).is_empty())
            .count();
        1 + trailing
    }

    /// Returns the sub-keys of the struct anchored at `(row, column)`: the keys on the next
    /// row within the struct's span, stopping at the first blank key. Each item carries its
    /// column offset from the anchor.
    pub fn sub_keys(&self, row: usize, column: usize) -> impl Iterator<Item = (usize, &str)> {
        let span = self.span(row, column);
        (0..span)
            .map(move |i| (i, self.key(row + 1, column + i)))
            .take_while(|(_, key)| !key.is_empty())
    }
}

/// Borrowed grid of text cells.
#[derive(Debug)]
pub struct DataGrid<'a, S> {
    rows: &'a [Vec<S>],
}

impl<'a, S: AsRef<str>> DataGrid<'a, S> {
    /// Wraps `rows` without copying.
    pub fn new(rows: &'a [Vec<S>]) -> Self {
        Self { rows }
    }

    /// Returns the number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Returns the text at `(row, column)`, or blank outside the stored cells.
    pub fn get(&self, row: usize, column: usize) -> &'a str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(|cell| cell.as_ref())
            .unwrap_or("")
    }

    /// Returns true if the cell at `(row, column)` is blank.
    pub fn is_blank(&self, row: usize, column: usize) -> bool {
        self.get(row, column).is_empty()
    }
}

/// Renders an encoded grid as text, the form [crate::Decoder] reads.
///
/// [Cell::Empty] renders blank.
pub fn to_text(grid: &[Vec<Cell>]) -> Vec<Vec<String>> {
    grid.iter()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect()
}

//! Row-set scanning for repeated fields.
//!
//! A repeated field anchored at `(row, column)` stores element `k` on data row `row + k`. The
//! scanner reports which offsets hold data; gaps are preserved. Offset buffers are recycled
//! through a [RowPool] owned by a single decode call.

use crate::grid::DataGrid;

/// Recycles offset buffers within one decode call.
#[derive(Debug, Default)]
pub struct RowPool {
    free: Vec<Vec<usize>>,
}

impl RowPool {
    /// Returns, in ascending order, every offset `i` in `0..data.height()` for which the cell
    /// at `(row + i, column)` is not blank.
    pub fn target_rows<S: AsRef<str>>(
        &mut self,
        data: &DataGrid<'_, S>,
        row: usize,
        column: usize,
    ) -> Vec<usize> {
        let mut rows = self.free.pop().unwrap_or_default();
        rows.extend((0..data.height()).filter(|i| !data.is_blank(row + i, column)));
        rows
    }

    /// Returns a buffer to the pool, truncated.
    pub fn release(&mut self, mut rows: Vec<usize>) {
        rows.clear();
        self.free.push(rows);
    }
}

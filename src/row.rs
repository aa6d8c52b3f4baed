use crate::types::SqlValue;
use std::ops::Index;

/// Represents a row of data, one `SqlValue` per column.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    cells: Vec<SqlValue>,
}
impl Row {
    /// Creates a row from its cells, in column order.
    pub fn new(cells: Vec<SqlValue>) -> Row {
        Row { cells }
    }

    /// Returns the cells in the row.
    ///
    pub fn cells(&self) -> &[SqlValue] {
        &self.cells
    }

    /// Returns the cell at `column`, or `None` past the end of the row.
    pub fn get(&self, column: usize) -> Option<&SqlValue> {
        self.cells.get(column)
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// `true` for a row without cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
impl Index<usize> for Row {
    type Output = SqlValue;

    fn index(&self, index: usize) -> &SqlValue {
        &self.cells[index]
    }
}
impl From<Vec<SqlValue>> for Row {
    fn from(cells: Vec<SqlValue>) -> Row {
        Row::new(cells)
    }
}

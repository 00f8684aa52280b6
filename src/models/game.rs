use serde::{Deserialize, Serialize};

/// A single cell coordinate on the grid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

/// A square letter grid, immutable once generated.
///
/// Cells are stored in a flat row-major buffer rather than nested vectors,
/// so every access goes through one bounds-checked index computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<char>,
}

impl Grid {
    /// Build a grid from a flat row-major cell buffer of length `size * size`.
    pub(crate) fn from_cells(size: usize, cells: Vec<char>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self { size, cells }
    }

    /// Build a grid from explicit rows. All rows must have the same length
    /// as the number of rows.
    pub fn from_rows(rows: Vec<Vec<char>>) -> Self {
        let size = rows.len();
        debug_assert!(rows.iter().all(|row| row.len() == size));
        Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        }
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The letter at `pos`, or `None` when `pos` is outside the grid.
    pub fn get(&self, pos: Position) -> Option<char> {
        (pos.row < self.size && pos.col < self.size)
            .then(|| self.cells[pos.row * self.size + pos.col])
    }

    /// Row-by-row view of the grid, as sent to clients.
    pub fn rows(&self) -> Vec<Vec<char>> {
        self.cells
            .chunks(self.size.max(1))
            .map(|row| row.to_vec())
            .collect()
    }
}

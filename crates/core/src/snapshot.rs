//! Read-only view of the grid handed to renderers.

use tui_blockfall_types::{Rgb, HIDDEN_ROWS};

/// Per-cell colors of the full grid, hidden rows included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridSnapshot {
    num_rows: u16,
    num_cols: u16,
    cells: Vec<Option<Rgb>>,
}

impl GridSnapshot {
    pub fn new(num_rows: u16, num_cols: u16) -> Self {
        Self {
            num_rows,
            num_cols,
            cells: vec![None; num_rows as usize * num_cols as usize],
        }
    }

    /// Resize, keeping the allocation when possible.
    pub fn resize(&mut self, num_rows: u16, num_cols: u16) {
        if self.num_rows == num_rows && self.num_cols == num_cols {
            return;
        }
        self.num_rows = num_rows;
        self.num_cols = num_cols;
        self.cells.resize(num_rows as usize * num_cols as usize, None);
    }

    pub fn num_rows(&self) -> u16 {
        self.num_rows
    }

    pub fn num_cols(&self) -> u16 {
        self.num_cols
    }

    /// Rows below the hidden ones.
    pub fn visible_rows(&self) -> u16 {
        self.num_rows.saturating_sub(HIDDEN_ROWS)
    }

    pub fn get(&self, row: u16, col: u16) -> Option<Rgb> {
        if row >= self.num_rows || col >= self.num_cols {
            return None;
        }
        self.cells[row as usize * self.num_cols as usize + col as usize]
    }

    pub fn set(&mut self, row: u16, col: u16, color: Option<Rgb>) {
        if row >= self.num_rows || col >= self.num_cols {
            return;
        }
        self.cells[row as usize * self.num_cols as usize + col as usize] = color;
    }

    pub fn cells(&self) -> &[Option<Rgb>] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Option<Rgb>] {
        &mut self.cells
    }
}

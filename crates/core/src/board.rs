//! Board module - manages the game grid
//!
//! The board is a `num_rows x num_cols` grid whose top two rows are hidden and
//! only used for game-over detection. Each cell is either empty or holds the
//! [`BlockId`] of a block stored in the board's arena. The active piece keeps
//! the same ids, so a block's position is stored exactly once and both views
//! always agree.
//!
//! Coordinates are `(row, col)`: row 0 is the topmost hidden row, col 0 the
//! leftmost column. Storage is a flat row-major array.

use tui_blockfall_types::{Rgb, Settings, HIDDEN_ROWS};

use crate::snapshot::GridSnapshot;

/// Grid coordinate as `(row, col)`.
pub type Coord = (i16, i16);

/// Stable handle to a block in the board's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(u32);

impl BlockId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single occupied cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub color: Rgb,
    pub row: i16,
    pub col: i16,
}

impl Block {
    pub fn coord(&self) -> Coord {
        (self.row, self.col)
    }
}

/// The game board.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    num_rows: u16,
    num_cols: u16,
    /// Flat array of cells, row-major order (row * num_cols + col)
    cells: Vec<Option<BlockId>>,
    /// Block arena. `None` marks a released slot.
    blocks: Vec<Option<Block>>,
    /// Released slots, reused by the next allocation
    free: Vec<BlockId>,
}

impl Board {
    /// Largest dimension addressable by a [`Coord`].
    pub const MAX_DIM: u16 = i16::MAX as u16;

    /// Create a new empty board. `num_rows` includes the hidden rows.
    ///
    /// Dimensions are clamped to [`Board::MAX_DIM`].
    pub fn new(num_rows: u16, num_cols: u16) -> Self {
        let num_rows = num_rows.min(Self::MAX_DIM);
        let num_cols = num_cols.min(Self::MAX_DIM);
        Self {
            num_rows,
            num_cols,
            cells: vec![None; num_rows as usize * num_cols as usize],
            blocks: Vec::new(),
            free: Vec::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.num_rows(), settings.num_cols)
    }

    /// Empty the grid and drop every block.
    pub fn reset(&mut self) {
        self.cells.fill(None);
        self.blocks.clear();
        self.free.clear();
    }

    pub fn num_rows(&self) -> u16 {
        self.num_rows
    }

    pub fn num_cols(&self) -> u16 {
        self.num_cols
    }

    #[inline(always)]
    fn index(&self, row: i16, col: i16) -> Option<usize> {
        if self.is_out_of_bounds(row, col) {
            return None;
        }
        Some(row as usize * self.num_cols as usize + col as usize)
    }

    /// Rows below the grid and columns outside it are out of bounds.
    ///
    /// Negative rows are out of bounds too: a piece anchor never goes above
    /// row 0, so this only guards the grid index.
    pub fn is_out_of_bounds(&self, row: i16, col: i16) -> bool {
        row < 0 || row >= self.num_rows as i16 || col < 0 || col >= self.num_cols as i16
    }

    /// Occupant of a cell, `None` for empty or out-of-bounds cells.
    pub fn get(&self, row: i16, col: i16) -> Option<BlockId> {
        self.index(row, col).and_then(|idx| self.cells[idx])
    }

    pub fn is_occupied(&self, row: i16, col: i16) -> bool {
        self.get(row, col).is_some()
    }

    /// Look up a live block.
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id.index()).and_then(Option::as_ref)
    }

    pub fn is_live(&self, id: BlockId) -> bool {
        self.block(id).is_some()
    }

    /// Allocate a block in the arena without placing it on the grid.
    pub fn insert_block(&mut self, color: Rgb, row: i16, col: i16) -> BlockId {
        let block = Block { color, row, col };
        match self.free.pop() {
            Some(id) => {
                self.blocks[id.index()] = Some(block);
                id
            }
            None => {
                let id = BlockId(self.blocks.len() as u32);
                self.blocks.push(Some(block));
                id
            }
        }
    }

    fn release_block(&mut self, id: BlockId) {
        if let Some(slot) = self.blocks.get_mut(id.index()) {
            if slot.take().is_some() {
                self.free.push(id);
            }
        }
    }

    /// True if any coordinate is out of bounds or occupied.
    pub fn has_collision(&self, coords: &[Coord]) -> bool {
        coords
            .iter()
            .any(|&(row, col)| match self.index(row, col) {
                Some(idx) => self.cells[idx].is_some(),
                None => true,
            })
    }

    /// Place blocks at their stored positions without collision checking.
    pub fn add_blocks(&mut self, ids: &[BlockId]) {
        for &id in ids {
            let Some(coord) = self.block(id).map(Block::coord) else {
                continue;
            };
            if let Some(idx) = self.index(coord.0, coord.1) {
                self.cells[idx] = Some(id);
            }
        }
    }

    /// Clear the cells of the given blocks. The blocks stay in the arena.
    pub fn remove_blocks(&mut self, ids: &[BlockId]) {
        for &id in ids {
            let Some(coord) = self.block(id).map(Block::coord) else {
                continue;
            };
            if let Some(idx) = self.index(coord.0, coord.1) {
                if self.cells[idx] == Some(id) {
                    self.cells[idx] = None;
                }
            }
        }
    }

    /// Atomically move `ids[i]` to `new_coords[i]` for every i.
    ///
    /// The blocks are lifted off the grid first so they never collide with
    /// their own cells. On collision they are put back untouched and `false`
    /// is returned; otherwise every block and cell is updated.
    pub fn attempt_update_blocks(&mut self, ids: &[BlockId], new_coords: &[Coord]) -> bool {
        if ids.len() != new_coords.len() || !ids.iter().all(|&id| self.is_live(id)) {
            return false;
        }

        self.remove_blocks(ids);
        if self.has_collision(new_coords) {
            self.add_blocks(ids);
            return false;
        }

        for (&id, &(row, col)) in ids.iter().zip(new_coords) {
            if let Some(block) = self.blocks[id.index()].as_mut() {
                block.row = row;
                block.col = col;
            }
            if let Some(idx) = self.index(row, col) {
                self.cells[idx] = Some(id);
            }
        }
        true
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.num_rows as usize {
            return false;
        }
        let width = self.num_cols as usize;
        let start = row * width;
        self.cells[start..start + width].iter().all(Option::is_some)
    }

    /// Clear one row and shift every row above it down by one.
    ///
    /// Blocks in the cleared row are released. Shifting runs from the row just
    /// above the cleared one upward, so a block never lands on a cell that
    /// still has to be moved. Row 0 ends up empty.
    fn clear_row(&mut self, row: usize) {
        let width = self.num_cols as usize;

        for idx in row * width..(row + 1) * width {
            if let Some(id) = self.cells[idx].take() {
                self.release_block(id);
            }
        }

        for r in (0..row).rev() {
            for c in 0..width {
                let src = r * width + c;
                let Some(id) = self.cells[src].take() else {
                    continue;
                };
                if let Some(block) = self.blocks[id.index()].as_mut() {
                    block.row += 1;
                }
                self.cells[src + width] = Some(id);
            }
        }
    }

    /// Clear all full rows and return how many were cleared.
    ///
    /// Rows are scanned top to bottom. A clear only moves rows above the scan
    /// position, which have already been checked and are not full, so one pass
    /// handles any number of full rows, adjacent or not.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        for row in 0..self.num_rows as usize {
            if self.is_row_full(row) {
                self.clear_row(row);
                cleared += 1;
            }
        }
        cleared
    }

    /// True if any hidden row holds a block.
    pub fn is_game_over(&self) -> bool {
        let hidden = HIDDEN_ROWS.min(self.num_rows) as usize;
        self.cells[..hidden * self.num_cols as usize]
            .iter()
            .any(Option::is_some)
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Colors of every cell, for rendering.
    pub fn snapshot(&self) -> GridSnapshot {
        let mut snap = GridSnapshot::new(self.num_rows, self.num_cols);
        self.snapshot_into(&mut snap);
        snap
    }

    /// Write the grid into an existing snapshot, resizing it if needed.
    pub fn snapshot_into(&self, out: &mut GridSnapshot) {
        out.resize(self.num_rows, self.num_cols);
        for (dst, cell) in out.cells_mut().iter_mut().zip(&self.cells) {
            *dst = cell.and_then(|id| self.block(id)).map(|b| b.color);
        }
    }

    /// Fill cells with new blocks of one color, for tests and benches.
    pub fn fill(&mut self, coords: &[Coord], color: Rgb) -> Vec<BlockId> {
        let ids: Vec<BlockId> = coords
            .iter()
            .map(|&(row, col)| self.insert_block(color, row, col))
            .collect();
        self.add_blocks(&ids);
        ids
    }
}

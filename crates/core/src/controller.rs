//! Piece controller - owns the board and the single active piece.
//!
//! Every move goes through [`Board::attempt_update_blocks`], so a failed move
//! leaves both the piece and the grid exactly as they were.

use arrayvec::ArrayVec;

use crate::board::{Board, Coord};
use crate::pieces::{anchored_coords, spec_for, Piece, PieceSpec, BLOCKS_PER_PIECE};
use crate::rng::PieceFactory;
use tui_blockfall_types::{PieceKind, Settings};

#[derive(Debug, Clone)]
pub struct PieceController {
    board: Board,
    factory: PieceFactory,
    piece: Piece,
}

impl PieceController {
    /// Take ownership of `board` and spawn the first random piece.
    pub fn new(mut board: Board, mut factory: PieceFactory) -> Self {
        let spec = factory.gen_piece();
        let piece = Piece::new(spec, &mut board);
        let mut controller = Self {
            board,
            factory,
            piece,
        };
        controller.place_and_seat();
        controller
    }

    pub fn from_settings(settings: &Settings, seed: u32) -> Self {
        Self::new(Board::from_settings(settings), PieceFactory::new(seed))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    /// Replace the active piece with the next one from the bag.
    pub fn create_random_piece(&mut self) {
        let spec = self.factory.gen_piece();
        self.spawn_spec(spec);
    }

    /// Replace the active piece with a specific kind.
    pub fn spawn_piece(&mut self, kind: PieceKind) {
        self.spawn_spec(spec_for(kind));
    }

    fn spawn_spec(&mut self, spec: PieceSpec) {
        self.piece = Piece::new(spec, &mut self.board);
        self.place_and_seat();
    }

    /// Register the new piece's blocks without a collision check, then try one
    /// step down so a piece spawned entirely in the hidden rows becomes visible.
    /// A failed step leaves the player time to move it out of the way.
    fn place_and_seat(&mut self) {
        self.board.add_blocks(&self.piece.blocks);
        self.attempt_down_move();
    }

    fn attempt_update(&mut self, new_coords: &[Coord]) -> bool {
        self.board.attempt_update_blocks(&self.piece.blocks, new_coords)
    }

    fn shifted(&self, d_row: i16, d_col: i16) -> ArrayVec<Coord, BLOCKS_PER_PIECE> {
        self.piece
            .blocks
            .iter()
            .filter_map(|&id| self.board.block(id))
            .map(|b| (b.row + d_row, b.col + d_col))
            .collect()
    }

    /// Rotate `k` quarter turns clockwise about the current anchor.
    pub fn attempt_rotate(&mut self, k: u8) -> bool {
        let rotated = self.piece.matrix.rotated(k);
        let new_coords = anchored_coords(&rotated, self.piece.anchor);
        let success = self.attempt_update(&new_coords);
        if success {
            self.piece.matrix = rotated;
        }
        success
    }

    pub fn attempt_rotate_left(&mut self) -> bool {
        self.attempt_rotate(3)
    }

    pub fn attempt_rotate_right(&mut self) -> bool {
        self.attempt_rotate(1)
    }

    pub fn attempt_side_move(&mut self, col_delta: i16) -> bool {
        let new_coords = self.shifted(0, col_delta);
        let success = self.attempt_update(&new_coords);
        if success {
            self.piece.anchor.1 += col_delta;
        }
        success
    }

    pub fn attempt_down_move(&mut self) -> bool {
        let new_coords = self.shifted(1, 0);
        let success = self.attempt_update(&new_coords);
        if success {
            self.piece.anchor.0 += 1;
        }
        success
    }

    /// Move down until blocked. Returns the number of rows dropped.
    pub fn hard_drop(&mut self) -> u32 {
        let mut rows = 0;
        while self.attempt_down_move() {
            rows += 1;
        }
        rows
    }

    /// Clear full rows on the board and forget any active-piece blocks that
    /// were cleared with them.
    pub fn clear_full_rows(&mut self) -> usize {
        let cleared = self.board.clear_full_rows();
        if cleared > 0 {
            let board = &self.board;
            self.piece.blocks.retain(|id| board.is_live(*id));
        }
        cleared
    }

    /// Empty the board and spawn a fresh piece. The bag keeps its state.
    pub fn reset(&mut self) {
        self.board.reset();
        self.create_random_piece();
    }
}

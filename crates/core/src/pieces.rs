//! Pieces module - tetromino shape tables and matrix rotation
//!
//! Each piece is a square 0/1 matrix (4x4 for I, 2x2 for O, 3x3 for the rest)
//! plus a color. Rotation is a plain 90° clockwise turn of the matrix about its
//! center, repeated for multiples of 90°. There is no kick table.

use arrayvec::ArrayVec;

use crate::board::{BlockId, Board, Coord};
use tui_blockfall_types::{colors, PieceKind, Rgb};

/// Largest matrix dimension (the I piece).
pub const MAX_DIM: usize = 4;

/// Number of blocks in a tetromino.
pub const BLOCKS_PER_PIECE: usize = 4;

/// Square shape matrix stored in a fixed 4x4 array.
///
/// Only the top-left `dim x dim` corner is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    dim: usize,
    cells: [[bool; MAX_DIM]; MAX_DIM],
}

impl ShapeMatrix {
    /// Build from rows of 0/1 flags. The row count sets the dimension.
    pub const fn from_rows<const N: usize>(rows: [[u8; N]; N]) -> Self {
        let mut cells = [[false; MAX_DIM]; MAX_DIM];
        let mut r = 0;
        while r < N {
            let mut c = 0;
            while c < N {
                cells[r][c] = rows[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self { dim: N, cells }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.dim && col < self.dim && self.cells[row][col]
    }

    /// Rotate 90° clockwise: reverse the row order, then transpose.
    ///
    /// `new[r][c] = old[dim - 1 - c][r]`
    pub fn rotated_cw(&self) -> Self {
        let n = self.dim;
        let mut cells = [[false; MAX_DIM]; MAX_DIM];
        for (r, row) in cells.iter_mut().enumerate().take(n) {
            for (c, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.cells[n - 1 - c][r];
            }
        }
        Self { dim: n, cells }
    }

    /// Rotate `k` quarter turns clockwise. `k = 3` is one turn counter-clockwise.
    pub fn rotated(&self, k: u8) -> Self {
        (0..k % 4).fold(*self, |m, _| m.rotated_cw())
    }

    /// Nonzero `(row, col)` entries in row-major order.
    pub fn iter_coords(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.dim).flat_map(move |r| {
            (0..self.dim).filter_map(move |c| self.cells[r][c].then_some((r, c)))
        })
    }
}

/// Immutable (shape, color) pair for one tetromino kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSpec {
    pub kind: PieceKind,
    pub matrix: ShapeMatrix,
    pub color: Rgb,
}

const I_SPEC: PieceSpec = PieceSpec {
    kind: PieceKind::I,
    matrix: ShapeMatrix::from_rows([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
    color: colors::CYAN,
};

const J_SPEC: PieceSpec = PieceSpec {
    kind: PieceKind::J,
    matrix: ShapeMatrix::from_rows([[1, 0, 0], [1, 1, 1], [0, 0, 0]]),
    color: colors::DODGER_BLUE,
};

const L_SPEC: PieceSpec = PieceSpec {
    kind: PieceKind::L,
    matrix: ShapeMatrix::from_rows([[0, 0, 1], [1, 1, 1], [0, 0, 0]]),
    color: colors::DARK_ORANGE,
};

const O_SPEC: PieceSpec = PieceSpec {
    kind: PieceKind::O,
    matrix: ShapeMatrix::from_rows([[1, 1], [1, 1]]),
    color: colors::YELLOW,
};

const S_SPEC: PieceSpec = PieceSpec {
    kind: PieceKind::S,
    matrix: ShapeMatrix::from_rows([[0, 1, 1], [1, 1, 0], [0, 0, 0]]),
    color: colors::LIME_GREEN,
};

const T_SPEC: PieceSpec = PieceSpec {
    kind: PieceKind::T,
    matrix: ShapeMatrix::from_rows([[0, 1, 0], [1, 1, 1], [0, 0, 0]]),
    color: colors::BLUE_VIOLET,
};

const Z_SPEC: PieceSpec = PieceSpec {
    kind: PieceKind::Z,
    matrix: ShapeMatrix::from_rows([[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
    color: colors::RED,
};

/// The seven standard specs, in [`PieceKind::ALL`] order.
pub const PIECE_SPECS: [PieceSpec; 7] = [I_SPEC, J_SPEC, L_SPEC, O_SPEC, S_SPEC, T_SPEC, Z_SPEC];

/// Get the canonical spec for a piece kind
pub fn spec_for(kind: PieceKind) -> PieceSpec {
    match kind {
        PieceKind::I => I_SPEC,
        PieceKind::J => J_SPEC,
        PieceKind::L => L_SPEC,
        PieceKind::O => O_SPEC,
        PieceKind::S => S_SPEC,
        PieceKind::T => T_SPEC,
        PieceKind::Z => Z_SPEC,
    }
}

/// Translate matrix coordinates by an anchor.
pub fn anchored_coords(matrix: &ShapeMatrix, anchor: Coord) -> ArrayVec<Coord, BLOCKS_PER_PIECE> {
    matrix
        .iter_coords()
        .take(BLOCKS_PER_PIECE)
        .map(|(r, c)| (anchor.0 + r as i16, anchor.1 + c as i16))
        .collect()
}

/// The active falling piece.
///
/// Block positions always equal the matrix's nonzero coordinates translated
/// by `anchor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub matrix: ShapeMatrix,
    pub color: Rgb,
    /// `(row, col)` offset of matrix cell (0, 0) on the grid
    pub anchor: Coord,
    pub blocks: ArrayVec<BlockId, BLOCKS_PER_PIECE>,
}

impl Piece {
    /// Create a piece in spawn orientation, centered over the columns at row 0,
    /// and allocate its blocks in the board's arena. The blocks are not placed
    /// on the grid yet.
    pub fn new(spec: PieceSpec, board: &mut Board) -> Self {
        let dim = spec.matrix.dim() as i16;
        let anchor = (0, (board.num_cols() as i16 - dim) / 2);
        let blocks = anchored_coords(&spec.matrix, anchor)
            .into_iter()
            .map(|(row, col)| board.insert_block(spec.color, row, col))
            .collect();

        Self {
            kind: spec.kind,
            matrix: spec.matrix,
            color: spec.color,
            anchor,
            blocks,
        }
    }

    /// Grid coordinates derived from the matrix and anchor.
    pub fn coords(&self) -> ArrayVec<Coord, BLOCKS_PER_PIECE> {
        anchored_coords(&self.matrix, self.anchor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_spec_has_four_cells() {
        for spec in PIECE_SPECS {
            assert_eq!(spec.matrix.iter_coords().count(), 4, "{:?}", spec.kind);
        }
    }

    #[test]
    fn test_spec_table_matches_kind_order() {
        for (spec, kind) in PIECE_SPECS.iter().zip(PieceKind::ALL) {
            assert_eq!(spec.kind, kind);
            assert_eq!(spec_for(kind), *spec);
        }
    }

    #[test]
    fn test_matrix_dimensions() {
        assert_eq!(spec_for(PieceKind::I).matrix.dim(), 4);
        assert_eq!(spec_for(PieceKind::O).matrix.dim(), 2);
        assert_eq!(spec_for(PieceKind::T).matrix.dim(), 3);
    }

    #[test]
    fn test_rotate_t_clockwise() {
        let t = spec_for(PieceKind::T).matrix;
        let expected = ShapeMatrix::from_rows([[0, 1, 0], [0, 1, 1], [0, 1, 0]]);
        assert_eq!(t.rotated_cw(), expected);
    }

    #[test]
    fn test_rotate_i_clockwise() {
        let i = spec_for(PieceKind::I).matrix;
        let expected =
            ShapeMatrix::from_rows([[0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0]]);
        assert_eq!(i.rotated(1), expected);
    }

    #[test]
    fn test_three_quarter_turns_undo_one() {
        for spec in PIECE_SPECS {
            assert_eq!(spec.matrix.rotated(1).rotated(3), spec.matrix);
        }
    }

    #[test]
    fn test_piece_spawns_centered() {
        let mut board = Board::new(22, 10);
        let o = Piece::new(spec_for(PieceKind::O), &mut board);
        assert_eq!(o.anchor, (0, 4));
        let i = Piece::new(spec_for(PieceKind::I), &mut board);
        assert_eq!(i.anchor, (0, 3));
        assert_eq!(i.coords().as_slice(), &[(1, 3), (1, 4), (1, 5), (1, 6)]);
        for (&id, coord) in i.blocks.iter().zip(i.coords()) {
            assert_eq!(board.block(id).map(|b| b.coord()), Some(coord));
        }
    }
}

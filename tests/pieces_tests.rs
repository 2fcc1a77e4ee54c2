//! Piece tests - shape matrices, rotation and the 7-bag generator

use std::collections::HashSet;

use tui_blockfall::core::pieces::anchored_coords;
use tui_blockfall::core::{
    spec_for, Board, PieceController, PieceFactory, ShapeMatrix, PIECE_SPECS,
};
use tui_blockfall::types::PieceKind;

fn controller_with(kind: PieceKind) -> PieceController {
    let mut controller = PieceController::new(Board::new(22, 10), PieceFactory::new(42));
    controller.board_mut().reset();
    controller.spawn_piece(kind);
    controller
}

#[test]
fn test_four_quarter_turns_are_identity() {
    for spec in PIECE_SPECS {
        let m = spec.matrix;
        assert_eq!(m.rotated(4), m, "{:?}", spec.kind);
        assert_eq!(m.rotated_cw().rotated_cw().rotated_cw().rotated_cw(), m);
        assert_eq!(m.rotated(1).rotated(3), m);
    }
}

#[test]
fn test_rotation_index_mapping() {
    let m = ShapeMatrix::from_rows([[1, 1, 0], [0, 0, 0], [0, 0, 0]]);
    let r = m.rotated_cw();
    // new[r][c] = old[n-1-c][r]
    let expected = ShapeMatrix::from_rows([[0, 0, 1], [0, 0, 1], [0, 0, 0]]);
    assert_eq!(r, expected);
}

#[test]
fn test_rotation_keeps_four_cells() {
    for spec in PIECE_SPECS {
        for k in 0..4 {
            assert_eq!(spec.matrix.rotated(k).iter_coords().count(), 4);
        }
    }
}

#[test]
fn test_spec_colors_and_dims() {
    assert_eq!(spec_for(PieceKind::I).matrix.dim(), 4);
    assert_eq!(spec_for(PieceKind::O).matrix.dim(), 2);
    for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::T, PieceKind::Z] {
        assert_eq!(spec_for(kind).matrix.dim(), 3);
    }
    let colors: HashSet<_> = PIECE_SPECS.iter().map(|s| s.color).collect();
    assert_eq!(colors.len(), 7);
}

#[test]
fn test_anchored_coords_translate_matrix() {
    let coords = anchored_coords(&spec_for(PieceKind::T).matrix, (5, 2));
    assert_eq!(coords.as_slice(), &[(5, 3), (6, 2), (6, 3), (6, 4)]);
}

#[test]
fn test_rotate_right_then_left_restores_position() {
    for kind in PieceKind::ALL {
        let mut c = controller_with(kind);
        assert!(c.attempt_down_move());
        let before = c.piece().coords();
        assert!(c.attempt_rotate_right(), "{:?}", kind);
        assert!(c.attempt_rotate_left());
        assert_eq!(c.piece().coords(), before);
    }
}

#[test]
fn test_spawn_is_centered_and_seated() {
    let c = controller_with(PieceKind::O);
    assert_eq!(c.piece().anchor, (1, 4));

    let c = controller_with(PieceKind::I);
    assert_eq!(c.piece().anchor, (1, 3));
    assert_eq!(c.piece().coords().as_slice(), &[(2, 3), (2, 4), (2, 5), (2, 6)]);
}

#[test]
fn test_hard_drop_lands_on_floor() {
    let mut c = controller_with(PieceKind::I);
    assert_eq!(c.hard_drop(), 19);
    assert_eq!(c.piece().coords().as_slice(), &[(21, 3), (21, 4), (21, 5), (21, 6)]);
    assert_eq!(c.hard_drop(), 0);
}

#[test]
fn test_hard_drop_lands_on_stack() {
    let mut c = controller_with(PieceKind::O);
    c.board_mut().fill(&[(15, 4)], Default::default());
    c.hard_drop();
    assert_eq!(c.piece().anchor, (13, 4));
}

#[test]
fn test_bag_deals_each_kind_once_per_seven() {
    let mut factory = PieceFactory::new(31337);
    for _ in 0..50 {
        let bag: HashSet<PieceKind> = (0..7).map(|_| factory.gen_piece().kind).collect();
        assert_eq!(bag.len(), 7);
    }
}

#[test]
fn test_bag_gap_never_exceeds_twelve() {
    for seed in [1, 2, 99, 4096, 123_456] {
        let mut factory = PieceFactory::new(seed);
        let draws: Vec<PieceKind> = (0..700).map(|_| factory.gen_piece().kind).collect();
        for kind in PieceKind::ALL {
            let positions: Vec<usize> = draws
                .iter()
                .enumerate()
                .filter(|(_, k)| **k == kind)
                .map(|(i, _)| i)
                .collect();
            assert!(positions[0] < 7);
            for pair in positions.windows(2) {
                assert!(pair[1] - pair[0] - 1 <= 12, "seed {} kind {:?}", seed, kind);
            }
        }
    }
}

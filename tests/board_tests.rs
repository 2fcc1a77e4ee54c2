//! Board tests - grid updates, bounds and row clearing

use tui_blockfall::core::{Board, Coord};
use tui_blockfall::types::colors;

fn cells_of(board: &Board) -> Vec<Coord> {
    let mut out = Vec::new();
    for row in 0..board.num_rows() as i16 {
        for col in 0..board.num_cols() as i16 {
            if board.is_occupied(row, col) {
                out.push((row, col));
            }
        }
    }
    out
}

fn full_row(row: i16, cols: i16) -> Vec<Coord> {
    (0..cols).map(|col| (row, col)).collect()
}

#[test]
fn test_new_board_is_empty() {
    let board = Board::new(22, 10);
    assert_eq!(board.occupied_count(), 0);
    assert!(!board.is_game_over());
    assert!(!board.is_row_full(21));
}

#[test]
fn test_out_of_bounds() {
    let board = Board::new(6, 4);
    assert!(board.is_out_of_bounds(-1, 0));
    assert!(board.is_out_of_bounds(0, -1));
    assert!(board.is_out_of_bounds(6, 0));
    assert!(board.is_out_of_bounds(0, 4));
    assert!(!board.is_out_of_bounds(5, 3));
    assert!(board.has_collision(&[(2, 4)]));
    assert_eq!(board.get(6, 0), None);
}

#[test]
fn test_failed_update_leaves_grid_untouched() {
    let mut board = Board::new(6, 4);
    let ids = board.fill(&[(2, 0), (2, 1)], colors::RED);
    board.fill(&[(3, 1)], colors::CYAN);
    let before = board.snapshot();

    // (3, 0) is free but (3, 1) is not: nothing may move.
    assert!(!board.attempt_update_blocks(&ids, &[(3, 0), (3, 1)]));
    assert_eq!(board.snapshot(), before);
    assert_eq!(board.block(ids[0]).unwrap().coord(), (2, 0));
    assert_eq!(board.block(ids[1]).unwrap().coord(), (2, 1));
}

#[test]
fn test_failed_update_out_of_bounds() {
    let mut board = Board::new(6, 4);
    let ids = board.fill(&[(5, 2), (5, 3)], colors::RED);
    assert!(!board.attempt_update_blocks(&ids, &[(5, 3), (5, 4)]));
    assert_eq!(cells_of(&board), vec![(5, 2), (5, 3)]);
}

#[test]
fn test_update_may_overlap_own_cells() {
    let mut board = Board::new(6, 4);
    let ids = board.fill(&[(4, 0), (4, 1), (4, 2)], colors::RED);
    assert!(board.attempt_update_blocks(&ids, &[(4, 1), (4, 2), (4, 3)]));
    assert_eq!(cells_of(&board), vec![(4, 1), (4, 2), (4, 3)]);
    for (&id, col) in ids.iter().zip(1..) {
        assert_eq!(board.get(4, col), Some(id));
        assert_eq!(board.block(id).unwrap().coord(), (4, col));
    }
}

#[test]
fn test_update_rejects_mismatched_lengths() {
    let mut board = Board::new(6, 4);
    let ids = board.fill(&[(4, 0), (4, 1)], colors::RED);
    assert!(!board.attempt_update_blocks(&ids, &[(5, 0)]));
    assert_eq!(cells_of(&board), vec![(4, 0), (4, 1)]);
}

#[test]
fn test_clear_single_row_shifts_rows_above() {
    let mut board = Board::new(6, 4);
    board.fill(&full_row(5, 4), colors::CYAN);
    let above = board.fill(&[(4, 0), (3, 2)], colors::RED);

    assert_eq!(board.clear_full_rows(), 1);
    assert_eq!(cells_of(&board), vec![(4, 2), (5, 0)]);
    assert_eq!(board.block(above[0]).unwrap().coord(), (5, 0));
    assert_eq!(board.block(above[1]).unwrap().coord(), (4, 2));
    assert_eq!(board.occupied_count(), 2);
}

#[test]
fn test_clear_shifts_top_row_and_leaves_it_empty() {
    let mut board = Board::new(2, 4);
    let top = board.fill(&[(0, 2)], colors::RED);
    board.fill(&full_row(1, 4), colors::CYAN);

    assert_eq!(board.clear_full_rows(), 1);
    assert_eq!(cells_of(&board), vec![(1, 2)]);
    assert_eq!(board.block(top[0]).unwrap().coord(), (1, 2));
    assert!((0..4).all(|col| !board.is_occupied(0, col)));
}

#[test]
fn test_clear_adjacent_rows() {
    let mut board = Board::new(8, 4);
    board.fill(&full_row(6, 4), colors::CYAN);
    board.fill(&full_row(7, 4), colors::CYAN);
    let top = board.fill(&[(5, 3)], colors::RED);

    assert_eq!(board.clear_full_rows(), 2);
    assert_eq!(cells_of(&board), vec![(7, 3)]);
    assert_eq!(board.block(top[0]).unwrap().coord(), (7, 3));
}

#[test]
fn test_clear_split_rows() {
    let mut board = Board::new(8, 4);
    board.fill(&full_row(5, 4), colors::CYAN);
    board.fill(&full_row(7, 4), colors::CYAN);
    let between = board.fill(&[(6, 0)], colors::RED);
    let above = board.fill(&[(4, 1), (3, 2)], colors::YELLOW);

    assert_eq!(board.clear_full_rows(), 2);
    assert_eq!(cells_of(&board), vec![(5, 2), (6, 1), (7, 0)]);
    assert_eq!(board.block(between[0]).unwrap().coord(), (7, 0));
    assert_eq!(board.block(above[0]).unwrap().coord(), (6, 1));
    assert_eq!(board.block(above[1]).unwrap().coord(), (5, 2));
}

#[test]
fn test_cleared_blocks_are_released() {
    let mut board = Board::new(6, 4);
    let row = board.fill(&full_row(5, 4), colors::CYAN);
    board.clear_full_rows();
    assert!(row.iter().all(|&id| !board.is_live(id)));

    // Released slots are reused.
    let reused = board.insert_block(colors::RED, 0, 0);
    assert!(row.contains(&reused));
}

#[test]
fn test_nothing_to_clear() {
    let mut board = Board::new(6, 4);
    board.fill(&[(5, 0), (5, 1), (5, 2)], colors::CYAN);
    assert_eq!(board.clear_full_rows(), 0);
    assert_eq!(board.occupied_count(), 3);
}

#[test]
fn test_game_over_only_in_hidden_rows() {
    let mut board = Board::new(22, 10);
    board.fill(&[(2, 0)], colors::RED);
    assert!(!board.is_game_over());

    board.fill(&[(1, 9)], colors::RED);
    assert!(board.is_game_over());

    board.reset();
    board.fill(&[(0, 4)], colors::RED);
    assert!(board.is_game_over());
}

#[test]
fn test_snapshot_carries_colors() {
    let mut board = Board::new(6, 4);
    board.fill(&[(5, 1)], colors::LIME_GREEN);
    let snap = board.snapshot();
    assert_eq!(snap.num_rows(), 6);
    assert_eq!(snap.visible_rows(), 4);
    assert_eq!(snap.get(5, 1), Some(colors::LIME_GREEN));
    assert_eq!(snap.get(5, 0), None);
}

#[test]
fn test_update_in_place_always_succeeds() {
    let mut board = Board::new(6, 4);
    let coords = [(4, 0), (4, 1), (5, 1), (5, 2)];
    let ids = board.fill(&coords, colors::RED);
    board.fill(&[(5, 0), (5, 3)], colors::CYAN);
    assert!(board.attempt_update_blocks(&ids, &coords));
    assert_eq!(board.occupied_count(), 6);
}

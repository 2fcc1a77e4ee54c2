//! Core simulation module - pure, deterministic, and testable
//!
//! This crate contains the board, the pieces, the bag generator and the piece
//! controller. It has **zero dependencies** on UI, timing, or I/O:
//!
//! - **Deterministic**: the same seed produces the same piece sequence
//! - **Transactional**: every move either fully succeeds or leaves the grid untouched
//! - **Portable**: runs headless in tests and benches as well as in the terminal app
//!
//! # Module Structure
//!
//! - [`board`]: cell grid with a block arena, collision checks and row clearing
//! - [`pieces`]: shape matrices, the seven piece specs, matrix rotation
//! - [`rng`]: 7-bag random piece generation
//! - [`controller`]: the active piece and its collision-checked moves
//! - [`snapshot`]: color grid handed to renderers
//!
//! # Example
//!
//! ```
//! use tui_blockfall_core::{Board, PieceController, PieceFactory};
//! use tui_blockfall_types::PieceKind;
//!
//! let mut controller = PieceController::new(Board::new(22, 10), PieceFactory::new(7));
//! controller.board_mut().reset();
//! controller.spawn_piece(PieceKind::O);
//!
//! let rows = controller.hard_drop();
//! assert_eq!(rows, 19);
//! assert!(!controller.attempt_down_move());
//! ```

pub mod board;
pub mod controller;
pub mod pieces;
pub mod rng;
pub mod snapshot;

pub use tui_blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Block, BlockId, Board, Coord};
pub use controller::PieceController;
pub use pieces::{spec_for, Piece, PieceSpec, ShapeMatrix, PIECE_SPECS};
pub use rng::{PieceFactory, SimpleRng};
pub use snapshot::GridSnapshot;

//! Frame-driven simulation engine.
//!
//! [`PhysicsEngine`] wraps a [`PieceController`](tui_blockfall_core::PieceController)
//! and advances the game one fixed frame per call. The driver samples input
//! between frames and hands it to [`PhysicsEngine::step_one_frame`]; direct
//! actions (hard drop, rotations) bypass the timers.
//!
//! Game over is an ordinary return value ([`Outcome::GameOver`]). Once it has
//! been reported the engine stays terminal until [`PhysicsEngine::reset`].
//!
//! # Example
//!
//! ```
//! use tui_blockfall_engine::{Outcome, PhysicsEngine};
//! use tui_blockfall_types::{InputState, Settings};
//!
//! let mut engine = PhysicsEngine::new(Settings::default(), 12345);
//! let mut input = InputState::new();
//!
//! input.press_left();
//! assert_eq!(engine.step_one_frame(&mut input), Outcome::Continue);
//! assert!(input.auto_repeat);
//!
//! engine.rotate_right();
//! let _ = engine.hard_drop();
//! assert_eq!(engine.take_last_event().map(|e| e.rows_cleared), Some(0));
//! ```

pub mod physics;

pub use tui_blockfall_core as core;
pub use tui_blockfall_types as types;

pub use physics::{LockDelay, LockEvent, Outcome, PhysicsEngine, Timers};

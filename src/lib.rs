//! TUI Blockfall (workspace facade crate).
//!
//! The simulation, timing, input and terminal layers live in dedicated crates
//! under `crates/`; this package re-exports them as
//! `tui_blockfall::{core,engine,input,term,types}` and adds the game driver.

pub mod app;
pub mod event_log;

pub use tui_blockfall_core as core;
pub use tui_blockfall_engine as engine;
pub use tui_blockfall_input as input;
pub use tui_blockfall_term as term;
pub use tui_blockfall_types as types;

pub use app::{App, GameStatus};
pub use event_log::{EventLog, LogRecord};

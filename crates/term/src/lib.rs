//! Terminal front end for the falling-block game.
//!
//! The board is rendered into a plain framebuffer rather than through a widget
//! toolkit, so each board cell can be drawn two columns wide to keep cells
//! roughly square. The renderer then sends only what changed since the last
//! frame.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_blockfall_core as core;
pub use tui_blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rect, Rgb};
pub use game_view::{GameView, Overlay, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};

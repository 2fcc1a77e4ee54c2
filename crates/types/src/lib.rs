//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation core, input decoding, terminal rendering).
//!
//! # Board Dimensions
//!
//! Standard playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Visible height**: 20 rows
//! - **Hidden rows**: 2 extra rows above the visible field, used only for
//!   game-over detection. Row 0 is the topmost hidden row.
//!
//! # Frame Timing Constants
//!
//! All timing values are counted in frames (one frame = one call to
//! `PhysicsEngine::step_one_frame`, nominally 1/60 s):
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Nominal frame interval (~60 FPS) |
//! | `GRAVITY_FRAMES` | 60 | Frames between gravity steps |
//! | `SOFT_DROP_FRAMES` | 3 | Frames between soft drop steps |
//! | `AUTO_REPEAT_INITIAL_FRAMES` | 10 | Wait after the first side step before autorepeat |
//! | `AUTO_REPEAT_FRAMES` | 4 | Wait between autorepeat side steps |
//! | `LOCK_DELAY_FRAMES` | 30 | Grace period before a grounded piece locks |
//!
//! # Examples
//!
//! ```
//! use tui_blockfall_types::{PieceKind, Settings, HorizontalDirection, InputState};
//!
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! let settings = Settings::default();
//! assert_eq!(settings.num_rows(), 22);
//! assert_eq!(settings.num_cols, 10);
//!
//! let mut input = InputState::new();
//! input.press_left();
//! assert_eq!(input.direction, HorizontalDirection::Left);
//! assert_eq!(input.col_delta(), -1);
//! ```

mod input;
mod settings;

pub use input::{Command, HorizontalDirection, InputState};
pub use settings::Settings;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u16 = 10;

/// Visible board height in cells (20 rows)
pub const BOARD_VISIBLE_HEIGHT: u16 = 20;

/// Rows above the visible field. A locked block in any of them ends the game.
pub const HIDDEN_ROWS: u16 = 2;

/// Nominal frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Frames between gravity steps (one row per second at 60 FPS)
pub const GRAVITY_FRAMES: i32 = 60;

/// Frames between soft drop steps (3 frames == 1/3 G at 60 FPS)
pub const SOFT_DROP_FRAMES: i32 = 3;

/// Frames to wait after an initial side step before autorepeat kicks in
pub const AUTO_REPEAT_INITIAL_FRAMES: i32 = 10;

/// Frames between side steps once autorepeat is engaged (4 frames == 15 Hz)
pub const AUTO_REPEAT_FRAMES: i32 = 4;

/// Frames a grounded piece waits before locking
pub const LOCK_DELAY_FRAMES: i32 = 30;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Named colors used by the piece table (CSS3 names and values).
pub mod colors {
    use super::Rgb;

    pub const CYAN: Rgb = Rgb::new(0, 255, 255);
    pub const DODGER_BLUE: Rgb = Rgb::new(30, 144, 255);
    pub const DARK_ORANGE: Rgb = Rgb::new(255, 140, 0);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    pub const LIME_GREEN: Rgb = Rgb::new(50, 205, 50);
    pub const BLUE_VIOLET: Rgb = Rgb::new(138, 43, 226);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
}

/// The seven tetromino piece kinds
///
/// - **I**: Cyan, horizontal bar
/// - **J**: Dodger blue
/// - **L**: Dark orange (mirror of J)
/// - **O**: Yellow, 2x2 square
/// - **S**: Lime green
/// - **T**: Blue violet
/// - **Z**: Red (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Every kind, in the canonical bag order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }
}

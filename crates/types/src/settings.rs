//! Static configuration table.
//!
//! Values are read once at startup and never mutated by the simulation.

use std::ops::RangeInclusive;

use crate::{
    AUTO_REPEAT_FRAMES, AUTO_REPEAT_INITIAL_FRAMES, BOARD_VISIBLE_HEIGHT, BOARD_WIDTH, FRAME_MS,
    GRAVITY_FRAMES, HIDDEN_ROWS, LOCK_DELAY_FRAMES, SOFT_DROP_FRAMES,
};

/// Grid dimensions and frame timings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub visible_rows: u16,
    pub hidden_rows: u16,
    pub num_cols: u16,
    pub gravity_frames: i32,
    pub soft_drop_frames: i32,
    pub auto_repeat_initial_frames: i32,
    pub auto_repeat_frames: i32,
    pub lock_delay_frames: i32,
    pub frame_ms: u32,
    /// Seed for the piece generator. `None` means "derive from the clock".
    pub seed: Option<u32>,
    /// Destination of the JSON-lines event log, if enabled.
    pub log_path: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            visible_rows: BOARD_VISIBLE_HEIGHT,
            hidden_rows: HIDDEN_ROWS,
            num_cols: BOARD_WIDTH,
            gravity_frames: GRAVITY_FRAMES,
            soft_drop_frames: SOFT_DROP_FRAMES,
            auto_repeat_initial_frames: AUTO_REPEAT_INITIAL_FRAMES,
            auto_repeat_frames: AUTO_REPEAT_FRAMES,
            lock_delay_frames: LOCK_DELAY_FRAMES,
            frame_ms: FRAME_MS,
            seed: None,
            log_path: None,
        }
    }
}

impl Settings {
    /// Smallest playable width: the widest piece matrix (I, 4x4) must fit.
    pub const MIN_COLS: u16 = 4;
    /// Largest accepted `BLOCKFALL_ROWS`.
    pub const MAX_ROWS: u16 = 256;
    /// Largest accepted `BLOCKFALL_COLS`.
    pub const MAX_COLS: u16 = 256;

    /// Create from environment variables, falling back to defaults.
    ///
    /// - `BLOCKFALL_ROWS`: visible rows (1 to 256)
    /// - `BLOCKFALL_COLS`: columns (4 to 256)
    /// - `BLOCKFALL_GRAVITY_FRAMES`, `BLOCKFALL_SOFT_DROP_FRAMES`,
    ///   `BLOCKFALL_DAS_FRAMES`, `BLOCKFALL_ARR_FRAMES`,
    ///   `BLOCKFALL_LOCK_DELAY_FRAMES`: timings in frames (at least 1)
    /// - `BLOCKFALL_FRAME_MS`: frame interval in milliseconds
    /// - `BLOCKFALL_SEED`: fixed piece sequence seed
    /// - `BLOCKFALL_LOG_PATH`: enable the event log
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Settings::from_env`] but with an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let parse_u16 = |key: &str, range: RangeInclusive<u16>, default: u16| -> u16 {
            lookup(key)
                .and_then(|s| s.trim().parse::<u16>().ok())
                .filter(|v| range.contains(v))
                .unwrap_or(default)
        };
        let parse_frames = |key: &str, default: i32| -> i32 {
            lookup(key)
                .and_then(|s| s.trim().parse::<i32>().ok())
                .filter(|&v| v >= 1)
                .unwrap_or(default)
        };

        let frame_ms = lookup("BLOCKFALL_FRAME_MS")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|&v| v >= 1)
            .unwrap_or(defaults.frame_ms);

        let seed = lookup("BLOCKFALL_SEED").and_then(|s| s.trim().parse::<u32>().ok());

        let log_path = lookup("BLOCKFALL_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            visible_rows: parse_u16("BLOCKFALL_ROWS", 1..=Self::MAX_ROWS, defaults.visible_rows),
            hidden_rows: HIDDEN_ROWS,
            num_cols: parse_u16(
                "BLOCKFALL_COLS",
                Self::MIN_COLS..=Self::MAX_COLS,
                defaults.num_cols,
            ),
            gravity_frames: parse_frames("BLOCKFALL_GRAVITY_FRAMES", defaults.gravity_frames),
            soft_drop_frames: parse_frames("BLOCKFALL_SOFT_DROP_FRAMES", defaults.soft_drop_frames),
            auto_repeat_initial_frames: parse_frames(
                "BLOCKFALL_DAS_FRAMES",
                defaults.auto_repeat_initial_frames,
            ),
            auto_repeat_frames: parse_frames("BLOCKFALL_ARR_FRAMES", defaults.auto_repeat_frames),
            lock_delay_frames: parse_frames(
                "BLOCKFALL_LOCK_DELAY_FRAMES",
                defaults.lock_delay_frames,
            ),
            frame_ms,
            seed,
            log_path,
        }
    }

    /// Total grid rows, hidden rows included.
    pub fn num_rows(&self) -> u16 {
        self.visible_rows.saturating_add(self.hidden_rows)
    }
}

//! Physics engine - the per-frame timing state machine
//!
//! Once per frame the engine decides whether the active piece locks, moves
//! sideways, soft-drops, or falls under gravity, then counts every timer down
//! by one. A piece is conceptually *falling* while the lock delay is inactive,
//! *grounded* while it counts down, and *locked* once it expires. Any
//! successful move or rotation while grounded returns it to falling.

use tui_blockfall_core::{Board, GridSnapshot, PieceController};
use tui_blockfall_types::{InputState, Settings};

/// Lock delay countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockDelay {
    /// The piece is not grounded (or has moved since it was).
    #[default]
    Inactive,
    /// Frames left before the piece locks. Locks once this reaches zero.
    Active(i32),
}

impl LockDelay {
    pub fn is_active(self) -> bool {
        matches!(self, LockDelay::Active(_))
    }

    fn expired(self) -> bool {
        matches!(self, LockDelay::Active(n) if n <= 0)
    }

    fn tick(&mut self) {
        if let LockDelay::Active(n) = self {
            *n = n.saturating_sub(1);
        }
    }
}

/// Frame counters. A move is allowed once its counter is at or below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timers {
    pub gravity: i32,
    pub down: i32,
    pub side: i32,
    pub lock: LockDelay,
}

impl Timers {
    fn new(settings: &Settings) -> Self {
        Self {
            gravity: settings.gravity_frames,
            down: 0,
            side: 0,
            lock: LockDelay::Inactive,
        }
    }
}

/// Result of a frame or a direct action.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// A locked piece left blocks in the hidden rows. No new piece was spawned.
    GameOver,
}

impl Outcome {
    pub fn is_game_over(self) -> bool {
        self == Outcome::GameOver
    }
}

/// Recorded every time a piece locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    /// Frame on which the lock happened
    pub frame: u64,
    pub rows_cleared: u32,
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct PhysicsEngine {
    settings: Settings,
    controller: PieceController,
    timers: Timers,
    frame: u64,
    game_over: bool,
    last_event: Option<LockEvent>,
}

impl PhysicsEngine {
    /// Create an engine with an empty board and spawn the first piece.
    pub fn new(settings: Settings, seed: u32) -> Self {
        let controller = PieceController::from_settings(&settings, seed);
        Self::with_controller(settings, controller)
    }

    /// Wrap an existing controller (custom board or piece sequence).
    pub fn with_controller(settings: Settings, controller: PieceController) -> Self {
        let timers = Timers::new(&settings);
        Self {
            settings,
            controller,
            timers,
            frame: 0,
            game_over: false,
            last_event: None,
        }
    }

    /// Start over: empty board, fresh piece, fresh timers. The bag continues.
    pub fn reset(&mut self) {
        self.controller.reset();
        self.timers = Timers::new(&self.settings);
        self.frame = 0;
        self.game_over = false;
        self.last_event = None;
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn controller(&self) -> &PieceController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PieceController {
        &mut self.controller
    }

    pub fn board(&self) -> &Board {
        self.controller.board()
    }

    pub fn timers(&self) -> Timers {
        self.timers
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn snapshot(&self) -> GridSnapshot {
        self.controller.board().snapshot()
    }

    pub fn snapshot_into(&self, out: &mut GridSnapshot) {
        self.controller.board().snapshot_into(out);
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Advance one frame: process movement, then count every timer down.
    pub fn step_one_frame(&mut self, input: &mut InputState) -> Outcome {
        if self.game_over {
            return Outcome::GameOver;
        }

        let outcome = self.process_movement(input);
        self.frame += 1;

        self.timers.gravity = self.timers.gravity.saturating_sub(1);
        self.timers.down = self.timers.down.saturating_sub(1);
        self.timers.side = self.timers.side.saturating_sub(1);
        self.timers.lock.tick();

        outcome
    }

    /// Decide this frame's movement, in priority order: lock expiry, side
    /// movement, soft drop, gravity.
    fn process_movement(&mut self, input: &mut InputState) -> Outcome {
        if self.timers.lock.expired() {
            let outcome = self.lock_piece();
            self.timers.lock = LockDelay::Inactive;
            return outcome;
        }

        let col_delta = input.col_delta();
        if col_delta != 0
            && self.timers.side <= 0
            && self.controller.attempt_side_move(col_delta)
        {
            self.timers.lock = LockDelay::Inactive;
            if input.auto_repeat {
                self.timers.side = self.settings.auto_repeat_frames;
            } else {
                self.timers.side = self.settings.auto_repeat_initial_frames;
                input.auto_repeat = true;
            }
        }

        if input.down_held && self.timers.down <= 0 {
            if self.controller.attempt_down_move() {
                self.timers.down = self.settings.soft_drop_frames;
                self.timers.lock = LockDelay::Inactive;
                self.timers.gravity = self.settings.gravity_frames;
            } else {
                self.start_lock_delay();
            }
        }

        if self.timers.gravity <= 0 {
            if !self.controller.attempt_down_move() {
                self.start_lock_delay();
            }
            self.timers.gravity = self.settings.gravity_frames;
        }

        Outcome::Continue
    }

    fn start_lock_delay(&mut self) {
        if !self.timers.lock.is_active() {
            self.timers.lock = LockDelay::Active(self.settings.lock_delay_frames);
        }
    }

    /// Lock the active piece where it is: clear rows, check for game over,
    /// and spawn the next piece unless the game is over.
    fn lock_piece(&mut self) -> Outcome {
        let rows_cleared = self.controller.clear_full_rows() as u32;
        let game_over = self.controller.board().is_game_over();

        self.last_event = Some(LockEvent {
            frame: self.frame,
            rows_cleared,
            game_over,
        });

        if game_over {
            self.game_over = true;
            return Outcome::GameOver;
        }

        self.controller.create_random_piece();
        self.timers.lock = LockDelay::Inactive;
        Outcome::Continue
    }

    /// Drop the piece as far as it goes and lock it immediately.
    pub fn hard_drop(&mut self) -> Outcome {
        if self.game_over {
            return Outcome::GameOver;
        }
        self.controller.hard_drop();
        let outcome = self.lock_piece();
        self.timers.lock = LockDelay::Inactive;
        outcome
    }

    pub fn rotate_left(&mut self) -> bool {
        self.rotate(3)
    }

    pub fn rotate_right(&mut self) -> bool {
        self.rotate(1)
    }

    /// A successful rotation cancels any pending lock.
    fn rotate(&mut self, k: u8) -> bool {
        if self.game_over {
            return false;
        }
        let success = self.controller.attempt_rotate(k);
        if success {
            self.timers.lock = LockDelay::Inactive;
        }
        success
    }
}

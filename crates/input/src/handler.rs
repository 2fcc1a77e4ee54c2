//! Held-key tracking for terminal environments.
//!
//! Translates movement key presses and releases into [`InputState`]
//! transitions. Terminals that do not report key releases get a timeout: a held
//! key is considered released once no press or repeat for it has arrived
//! within `key_release_timeout_ms`.

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use crate::types::InputState;

// Terminal auto-repeat keeps refreshing the timestamp while a key is held, so
// this only has to outlast the gap between repeats.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MoveKey {
    Left,
    Right,
    Down,
}

fn move_key(code: KeyCode) -> Option<MoveKey> {
    match code {
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(MoveKey::Left),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(MoveKey::Right),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(MoveKey::Down),
        _ => None,
    }
}

/// Tracks held movement keys and exposes them as an [`InputState`].
#[derive(Debug, Clone)]
pub struct InputHandler {
    state: InputState,
    last_key_time: Instant,
    /// The terminal reports key releases; the timeout is not needed.
    release_events: bool,
    key_release_timeout_ms: u32,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            state: InputState::new(),
            last_key_time: Instant::now(),
            release_events: false,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    /// Declare whether the terminal delivers key release events.
    pub fn with_release_events(mut self, release_events: bool) -> Self {
        self.release_events = release_events;
        self
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// The engine engages autorepeat through this.
    pub fn state_mut(&mut self) -> &mut InputState {
        &mut self.state
    }

    /// Handle a press (or terminal repeat). Returns true for movement keys.
    pub fn handle_key_press(&mut self, code: KeyCode) -> bool {
        self.handle_key_press_at(code, Instant::now())
    }

    pub fn handle_key_press_at(&mut self, code: KeyCode, now: Instant) -> bool {
        let Some(key) = move_key(code) else {
            return false;
        };
        self.last_key_time = now;

        // A repeat of a key already held must not restart autorepeat.
        match key {
            MoveKey::Left if !self.state.left_held => self.state.press_left(),
            MoveKey::Right if !self.state.right_held => self.state.press_right(),
            MoveKey::Down if !self.state.down_held => self.state.press_down(),
            _ => {}
        }
        true
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        match move_key(code) {
            Some(MoveKey::Left) => self.state.release_left(),
            Some(MoveKey::Right) => self.state.release_right(),
            Some(MoveKey::Down) => self.state.release_down(),
            None => {}
        }
    }

    /// Apply the release timeout. Call once per frame before stepping the engine.
    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    pub fn update_at(&mut self, now: Instant) {
        if self.release_events {
            return;
        }
        let timeout = Duration::from_millis(self.key_release_timeout_ms as u64);
        if now.saturating_duration_since(self.last_key_time) > timeout {
            self.release_all();
        }
    }

    /// Drop every held key.
    pub fn release_all(&mut self) {
        self.state.release_all();
    }
}

//! Sampled input state shared by the input decoder and the physics engine.

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalDirection {
    Left,
    Right,
    #[default]
    None,
}

impl HorizontalDirection {
    /// Column offset for one side step.
    pub fn col_delta(self) -> i16 {
        match self {
            HorizontalDirection::Left => -1,
            HorizontalDirection::Right => 1,
            HorizontalDirection::None => 0,
        }
    }
}

/// Held-key state consumed by the engine once per frame.
///
/// Updated on key-down/key-up transitions between frames. The engine itself
/// engages `auto_repeat` after the first successful side step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputState {
    pub direction: HorizontalDirection,
    pub down_held: bool,
    /// Side steps use the continuous delay instead of the initial one.
    pub auto_repeat: bool,
    pub left_held: bool,
    pub right_held: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn col_delta(&self) -> i16 {
        self.direction.col_delta()
    }

    pub fn press_left(&mut self) {
        self.left_held = true;
        self.direction = HorizontalDirection::Left;
        self.auto_repeat = false;
    }

    pub fn press_right(&mut self) {
        self.right_held = true;
        self.direction = HorizontalDirection::Right;
        self.auto_repeat = false;
    }

    /// Releasing left falls back to right if it is still held.
    pub fn release_left(&mut self) {
        self.left_held = false;
        self.auto_repeat = false;
        self.direction = if self.right_held {
            HorizontalDirection::Right
        } else {
            HorizontalDirection::None
        };
    }

    /// Releasing right falls back to left if it is still held.
    pub fn release_right(&mut self) {
        self.right_held = false;
        self.auto_repeat = false;
        self.direction = if self.left_held {
            HorizontalDirection::Left
        } else {
            HorizontalDirection::None
        };
    }

    pub fn press_down(&mut self) {
        self.down_held = true;
    }

    pub fn release_down(&mut self) {
        self.down_held = false;
    }

    /// Drop every held key.
    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}

/// Discrete commands decoded from key presses.
///
/// Held movement (left/right/down) is tracked through [`InputState`]; these
/// are the one-shot actions the driver executes immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Rotate 90° clockwise
    RotateRight,
    /// Rotate 90° counter-clockwise
    RotateLeft,
    /// Drop to the lowest reachable row and lock
    HardDrop,
    /// Toggle pause (no effect after game over)
    Pause,
    /// Start a new game after game over
    Restart,
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_sets_direction_and_clears_repeat() {
        let mut input = InputState::new();
        input.auto_repeat = true;
        input.press_right();
        assert_eq!(input.direction, HorizontalDirection::Right);
        assert!(input.right_held);
        assert!(!input.auto_repeat);
    }

    #[test]
    fn later_press_wins() {
        let mut input = InputState::new();
        input.press_left();
        input.press_right();
        assert_eq!(input.col_delta(), 1);
    }

    #[test]
    fn releasing_one_arrow_falls_back_to_the_other() {
        let mut input = InputState::new();
        input.press_left();
        input.press_right();
        input.auto_repeat = true;

        input.release_right();
        assert_eq!(input.direction, HorizontalDirection::Left);
        assert!(!input.auto_repeat);

        input.release_left();
        assert_eq!(input.direction, HorizontalDirection::None);
        assert_eq!(input.col_delta(), 0);
    }

    #[test]
    fn down_flag_follows_press_and_release() {
        let mut input = InputState::new();
        input.press_down();
        assert!(input.down_held);
        input.release_down();
        assert!(!input.down_held);
    }
}

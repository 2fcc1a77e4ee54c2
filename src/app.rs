//! Game driver: lifecycle status on top of the physics engine.
//!
//! The engine knows nothing about pausing, restarting or quitting. `App`
//! routes key events to the input state or to one-shot commands, advances the
//! engine while running, and writes lock events to the optional event log.

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::core::GridSnapshot;
use crate::engine::{Outcome, PhysicsEngine};
use crate::event_log::{EventLog, LogRecord};
use crate::input::{handle_key_event, InputHandler};
use crate::term::Overlay;
use crate::types::{Command, Settings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    #[default]
    Running,
    Paused,
    GameOver,
    Quit,
}

pub struct App {
    engine: PhysicsEngine,
    input: InputHandler,
    status: GameStatus,
    log: Option<EventLog>,
}

impl App {
    pub fn new(settings: Settings, seed: u32) -> Self {
        Self::with_engine(PhysicsEngine::new(settings, seed))
    }

    pub fn with_engine(engine: PhysicsEngine) -> Self {
        Self {
            engine,
            input: InputHandler::new(),
            status: GameStatus::Running,
            log: None,
        }
    }

    pub fn with_input(mut self, input: InputHandler) -> Self {
        self.input = input;
        self
    }

    /// Attach an event log and record the session start.
    pub fn with_event_log(mut self, mut log: EventLog, seed: u32) -> Self {
        let settings = self.engine.settings();
        log.write(&LogRecord::SessionStart {
            seed,
            rows: settings.num_rows(),
            cols: settings.num_cols,
            frame_ms: settings.frame_ms,
        });
        self.log = Some(log);
        self
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn engine(&self) -> &PhysicsEngine {
        &self.engine
    }

    pub fn input(&self) -> &InputHandler {
        &self.input
    }

    pub fn should_quit(&self) -> bool {
        self.status == GameStatus::Quit
    }

    pub fn overlay(&self) -> Overlay {
        match self.status {
            GameStatus::Paused => Overlay::Paused,
            GameStatus::GameOver => Overlay::GameOver,
            GameStatus::Running | GameStatus::Quit => Overlay::None,
        }
    }

    pub fn snapshot_into(&self, out: &mut GridSnapshot) {
        self.engine.snapshot_into(out);
    }

    /// Route a terminal key event. Terminal auto-repeat events are ignored;
    /// the engine does its own autorepeat for held keys.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.kind {
            KeyEventKind::Press => {
                if let Some(command) = handle_key_event(key) {
                    self.handle_command(command);
                } else {
                    self.input.handle_key_press(key.code);
                }
            }
            KeyEventKind::Repeat => {}
            KeyEventKind::Release => self.input.handle_key_release(key.code),
        }
    }

    pub fn handle_command(&mut self, command: Command) {
        match (command, self.status) {
            (Command::Quit, _) => self.status = GameStatus::Quit,
            (Command::Pause, GameStatus::Running) => self.status = GameStatus::Paused,
            (Command::Pause, GameStatus::Paused) => self.status = GameStatus::Running,
            (Command::Restart, GameStatus::GameOver) => self.restart(),
            (Command::HardDrop, GameStatus::Running) => {
                let outcome = self.engine.hard_drop();
                self.after(outcome);
            }
            (Command::RotateRight, GameStatus::Running) => {
                self.engine.rotate_right();
            }
            (Command::RotateLeft, GameStatus::Running) => {
                self.engine.rotate_left();
            }
            _ => {}
        }
    }

    /// Advance one frame if the game is running.
    pub fn tick(&mut self) {
        if self.status != GameStatus::Running {
            return;
        }
        self.input.update();
        let outcome = self.engine.step_one_frame(self.input.state_mut());
        self.after(outcome);
    }

    fn after(&mut self, outcome: Outcome) {
        if let Some(event) = self.engine.take_last_event() {
            self.log_record(event.into());
        }
        if outcome.is_game_over() {
            self.status = GameStatus::GameOver;
            self.log_record(LogRecord::GameOver {
                frame: self.engine.frame(),
                occupied: self.engine.board().occupied_count(),
            });
        }
    }

    fn restart(&mut self) {
        self.log_record(LogRecord::Reset {
            frame: self.engine.frame(),
        });
        self.engine.reset();
        self.status = GameStatus::Running;
    }

    fn log_record(&mut self, record: LogRecord) {
        if let Some(log) = self.log.as_mut() {
            log.write(&record);
        }
    }
}

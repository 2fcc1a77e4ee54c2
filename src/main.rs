//! Terminal falling-block runner (default binary).
//!
//! Fixed-rate frame loop: poll crossterm for input until the next frame is
//! due, step the game, render through the framebuffer renderer.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event};

use tui_blockfall::core::GridSnapshot;
use tui_blockfall::input::InputHandler;
use tui_blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_blockfall::types::Settings;
use tui_blockfall::{App, EventLog};

const MAX_CATCH_UP_FRAMES: u32 = 5;

fn main() -> Result<()> {
    let settings = Settings::from_env();
    let seed = settings.seed.unwrap_or_else(clock_seed);

    let log = match settings.log_path.as_deref() {
        Some(path) => match EventLog::open(path) {
            Ok(log) => Some(log),
            Err(e) => {
                eprintln!("event log disabled: {:#}", e);
                None
            }
        },
        None => None,
    };

    let mut term = TerminalRenderer::new();
    if let Err(e) = term.enter() {
        let _ = term.exit();
        return Err(e);
    }

    let result = run(&mut term, settings, seed, log);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}

fn run(
    term: &mut TerminalRenderer,
    settings: Settings,
    seed: u32,
    log: Option<EventLog>,
) -> Result<()> {
    let frame_duration = Duration::from_millis(settings.frame_ms as u64);
    let input = InputHandler::new().with_release_events(term.key_release_events());

    let mut app = App::new(settings, seed).with_input(input);
    if let Some(log) = log {
        app = app.with_event_log(log, seed);
    }

    let view = GameView::default();
    let mut snapshot = GridSnapshot::new(0, 0);
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_frame = Instant::now();

    while !app.should_quit() {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        app.snapshot_into(&mut snapshot);
        view.render_into(&snapshot, app.overlay(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until the next frame.
        let timeout = frame_duration.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Frame. Catch up on a few missed frames; drop the rest after a stall.
        let mut caught_up = 0;
        while last_frame.elapsed() >= frame_duration && !app.should_quit() {
            if caught_up == MAX_CATCH_UP_FRAMES {
                last_frame = Instant::now();
                break;
            }
            last_frame += frame_duration;
            app.tick();
            caught_up += 1;
        }
    }

    Ok(())
}

//! Terminal Blockfall runner (default binary).
//!
//! Fixed-rate loop: drain crossterm key events into the button tracker,
//! sample one input frame per tick, advance the session, then draw the
//! snapshot through the diffing framebuffer renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use blockfall::app::App;
use blockfall::config::AppConfig;
use blockfall::core::{GameSnapshot, GameState};
use blockfall::event_log::EventLog;
use blockfall::input::{should_quit, ButtonTracker};
use blockfall::scores::{JsonFileStore, ScoreStore};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

/// Roughly 60 ticks per second.
const TICK: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    let config = AppConfig::from_env();

    let mut warnings = Vec::new();
    let log = match config.log_path.as_deref() {
        Some(path) => EventLog::open(path).unwrap_or_else(|e| {
            warnings.push(format!("[EventLog] disabled: {:#}", e));
            EventLog::disabled()
        }),
        None => EventLog::disabled(),
    };

    let game = GameState::with_rules(config.seed, config.rules);
    let store = JsonFileStore::new(&config.scores_path);
    let mut app = App::new(game, store, log);

    let mut term = TerminalRenderer::new().with_bell(config.bell);
    term.enter()?;

    let result = run(&mut term, &mut app);

    // Always try to restore terminal state.
    let _ = term.exit();

    app.flush_log();
    warnings.extend(app.take_warnings());
    for warning in &warnings {
        eprintln!("{}", warning);
    }
    result
}

fn run<S: ScoreStore>(term: &mut TerminalRenderer, app: &mut App<S>) -> Result<()> {
    let view = GameView::default();
    let mut tracker = ButtonTracker::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut last_tick = Instant::now();

    loop {
        let timeout = TICK.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    tracker.handle_key_event(key);
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() < TICK {
            continue;
        }
        last_tick = Instant::now();

        let frame = tracker.sample();
        for event in app.tick(&frame) {
            if let Some(volume) = event.drop_sound() {
                term.drop_sound(volume)?;
            }
        }

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        app.game().snapshot_into(&mut snap);
        view.render_into_with_status(&snap, &app.view_status(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;
    }
}

//! Terminal runner (default binary).
//!
//! Reads `BLOCKFALL_*` configuration, then runs the frame loop: render, wait
//! for input up to the next frame, apply the mapped actions, and tick the game
//! clock. Lock events and phase changes go to the optional event log.

use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};

use blockfall::core::{GameSnapshot, GameState, MonotonicTime, TimeSource};
use blockfall::input::{handle_key_event, is_press, should_quit};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{GameAction, FRAME_MS};
use blockfall::{AppConfig, EventLog, LogRecord};

const IDLE_POLL_MS: u64 = 500;

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    config.validate().context("invalid configuration")?;

    let mut log = match config.log_path.as_deref() {
        Some(path) => match EventLog::open(path) {
            Ok(log) => log,
            Err(e) => {
                eprintln!("[Blockfall] {e:#}; continuing without event log");
                EventLog::disabled()
            }
        },
        None => EventLog::disabled(),
    };

    let mut game = GameState::with_rules(config.width, config.height, config.rules(), config.seed);
    let time = MonotonicTime::new();
    log.record(
        time.now_ms(),
        &LogRecord::SessionStart {
            seed: config.seed,
            width: config.width,
            height: config.height,
        },
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game, &time, &mut log);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Some(e) = log.write_error() {
        eprintln!("[EventLog] write failed, event log disabled: {e}");
    }
    result?;

    println!(
        "[Blockfall] seed {} | score {} | level {} | lines {}",
        config.seed,
        game.score(),
        game.level(),
        game.lines()
    );
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    game: &mut GameState,
    time: &MonotonicTime,
    log: &mut EventLog,
) -> Result<()> {
    let view = GameView::default();

    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut phase = game.phase();
    let mut next_frame_ms = time.now_ms();
    // Cleared when a tick stops rescheduling; set again once the game runs.
    let mut ticking = true;

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.present(&fb)?;

        // Input with timeout until next frame. Idle phases only wake on input.
        let timeout = if ticking {
            next_frame_ms.saturating_sub(time.now_ms())
        } else {
            IDLE_POLL_MS
        };
        if event::poll(Duration::from_millis(timeout))? {
            match event::read()? {
                Event::Key(key) if is_press(&key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        game.apply_action(action);
                        if action == GameAction::Reset {
                            log.record(time.now_ms(), &LogRecord::Reset);
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let now = time.now_ms();
        if !ticking && game.phase().is_running() {
            ticking = true;
            next_frame_ms = now;
        }
        if ticking && now >= next_frame_ms {
            next_frame_ms = now + FRAME_MS as u64;
            ticking = game.tick(now).reschedule;
        }

        if let Some(event) = game.take_last_event() {
            log.record(now, &LogRecord::lock(&event, game.score()));
        }
        if game.phase() != phase {
            phase = game.phase();
            log.record(now, &LogRecord::phase(phase));
        }
    }
}

//! Terminal Tile Rush runner (default binary).
//!
//! This is the primary gameplay entrypoint.
//! It uses crossterm for mouse/key input and a custom framebuffer-based
//! renderer. Drag a tile onto a neighbour to swap it.
//!
//! Environment:
//! - `TILE_RUSH_CONFIG`: path to a JSON `GameConfig`
//! - `TILE_RUSH_SEED`: seed override
//! - `TILE_RUSH_LOG`: log file path (logging is off when unset); filter via `RUST_LOG`

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tile_rush::core::{AppliedSwap, BoardState, Game, GameConfig, GameSnapshot};
use tile_rush::input::{map_event, InputEvent};
use tile_rush::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tile_rush::types::TICK_MS;

fn main() -> Result<()> {
    init_logging()?;
    let config = load_config()?;
    let game = Game::new(config).context("invalid game configuration")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, game);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging() -> Result<()> {
    let Ok(path) = std::env::var("TILE_RUSH_LOG") else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("creating log file {path}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(file)
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_config() -> Result<GameConfig> {
    let mut config = match std::env::var("TILE_RUSH_CONFIG") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            GameConfig::from_json_str(&json).with_context(|| format!("parsing config {path}"))?
        }
        Err(_) => GameConfig::default(),
    };
    if let Ok(seed) = std::env::var("TILE_RUSH_SEED") {
        let seed = seed
            .parse()
            .with_context(|| format!("TILE_RUSH_SEED is not a number: {seed}"))?;
        config = config.with_seed(seed);
    }
    Ok(config)
}

fn run(term: &mut TerminalRenderer, mut game: Game) -> Result<()> {
    info!(seed = game.config().seed, "encounter started");

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut hint: Option<AppliedSwap> = None;
    let mut last_size = (0, 0);

    let tick_duration = Duration::from_millis(u64::from(TICK_MS));
    let mut last_tick = Instant::now();

    loop {
        // Layout follows the terminal so mouse cells map onto drawn tiles.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        if (w, h) != last_size {
            last_size = (w, h);
            term.invalidate();
        }
        let viewport = Viewport::new(w, h);
        let (rows, cols) = (game.grid().rows(), game.grid().cols());
        game.set_layout(view.board_layout(rows, cols, viewport));

        // Render.
        game.snapshot_into(&mut snap);
        view.render_into_with_hint(&snap, hint, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            let ev = event::read()?;
            if matches!(ev, Event::Resize(..)) {
                term.invalidate();
            }
            match map_event(&ev) {
                Some(InputEvent::Quit) => return Ok(()),
                Some(InputEvent::Restart) => {
                    hint = None;
                    game.restart()?;
                }
                Some(InputEvent::Hint) => {
                    hint = game.hint();
                    if hint.is_none() {
                        warn!("no productive swap on the board");
                    }
                }
                Some(InputEvent::PointerDown(pos)) => {
                    hint = None;
                    game.pointer_down(pos);
                }
                Some(InputEvent::PointerMove(pos)) => {
                    game.pointer_move(pos);
                }
                Some(InputEvent::PointerUp(pos)) => {
                    let report = game.pointer_up_at(pos);
                    if report.completed {
                        info!(score = game.encounter().score(), "encounter complete");
                    }
                }
                None => {}
            }
        }

        // Tick: cleared cells stay visible for one frame before refilling.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            if game.board().state() == BoardState::Settling {
                game.apply_gravity();
            }
        }
    }
}

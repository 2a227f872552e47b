//! Terminal snake runner (default binary).
//!
//! # Usage
//! ```bash
//! tui-snake                          # 10x10, pick the speed in the menu
//! tui-snake --speed fast --cols 16 --rows 12
//! tui-snake --seed 42 --log snake.log
//! ```
//!
//! The runner owns the menu, the fixed 60 FPS frame clock, mute state and
//! the terminal. All game rules live in `tui_snake::core`.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tui_snake::core::{Game, GameConfig, GameSnapshot};
use tui_snake::input::{handle_key_event, should_quit};
use tui_snake::term::{FrameBuffer, GameView, MenuView, TerminalRenderer, Viewport};
use tui_snake::types::{GameEvent, Intent, Speed, DEFAULT_COLS, DEFAULT_ROWS, FRAME_US};

/// Classic snake on a small grid, in the terminal
#[derive(Parser, Debug)]
#[command(name = "tui-snake")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Initially selected speed (normal, fast)
    #[arg(long, default_value = "normal", value_parser = parse_speed)]
    speed: Speed,

    /// Grid width in cells
    #[arg(long, default_value_t = DEFAULT_COLS)]
    cols: u16,

    /// Grid height in cells
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: u16,

    /// Food placement seed (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,

    /// Start with the bell muted
    #[arg(long)]
    mute: bool,

    /// Write logs to this file (filtered by RUST_LOG, default info)
    #[arg(long)]
    log: Option<PathBuf>,
}

fn parse_speed(s: &str) -> Result<Speed, String> {
    Speed::from_str(s).ok_or_else(|| format!("unknown speed '{s}' (expected normal or fast)"))
}

/// How a game screen was left
enum Exit {
    Menu,
    Quit,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log.as_deref())?;

    let seed = args.seed.unwrap_or_else(clock_seed);
    let config = GameConfig::new(args.cols, args.rows, args.speed, seed);
    config.validate().context("Invalid grid size")?;
    info!("tui-snake v{}", env!("CARGO_PKG_VERSION"));

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config, args.mute);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Logs go to a file; the terminal belongs to the game.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

fn viewport() -> Viewport {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    Viewport::new(w, h)
}

fn run(term: &mut TerminalRenderer, config: GameConfig, mute: bool) -> Result<()> {
    let mut fb = FrameBuffer::new(0, 0);
    let mut selected = config.speed;
    let mut muted = mute;

    loop {
        let Some(speed) = menu(term, &mut fb, selected)? else {
            return Ok(());
        };
        selected = speed;

        match play(term, &mut fb, config.with_speed(speed), &mut muted)? {
            Exit::Menu => continue,
            Exit::Quit => return Ok(()),
        }
    }
}

/// Speed selection screen. `None` means the player left.
fn menu(term: &mut TerminalRenderer, fb: &mut FrameBuffer, mut selected: Speed) -> Result<Option<Speed>> {
    loop {
        MenuView.render_into(selected, viewport(), fb);
        term.draw_swap(fb)?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(None);
                }
                match handle_key_event(key) {
                    Some(Intent::MoveUp | Intent::MoveDown) => selected = selected.toggled(),
                    Some(Intent::Confirm) => return Ok(Some(selected)),
                    Some(Intent::Escape) => return Ok(None),
                    _ => {}
                }
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}

fn play(
    term: &mut TerminalRenderer,
    fb: &mut FrameBuffer,
    config: GameConfig,
    muted: &mut bool,
) -> Result<Exit> {
    let mut game = Game::new(config)?;
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut intents: Vec<Intent> = Vec::with_capacity(16);
    let mut events: Vec<GameEvent> = Vec::with_capacity(8);

    let frame = Duration::from_micros(FRAME_US);
    let mut deadline = Instant::now() + frame;

    loop {
        // Collect input until the frame deadline.
        intents.clear();
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(Exit::Quit);
                    }
                    intents.extend(handle_key_event(key));
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Never try to catch up on missed frames.
        let now = Instant::now();
        deadline = (deadline + frame).max(now);

        events.clear();
        game.step_into(&intents, &mut events);

        for event in &events {
            match event {
                GameEvent::MuteToggled => {
                    *muted = !*muted;
                    info!("Muted: {}", muted);
                }
                GameEvent::MenuRequested => return Ok(Exit::Menu),
                // One bell per frame, whatever the cue.
                cue if cue.is_audible() && !*muted => term.bell(),
                _ => {}
            }
        }

        game.snapshot_into(&mut snap);
        view.render_into(&snap, viewport(), fb);
        term.draw_swap(fb)?;
    }
}

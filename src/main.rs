use anyhow::{Context, Result};
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use maze_chase::{Dir, GameConfig, Session, TerminalEvent};

mod render;

use render::Renderer;

const DEFAULT_TICK_MS: u64 = 70;

#[derive(Parser, Debug)]
#[command(version, about = "Eat every pellet before the ghosts catch you", long_about = None)]
struct Args {
    /// Milliseconds per frame; exactly one tick runs per frame
    #[arg(
        long,
        env = "PACMAN_TICK_MS",
        default_value_t = DEFAULT_TICK_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    tick_ms: u64,

    /// Seed for adversary movement, random when omitted
    #[arg(long, env = "PACMAN_SEED")]
    seed: Option<u64>,

    /// Write logs (filtered by RUST_LOG) to this file. Without it logs are
    /// discarded, since the game owns the terminal
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Steer(Dir),
    Quit,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &args);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(log_target(log_file)?);
    builder.init();
    Ok(())
}

/// Stderr would draw over the alternate screen, so logs go to a file or
/// nowhere.
fn log_target(log_file: Option<&Path>) -> Result<env_logger::Target> {
    let sink: Box<dyn Write + Send> = match log_file {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?,
        ),
        None => Box::new(io::sink()),
    };
    Ok(env_logger::Target::Pipe(sink))
}

fn run(stdout: &mut Stdout, args: &Args) -> Result<()> {
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    log::info!("starting with seed {seed}, {} ms per tick", args.tick_ms);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut session = Session::new(GameConfig::default()).context("Invalid game configuration")?;
    let mut renderer = Renderer::new(session.grid.width(), session.grid.height());
    let frame_time = Duration::from_millis(args.tick_ms);

    loop {
        let frame_start = Instant::now();
        renderer.render(stdout, &session.snapshot())?;

        let mut quit = false;
        let mut modal_error = None;
        let ended = session.tick(&mut rng, &mut |event: TerminalEvent| {
            match wait_for_ack(stdout, &renderer, event) {
                Ok(q) => quit = q,
                Err(err) => modal_error = Some(err),
            }
        });
        if let Some(err) = modal_error {
            return Err(err.into());
        }
        if quit {
            return Ok(());
        }
        if ended.is_some() {
            renderer.invalidate();
        }

        while let Some(remaining) = frame_time.checked_sub(frame_start.elapsed()) {
            if !event::poll(remaining)? {
                break;
            }
            if let Event::Key(key) = event::read()? {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    continue;
                }
                match key_action(key.code) {
                    Some(Action::Quit) => return Ok(()),
                    Some(Action::Steer(dir)) => session.post_input(dir),
                    None => {}
                }
            }
        }
    }
}

/// Shows the outcome and blocks until a key is pressed. Returns whether the
/// player asked to quit.
fn wait_for_ack(stdout: &mut Stdout, renderer: &Renderer, outcome: TerminalEvent) -> io::Result<bool> {
    renderer.draw_notice(stdout, outcome)?;
    // Keys already queued were meant for the maze, not the banner.
    while event::poll(Duration::ZERO)? {
        event::read()?;
    }
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(key_action(key.code) == Some(Action::Quit));
            }
        }
    }
}

fn key_action(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::Steer(Dir::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::Steer(Dir::Down)),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::Steer(Dir::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::Steer(Dir::Right)),
        _ => None,
    }
}

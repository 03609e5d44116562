#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the Wanderlands simulation in a terminal.

mod config;
mod input;
mod terminal;

use std::{
    io,
    path::PathBuf,
    sync::mpsc::{self, RecvTimeoutError},
    thread,
    time::Instant,
};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use wanderlands_core::{Command, Event};
use wanderlands_rendering::{Palette, RenderingBackend, Scene};
use wanderlands_system_session::{self as session, query, Session};

use input::Input;
use terminal::TerminalBackend;

/// Ticks simulated by a scripted run when `--ticks` is omitted.
const DEFAULT_SCRIPTED_TICKS: u64 = 10;

/// Explore a generated tile world populated by wandering enemies.
#[derive(Debug, Parser)]
#[command(name = "wanderlands", version)]
struct Args {
    /// TOML file with world and session settings.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for a reproducible world; omitted seeds come from the OS.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of enemies, overriding the configuration file.
    #[arg(long, value_name = "COUNT")]
    enemies: Option<u32>,
    /// Number of ticks to simulate before exiting.
    #[arg(long)]
    ticks: Option<u64>,
    /// Scripted keys (a, d, w, s), one consumed before each tick.
    #[arg(long, default_value = "", conflicts_with = "interactive")]
    keys: String,
    /// Read keys from stdin and advance on the configured tick interval.
    #[arg(long)]
    interactive: bool,
    /// Log filter directive, overriding RUST_LOG.
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,
    /// Color glyphs with 24-bit ANSI escapes.
    #[arg(long)]
    color: bool,
}

/// Entry point for the Wanderlands command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_level.as_deref())?;

    let mut config = config::load(args.config.as_deref())?;
    if let Some(enemies) = args.enemies {
        config.enemy_count = enemies;
    }
    let rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let mut session = Session::new(config, rng).context("invalid configuration")?;
    println!("{}", query::welcome_banner(&session));

    let mut backend = TerminalBackend::new(io::stdout().lock(), args.color, args.interactive);
    if args.interactive {
        run_interactive(&mut session, &mut backend, args.ticks)
    } else {
        let ticks = args.ticks.unwrap_or(DEFAULT_SCRIPTED_TICKS);
        run_scripted(&mut session, &mut backend, &args.keys, ticks)
    }
}

fn init_tracing(directive: Option<&str>) -> Result<()> {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log filter `{directive}`"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow!(error))
        .context("failed to install log subscriber")
}

/// Runs a fixed number of ticks, applying one scripted key before each, and
/// presents the final frame.
fn run_scripted<R, B>(
    session: &mut Session<R>,
    backend: &mut B,
    keys: &str,
    ticks: u64,
) -> Result<()>
where
    R: Rng,
    B: RenderingBackend,
{
    let mut inputs = keys.chars().filter_map(input::key_input);
    let mut events = Vec::new();
    for _ in 0..ticks {
        match inputs.next() {
            Some(Input::Quit) => break,
            Some(Input::Move(direction)) => {
                session::apply(session, Command::MovePlayer { direction }, &mut events);
            }
            None => {}
        }
        session::apply(session, Command::Tick, &mut events);
        log_events(&mut events);
    }

    let unused = inputs.count();
    if unused > 0 {
        warn!(unused, "scripted keys left after the last tick");
    }
    present(session, backend)
}

/// Advances on the configured tick interval while applying keys as they
/// arrive. Stops on `q`, when stdin closes or after `ticks` ticks.
fn run_interactive<R, B>(
    session: &mut Session<R>,
    backend: &mut B,
    ticks: Option<u64>,
) -> Result<()>
where
    R: Rng,
    B: RenderingBackend,
{
    let (sender, receiver) = mpsc::channel();
    let _reader = thread::spawn(move || input::forward_keys(io::stdin().lock(), sender));

    let interval = query::config(session).tick_interval();
    let mut next_tick = Instant::now() + interval;
    let mut events = Vec::new();
    present(session, backend)?;

    while ticks.map_or(true, |limit| query::tick(session) < limit) {
        let timeout = next_tick.saturating_duration_since(Instant::now());
        match receiver.recv_timeout(timeout) {
            Ok(Input::Move(direction)) => {
                session::apply(session, Command::MovePlayer { direction }, &mut events);
            }
            Ok(Input::Quit) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {
                session::apply(session, Command::Tick, &mut events);
                next_tick += interval;
            }
        }
        log_events(&mut events);
        present(session, backend)?;
    }

    info!(ticks = query::tick(session), "session ended");
    Ok(())
}

fn present<R, B>(session: &Session<R>, backend: &mut B) -> Result<()>
where
    B: RenderingBackend,
{
    let scene = Scene::capture(session, Palette::default())?;
    backend.present(&scene)
}

fn log_events(events: &mut Vec<Event>) {
    for event in events.drain(..) {
        debug!(?event, "session event");
    }
}

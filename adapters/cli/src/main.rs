#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Treasure Maze expedition.

mod args;
mod clock;
mod expedition;
mod settings;
mod terminal;

use std::{
    fs,
    io::{self, IsTerminal},
    path::Path,
    process::ExitCode,
    time::Instant,
};

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use treasure_maze_system_route_planner::PlanOptions;
use treasure_maze_system_traversal::TraversalConfig;
use treasure_maze_world::{generate, Maze};

use crate::{
    args::Cli,
    clock::FrameClock,
    expedition::{Outcome, Presenter},
    settings::{RunConfig, Settings},
    terminal::TerminalBackend,
};

/// Exit status reported when no route could be planned.
const PLANNING_FAILED_STATUS: u8 = 2;

/// Entry point for the Treasure Maze command-line interface.
fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing();

    let file_settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let config = file_settings.overlay(cli.settings()).resolve();
    debug!(?config, "settings resolved");

    let (mut maze, seed) = build_maze(&config)?;
    let options = PlanOptions {
        policy: config.policy,
        deadline: config
            .deadline
            .and_then(|budget| Instant::now().checked_add(budget)),
    };

    let expedition = if config.quiet {
        expedition::run(&mut maze, seed, &options, TraversalConfig::default(), None)?
    } else {
        let stdout = io::stdout();
        let ansi = stdout.is_terminal();
        let mut backend = TerminalBackend::new(stdout.lock(), ansi);
        let clock = FrameClock::new(config.fps);
        debug!(interval = ?clock.interval(), ansi, "animating traversal");
        expedition::run(
            &mut maze,
            seed,
            &options,
            TraversalConfig::default(),
            Some(Presenter::new(&mut backend, clock)),
        )?
    };

    println!("{expedition}");

    if expedition.outcome == Outcome::PlanningFailed {
        Ok(ExitCode::from(PLANNING_FAILED_STATUS))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_maze(config: &RunConfig) -> Result<(Maze, Option<u64>)> {
    if let Some(path) = &config.layout {
        return Ok((load_layout(path)?, None));
    }

    let seed = config.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let maze = generate(&config.generation, &mut rng)
        .with_context(|| format!("failed to generate maze from seed {seed}"))?;
    Ok((maze, Some(seed)))
}

fn load_layout(path: &Path) -> Result<Maze> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read layout {}", path.display()))?;
    Maze::from_layout(&text).with_context(|| format!("invalid layout {}", path.display()))
}

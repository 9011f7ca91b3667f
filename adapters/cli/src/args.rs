//! Command-line flags.

use std::path::PathBuf;

use clap::Parser;

use crate::settings::{OverlapChoice, PolicyChoice, Settings};

/// Plans the cheapest treasure hunt through a random maze and animates it.
#[derive(Debug, Parser)]
#[command(name = "treasure-maze", version, about, long_about = None)]
pub(crate) struct Cli {
    /// Seed for maze generation; drawn at random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of cells along each edge of the maze.
    #[arg(long, value_name = "N")]
    size: Option<u32>,

    /// Obstacle placements to draw (defaults to 3 * size).
    #[arg(long)]
    obstacles: Option<usize>,

    /// Damage tile placements to draw (defaults to size).
    #[arg(long)]
    damage: Option<usize>,

    /// Gold tile placements to draw (defaults to size).
    #[arg(long)]
    gold: Option<usize>,

    /// Treasure placements to draw.
    #[arg(long)]
    treasures: Option<usize>,

    /// Strategy used to order the treasures.
    #[arg(long, value_enum)]
    policy: Option<PolicyChoice>,

    /// Handling of random placements that land on an occupied cell.
    #[arg(long, value_enum)]
    overlap: Option<OverlapChoice>,

    /// Frames per second of the animation; 0 disables pacing.
    #[arg(long)]
    fps: Option<u32>,

    /// Gives up route planning after this many milliseconds.
    #[arg(long, value_name = "MS")]
    deadline_ms: Option<u64>,

    /// Loads the maze from a text layout instead of generating one.
    #[arg(long, value_name = "FILE")]
    layout: Option<PathBuf>,

    /// Settings file; flags given on the command line take precedence.
    #[arg(long, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Skips the animation and prints only the summary.
    #[arg(long)]
    quiet: bool,
}

impl Cli {
    /// Settings explicitly provided on the command line.
    pub(crate) fn settings(&self) -> Settings {
        Settings {
            seed: self.seed,
            size: self.size,
            obstacles: self.obstacles,
            damage: self.damage,
            gold: self.gold,
            treasures: self.treasures,
            policy: self.policy,
            overlap: self.overlap,
            fps: self.fps,
            deadline_ms: self.deadline_ms,
            layout: self.layout.clone(),
            quiet: self.quiet.then_some(true),
        }
    }
}

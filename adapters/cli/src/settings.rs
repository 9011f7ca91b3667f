//! Run settings layered from an optional TOML file and the command line.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use treasure_maze_system_route_planner::RoutePolicy;
use treasure_maze_world::{GenerationConfig, OverlapPolicy};

use crate::clock::FrameClock;

const DEFAULT_SIDE: u32 = 20;

/// Route policy as spelled on the command line and in settings files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum PolicyChoice {
    /// Every permutation, first cheapest wins.
    Exhaustive,
    /// Dynamic programming over goal subsets.
    HeldKarp,
    /// Nearest-neighbour tour refined by 2-opt.
    NearestNeighbor,
}

impl From<PolicyChoice> for RoutePolicy {
    fn from(choice: PolicyChoice) -> Self {
        match choice {
            PolicyChoice::Exhaustive => Self::Exhaustive,
            PolicyChoice::HeldKarp => Self::HeldKarp,
            PolicyChoice::NearestNeighbor => Self::NearestNeighbor,
        }
    }
}

/// Collision handling as spelled on the command line and in settings files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum OverlapChoice {
    /// Later placements overwrite earlier ones.
    LastWins,
    /// Placements never share a cell.
    Distinct,
}

impl From<OverlapChoice> for OverlapPolicy {
    fn from(choice: OverlapChoice) -> Self {
        match choice {
            OverlapChoice::LastWins => Self::LastWins,
            OverlapChoice::Distinct => Self::Distinct,
        }
    }
}

/// Partially specified run settings; unset fields fall back to defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct Settings {
    pub(crate) seed: Option<u64>,
    pub(crate) size: Option<u32>,
    pub(crate) obstacles: Option<usize>,
    pub(crate) damage: Option<usize>,
    pub(crate) gold: Option<usize>,
    pub(crate) treasures: Option<usize>,
    pub(crate) policy: Option<PolicyChoice>,
    pub(crate) overlap: Option<OverlapChoice>,
    pub(crate) fps: Option<u32>,
    pub(crate) deadline_ms: Option<u64>,
    pub(crate) layout: Option<PathBuf>,
    pub(crate) quiet: Option<bool>,
}

impl Settings {
    /// Reads settings from a TOML file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid settings file {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse settings toml contents")
    }

    /// Layers `overrides` on top of `self`; every field set in `overrides` wins.
    #[must_use]
    pub(crate) fn overlay(self, overrides: Settings) -> Self {
        Self {
            seed: overrides.seed.or(self.seed),
            size: overrides.size.or(self.size),
            obstacles: overrides.obstacles.or(self.obstacles),
            damage: overrides.damage.or(self.damage),
            gold: overrides.gold.or(self.gold),
            treasures: overrides.treasures.or(self.treasures),
            policy: overrides.policy.or(self.policy),
            overlap: overrides.overlap.or(self.overlap),
            fps: overrides.fps.or(self.fps),
            deadline_ms: overrides.deadline_ms.or(self.deadline_ms),
            layout: overrides.layout.or(self.layout),
            quiet: overrides.quiet.or(self.quiet),
        }
    }

    /// Fills in defaults, producing the configuration of a run.
    #[must_use]
    pub(crate) fn resolve(self) -> RunConfig {
        let mut generation = GenerationConfig::for_side(self.size.unwrap_or(DEFAULT_SIDE));
        if let Some(obstacles) = self.obstacles {
            generation.obstacles = obstacles;
        }
        if let Some(damage) = self.damage {
            generation.damage = damage;
        }
        if let Some(gold) = self.gold {
            generation.gold = gold;
        }
        if let Some(treasures) = self.treasures {
            generation.treasures = treasures;
        }
        if let Some(overlap) = self.overlap {
            generation.overlap = overlap.into();
        }

        RunConfig {
            seed: self.seed,
            generation,
            policy: self.policy.map_or(RoutePolicy::default(), RoutePolicy::from),
            deadline: self.deadline_ms.map(Duration::from_millis),
            fps: self.fps.unwrap_or(FrameClock::DEFAULT_FPS),
            layout: self.layout,
            quiet: self.quiet.unwrap_or(false),
        }
    }
}

/// Fully resolved configuration of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RunConfig {
    pub(crate) seed: Option<u64>,
    pub(crate) generation: GenerationConfig,
    pub(crate) policy: RoutePolicy,
    pub(crate) deadline: Option<Duration>,
    pub(crate) fps: u32,
    pub(crate) layout: Option<PathBuf>,
    pub(crate) quiet: bool,
}

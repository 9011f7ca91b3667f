//! Plans a route through a maze and walks it, presenting each step.

use std::fmt;

use anyhow::{Context, Result};
use tracing::{info, warn};
use treasure_maze_core::{CellCoord, StepRecord, TraversalState};
use treasure_maze_rendering::{Message, RenderingBackend, Scene, StatusLine, TITLE};
use treasure_maze_system_route_planner::{plan_route, PlanOptions};
use treasure_maze_system_traversal::{Traversal, TraversalConfig};
use treasure_maze_world::{query, Maze};

use crate::clock::FrameClock;

/// How an expedition ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    Victory,
    Defeat,
    PlanningFailed,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Victory => "victory",
            Self::Defeat => "defeat",
            Self::PlanningFailed => "planning failed",
        })
    }
}

/// Summary printed once the expedition ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Expedition {
    pub(crate) seed: Option<u64>,
    pub(crate) outcome: Outcome,
    pub(crate) goals: usize,
    pub(crate) route_cost: Option<u32>,
    pub(crate) steps: usize,
    pub(crate) last: Option<StepRecord>,
    pub(crate) failure: Option<String>,
}

impl fmt::Display for Expedition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "outcome: {}", self.outcome)?;
        if let Some(seed) = self.seed {
            writeln!(f, "seed: {seed}")?;
        }
        match self.route_cost {
            Some(cost) => writeln!(f, "route: {} treasures, cost {cost}", self.goals)?,
            None => writeln!(f, "route: none ({} treasures)", self.goals)?,
        }
        if let Some(reason) = &self.failure {
            writeln!(f, "reason: {reason}")?;
        }
        writeln!(f, "steps: {}", self.steps)?;
        if let Some(last) = &self.last {
            writeln!(f, "{}", StatusLine::from(last))?;
            write!(f, "treasures collected: {}", last.treasures_collected)?;
        }
        Ok(())
    }
}

/// Backend and pacing used for animated runs.
pub(crate) struct Presenter<'a> {
    backend: &'a mut dyn RenderingBackend,
    clock: FrameClock,
}

impl<'a> Presenter<'a> {
    pub(crate) fn new(backend: &'a mut dyn RenderingBackend, clock: FrameClock) -> Self {
        Self { backend, clock }
    }

    fn frame(&mut self, maze: &Maze, agent: CellCoord, status: StatusLine) -> Result<()> {
        let scene = Scene::capture(query::grid_view(maze), agent, status);
        self.backend.present(&scene)?;
        self.clock.tick();
        Ok(())
    }
}

/// Plans a route over the maze's treasures and walks it to the end.
///
/// A planning failure is reported as [`Outcome::PlanningFailed`]; only
/// presentation and traversal failures are returned as errors.
pub(crate) fn run(
    maze: &mut Maze,
    seed: Option<u64>,
    options: &PlanOptions,
    config: TraversalConfig,
    mut presenter: Option<Presenter<'_>>,
) -> Result<Expedition> {
    if let Some(presenter) = presenter.as_mut() {
        presenter.backend.begin(TITLE)?;
    }

    let start = query::start(maze);
    let goals = query::treasures(maze).len();
    let mut expedition = Expedition {
        seed,
        outcome: Outcome::PlanningFailed,
        goals,
        route_cost: None,
        steps: 0,
        last: None,
        failure: None,
    };

    let route = match plan_route(query::grid_view(maze), start, query::treasures(maze), options) {
        Ok(route) => route,
        Err(error) => {
            warn!(%error, policy = options.policy.name(), "route planning failed");
            if let Some(presenter) = presenter.as_mut() {
                presenter
                    .backend
                    .announce(&Message::PlanningFailed(error.to_string()))?;
            }
            expedition.failure = Some(error.to_string());
            return Ok(expedition);
        }
    };
    expedition.route_cost = Some(route.cost());
    info!(cost = route.cost(), goals, "route ready");

    let mut traversal = Traversal::new(config, start, &route);
    if let Some(presenter) = presenter.as_mut() {
        presenter.frame(maze, start, StatusLine::from(traversal.agent()))?;
    }

    while let Some(record) = traversal
        .step(maze)
        .context("traversal stopped unexpectedly")?
    {
        expedition.steps += 1;
        expedition.last = Some(record);
        if record.state == TraversalState::LowHealth {
            break;
        }
        if let Some(presenter) = presenter.as_mut() {
            presenter.frame(maze, record.position, StatusLine::from(&record))?;
        }
    }

    let (outcome, message) = match expedition.last.map(|record| record.state) {
        Some(TraversalState::LowHealth) => (Outcome::Defeat, Message::GameOver),
        _ => (Outcome::Victory, Message::AllTreasuresCollected),
    };
    expedition.outcome = outcome;
    if let Some(presenter) = presenter.as_mut() {
        presenter.backend.announce(&message)?;
    }

    Ok(expedition)
}

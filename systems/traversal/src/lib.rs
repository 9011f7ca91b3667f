#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Traversal system that walks the agent along a planned route.
//!
//! Each leg is searched against the live maze when it begins, so tiles
//! consumed on earlier legs no longer count as effects. Every cell the agent
//! enters is submitted to the world as [`Command::EnterCell`] and the
//! resulting events drive the agent statistics.

use std::collections::VecDeque;

use thiserror::Error;
use tracing::debug;
use treasure_maze_core::{
    AgentState, CellCoord, CellKind, Command, Direction, EntryError, Event, PathError, Route,
    StepRecord, TraversalState, DAMAGE_PENALTY, GOLD_REWARD, INITIAL_GOLD, INITIAL_HEALTH,
    MINIMUM_HEALTH,
};
use treasure_maze_system_pathfinding::PathFinder;
use treasure_maze_world::{self as world, query, Maze};

/// Statistics and thresholds applied while walking the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraversalConfig {
    /// Health the agent starts with.
    pub initial_health: i32,
    /// Gold the agent starts with.
    pub initial_gold: i32,
    /// Health lost on every damage tile.
    pub damage_penalty: i32,
    /// Gold gained on every gold tile.
    pub gold_reward: i32,
    /// Health below which the expedition fails.
    pub minimum_health: i32,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            initial_health: INITIAL_HEALTH,
            initial_gold: INITIAL_GOLD,
            damage_penalty: DAMAGE_PENALTY,
            gold_reward: GOLD_REWARD,
            minimum_health: MINIMUM_HEALTH,
        }
    }
}

/// Failures that end a traversal early.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TraversalError {
    /// The next leg of the route could not be searched.
    #[error(transparent)]
    Path(#[from] PathError),
    /// The world refused to move the agent onto a path cell.
    #[error("entry into {cell:?} rejected: {reason}")]
    EntryRejected {
        /// Cell the agent tried to enter.
        cell: CellCoord,
        /// Reason reported by the world.
        reason: EntryError,
    },
}

/// Step-wise walk of a route through a maze.
#[derive(Debug)]
pub struct Traversal {
    config: TraversalConfig,
    agent: AgentState,
    waypoints: VecDeque<CellCoord>,
    pending: VecDeque<CellCoord>,
    finder: PathFinder,
    events: Vec<Event>,
    steps: u32,
    treasures_collected: u32,
    finished: bool,
}

impl Traversal {
    /// Prepares a walk from `start` that visits the goals of `route` in order.
    #[must_use]
    pub fn new(config: TraversalConfig, start: CellCoord, route: &Route) -> Self {
        Self {
            config,
            agent: AgentState::new(start, config.initial_health, config.initial_gold),
            waypoints: route.order().iter().copied().collect(),
            pending: VecDeque::new(),
            finder: PathFinder::new(),
            events: Vec::new(),
            steps: 0,
            treasures_collected: 0,
            finished: false,
        }
    }

    /// Current agent statistics.
    #[must_use]
    pub const fn agent(&self) -> AgentState {
        self.agent
    }

    /// Reports whether a terminal record was produced or an error ended the walk.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advances the agent by one cell.
    ///
    /// Returns `Ok(None)` once the traversal has finished.
    pub fn step(&mut self, maze: &mut Maze) -> Result<Option<StepRecord>, TraversalError> {
        if self.finished {
            return Ok(None);
        }

        let outcome = self.advance(maze);
        if outcome.is_err() {
            self.finished = true;
        }
        outcome.map(Some)
    }

    /// Steps until the traversal finishes, collecting every record.
    pub fn run_to_end(&mut self, maze: &mut Maze) -> Result<Vec<StepRecord>, TraversalError> {
        let mut records = Vec::new();
        while let Some(record) = self.step(maze)? {
            records.push(record);
        }
        Ok(records)
    }

    fn advance(&mut self, maze: &mut Maze) -> Result<StepRecord, TraversalError> {
        loop {
            if let Some(cell) = self.pending.pop_front() {
                return self.enter(maze, cell);
            }

            let Some(target) = self.waypoints.pop_front() else {
                return Ok(self.record(None, TraversalState::AllTreasuresVisited));
            };

            let path = self
                .finder
                .find(query::grid_view(maze), self.agent.position, target)?;
            debug!(
                from = ?self.agent.position,
                to = ?target,
                cost = path.cost(),
                "leg started"
            );
            // The agent already stands on the first cell.
            self.pending.extend(path.into_cells().into_iter().skip(1));
        }
    }

    fn enter(&mut self, maze: &mut Maze, cell: CellCoord) -> Result<StepRecord, TraversalError> {
        debug_assert!(
            Direction::between(self.agent.position, cell).is_some(),
            "step from {:?} to {cell:?} is not a single move",
            self.agent.position
        );
        self.events.clear();
        world::apply(maze, Command::EnterCell { cell }, &mut self.events);

        let mut triggered = None;
        for event in &self.events {
            match *event {
                Event::EntryRejected { cell, reason } => {
                    return Err(TraversalError::EntryRejected { cell, reason });
                }
                Event::TileConsumed { kind, .. } => triggered = Some(kind),
                Event::CellEntered { .. } => {}
            }
        }

        self.agent.position = cell;
        let mut state = match triggered {
            Some(CellKind::Damage) => {
                self.agent.health -= self.config.damage_penalty;
                TraversalState::Damaged
            }
            Some(CellKind::Gold) => {
                self.agent.gold += self.config.gold_reward;
                TraversalState::Collected
            }
            Some(CellKind::Treasure) => {
                self.treasures_collected += 1;
                TraversalState::Collected
            }
            _ => TraversalState::Traveling,
        };

        if self.agent.health < self.config.minimum_health {
            state = TraversalState::LowHealth;
        } else if self.pending.is_empty() && self.waypoints.iter().all(|goal| *goal == cell) {
            // Remaining legs, if any, start and end here and add no steps.
            self.waypoints.clear();
            state = TraversalState::AllTreasuresVisited;
        }

        Ok(self.record(triggered, state))
    }

    fn record(&mut self, triggered: Option<CellKind>, state: TraversalState) -> StepRecord {
        let record = StepRecord {
            step: self.steps,
            position: self.agent.position,
            triggered,
            health: self.agent.health,
            gold: self.agent.gold,
            treasures_collected: self.treasures_collected,
            state,
        };
        self.steps += 1;

        if state.is_terminal() {
            self.finished = true;
            debug!(
                steps = self.steps,
                health = self.agent.health,
                gold = self.agent.gold,
                treasures = self.treasures_collected,
                ?state,
                "traversal finished"
            );
        }

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maze(layout: &str) -> Maze {
        Maze::from_layout(layout).expect("valid layout")
    }

    #[test]
    fn empty_route_finishes_on_first_step() {
        let mut maze = maze("P.\n..");
        let mut traversal =
            Traversal::new(TraversalConfig::default(), CellCoord::new(0, 0), &Route::default());

        let record = traversal.step(&mut maze).expect("step").expect("record");

        assert_eq!(record.step, 0);
        assert_eq!(record.position, CellCoord::new(0, 0));
        assert_eq!(record.triggered, None);
        assert_eq!(record.health, INITIAL_HEALTH);
        assert_eq!(record.gold, INITIAL_GOLD);
        assert_eq!(record.state, TraversalState::AllTreasuresVisited);
        assert_eq!(traversal.step(&mut maze), Ok(None));
    }

    #[test]
    fn route_ending_at_start_adds_no_steps() {
        let mut maze = maze("P.\n..");
        let route = Route::new(vec![CellCoord::new(0, 0)], 0);
        let mut traversal = Traversal::new(TraversalConfig::default(), CellCoord::new(0, 0), &route);

        let records = traversal.run_to_end(&mut maze).expect("run");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].state, TraversalState::AllTreasuresVisited);
    }

    #[test]
    fn failed_leg_finishes_the_traversal() {
        let mut maze = maze("P#\n#T");
        let route = Route::new(vec![CellCoord::new(1, 1)], 0);
        let mut traversal = Traversal::new(TraversalConfig::default(), CellCoord::new(0, 0), &route);

        assert_eq!(
            traversal.step(&mut maze),
            Err(TraversalError::Path(PathError::Unreachable {
                start: CellCoord::new(0, 0),
                goal: CellCoord::new(1, 1),
            }))
        );
        assert!(traversal.is_finished());
        assert_eq!(traversal.step(&mut maze), Ok(None));
    }
}

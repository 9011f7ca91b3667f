#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Route planning system that orders goal cells by total path cost.
//!
//! Every policy consults the same cost oracle: the A* path length between
//! consecutive waypoints. Leg costs are searched once and memoised in a cost
//! matrix before the chosen policy orders the goals.

mod exhaustive;
mod greedy;
mod held_karp;
mod matrix;

use std::time::Instant;

use tracing::debug;
use treasure_maze_core::{CellCoord, GridView, Route, RouteError};

use self::matrix::CostMatrix;

/// Largest goal set the exhaustive policy accepts.
pub const EXHAUSTIVE_GOAL_LIMIT: usize = 10;
/// Largest goal set the Held-Karp policy accepts.
pub const HELD_KARP_GOAL_LIMIT: usize = 16;

/// Strategy used to order the goals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RoutePolicy {
    /// Enumerates every permutation in input order and keeps the first
    /// cheapest one. Exact.
    #[default]
    Exhaustive,
    /// Dynamic programming over goal subsets. Exact, but may return a
    /// different order than [`RoutePolicy::Exhaustive`] when costs tie.
    HeldKarp,
    /// Greedy nearest-neighbour tour refined by 2-opt. Approximate.
    NearestNeighbor,
}

impl RoutePolicy {
    /// Human-readable policy name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Exhaustive => "exhaustive",
            Self::HeldKarp => "held-karp",
            Self::NearestNeighbor => "nearest-neighbor",
        }
    }

    /// Largest goal count the policy accepts, if bounded.
    #[must_use]
    pub const fn goal_limit(self) -> Option<usize> {
        match self {
            Self::Exhaustive => Some(EXHAUSTIVE_GOAL_LIMIT),
            Self::HeldKarp => Some(HELD_KARP_GOAL_LIMIT),
            Self::NearestNeighbor => None,
        }
    }

    /// Reports whether the policy always returns a cheapest order.
    #[must_use]
    pub const fn is_exact(self) -> bool {
        !matches!(self, Self::NearestNeighbor)
    }
}

/// Options that control a planning phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlanOptions {
    /// Ordering strategy.
    pub policy: RoutePolicy,
    /// Instant after which planning gives up.
    pub deadline: Option<Instant>,
}

impl PlanOptions {
    /// Creates options using `policy` without a deadline.
    #[must_use]
    pub const fn with_policy(policy: RoutePolicy) -> Self {
        Self {
            policy,
            deadline: None,
        }
    }
}

/// Orders `goals` so the walk `start → goals[0] → goals[1] → …` is cheapest.
///
/// An empty goal set yields an empty route of cost zero. Any leg the
/// planner cannot connect aborts planning with the path error.
pub fn plan_route(
    grid: GridView<'_>,
    start: CellCoord,
    goals: &[CellCoord],
    options: &PlanOptions,
) -> Result<Route, RouteError> {
    if goals.is_empty() {
        return Ok(Route::default());
    }

    let policy = options.policy;
    if let Some(limit) = policy.goal_limit() {
        if goals.len() > limit {
            return Err(RouteError::GoalLimitExceeded {
                goals: goals.len(),
                limit,
                policy: policy.name(),
            });
        }
    }

    let mut budget = Budget::new(options.deadline);
    let matrix = CostMatrix::build(grid, start, goals, &budget)?;

    let (indices, cost) = match policy {
        RoutePolicy::Exhaustive => exhaustive::order(&matrix, &mut budget)?,
        RoutePolicy::HeldKarp => held_karp::order(&matrix, &mut budget)?,
        RoutePolicy::NearestNeighbor => greedy::order(&matrix, &mut budget)?,
    };

    let order: Vec<CellCoord> = indices.iter().map(|&index| goals[index]).collect();
    debug!(
        policy = policy.name(),
        goals = goals.len(),
        cost,
        ?order,
        "route planned"
    );

    Ok(Route::new(order, cost))
}

/// Total cost of visiting `order` from `start`, searching every leg.
pub fn route_cost(
    grid: GridView<'_>,
    start: CellCoord,
    order: &[CellCoord],
) -> Result<u32, RouteError> {
    let mut finder = treasure_maze_system_pathfinding::PathFinder::new();
    let mut current = start;
    let mut total = 0_u32;
    for &goal in order {
        let leg = finder.find(grid, current, goal)?;
        total = total.saturating_add(leg.cost());
        current = goal;
    }
    Ok(total)
}

/// Deadline bookkeeping shared by the policies.
#[derive(Debug)]
pub(crate) struct Budget {
    deadline: Option<Instant>,
    ticks: u32,
}

impl Budget {
    const CHECK_INTERVAL: u32 = 1024;

    pub(crate) fn new(deadline: Option<Instant>) -> Self {
        Self { deadline, ticks: 0 }
    }

    /// Fails once the deadline passed.
    pub(crate) fn check(&self) -> Result<(), RouteError> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(RouteError::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    /// Counts one unit of work, consulting the clock every
    /// [`Budget::CHECK_INTERVAL`] units.
    pub(crate) fn tick(&mut self) -> Result<(), RouteError> {
        self.ticks = self.ticks.wrapping_add(1);
        if self.ticks % Self::CHECK_INTERVAL == 0 {
            self.check()
        } else {
            Ok(())
        }
    }
}

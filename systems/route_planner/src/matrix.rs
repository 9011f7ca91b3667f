//! Memoised leg costs between the planning origin and the goals.

use treasure_maze_core::{CellCoord, GridView, RouteError};
use treasure_maze_system_pathfinding::PathFinder;

use crate::Budget;

/// Dense table of leg costs.
///
/// Node `0` is the planning origin and node `i + 1` is goal `i`. Legs into
/// the origin are never searched because no route returns to it.
#[derive(Debug)]
pub(crate) struct CostMatrix {
    goals: usize,
    costs: Vec<u32>,
}

impl CostMatrix {
    /// Searches every leg a route may use.
    pub(crate) fn build(
        grid: GridView<'_>,
        start: CellCoord,
        goals: &[CellCoord],
        budget: &Budget,
    ) -> Result<Self, RouteError> {
        let nodes = goals.len() + 1;
        let mut costs = vec![0; nodes * goals.len()];
        let mut finder = PathFinder::new();

        for from in 0..nodes {
            let origin = if from == 0 { start } else { goals[from - 1] };
            for (to, &goal) in goals.iter().enumerate() {
                if from == to + 1 {
                    continue;
                }
                budget.check()?;
                let path = finder.find(grid, origin, goal)?;
                costs[from * goals.len() + to] = path.cost();
            }
        }

        Ok(Self {
            goals: goals.len(),
            costs,
        })
    }

    /// Number of goals covered by the matrix.
    pub(crate) fn goals(&self) -> usize {
        self.goals
    }

    /// Cost of walking from the origin to goal `to`.
    pub(crate) fn from_start(&self, to: usize) -> u32 {
        self.costs[to]
    }

    /// Cost of walking from goal `from` to goal `to`.
    pub(crate) fn between(&self, from: usize, to: usize) -> u32 {
        if from == to {
            return 0;
        }
        self.costs[(from + 1) * self.goals + to]
    }

    /// Total cost of visiting the goals in `order`.
    pub(crate) fn route_cost(&self, order: &[usize]) -> u32 {
        let Some((&first, rest)) = order.split_first() else {
            return 0;
        };
        let mut total = self.from_start(first);
        let mut previous = first;
        for &next in rest {
            total = total.saturating_add(self.between(previous, next));
            previous = next;
        }
        total
    }
}

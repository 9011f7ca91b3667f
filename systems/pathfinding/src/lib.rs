#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! A* search over the maze grid.
//!
//! Moves are unit-cost and 4-connected, so the Manhattan distance to the goal
//! is an admissible and consistent heuristic. Obstacle cells are never
//! enqueued; every other kind is traversable at the same cost. Frontier ties
//! on `g + h` resolve toward the smaller cell, which keeps results stable for
//! a fixed grid.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::trace;
use treasure_maze_core::{CellCoord, Direction, GridView, Path, PathError};

/// Finds a shortest obstacle-free path from `start` to `goal`.
///
/// Convenience wrapper around a fresh [`PathFinder`].
pub fn find_path(grid: GridView<'_>, start: CellCoord, goal: CellCoord) -> Result<Path, PathError> {
    PathFinder::default().find(grid, start, goal)
}

/// Reusable A* search that keeps its scratch buffers between calls.
#[derive(Debug, Default)]
pub struct PathFinder {
    best_cost: Vec<u32>,
    came_from: Vec<Option<CellCoord>>,
    frontier: BinaryHeap<Reverse<FrontierEntry>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierEntry {
    priority: u32,
    column: u32,
    row: u32,
    cost: u32,
}

impl FrontierEntry {
    fn cell(&self) -> CellCoord {
        CellCoord::new(self.column, self.row)
    }
}

impl PathFinder {
    /// Creates a path finder with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds a shortest obstacle-free path from `start` to `goal`.
    ///
    /// The start cell is never checked for obstacles. A goal that is an
    /// obstacle can only be reached when it equals the start.
    pub fn find(
        &mut self,
        grid: GridView<'_>,
        start: CellCoord,
        goal: CellCoord,
    ) -> Result<Path, PathError> {
        let _ = grid.checked_kind(start)?;
        let _ = grid.checked_kind(goal)?;

        self.reset(grid);

        let start_index = index_of(grid, start)?;
        self.best_cost[start_index] = 0;
        self.frontier.push(Reverse(FrontierEntry {
            priority: 0,
            column: start.column(),
            row: start.row(),
            cost: 0,
        }));

        let mut expanded = 0_usize;
        while let Some(Reverse(entry)) = self.frontier.pop() {
            let current = entry.cell();
            if current == goal {
                trace!(?start, ?goal, cost = entry.cost, expanded, "path found");
                return self.reconstruct(grid, start, goal);
            }

            let current_index = index_of(grid, current)?;
            let current_cost = self.best_cost[current_index];
            if entry.cost > current_cost {
                continue;
            }
            expanded += 1;

            let next_cost = current_cost.saturating_add(1);
            for direction in Direction::EXPANSION_ORDER {
                let Some(neighbor) = current.step(direction, grid.side()) else {
                    continue;
                };
                let Some(kind) = grid.kind(neighbor) else {
                    continue;
                };
                if !kind.is_traversable() {
                    continue;
                }

                let neighbor_index = index_of(grid, neighbor)?;
                if next_cost >= self.best_cost[neighbor_index] {
                    continue;
                }

                self.best_cost[neighbor_index] = next_cost;
                self.came_from[neighbor_index] = Some(current);
                self.frontier.push(Reverse(FrontierEntry {
                    priority: next_cost.saturating_add(neighbor.manhattan_distance(goal)),
                    column: neighbor.column(),
                    row: neighbor.row(),
                    cost: next_cost,
                }));
            }
        }

        trace!(?start, ?goal, expanded, "goal unreachable");
        Err(PathError::Unreachable { start, goal })
    }

    fn reset(&mut self, grid: GridView<'_>) {
        let side = usize::try_from(grid.side()).unwrap_or(0);
        let cell_count = side.saturating_mul(side);

        if self.best_cost.len() != cell_count {
            self.best_cost = vec![u32::MAX; cell_count];
            self.came_from = vec![None; cell_count];
        } else {
            self.best_cost.fill(u32::MAX);
            self.came_from.fill(None);
        }
        self.frontier.clear();
    }

    fn reconstruct(
        &self,
        grid: GridView<'_>,
        start: CellCoord,
        goal: CellCoord,
    ) -> Result<Path, PathError> {
        let mut cells = vec![goal];
        let mut current = goal;

        // Each backpointer strictly lowers the stored cost, so the walk ends
        // after at most `cost(goal)` hops.
        while current != start {
            let index = index_of(grid, current)?;
            current = self.came_from[index].ok_or(PathError::Unreachable { start, goal })?;
            cells.push(current);
        }

        cells.reverse();
        Path::from_cells(cells).ok_or(PathError::Unreachable { start, goal })
    }
}

fn index_of(grid: GridView<'_>, cell: CellCoord) -> Result<usize, PathError> {
    let side = usize::try_from(grid.side()).unwrap_or(0);
    let column = usize::try_from(cell.column()).unwrap_or(usize::MAX);
    let row = usize::try_from(cell.row()).unwrap_or(usize::MAX);
    if column >= side || row >= side {
        return Err(PathError::InvalidCell {
            cell,
            side: grid.side(),
        });
    }
    Ok(row * side + column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use treasure_maze_core::CellKind;

    fn open_grid(side: u32) -> Vec<CellKind> {
        vec![CellKind::Free; (side * side) as usize]
    }

    #[test]
    fn start_equal_to_goal_yields_single_cell() {
        let cells = open_grid(3);
        let grid = GridView::new(&cells, 3);
        let origin = CellCoord::new(1, 1);

        let path = find_path(grid, origin, origin).expect("path");

        assert_eq!(path.cells(), &[origin]);
        assert_eq!(path.cost(), 0);
    }

    #[test]
    fn out_of_bounds_cells_are_rejected() {
        let cells = open_grid(3);
        let grid = GridView::new(&cells, 3);

        assert_eq!(
            find_path(grid, CellCoord::new(3, 0), CellCoord::new(0, 0)),
            Err(PathError::InvalidCell {
                cell: CellCoord::new(3, 0),
                side: 3,
            })
        );
        assert_eq!(
            find_path(grid, CellCoord::new(0, 0), CellCoord::new(0, 9)),
            Err(PathError::InvalidCell {
                cell: CellCoord::new(0, 9),
                side: 3,
            })
        );
    }

    #[test]
    fn obstacle_start_is_not_checked() {
        let mut cells = open_grid(3);
        cells[0] = CellKind::Obstacle;
        let grid = GridView::new(&cells, 3);

        let path = find_path(grid, CellCoord::new(0, 0), CellCoord::new(2, 0)).expect("path");

        assert_eq!(path.cost(), 2);
    }

    #[test]
    fn obstacle_goal_is_unreachable() {
        let mut cells = open_grid(3);
        cells[8] = CellKind::Obstacle;
        let grid = GridView::new(&cells, 3);

        assert_eq!(
            find_path(grid, CellCoord::new(0, 0), CellCoord::new(2, 2)),
            Err(PathError::Unreachable {
                start: CellCoord::new(0, 0),
                goal: CellCoord::new(2, 2),
            })
        );
    }

    #[test]
    fn scratch_buffers_are_reused_across_grid_sizes() {
        let mut finder = PathFinder::new();
        let small = open_grid(2);
        let large = open_grid(5);

        let first = finder
            .find(GridView::new(&large, 5), CellCoord::new(0, 0), CellCoord::new(4, 4))
            .expect("path");
        let second = finder
            .find(GridView::new(&small, 2), CellCoord::new(1, 1), CellCoord::new(0, 0))
            .expect("path");

        assert_eq!(first.cost(), 8);
        assert_eq!(second.cost(), 2);
    }
}

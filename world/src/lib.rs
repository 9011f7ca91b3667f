#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative maze state management for Treasure Maze.

mod generation;
mod layout;

use treasure_maze_core::{CellCoord, CellKind, Command, EntryError, Event, GridView};

pub use generation::{generate, GenerationConfig, OverlapPolicy};

/// Represents the authoritative maze grid for a single run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    side: u32,
    cells: Vec<CellKind>,
    start: CellCoord,
    treasures: Vec<CellCoord>,
}

impl Maze {
    /// Creates a maze of free cells with the provided side length.
    ///
    /// The start cell is recorded but not stamped; callers place
    /// [`CellKind::PlayerStart`] once all other placements are done.
    pub(crate) fn blank(side: u32, start: CellCoord) -> Self {
        let capacity_u64 = u64::from(side) * u64::from(side);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            side,
            cells: vec![CellKind::Free; capacity],
            start,
            treasures: Vec::new(),
        }
    }

    fn view(&self) -> GridView<'_> {
        GridView::new(&self.cells, self.side)
    }

    pub(crate) fn kind(&self, cell: CellCoord) -> Option<CellKind> {
        self.view().kind(cell)
    }

    pub(crate) fn set(&mut self, cell: CellCoord, kind: CellKind) {
        if let Some(index) = self.view().index(cell) {
            self.cells[index] = kind;
        }
    }

    pub(crate) fn record_treasure(&mut self, cell: CellCoord) {
        self.treasures.push(cell);
    }

    fn enter(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        let Some(kind) = self.kind(cell) else {
            out_events.push(Event::EntryRejected {
                cell,
                reason: EntryError::OutOfBounds,
            });
            return;
        };

        if !kind.is_traversable() {
            out_events.push(Event::EntryRejected {
                cell,
                reason: EntryError::Obstacle,
            });
            return;
        }

        if kind.is_effect_tile() {
            self.set(cell, CellKind::Free);
            out_events.push(Event::TileConsumed { cell, kind });
        } else {
            out_events.push(Event::CellEntered { cell });
        }
    }
}

/// Applies the provided command to the maze, mutating state deterministically.
pub fn apply(maze: &mut Maze, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::EnterCell { cell } => maze.enter(cell, out_events),
    }
}

/// Query functions that provide read-only access to the maze state.
pub mod query {
    use super::Maze;
    use treasure_maze_core::{CellCoord, CellKind, GridView};

    /// Exposes a read-only view of the dense cell grid.
    #[must_use]
    pub fn grid_view(maze: &Maze) -> GridView<'_> {
        maze.view()
    }

    /// Number of cells along each edge of the maze.
    #[must_use]
    pub fn side(maze: &Maze) -> u32 {
        maze.side
    }

    /// Kind currently stored at the cell, if it lies inside the maze.
    #[must_use]
    pub fn kind(maze: &Maze, cell: CellCoord) -> Option<CellKind> {
        maze.kind(cell)
    }

    /// Cell where the agent begins the run.
    #[must_use]
    pub fn start(maze: &Maze) -> CellCoord {
        maze.start
    }

    /// Treasure cells captured at generation time, in placement order.
    ///
    /// The set is never recomputed, so consumed treasures remain listed.
    #[must_use]
    pub fn treasures(maze: &Maze) -> &[CellCoord] {
        &maze.treasures
    }

    /// Counts the cells currently carrying `kind`.
    #[must_use]
    pub fn count(maze: &Maze, kind: CellKind) -> usize {
        maze.cells.iter().filter(|cell| **cell == kind).count()
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Treasure Maze engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative maze, and pure systems. Systems submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Traversal progress leaves the core as plain
//! [`StepRecord`] values so presentation layers never parse strings.

use serde::{Deserialize, Serialize};

mod errors;

pub use errors::{EntryError, GenerationError, LayoutError, PathError, RouteError};

/// Health the agent starts every expedition with.
pub const INITIAL_HEALTH: i32 = 100;
/// Gold the agent starts every expedition with.
pub const INITIAL_GOLD: i32 = 10;
/// Health removed when the agent enters a damage tile.
pub const DAMAGE_PENALTY: i32 = 15;
/// Gold granted when the agent enters a gold tile.
pub const GOLD_REWARD: i32 = 10;
/// Health below which the expedition ends in failure.
pub const MINIMUM_HEALTH: i32 = 50;

/// Commands that express all permissible maze mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Moves the agent onto the provided cell, triggering any tile effect.
    EnterCell {
        /// Cell the agent steps onto.
        cell: CellCoord,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that the agent entered a cell without an effect.
    CellEntered {
        /// Cell the agent now occupies.
        cell: CellCoord,
    },
    /// Confirms that the agent consumed an effect tile, reverting it to free.
    TileConsumed {
        /// Cell the agent now occupies.
        cell: CellCoord,
        /// Kind the tile carried before it was consumed.
        kind: CellKind,
    },
    /// Reports that an entry request was refused by the world.
    EntryRejected {
        /// Cell named by the rejected request.
        cell: CellCoord,
        /// Specific reason the entry failed.
        reason: EntryError,
    },
}

/// Cardinal movement directions available to the agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Neighbour expansion order used by the path search.
    pub const EXPANSION_ORDER: [Direction; 4] = [
        Direction::West,
        Direction::East,
        Direction::North,
        Direction::South,
    ];

    /// Resolves the direction leading from `from` to an adjacent `to`.
    ///
    /// Returns `None` when the cells are not 4-adjacent.
    #[must_use]
    pub fn between(from: CellCoord, to: CellCoord) -> Option<Self> {
        if !from.is_adjacent(to) {
            return None;
        }

        if to.column() > from.column() {
            Some(Self::East)
        } else if to.column() < from.column() {
            Some(Self::West)
        } else if to.row() > from.row() {
            Some(Self::South)
        } else {
            Some(Self::North)
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Reports whether the two cells share an edge.
    #[must_use]
    pub fn is_adjacent(self, other: CellCoord) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Returns the neighbouring cell in `direction` inside a `side`-wide square grid.
    #[must_use]
    pub fn step(self, direction: Direction, side: u32) -> Option<CellCoord> {
        let (column, row) = match direction {
            Direction::North => (Some(self.column), self.row.checked_sub(1)),
            Direction::South => (Some(self.column), self.row.checked_add(1)),
            Direction::West => (self.column.checked_sub(1), Some(self.row)),
            Direction::East => (self.column.checked_add(1), Some(self.row)),
        };
        let cell = CellCoord::new(column?, row?);
        (cell.column < side && cell.row < side).then_some(cell)
    }
}

/// Fixed set of states a maze cell can carry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Traversable cell without an effect.
    #[default]
    Free,
    /// Impassable cell.
    Obstacle,
    /// Cell that removes health once.
    Damage,
    /// Cell that grants gold once.
    Gold,
    /// Cell holding a treasure the agent plans to collect.
    Treasure,
    /// Cell where the agent begins.
    PlayerStart,
}

impl CellKind {
    /// Reports whether the path search may expand into the cell.
    #[must_use]
    pub const fn is_traversable(self) -> bool {
        !matches!(self, Self::Obstacle)
    }

    /// Reports whether entering the cell triggers a one-shot effect.
    #[must_use]
    pub const fn is_effect_tile(self) -> bool {
        matches!(self, Self::Damage | Self::Gold | Self::Treasure)
    }

    /// Single-character glyph used by text layouts and terminal frames.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Free => '.',
            Self::Obstacle => '#',
            Self::Damage => 'D',
            Self::Gold => 'G',
            Self::Treasure => 'T',
            Self::PlayerStart => 'P',
        }
    }

    /// Parses a glyph produced by [`CellKind::glyph`].
    #[must_use]
    pub const fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(Self::Free),
            '#' => Some(Self::Obstacle),
            'D' => Some(Self::Damage),
            'G' => Some(Self::Gold),
            'T' => Some(Self::Treasure),
            'P' => Some(Self::PlayerStart),
            _ => None,
        }
    }
}

/// Read-only view into the dense, row-major maze grid.
#[derive(Clone, Copy, Debug)]
pub struct GridView<'a> {
    cells: &'a [CellKind],
    side: u32,
}

impl<'a> GridView<'a> {
    /// Captures a new grid view backed by the provided cell slice.
    ///
    /// Cells beyond `side * side` are ignored; missing cells read as absent.
    #[must_use]
    pub fn new(cells: &'a [CellKind], side: u32) -> Self {
        Self { cells, side }
    }

    /// Number of cells along each edge of the square grid.
    #[must_use]
    pub const fn side(&self) -> u32 {
        self.side
    }

    /// Kind stored at the provided cell, if it lies inside the grid.
    #[must_use]
    pub fn kind(&self, cell: CellCoord) -> Option<CellKind> {
        self.index(cell).and_then(|index| self.cells.get(index).copied())
    }

    /// Kind stored at the cell, or [`PathError::InvalidCell`] when out of bounds.
    pub fn checked_kind(&self, cell: CellCoord) -> Result<CellKind, PathError> {
        self.kind(cell).ok_or(PathError::InvalidCell {
            cell,
            side: self.side,
        })
    }

    /// Iterates over every cell together with its kind in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, CellKind)> + 'a {
        let side = self.side;
        let limit = usize::try_from(u64::from(side) * u64::from(side)).unwrap_or(0);
        self.cells
            .iter()
            .take(limit)
            .enumerate()
            .map(move |(index, kind)| {
                let index = index as u64;
                let side = u64::from(side);
                let cell = CellCoord::new((index % side) as u32, (index / side) as u32);
                (cell, *kind)
            })
    }

    /// Returns the linear offset of `cell`, if it lies inside the grid.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.side && cell.row() < self.side {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.side).ok()?;
            let index = row.checked_mul(width)?.checked_add(column)?;
            (index < self.cells.len()).then_some(index)
        } else {
            None
        }
    }
}

/// Ordered cells leading from a source to a destination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    cells: Vec<CellCoord>,
}

impl Path {
    /// Wraps a non-empty sequence of cells.
    ///
    /// Returns `None` when `cells` is empty.
    #[must_use]
    pub fn from_cells(cells: Vec<CellCoord>) -> Option<Self> {
        (!cells.is_empty()).then_some(Self { cells })
    }

    /// Cells composing the path, source first.
    #[must_use]
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    /// First cell of the path.
    #[must_use]
    pub fn source(&self) -> CellCoord {
        self.cells[0]
    }

    /// Last cell of the path.
    #[must_use]
    pub fn destination(&self) -> CellCoord {
        self.cells[self.cells.len() - 1]
    }

    /// Number of moves required to walk the path.
    #[must_use]
    pub fn cost(&self) -> u32 {
        u32::try_from(self.cells.len() - 1).unwrap_or(u32::MAX)
    }

    /// Consumes the path, yielding the underlying cells.
    #[must_use]
    pub fn into_cells(self) -> Vec<CellCoord> {
        self.cells
    }
}

/// Planned visiting order of the goal cells.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    order: Vec<CellCoord>,
    cost: u32,
}

impl Route {
    /// Creates a route from an explicit visiting order and its total cost.
    #[must_use]
    pub fn new(order: Vec<CellCoord>, cost: u32) -> Self {
        Self { order, cost }
    }

    /// Goals in the order they will be visited.
    #[must_use]
    pub fn order(&self) -> &[CellCoord] {
        &self.order
    }

    /// Sum of the leg costs starting from the planning origin.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }

    /// Reports whether the route visits no goals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Running statistics of the agent walking the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentState {
    /// Cell the agent currently occupies.
    pub position: CellCoord,
    /// Remaining health; may drop below zero.
    pub health: i32,
    /// Gold carried by the agent.
    pub gold: i32,
}

impl AgentState {
    /// Creates an agent at `position` with the provided starting statistics.
    #[must_use]
    pub const fn new(position: CellCoord, health: i32, gold: i32) -> Self {
        Self {
            position,
            health,
            gold,
        }
    }
}

/// Traversal state reported after each step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraversalState {
    /// The agent moved without triggering an effect.
    Traveling,
    /// The agent lost health on a damage tile.
    Damaged,
    /// The agent picked up gold or a treasure.
    Collected,
    /// Health dropped below the minimum; the expedition failed.
    LowHealth,
    /// Every leg of the route was walked; the expedition succeeded.
    AllTreasuresVisited,
}

impl TraversalState {
    /// Reports whether no further steps follow this state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::LowHealth | Self::AllTreasuresVisited)
    }
}

/// Structured record emitted for every traversal step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Zero-based index of the step within the expedition.
    pub step: u32,
    /// Cell the agent occupies after the step.
    pub position: CellCoord,
    /// Effect tile consumed by the step, if any.
    pub triggered: Option<CellKind>,
    /// Health after applying the step.
    pub health: i32,
    /// Gold after applying the step.
    pub gold: i32,
    /// Treasures collected so far.
    pub treasures_collected: u32,
    /// Traversal state reached by the step.
    pub state: TraversalState,
}

impl StepRecord {
    /// Reports whether the record ends the expedition.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellCoord::new(1, 1);
        let destination = CellCoord::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn step_respects_grid_edges() {
        let corner = CellCoord::new(0, 0);
        assert_eq!(corner.step(Direction::North, 3), None);
        assert_eq!(corner.step(Direction::West, 3), None);
        assert_eq!(corner.step(Direction::East, 3), Some(CellCoord::new(1, 0)));
        assert_eq!(CellCoord::new(2, 2).step(Direction::South, 3), None);
    }

    #[test]
    fn direction_between_requires_adjacency() {
        let origin = CellCoord::new(2, 2);
        assert_eq!(
            Direction::between(origin, CellCoord::new(2, 1)),
            Some(Direction::North)
        );
        assert_eq!(
            Direction::between(origin, CellCoord::new(1, 2)),
            Some(Direction::West)
        );
        assert_eq!(Direction::between(origin, CellCoord::new(3, 3)), None);
        assert_eq!(Direction::between(origin, origin), None);
    }

    #[test]
    fn glyphs_map_back_to_kinds() {
        for kind in [
            CellKind::Free,
            CellKind::Obstacle,
            CellKind::Damage,
            CellKind::Gold,
            CellKind::Treasure,
            CellKind::PlayerStart,
        ] {
            assert_eq!(CellKind::from_glyph(kind.glyph()), Some(kind));
        }
        assert_eq!(CellKind::from_glyph('x'), None);
    }

    #[test]
    fn grid_view_rejects_out_of_bounds_cells() {
        let cells = vec![CellKind::Free; 4];
        let view = GridView::new(&cells, 2);
        assert_eq!(view.kind(CellCoord::new(1, 1)), Some(CellKind::Free));
        assert_eq!(view.kind(CellCoord::new(2, 0)), None);
        assert_eq!(
            view.checked_kind(CellCoord::new(0, 5)),
            Err(PathError::InvalidCell {
                cell: CellCoord::new(0, 5),
                side: 2,
            })
        );
    }

    #[test]
    fn grid_view_iterates_in_row_major_order() {
        let cells = vec![
            CellKind::PlayerStart,
            CellKind::Free,
            CellKind::Obstacle,
            CellKind::Treasure,
        ];
        let view = GridView::new(&cells, 2);
        let collected: Vec<_> = view.iter().collect();
        assert_eq!(collected[1], (CellCoord::new(1, 0), CellKind::Free));
        assert_eq!(collected[2], (CellCoord::new(0, 1), CellKind::Obstacle));
    }

    #[test]
    fn path_cost_counts_moves() {
        let path = Path::from_cells(vec![
            CellCoord::new(0, 0),
            CellCoord::new(1, 0),
            CellCoord::new(1, 1),
        ])
        .expect("non-empty path");
        assert_eq!(path.cost(), 2);
        assert_eq!(path.source(), CellCoord::new(0, 0));
        assert_eq!(path.destination(), CellCoord::new(1, 1));
        assert!(Path::from_cells(Vec::new()).is_none());
    }

    #[test]
    fn step_record_round_trips_through_bincode() {
        let record = StepRecord {
            step: 3,
            position: CellCoord::new(4, 2),
            triggered: Some(CellKind::Damage),
            health: 85,
            gold: 10,
            treasures_collected: 1,
            state: TraversalState::Damaged,
        };
        let bytes = bincode::serialize(&record).expect("serialize");
        let restored: StepRecord = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, record);
    }

    #[test]
    fn only_terminal_states_end_traversal() {
        assert!(TraversalState::LowHealth.is_terminal());
        assert!(TraversalState::AllTreasuresVisited.is_terminal());
        assert!(!TraversalState::Damaged.is_terminal());
        assert!(!TraversalState::Collected.is_terminal());
    }
}

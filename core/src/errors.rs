//! Error taxonomy shared by the world and the systems.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::CellCoord;

/// Failures reported by the path search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PathError {
    /// No obstacle-free 4-connected path joins the two cells.
    #[error("no path from {start:?} to {goal:?}")]
    Unreachable {
        /// Cell the search started from.
        start: CellCoord,
        /// Cell the search tried to reach.
        goal: CellCoord,
    },
    /// A coordinate lies outside the `side × side` grid.
    #[error("cell {cell:?} lies outside the {side}x{side} grid")]
    InvalidCell {
        /// Offending coordinate.
        cell: CellCoord,
        /// Edge length of the grid that was searched.
        side: u32,
    },
}

/// Failures that abort a route planning phase.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RouteError {
    /// A leg required by the planner could not be searched.
    #[error(transparent)]
    Path(#[from] PathError),
    /// The selected policy refuses goal sets of this size.
    #[error("{policy} planning supports at most {limit} goals, got {goals}")]
    GoalLimitExceeded {
        /// Number of goals submitted.
        goals: usize,
        /// Largest goal count the policy accepts.
        limit: usize,
        /// Name of the refusing policy.
        policy: &'static str,
    },
    /// Planning ran past the caller's deadline.
    #[error("route planning exceeded its deadline")]
    DeadlineExceeded,
}

/// Reasons the world refuses to move the agent onto a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum EntryError {
    /// The cell lies outside the grid.
    #[error("cell lies outside the grid")]
    OutOfBounds,
    /// The cell is an obstacle.
    #[error("cell is an obstacle")]
    Obstacle,
}

/// Failures reported while generating a maze.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The configuration describes an impossible maze.
    #[error("invalid generation config: {0}")]
    InvalidConfig(String),
    /// Distinct placement ran out of free cells.
    #[error("requested {requested} distinct placements but only {available} cells are free")]
    Overcrowded {
        /// Total placements requested.
        requested: usize,
        /// Cells available for placement.
        available: usize,
    },
}

/// Failures reported while parsing a text layout.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The layout contained no rows.
    #[error("layout is empty")]
    Empty,
    /// A row length differs from the number of rows.
    #[error("row {row} has {length} cells but the layout has {rows} rows")]
    NotSquare {
        /// Zero-based index of the offending row.
        row: usize,
        /// Number of cells in the offending row.
        length: usize,
        /// Number of rows in the layout.
        rows: usize,
    },
    /// A glyph does not name a cell kind.
    #[error("unknown glyph {glyph:?} at column {column}, row {row}")]
    UnknownGlyph {
        /// Offending character.
        glyph: char,
        /// Column of the character.
        column: usize,
        /// Row of the character.
        row: usize,
    },
    /// No `P` glyph marks the start cell.
    #[error("layout has no start cell")]
    MissingStart,
    /// More than one `P` glyph was found.
    #[error("layout has {count} start cells")]
    MultipleStarts {
        /// Number of start glyphs found.
        count: usize,
    },
}

//! Text layouts for hand-built mazes.
//!
//! A layout is a square block of glyph rows (see [`CellKind::glyph`]). Blank
//! lines and surrounding whitespace are ignored. Exactly one `P` marks the
//! start cell and every `T` joins the treasure set in row-major order.

use treasure_maze_core::{CellCoord, CellKind, LayoutError};

use crate::Maze;

impl Maze {
    /// Parses a maze from its text layout.
    pub fn from_layout(text: &str) -> Result<Self, LayoutError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.is_empty() {
            return Err(LayoutError::Empty);
        }

        let side = rows.len();
        let mut kinds = Vec::with_capacity(side * side);
        for (row, line) in rows.iter().enumerate() {
            let length = line.chars().count();
            if length != side {
                return Err(LayoutError::NotSquare {
                    row,
                    length,
                    rows: side,
                });
            }

            for (column, glyph) in line.chars().enumerate() {
                let kind = CellKind::from_glyph(glyph).ok_or(LayoutError::UnknownGlyph {
                    glyph,
                    column,
                    row,
                })?;
                kinds.push((CellCoord::new(column as u32, row as u32), kind));
            }
        }

        let starts: Vec<CellCoord> = kinds
            .iter()
            .filter(|(_, kind)| *kind == CellKind::PlayerStart)
            .map(|(cell, _)| *cell)
            .collect();
        let start = match starts.as_slice() {
            [] => return Err(LayoutError::MissingStart),
            [start] => *start,
            _ => {
                return Err(LayoutError::MultipleStarts {
                    count: starts.len(),
                })
            }
        };

        let mut maze = Maze::blank(side as u32, start);
        for (cell, kind) in kinds {
            maze.set(cell, kind);
            if kind == CellKind::Treasure {
                maze.record_treasure(cell);
            }
        }

        Ok(maze)
    }

    /// Renders the maze back into its text layout.
    #[must_use]
    pub fn to_layout(&self) -> String {
        let side = usize::try_from(self.side).unwrap_or(0);
        let mut text = String::with_capacity(side * (side + 1));
        for row in self.cells.chunks(side.max(1)) {
            text.extend(row.iter().map(|kind| kind.glyph()));
            text.push('\n');
        }
        text
    }
}

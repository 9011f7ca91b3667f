//! Procedural maze generation driven by a caller-supplied random source.

use rand::Rng;
use tracing::debug;
use treasure_maze_core::{CellCoord, CellKind, GenerationError};

use crate::Maze;

const REFERENCE_SIDE: u32 = 20;
const REFERENCE_TREASURES: usize = 6;

/// Strategy applied when a random placement lands on an occupied cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OverlapPolicy {
    /// Later placements overwrite earlier ones and the start stamp overwrites
    /// everything, so fewer tiles than requested may survive.
    #[default]
    LastWins,
    /// Each placement redraws until it lands on a free, non-start cell.
    Distinct,
}

/// Configuration parameters required to generate a maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Number of cells along each edge of the square grid.
    pub side: u32,
    /// Obstacle placements to draw.
    pub obstacles: usize,
    /// Damage tile placements to draw.
    pub damage: usize,
    /// Gold tile placements to draw.
    pub gold: usize,
    /// Treasure placements to draw.
    pub treasures: usize,
    /// Cell stamped as the agent's starting position.
    pub start: CellCoord,
    /// Collision handling for random placements.
    pub overlap: OverlapPolicy,
}

impl GenerationConfig {
    /// Scales the reference densities to a grid of `side` cells per edge:
    /// `3 * side` obstacles, `side` damage tiles, `side` gold tiles and six
    /// treasures, starting in the upper-left corner.
    #[must_use]
    pub fn for_side(side: u32) -> Self {
        let per_edge = usize::try_from(side).unwrap_or(usize::MAX);
        Self {
            side,
            obstacles: per_edge.saturating_mul(3),
            damage: per_edge,
            gold: per_edge,
            treasures: REFERENCE_TREASURES,
            start: CellCoord::new(0, 0),
            overlap: OverlapPolicy::LastWins,
        }
    }

    fn placements(&self) -> usize {
        self.obstacles
            .saturating_add(self.damage)
            .saturating_add(self.gold)
            .saturating_add(self.treasures)
    }

    fn validate(&self) -> Result<(), GenerationError> {
        if self.side == 0 {
            return Err(GenerationError::InvalidConfig(
                "grid side must be positive".to_owned(),
            ));
        }

        if self.start.column() >= self.side || self.start.row() >= self.side {
            return Err(GenerationError::InvalidConfig(format!(
                "start {:?} lies outside the {}x{} grid",
                self.start, self.side, self.side
            )));
        }

        if self.overlap == OverlapPolicy::Distinct {
            let cells = u64::from(self.side) * u64::from(self.side);
            let available = usize::try_from(cells.saturating_sub(1)).unwrap_or(usize::MAX);
            let requested = self.placements();
            if requested > available {
                return Err(GenerationError::Overcrowded {
                    requested,
                    available,
                });
            }
        }

        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::for_side(REFERENCE_SIDE)
    }
}

/// Generates a maze by drawing every placement from `rng`.
///
/// Obstacles are placed first, then damage tiles, gold tiles and treasures,
/// each as an independent uniform draw of the column followed by the row.
/// The start cell is stamped last. Treasure cells are captured in draw order
/// and form the goal set used for route planning.
pub fn generate<R>(config: &GenerationConfig, rng: &mut R) -> Result<Maze, GenerationError>
where
    R: Rng + ?Sized,
{
    config.validate()?;

    let mut maze = Maze::blank(config.side, config.start);
    let mut placer = Placer {
        maze: &mut maze,
        rng,
        side: config.side,
        start: config.start,
        overlap: config.overlap,
    };

    for _ in 0..config.obstacles {
        let _ = placer.place(CellKind::Obstacle);
    }
    for _ in 0..config.damage {
        let _ = placer.place(CellKind::Damage);
    }
    for _ in 0..config.gold {
        let _ = placer.place(CellKind::Gold);
    }
    for _ in 0..config.treasures {
        let cell = placer.place(CellKind::Treasure);
        placer.maze.record_treasure(cell);
    }

    maze.set(config.start, CellKind::PlayerStart);

    debug!(
        side = config.side,
        overlap = ?config.overlap,
        obstacles = crate::query::count(&maze, CellKind::Obstacle),
        damage = crate::query::count(&maze, CellKind::Damage),
        gold = crate::query::count(&maze, CellKind::Gold),
        treasures = crate::query::treasures(&maze).len(),
        "generated maze"
    );

    Ok(maze)
}

struct Placer<'a, R: ?Sized> {
    maze: &'a mut Maze,
    rng: &'a mut R,
    side: u32,
    start: CellCoord,
    overlap: OverlapPolicy,
}

impl<R> Placer<'_, R>
where
    R: Rng + ?Sized,
{
    fn place(&mut self, kind: CellKind) -> CellCoord {
        let cell = match self.overlap {
            OverlapPolicy::LastWins => self.draw(),
            OverlapPolicy::Distinct => loop {
                let candidate = self.draw();
                if candidate != self.start && self.maze.kind(candidate) == Some(CellKind::Free) {
                    break candidate;
                }
            },
        };
        self.maze.set(cell, kind);
        cell
    }

    fn draw(&mut self) -> CellCoord {
        let column = self.rng.gen_range(0..self.side);
        let row = self.rng.gen_range(0..self.side);
        CellCoord::new(column, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn zero_side_is_rejected() {
        let config = GenerationConfig::for_side(0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(matches!(
            generate(&config, &mut rng),
            Err(GenerationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn start_outside_grid_is_rejected() {
        let config = GenerationConfig {
            start: CellCoord::new(4, 0),
            ..GenerationConfig::for_side(4)
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(matches!(
            generate(&config, &mut rng),
            Err(GenerationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn distinct_overlap_reports_overcrowding() {
        let config = GenerationConfig {
            overlap: OverlapPolicy::Distinct,
            ..GenerationConfig::for_side(3)
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(
            generate(&config, &mut rng),
            Err(GenerationError::Overcrowded {
                requested: 9 + 3 + 3 + 6,
                available: 8,
            })
        );
    }

    #[test]
    fn reference_config_matches_original_densities() {
        let config = GenerationConfig::default();
        assert_eq!(config.side, 20);
        assert_eq!(config.obstacles, 60);
        assert_eq!(config.damage, 20);
        assert_eq!(config.gold, 20);
        assert_eq!(config.treasures, 6);
        assert_eq!(config.start, CellCoord::new(0, 0));
        assert_eq!(config.overlap, OverlapPolicy::LastWins);
    }
}

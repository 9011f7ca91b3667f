#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Treasure Maze adapters.

use anyhow::Result as AnyResult;
use std::fmt;
use treasure_maze_core::{AgentState, CellCoord, CellKind, GridView, StepRecord};

/// Title shown before the expedition starts.
pub const TITLE: &str = "AI Maze: Hunt for treasures";

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Converts the color channels back to bytes, ignoring alpha.
    #[must_use]
    pub fn to_rgb_u8(self) -> (u8, u8, u8) {
        (
            channel_to_u8(self.red),
            channel_to_u8(self.green),
            channel_to_u8(self.blue),
        )
    }
}

fn channel_to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Color used to draw the agent.
pub const AGENT_COLOR: Color = Color::from_rgb_u8(0, 0, 255);

/// Glyph used to draw the agent in text scenes.
pub const AGENT_GLYPH: char = '@';

/// Color used to fill a cell of the provided kind.
#[must_use]
pub const fn cell_color(kind: CellKind) -> Color {
    match kind {
        CellKind::Obstacle => Color::from_rgb_u8(0, 0, 0),
        CellKind::Damage => Color::from_rgb_u8(255, 0, 0),
        CellKind::Gold => Color::from_rgb_u8(255, 255, 0),
        CellKind::Treasure => Color::from_rgb_u8(128, 0, 128),
        CellKind::Free | CellKind::PlayerStart => Color::from_rgb_u8(255, 255, 255),
    }
}

/// Caption summarising the agent statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusLine {
    /// Remaining health.
    pub health: i32,
    /// Gold carried.
    pub gold: i32,
}

impl From<AgentState> for StatusLine {
    fn from(agent: AgentState) -> Self {
        Self {
            health: agent.health,
            gold: agent.gold,
        }
    }
}

impl From<&StepRecord> for StatusLine {
    fn from(record: &StepRecord) -> Self {
        Self {
            health: record.health,
            gold: record.gold,
        }
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HP: {} | Gold: {}", self.health, self.gold)
    }
}

/// Snapshot of the maze and the agent for a single frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    side: u32,
    cells: Vec<CellKind>,
    agent: CellCoord,
    status: StatusLine,
}

impl Scene {
    /// Captures the grid with the agent standing at `agent`.
    #[must_use]
    pub fn capture(grid: GridView<'_>, agent: CellCoord, status: StatusLine) -> Self {
        Self {
            side: grid.side(),
            cells: grid.iter().map(|(_, kind)| kind).collect(),
            agent,
            status,
        }
    }

    /// Number of cells along each edge.
    #[must_use]
    pub const fn side(&self) -> u32 {
        self.side
    }

    /// Cell occupied by the agent.
    #[must_use]
    pub const fn agent(&self) -> CellCoord {
        self.agent
    }

    /// Caption drawn with the frame.
    #[must_use]
    pub const fn status(&self) -> StatusLine {
        self.status
    }

    /// Cells of the grid in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[CellKind] {
        &self.cells
    }

    /// Text rows of the scene, the agent drawn over its cell.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        let side = usize::try_from(self.side).unwrap_or(0).max(1);
        self.cells.chunks(side).zip(0_u32..).map(move |(row, y)| {
            row.iter()
                .zip(0_u32..)
                .map(|(kind, x)| {
                    if CellCoord::new(x, y) == self.agent {
                        AGENT_GLYPH
                    } else {
                        kind.glyph()
                    }
                })
                .collect()
        })
    }
}

/// Closing message shown when the expedition ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    /// Health dropped below the minimum.
    GameOver,
    /// Every treasure on the route was visited.
    AllTreasuresCollected,
    /// No route could be planned.
    PlanningFailed(String),
}

impl Message {
    /// Color the message is drawn in.
    #[must_use]
    pub const fn color(&self) -> Color {
        match self {
            Self::GameOver | Self::PlanningFailed(_) => Color::from_rgb_u8(255, 0, 0),
            Self::AllTreasuresCollected => Color::from_rgb_u8(0, 128, 0),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GameOver => f.write_str("Game Over!"),
            Self::AllTreasuresCollected => f.write_str("You collected all treasures!"),
            Self::PlanningFailed(reason) => write!(f, "No route: {reason}"),
        }
    }
}

/// Rendering backend capable of presenting Treasure Maze scenes.
pub trait RenderingBackend {
    /// Shows the title before the first frame.
    fn begin(&mut self, title: &str) -> AnyResult<()>;

    /// Draws a single frame.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;

    /// Shows the closing message.
    fn announce(&mut self, message: &Message) -> AnyResult<()>;
}

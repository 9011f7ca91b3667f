//! Text backend that draws scenes to a terminal or any writer.

use std::io::Write;

use anyhow::{Context, Result};
use crossterm::{
    cursor::MoveTo,
    style::{Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
    QueueableCommand,
};
use treasure_maze_core::CellKind;
use treasure_maze_rendering::{
    cell_color, Color, Message, RenderingBackend, Scene, AGENT_COLOR, AGENT_GLYPH,
};

/// Draws scenes as glyph grids, optionally with terminal colors.
#[derive(Debug)]
pub(crate) struct TerminalBackend<W> {
    out: W,
    ansi: bool,
}

impl<W: Write> TerminalBackend<W> {
    pub(crate) fn new(out: W, ansi: bool) -> Self {
        Self { out, ansi }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }

    fn write_colored(&mut self, glyph: char, color: Color) -> Result<()> {
        let _ = self
            .out
            .queue(SetForegroundColor(term_color(color)))?
            .queue(Print(glyph))?
            .queue(ResetColor)?;
        Ok(())
    }

    fn paint(&mut self, scene: &Scene) -> Result<()> {
        let _ = self.out.queue(Clear(ClearType::All))?.queue(MoveTo(0, 0))?;
        let side = usize::try_from(scene.side()).unwrap_or(0).max(1);
        let agent = scene.agent();
        for (row, y) in scene.cells().chunks(side).zip(0_u32..) {
            for (kind, x) in row.iter().zip(0_u32..) {
                if x == agent.column() && y == agent.row() {
                    self.write_colored(AGENT_GLYPH, AGENT_COLOR)?;
                } else if matches!(kind, CellKind::Free | CellKind::PlayerStart) {
                    let _ = self.out.queue(Print(kind.glyph()))?;
                } else {
                    self.write_colored(kind.glyph(), cell_color(*kind))?;
                }
            }
            let _ = self.out.queue(Print('\n'))?;
        }
        Ok(())
    }
}

fn term_color(color: Color) -> TermColor {
    let (r, g, b) = color.to_rgb_u8();
    TermColor::Rgb { r, g, b }
}

impl<W: Write> RenderingBackend for TerminalBackend<W> {
    fn begin(&mut self, title: &str) -> Result<()> {
        writeln!(self.out, "{title}").context("failed to write title")?;
        self.out.flush().context("failed to flush terminal")
    }

    fn present(&mut self, scene: &Scene) -> Result<()> {
        if self.ansi {
            self.paint(scene).context("failed to draw scene")?;
        } else {
            for row in scene.rows() {
                writeln!(self.out, "{row}")?;
            }
        }
        writeln!(self.out, "{}", scene.status())?;
        if !self.ansi {
            writeln!(self.out)?;
        }
        self.out.flush().context("failed to flush terminal")
    }

    fn announce(&mut self, message: &Message) -> Result<()> {
        if self.ansi {
            let _ = self
                .out
                .queue(SetAttribute(Attribute::Bold))?
                .queue(SetForegroundColor(term_color(message.color())))?
                .queue(Print(message))?
                .queue(ResetColor)?
                .queue(SetAttribute(Attribute::Reset))?;
            writeln!(self.out)?;
        } else {
            writeln!(self.out, "{message}")?;
        }
        self.out.flush().context("failed to flush terminal")
    }
}

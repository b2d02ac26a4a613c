use anyhow::Result;

use crate::grid::{Rect, Rgb, ACCENT};
use crate::Position;

/// Something rectangles can be painted onto.
pub trait Surface {
    fn fill(&mut self, color: Rgb) -> Result<()>;

    fn fill_rect(&mut self, rect: Rect, color: Rgb) -> Result<()>;

    /// Outline `rect` with a one pixel border.
    fn stroke_rect(&mut self, rect: Rect, color: Rgb) -> Result<()>;

    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

pub trait Draw {
    fn draw<S: Surface>(&self, surface: &mut S) -> Result<()>;
}

/// A filled cell with the accent border, the way every entity is drawn.
pub fn draw_cell<S: Surface>(surface: &mut S, pos: Position, color: Rgb) -> Result<()> {
    let rect = Rect::cell(pos);
    surface.fill_rect(rect, color)?;
    surface.stroke_rect(rect, ACCENT)
}

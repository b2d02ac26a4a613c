use anyhow::Result;
use rand::Rng;

use crate::draw::{draw_cell, Draw, Surface};
use crate::grid::{in_bounds, Rgb, CELL_SIZE, GRID_HEIGHT, GRID_WIDTH};
use crate::Position;

const APPLE_COLOR: Rgb = Rgb(255, 0, 0);

pub struct Apple {
    position: Position,
}

impl Apple {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let mut apple = Apple { position: (0, 0) };
        apple.randomize_position(rng);
        apple
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Moves the apple to a uniformly random cell. The range is exclusive on
    /// both axes so the apple never lands past the right or bottom edge,
    /// where the snake could not reach it.
    pub fn randomize_position<R: Rng>(&mut self, rng: &mut R) {
        self.position = (
            rng.gen_range(0..GRID_WIDTH) * CELL_SIZE,
            rng.gen_range(0..GRID_HEIGHT) * CELL_SIZE,
        );
        debug_assert!(in_bounds(self.position));
    }
}

impl Draw for Apple {
    fn draw<S: Surface>(&self, surface: &mut S) -> Result<()> {
        draw_cell(surface, self.position, APPLE_COLOR)
    }
}

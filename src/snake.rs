use std::collections::VecDeque;

use anyhow::Result;
use log::{debug, info};
use rand::Rng;

use crate::draw::{draw_cell, Draw, Surface};
use crate::grid::{Rect, Rgb, BACKGROUND, CELL_SIZE, CENTER, MAX_X, MAX_Y};
use crate::Position;
use Direction::*;
use MoveResult::*;

const SNAKE_COLOR: Rgb = Rgb(0, 255, 0);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Left, Right, Down, Up];

    pub fn vector(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn random<R: Rng>(rng: &mut R) -> Direction {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved { new_head: Position, old_tail: Option<Position> },
    Reset,
}

pub struct Snake {
    positions: VecDeque<Position>,
    direction: Direction,
    pending_direction: Option<Direction>,
    length: usize,
    last_tail: Option<Position>,
}

impl Snake {
    pub fn new() -> Self {
        Snake {
            positions: VecDeque::from(vec![CENTER]),
            direction: Right,
            pending_direction: None,
            length: 1,
            last_tail: None,
        }
    }

    pub fn head(&self) -> Position {
        self.positions[0]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn grow(&mut self) {
        self.length += 1;
    }

    /// Queues a turn for the next tick. Turning straight back onto the neck
    /// is refused and leaves any previously queued turn in place.
    pub fn queue_direction(&mut self, direction: Direction) -> bool {
        if direction == self.direction.opposite() {
            debug!("Ignoring reversal from {:?} to {:?}", self.direction, direction);
            return false;
        }

        self.pending_direction = Some(direction);
        true
    }

    pub fn update_direction(&mut self) {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }
    }

    pub fn move_step<S: Surface, R: Rng>(&mut self, surface: &mut S, rng: &mut R) -> Result<MoveResult> {
        let (dx, dy) = self.direction.vector();
        let head = self.head();
        let new_head = wrap((head.0 + dx * CELL_SIZE, head.1 + dy * CELL_SIZE));

        // The neck is skipped, so only segments from index 2 on can be hit
        if self.positions.iter().skip(2).any(|pos| *pos == new_head) {
            info!("Snake bit itself at {:?} with length {}", new_head, self.length);
            self.reset(surface, rng)?;
            return Ok(Reset);
        }

        self.positions.push_front(new_head);

        self.last_tail = if self.positions.len() > self.length {
            self.positions.pop_back()
        } else {
            None
        };

        Ok(Moved { new_head, old_tail: self.last_tail })
    }

    pub fn reset<S: Surface, R: Rng>(&mut self, surface: &mut S, rng: &mut R) -> Result<()> {
        self.length = 1;
        self.positions.clear();
        self.positions.push_back(CENTER);
        self.direction = Direction::random(rng);
        self.pending_direction = None;
        self.last_tail = None;

        surface.fill(BACKGROUND)
    }
}

#[cfg(test)]
impl Snake {
    pub fn positions(&self) -> &VecDeque<Position> {
        &self.positions
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn last_tail(&self) -> Option<Position> {
        self.last_tail
    }

    pub fn from_body(body: &[Position], direction: Direction) -> Self {
        Snake {
            positions: body.iter().copied().collect(),
            direction,
            pending_direction: None,
            length: body.len(),
            last_tail: None,
        }
    }
}

/// Wraps a head that left the board back onto the opposite edge. Only one
/// axis is corrected per step, horizontal first.
fn wrap((x, y): Position) -> Position {
    if x < 0 {
        (MAX_X, y)
    } else if x > MAX_X {
        (0, y)
    } else if y < 0 {
        (x, MAX_Y)
    } else if y > MAX_Y {
        (x, 0)
    } else {
        (x, y)
    }
}

impl Draw for Snake {
    fn draw<S: Surface>(&self, surface: &mut S) -> Result<()> {
        for pos in self.positions.iter().skip(1) {
            draw_cell(surface, *pos, SNAKE_COLOR)?;
        }

        draw_cell(surface, self.head(), SNAKE_COLOR)?;

        if let Some(tail) = self.last_tail {
            surface.fill_rect(Rect::cell(tail), BACKGROUND)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::canvas::Canvas;
    use crate::grid::{ACCENT, SCREEN_HEIGHT, SCREEN_WIDTH};
    use rand::{rngs::StdRng, SeedableRng};

    fn step(snake: &mut Snake) -> MoveResult {
        let mut canvas = Canvas::new();
        let mut rng = StdRng::seed_from_u64(1);
        snake.move_step(&mut canvas, &mut rng).unwrap()
    }

    #[test]
    fn single_cell_moves_and_leaves_its_tail() {
        let mut snake = Snake::from_body(&[(100, 100)], Right);

        let res = step(&mut snake);

        assert_eq!(res, Moved { new_head: (120, 100), old_tail: Some((100, 100)) });
        assert_eq!(snake.positions(), &VecDeque::from(vec![(120, 100)]));
        assert_eq!(snake.last_tail(), Some((100, 100)));
    }

    #[test]
    fn grows_without_dropping_the_tail() {
        let mut snake = Snake::from_body(&[(100, 100)], Down);
        snake.grow();

        let res = step(&mut snake);

        assert_eq!(res, Moved { new_head: (100, 120), old_tail: None });
        assert_eq!(snake.positions().len(), 2);
        assert_eq!(snake.last_tail(), None);

        step(&mut snake);
        assert_eq!(snake.positions().len(), 2);
        assert_eq!(snake.last_tail(), Some((100, 100)));
    }

    #[test]
    fn body_never_outgrows_length() {
        let mut snake = Snake::new();
        for i in 0..200 {
            if i % 3 == 0 {
                snake.grow();
            }
            if i % 7 == 0 {
                snake.queue_direction(Direction::ALL[i % 4]);
                snake.update_direction();
            }
            step(&mut snake);
            assert!(snake.positions().len() <= snake.length());
            assert!(!snake.positions().is_empty());
        }
    }

    #[test]
    fn wraps_every_edge() {
        assert_eq!(wrap((-CELL_SIZE, 100)), (MAX_X, 100));
        assert_eq!(wrap((SCREEN_WIDTH, 100)), (0, 100));
        assert_eq!(wrap((100, -CELL_SIZE)), (100, MAX_Y));
        assert_eq!(wrap((100, SCREEN_HEIGHT)), (100, 0));
        assert_eq!(wrap((100, 100)), (100, 100));
    }

    #[test]
    fn corner_wrap_only_fixes_the_horizontal_axis() {
        assert_eq!(wrap((-CELL_SIZE, -CELL_SIZE)), (MAX_X, -CELL_SIZE));
        assert_eq!(wrap((SCREEN_WIDTH, SCREEN_HEIGHT)), (0, SCREEN_HEIGHT));
    }

    #[test]
    fn moving_off_the_left_edge_reappears_on_the_right() {
        let mut snake = Snake::from_body(&[(0, 200)], Left);
        step(&mut snake);
        assert_eq!(snake.head(), (MAX_X, 200));

        let mut snake = Snake::from_body(&[(160, MAX_Y)], Down);
        step(&mut snake);
        assert_eq!(snake.head(), (160, 0));
    }

    #[test]
    fn stepping_onto_the_neck_is_not_a_collision() {
        let mut snake = Snake::from_body(&[(100, 100), (80, 100), (60, 100)], Left);

        let res = step(&mut snake);

        assert_eq!(res, Moved { new_head: (80, 100), old_tail: Some((60, 100)) });
        assert_eq!(snake.length(), 3);
    }

    #[test]
    fn biting_the_body_resets() {
        let body = [(100, 100), (100, 120), (80, 120), (80, 100)];
        let mut snake = Snake::from_body(&body, Left);
        snake.grow();
        let mut canvas = Canvas::new();
        draw_cell(&mut canvas, (300, 300), SNAKE_COLOR).unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        let res = snake.move_step(&mut canvas, &mut rng).unwrap();

        assert_eq!(res, Reset);
        assert_eq!(snake.length(), 1);
        assert_eq!(snake.positions(), &VecDeque::from(vec![CENTER]));
        assert_eq!(snake.last_tail(), None);
        assert_eq!(canvas.clears, 1);
        assert_eq!(canvas.count(SNAKE_COLOR), 0);
    }

    #[test]
    fn reset_picks_directions_at_random() {
        let mut snake = Snake::new();
        let mut canvas = Canvas::new();
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = Vec::new();

        for _ in 0..200 {
            snake.reset(&mut canvas, &mut rng).unwrap();
            if !seen.contains(&snake.direction()) {
                seen.push(snake.direction());
            }
        }

        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn reversal_is_refused() {
        let mut snake = Snake::from_body(&[(100, 100)], Right);

        assert!(!snake.queue_direction(Left));
        assert_eq!(snake.pending_direction(), None);

        assert!(snake.queue_direction(Up));
        assert!(!snake.queue_direction(Left));
        assert_eq!(snake.pending_direction(), Some(Up));
    }

    #[test]
    fn pending_direction_applies_once() {
        let mut snake = Snake::from_body(&[(100, 100)], Right);
        snake.queue_direction(Down);

        snake.update_direction();
        assert_eq!(snake.direction(), Down);
        assert_eq!(snake.pending_direction(), None);

        snake.update_direction();
        assert_eq!(snake.direction(), Down);
    }

    #[test]
    fn draw_erases_the_vacated_tail() {
        let mut snake = Snake::from_body(&[(100, 100), (80, 100)], Right);
        let mut canvas = Canvas::new();
        snake.draw(&mut canvas).unwrap();
        assert_eq!(canvas.color_at((80, 100)), SNAKE_COLOR);

        step(&mut snake);
        snake.draw(&mut canvas).unwrap();

        assert_eq!(canvas.color_at((80, 100)), BACKGROUND);
        assert_eq!(canvas.color_at((100, 100)), SNAKE_COLOR);
        assert_eq!(canvas.color_at((120, 100)), SNAKE_COLOR);
        assert_eq!(canvas.border_at((120, 100)), Some(ACCENT));
        assert_eq!(canvas.count(SNAKE_COLOR), 2);
    }
}

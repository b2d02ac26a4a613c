use anyhow::Result;
use log::{debug, info, trace};
use rand::Rng;

use crate::apple::Apple;
use crate::clock::Clock;
use crate::draw::{Draw, Surface};
use crate::input::{handle_keys, Control};
use crate::snake::{MoveResult, Snake};
use crate::term::TermManager;

const TICKS_PER_SECOND: u32 = 20;

pub struct SnakeGame<R: Rng> {
    snake: Snake,
    apple: Apple,
    rng: R,
}

impl<R: Rng> SnakeGame<R> {
    pub fn new(mut rng: R) -> Self {
        let apple = Apple::new(&mut rng);
        SnakeGame { snake: Snake::new(), apple, rng }
    }

    /// Runs until the player quits.
    pub fn run(&mut self, term: &mut TermManager, clock: &mut Clock) -> Result<()> {
        info!("Starting at {} ticks per second", TICKS_PER_SECOND);

        loop {
            let elapsed = clock.tick(TICKS_PER_SECOND);
            trace!("Tick after {:?}", elapsed);

            let events = term.read_key_events_queue()?;
            if handle_keys(&mut self.snake, &events) == Control::Quit {
                info!("Quit requested with length {}", self.snake.length());
                return Ok(());
            }

            self.tick(term)?;
            term.present()?;
        }
    }

    /// One game step after input: turn, move, eat, draw.
    pub fn tick<S: Surface>(&mut self, surface: &mut S) -> Result<()> {
        self.snake.update_direction();

        match self.snake.move_step(surface, &mut self.rng)? {
            MoveResult::Moved { new_head, old_tail } => trace!("Head at {:?}, freed {:?}", new_head, old_tail),
            MoveResult::Reset => debug!("Snake reset, heading {:?}", self.snake.direction()),
        }

        if self.snake.head() == self.apple.position() {
            self.apple.randomize_position(&mut self.rng);
            self.snake.grow();
            debug!("Apple eaten, length is now {}", self.snake.length());
        }

        self.apple.draw(surface)?;
        self.snake.draw(surface)
    }

}

#[cfg(test)]
impl<R: Rng> SnakeGame<R> {
    fn with_parts(snake: Snake, apple: Apple, rng: R) -> Self {
        SnakeGame { snake, apple, rng }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }
}

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::{Direction, Snake};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Quit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub fn command_for(key: &KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key {
        KeyEvent { code: KeyCode::Char('c'), modifiers, .. } if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Command::Quit)
        }
        KeyEvent { code, .. } => match code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Command::Turn(Direction::Up)),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Command::Turn(Direction::Left)),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Command::Turn(Direction::Down)),
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Command::Turn(Direction::Right)),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
            _ => None,
        },
    }
}

/// Applies one tick's worth of key presses to the snake. Stops at the first
/// quit, ignoring whatever was pressed after it.
pub fn handle_keys(snake: &mut Snake, events: &[KeyEvent]) -> Control {
    for ev in events {
        match command_for(ev) {
            Some(Command::Quit) => return Control::Quit,
            Some(Command::Turn(dir)) => {
                snake.queue_direction(dir);
            }
            None => {}
        }
    }

    Control::Continue
}

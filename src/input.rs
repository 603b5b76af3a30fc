use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::level::Level;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Returns true when `requested` would turn the snake straight back onto itself.
#[must_use]
pub fn reverse_blocked(current: Direction, requested: Direction) -> bool {
    requested == current.opposite()
}

/// Discrete commands delivered to the game core.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    StartLevel(Level),
    ShowRecords,
    Direction(Direction),
    /// Leaves the program; handled by the run loop, never by the core.
    Quit,
}

/// Source of player commands.
pub trait InputSource {
    /// Waits up to `timeout` for the next command.
    fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>>;
}

/// Keyboard input read from the terminal through crossterm.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for InputHandler {
    fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(map_key(key)),
            _ => Ok(None),
        }
    }
}

/// Translates a key press into a command. Unbound keys yield `None`.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(GameInput::Quit);
    }

    match key.code {
        KeyCode::Up => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Down => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Left => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Right => Some(GameInput::Direction(Direction::Right)),
        KeyCode::Char('s' | 'S') => Some(GameInput::ShowRecords),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(GameInput::Quit),
        KeyCode::Char(digit @ '1'..='5') => {
            let number = digit.to_digit(10).and_then(|n| u8::try_from(n).ok())?;
            Level::try_from(number).ok().map(GameInput::StartLevel)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::{Direction, GameInput, map_key, reverse_blocked};
    use crate::level::Level;

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn only_reversal_is_blocked() {
        assert!(reverse_blocked(Direction::Up, Direction::Down));
        assert!(reverse_blocked(Direction::Down, Direction::Up));
        assert!(reverse_blocked(Direction::Left, Direction::Right));
        assert!(reverse_blocked(Direction::Right, Direction::Left));

        assert!(!reverse_blocked(Direction::Up, Direction::Up));
        assert!(!reverse_blocked(Direction::Up, Direction::Left));
        assert!(!reverse_blocked(Direction::Up, Direction::Right));
    }

    #[test]
    fn digit_keys_start_levels() {
        let key = KeyEvent::new(KeyCode::Char('3'), KeyModifiers::NONE);
        assert_eq!(map_key(key), Some(GameInput::StartLevel(Level::Three)));

        let key = KeyEvent::new(KeyCode::Char('6'), KeyModifiers::NONE);
        assert_eq!(map_key(key), None);
    }

    #[test]
    fn control_c_quits_but_plain_c_is_unbound() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let plain_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);

        assert_eq!(map_key(ctrl_c), Some(GameInput::Quit));
        assert_eq!(map_key(plain_c), None);
    }

    #[test]
    fn arrows_and_records_key_are_mapped() {
        let up = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        let records = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);

        assert_eq!(map_key(up), Some(GameInput::Direction(Direction::Up)));
        assert_eq!(map_key(records), Some(GameInput::ShowRecords));
    }
}

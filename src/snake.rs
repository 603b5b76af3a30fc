use std::collections::VecDeque;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self {
                x: self.x,
                y: self.y - 1,
            },
            Direction::Down => Self {
                x: self.x,
                y: self.y + 1,
            },
            Direction::Left => Self {
                x: self.x - 1,
                y: self.y,
            },
            Direction::Right => Self {
                x: self.x + 1,
                y: self.y,
            },
        }
    }
}

/// Ordered snake body (front is head) plus the speed bonus of the last meal.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    speed_modifier: i32,
}

impl Snake {
    /// Creates a snake of `length` segments all stacked on `start`.
    ///
    /// The stacked segments separate as the snake moves; until then the
    /// duplicates never count as a self-collision because they trail the head.
    #[must_use]
    pub fn new(start: Position, length: usize) -> Self {
        Self {
            body: std::iter::repeat_n(start, length.max(1)).collect(),
            speed_modifier: 0,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Position>) -> Self {
        debug_assert!(!segments.is_empty());

        Self {
            body: VecDeque::from(segments),
            speed_modifier: 0,
        }
    }

    /// Returns the head translated one cell in `direction`.
    #[must_use]
    pub fn compute_next_head(&self, direction: Direction) -> Position {
        self.head().step(direction)
    }

    /// Pushes `new_head` and drops the tail unless the snake `grew`.
    ///
    /// Purely structural: no bounds or collision checks happen here.
    /// Returns the dropped tail cell.
    pub fn advance(&mut self, new_head: Position, grew: bool) -> Option<Position> {
        self.body.push_front(new_head);
        if grew { None } else { self.body.pop_back() }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body.front().copied().unwrap_or(Position::ORIGIN)
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn speed_modifier(&self) -> i32 {
        self.speed_modifier
    }

    /// Replaces the speed bonus with the effect of the food just eaten.
    pub fn set_speed_modifier(&mut self, modifier: i32) {
        self.speed_modifier = modifier;
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{Position, Snake};
    use crate::config::GridSize;
    use crate::input::Direction;

    #[test]
    fn bounds_check_is_half_open() {
        let bounds = GridSize {
            width: 10,
            height: 8,
        };

        assert!(Position { x: 0, y: 0 }.is_within_bounds(bounds));
        assert!(Position { x: 9, y: 7 }.is_within_bounds(bounds));
        assert!(!Position { x: 10, y: 7 }.is_within_bounds(bounds));
        assert!(!Position { x: 9, y: 8 }.is_within_bounds(bounds));
        assert!(!Position { x: -1, y: 3 }.is_within_bounds(bounds));
        assert!(!Position { x: 3, y: -1 }.is_within_bounds(bounds));
    }

    #[test]
    fn new_snake_is_stacked_on_start_cell() {
        let snake = Snake::new(Position::ORIGIN, 3);

        assert_eq!(snake.len(), 3);
        assert!(snake.segments().all(|segment| *segment == Position::ORIGIN));
        assert_eq!(snake.speed_modifier(), 0);
    }

    #[test]
    fn next_head_follows_direction() {
        let snake = Snake::new(Position { x: 5, y: 5 }, 1);

        assert_eq!(snake.compute_next_head(Direction::Up), Position { x: 5, y: 4 });
        assert_eq!(snake.compute_next_head(Direction::Down), Position { x: 5, y: 6 });
        assert_eq!(snake.compute_next_head(Direction::Left), Position { x: 4, y: 5 });
        assert_eq!(snake.compute_next_head(Direction::Right), Position { x: 6, y: 5 });
    }

    #[test]
    fn advance_without_growth_keeps_length() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, 2);

        let dropped = snake.advance(Position { x: 6, y: 5 }, false);

        assert_eq!(dropped, Some(Position { x: 5, y: 5 }));
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Position { x: 6, y: 5 });
    }

    #[test]
    fn advance_with_growth_keeps_previous_tail() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, 2);

        let dropped = snake.advance(Position { x: 6, y: 5 }, true);

        assert_eq!(dropped, None);
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn stacked_segments_do_not_overlap_head_after_first_move() {
        let mut snake = Snake::new(Position::ORIGIN, 3);
        let next = snake.compute_next_head(Direction::Down);

        snake.advance(next, false);

        assert_eq!(snake.head(), Position { x: 0, y: 1 });
        assert!(!snake.head_overlaps_body());
    }
}

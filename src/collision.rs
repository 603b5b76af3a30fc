use crate::config::GridSize;
use crate::obstacle::ObstacleSet;
use crate::snake::Snake;

/// What the head ran into.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    ObstacleCollision,
    SelfCollision,
}

/// Checks the already advanced head against walls, obstacles and the body.
#[must_use]
pub fn detect_collision(
    bounds: GridSize,
    snake: &Snake,
    obstacles: &ObstacleSet,
) -> Option<DeathReason> {
    let head = snake.head();

    if !head.is_within_bounds(bounds) {
        Some(DeathReason::WallCollision)
    } else if obstacles.contains(head) {
        Some(DeathReason::ObstacleCollision)
    } else if snake.head_overlaps_body() {
        Some(DeathReason::SelfCollision)
    } else {
        None
    }
}

#[must_use]
pub fn check_collision(bounds: GridSize, snake: &Snake, obstacles: &ObstacleSet) -> bool {
    detect_collision(bounds, snake, obstacles).is_some()
}

#[cfg(test)]
mod tests {
    use super::{DeathReason, check_collision, detect_collision};
    use crate::config::GridSize;
    use crate::obstacle::ObstacleSet;
    use crate::snake::{Position, Snake};

    const BOUNDS: GridSize = GridSize {
        width: 6,
        height: 5,
    };

    #[test]
    fn head_past_any_edge_is_a_wall_collision() {
        for head in [
            Position { x: -1, y: 2 },
            Position { x: 6, y: 2 },
            Position { x: 2, y: -1 },
            Position { x: 2, y: 5 },
        ] {
            let snake = Snake::from_segments(vec![head, Position { x: 2, y: 2 }]);
            assert_eq!(
                detect_collision(BOUNDS, &snake, &ObstacleSet::new()),
                Some(DeathReason::WallCollision)
            );
        }
    }

    #[test]
    fn bottom_row_is_inside_bounds() {
        let snake = Snake::from_segments(vec![Position { x: 2, y: 4 }, Position { x: 2, y: 3 }]);
        assert!(!check_collision(BOUNDS, &snake, &ObstacleSet::new()));
    }

    #[test]
    fn head_on_obstacle_collides() {
        let obstacles: ObstacleSet = [Position { x: 3, y: 3 }].into_iter().collect();
        let snake = Snake::from_segments(vec![Position { x: 3, y: 3 }, Position { x: 2, y: 3 }]);

        assert_eq!(
            detect_collision(BOUNDS, &snake, &obstacles),
            Some(DeathReason::ObstacleCollision)
        );
    }

    #[test]
    fn head_on_body_collides() {
        let snake = Snake::from_segments(vec![
            Position { x: 1, y: 1 },
            Position { x: 2, y: 1 },
            Position { x: 1, y: 1 },
        ]);

        assert_eq!(
            detect_collision(BOUNDS, &snake, &ObstacleSet::new()),
            Some(DeathReason::SelfCollision)
        );
    }

    #[test]
    fn free_head_does_not_collide() {
        let obstacles: ObstacleSet = [Position { x: 5, y: 0 }].into_iter().collect();
        let snake = Snake::from_segments(vec![
            Position { x: 2, y: 2 },
            Position { x: 2, y: 1 },
            Position { x: 2, y: 0 },
        ]);

        assert!(!check_collision(BOUNDS, &snake, &obstacles));
    }
}

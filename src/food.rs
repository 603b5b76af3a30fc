use rand::Rng;

use crate::config::GridSize;
use crate::error::GameError;
use crate::level::FoodPolicy;
use crate::obstacle::ObstacleSet;
use crate::snake::{Position, Snake};

/// Speed effect of the level-2 random foods.
pub const SPEED_EFFECT: i32 = 2;

/// Speed effect of the level-3 alternating foods.
pub const STRONG_SPEED_EFFECT: i32 = 6;

/// Visual category of a food, derived from its effect value.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FoodCategory {
    Neutral,
    Slow,
    Fast,
    VerySlow,
    VeryFast,
}

impl FoodCategory {
    #[must_use]
    pub fn from_effect(effect_value: i32) -> Self {
        match effect_value {
            0 => Self::Neutral,
            v if v <= -STRONG_SPEED_EFFECT => Self::VerySlow,
            v if v < 0 => Self::Slow,
            v if v >= STRONG_SPEED_EFFECT => Self::VeryFast,
            _ => Self::Fast,
        }
    }
}

/// Food entity currently active on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
    /// Becomes the snake's speed modifier once eaten.
    pub effect_value: i32,
}

impl Food {
    #[must_use]
    pub fn new(position: Position, effect_value: i32) -> Self {
        Self {
            position,
            effect_value,
        }
    }

    /// Creates a food with no speed effect.
    #[must_use]
    pub fn neutral(position: Position) -> Self {
        Self::new(position, 0)
    }

    #[must_use]
    pub fn category(self) -> FoodCategory {
        FoodCategory::from_effect(self.effect_value)
    }
}

/// Result of one food spawn.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SpawnedFood {
    pub food: Food,
    /// Obstacle appended to the set as part of this spawn, if any.
    pub new_obstacle: Option<Position>,
}

/// Produces foods and counts every food ever created.
///
/// The counter lives for the whole process and is never reset between
/// sessions; it drives the level-3 alternation.
#[derive(Debug, Clone)]
pub struct FoodGenerator {
    created: u64,
    max_attempts: u32,
}

impl FoodGenerator {
    #[must_use]
    pub fn new(max_attempts: u32) -> Self {
        Self {
            created: 0,
            max_attempts,
        }
    }

    /// Number of foods created so far.
    #[must_use]
    pub fn created(&self) -> u64 {
        self.created
    }

    /// Spawns the next food for a level following `policy`.
    ///
    /// Under [`FoodPolicy::GrowingObstacles`] one obstacle is first appended to
    /// `obstacles` (never in column 0), then the food is placed avoiding it.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        bounds: GridSize,
        policy: FoodPolicy,
        snake: &Snake,
        obstacles: &mut ObstacleSet,
    ) -> Result<SpawnedFood, GameError> {
        let new_obstacle = if policy == FoodPolicy::GrowingObstacles {
            let cell = sample_free_cell(rng, bounds, 1, snake, obstacles, self.max_attempts)?;
            obstacles.push(cell);
            Some(cell)
        } else {
            None
        };

        let position = sample_free_cell(rng, bounds, 0, snake, obstacles, self.max_attempts)?;
        let effect_value = match policy {
            FoodPolicy::Neutral | FoodPolicy::GrowingObstacles => 0,
            FoodPolicy::RandomSpeed => rng.gen_range(-1..=1) * SPEED_EFFECT,
            FoodPolicy::Alternating if self.created % 2 == 0 => STRONG_SPEED_EFFECT,
            FoodPolicy::Alternating => -STRONG_SPEED_EFFECT,
        };
        self.created += 1;

        Ok(SpawnedFood {
            food: Food::new(position, effect_value),
            new_obstacle,
        })
    }
}

/// Rejection-samples a cell clear of the snake and all obstacles.
///
/// Columns `min_x..width` and every row except the bottom one are eligible.
/// Gives up with [`GameError::BoardSaturated`] after `max_attempts` draws.
pub fn sample_free_cell<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    min_x: i32,
    snake: &Snake,
    obstacles: &ObstacleSet,
    max_attempts: u32,
) -> Result<Position, GameError> {
    let max_x = i32::from(bounds.width) - 1;
    let max_y = i32::from(bounds.placement_rows()) - 1;
    let saturated = |attempts| GameError::BoardSaturated {
        width: bounds.width,
        height: bounds.height,
        attempts,
    };

    if min_x > max_x || max_y < 0 {
        return Err(saturated(0));
    }

    for _ in 0..max_attempts {
        let candidate = Position {
            x: rng.gen_range(min_x..=max_x),
            y: rng.gen_range(0..=max_y),
        };

        if !snake.occupies(candidate) && !obstacles.contains(candidate) {
            return Ok(candidate);
        }
    }

    Err(saturated(max_attempts))
}

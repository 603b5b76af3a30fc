use crate::config::GameConfig;
use crate::error::GameError;

/// One of the five playable levels.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Level {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl Level {
    /// All levels in ascending order.
    pub const ALL: [Level; 5] = [Level::One, Level::Two, Level::Three, Level::Four, Level::Five];

    /// Returns the 1-based level number.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
        }
    }

    /// Returns the 0-based index into per-level tables.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.number() - 1)
    }

    /// Resolves the static rules for this level.
    #[must_use]
    pub fn rules(self, config: &GameConfig) -> LevelRules {
        let (initial_obstacles, food_policy) = match self {
            Self::One => (0, FoodPolicy::Neutral),
            Self::Two => (0, FoodPolicy::RandomSpeed),
            Self::Three => (0, FoodPolicy::Alternating),
            Self::Four => (config.initial_obstacle_count, FoodPolicy::Neutral),
            Self::Five => (
                config.initial_obstacle_count / 2,
                FoodPolicy::GrowingObstacles,
            ),
        };

        LevelRules {
            initial_obstacles,
            food_policy,
        }
    }
}

impl TryFrom<u8> for Level {
    type Error = GameError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        match number {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            5 => Ok(Self::Five),
            other => Err(GameError::InvalidLevel(other)),
        }
    }
}

/// How food effect values are chosen on a level.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FoodPolicy {
    /// Effect is always 0.
    Neutral,
    /// Effect is uniformly one of -2, 0, +2.
    RandomSpeed,
    /// Effect is +6 for even creation indices and -6 for odd ones.
    Alternating,
    /// Effect is always 0, and every food spawn adds one obstacle.
    GrowingObstacles,
}

/// Per-level configuration resolved once at session start.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct LevelRules {
    pub initial_obstacles: usize,
    pub food_policy: FoodPolicy,
}

/// Milliseconds until the next tick.
///
/// Not clamped: a long snake with a high speed modifier yields zero or a
/// negative value. Extreme settings saturate at the `i64` range.
#[must_use]
pub fn tick_interval_ms(config: &GameConfig, snake_len: usize, speed_modifier: i32) -> i64 {
    let grown = i64::try_from(snake_len)
        .unwrap_or(i64::MAX)
        .saturating_sub(i64::try_from(config.initial_snake_length).unwrap_or(i64::MAX));
    let speed_points = grown.saturating_add(i64::from(speed_modifier));

    config
        .base_tick_interval_ms
        .saturating_sub(speed_points.saturating_mul(config.acceleration_step_ms))
}

#[cfg(test)]
mod tests {
    use super::{FoodPolicy, Level, tick_interval_ms};
    use crate::config::GameConfig;
    use crate::error::GameError;

    #[test]
    fn level_numbers_round_trip_through_try_from() {
        for level in Level::ALL {
            assert_eq!(Level::try_from(level.number()).ok(), Some(level));
        }
        assert!(matches!(Level::try_from(0), Err(GameError::InvalidLevel(0))));
        assert!(matches!(Level::try_from(6), Err(GameError::InvalidLevel(6))));
    }

    #[test]
    fn obstacle_counts_follow_level_table() {
        let config = GameConfig {
            initial_obstacle_count: 7,
            ..GameConfig::default()
        };

        assert_eq!(Level::One.rules(&config).initial_obstacles, 0);
        assert_eq!(Level::Two.rules(&config).initial_obstacles, 0);
        assert_eq!(Level::Three.rules(&config).initial_obstacles, 0);
        assert_eq!(Level::Four.rules(&config).initial_obstacles, 7);
        assert_eq!(Level::Five.rules(&config).initial_obstacles, 3);
    }

    #[test]
    fn food_policies_match_levels() {
        let config = GameConfig::default();

        assert_eq!(Level::One.rules(&config).food_policy, FoodPolicy::Neutral);
        assert_eq!(Level::Two.rules(&config).food_policy, FoodPolicy::RandomSpeed);
        assert_eq!(Level::Three.rules(&config).food_policy, FoodPolicy::Alternating);
        assert_eq!(Level::Four.rules(&config).food_policy, FoodPolicy::Neutral);
        assert_eq!(
            Level::Five.rules(&config).food_policy,
            FoodPolicy::GrowingObstacles
        );
    }

    #[test]
    fn interval_speeds_up_with_length_and_modifier() {
        let config = GameConfig {
            initial_snake_length: 3,
            base_tick_interval_ms: 200,
            acceleration_step_ms: 10,
            ..GameConfig::default()
        };

        assert_eq!(tick_interval_ms(&config, 3, 0), 200);
        assert_eq!(tick_interval_ms(&config, 5, 0), 180);
        assert_eq!(tick_interval_ms(&config, 5, 2), 160);
        assert_eq!(tick_interval_ms(&config, 4, -6), 250);
    }

    #[test]
    fn interval_is_not_clamped() {
        let config = GameConfig {
            initial_snake_length: 3,
            base_tick_interval_ms: 200,
            acceleration_step_ms: 10,
            ..GameConfig::default()
        };

        assert_eq!(tick_interval_ms(&config, 17, 6), 0);
        assert_eq!(tick_interval_ms(&config, 30, 6), -130);
    }

    #[test]
    fn huge_acceleration_step_saturates_instead_of_overflowing() {
        let config = GameConfig {
            initial_snake_length: 3,
            base_tick_interval_ms: 200,
            acceleration_step_ms: i64::MAX / 2,
            ..GameConfig::default()
        };
        config.validate().expect("extreme step is still a valid config");

        assert_eq!(tick_interval_ms(&config, 4, 6), 200 - i64::MAX);
        assert_eq!(tick_interval_ms(&config, 3, -6), i64::MAX);
        assert_eq!(tick_interval_ms(&config, 3, 0), 200);
    }
}

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use serde::Deserialize;

use crate::error::GameError;

const APP_DIR_NAME: &str = "level-snake";
const CONFIG_FILE_NAME: &str = "config.json";
const LOG_FILE_NAME: &str = "level-snake.log";

/// Number of playable levels.
pub const LEVEL_COUNT: usize = 5;

/// Default board width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 24;

/// Default board height in cells. The last row is reserved for the HUD.
pub const DEFAULT_GRID_HEIGHT: u16 = 18;

/// Segments a snake starts with, all stacked on the origin cell.
pub const DEFAULT_INITIAL_SNAKE_LENGTH: usize = 3;

/// Tick interval of a fresh snake, in milliseconds.
pub const DEFAULT_BASE_TICK_INTERVAL_MS: i64 = 200;

/// Milliseconds removed from the interval per grown segment or speed point.
pub const DEFAULT_ACCELERATION_STEP_MS: i64 = 10;

/// Obstacles placed at the start of level 4 (level 5 starts with half).
pub const DEFAULT_INITIAL_OBSTACLE_COUNT: usize = 20;

/// Upper bound on rejection-sampling draws for one placement.
pub const DEFAULT_MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

/// Terminal columns used to draw one grid cell.
pub const CELL_COLUMNS: u16 = 2;

pub const GLYPH_SNAKE: &str = "██";
pub const GLYPH_OBSTACLE: &str = "▓▓";
pub const GLYPH_FOOD: &str = "()";

/// Logical grid dimensions in cells.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Rows food and incremental obstacles may be placed in.
    ///
    /// The bottom row stays free of items, the snake may still enter it.
    #[must_use]
    pub fn placement_rows(self) -> u16 {
        self.height.saturating_sub(1)
    }
}

/// Tunable gameplay settings, read from `config.json`.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid_width: u16,
    pub grid_height: u16,
    pub initial_snake_length: usize,
    pub base_tick_interval_ms: i64,
    pub acceleration_step_ms: i64,
    pub initial_obstacle_count: usize,
    pub max_placement_attempts: u32,
    pub theme: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            initial_snake_length: DEFAULT_INITIAL_SNAKE_LENGTH,
            base_tick_interval_ms: DEFAULT_BASE_TICK_INTERVAL_MS,
            acceleration_step_ms: DEFAULT_ACCELERATION_STEP_MS,
            initial_obstacle_count: DEFAULT_INITIAL_OBSTACLE_COUNT,
            max_placement_attempts: DEFAULT_MAX_PLACEMENT_ATTEMPTS,
            theme: THEME_CLASSIC.name.to_owned(),
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn grid(&self) -> GridSize {
        GridSize {
            width: self.grid_width,
            height: self.grid_height,
        }
    }

    /// Parses and validates a JSON document. Missing keys keep their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, GameError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path`, or from the per-user config file.
    ///
    /// An explicit path must exist. The per-user file is optional and its
    /// absence yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, GameError> {
        match path {
            Some(path) => Self::from_json_str(&fs::read_to_string(path)?),
            None => load_optional(&default_config_path()),
        }
    }

    /// Rejects settings the simulation cannot run with.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.grid_width < 2 || self.grid_height < 2 {
            return Err(GameError::InvalidConfig(format!(
                "grid must be at least 2x2 cells, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }

        if self.initial_snake_length == 0 {
            return Err(GameError::InvalidConfig(
                "initial_snake_length must be at least 1".to_owned(),
            ));
        }

        if self.max_placement_attempts == 0 {
            return Err(GameError::InvalidConfig(
                "max_placement_attempts must be at least 1".to_owned(),
            ));
        }

        if theme_by_name(&self.theme).is_none() {
            return Err(GameError::InvalidConfig(format!(
                "unknown theme `{}`",
                self.theme
            )));
        }

        Ok(())
    }

    /// Returns the configured theme, falling back to the classic one.
    #[must_use]
    pub fn theme(&self) -> &'static Theme {
        theme_by_name(&self.theme).unwrap_or(&THEME_CLASSIC)
    }
}

fn load_optional(path: &Path) -> Result<GameConfig, GameError> {
    match fs::read_to_string(path) {
        Ok(raw) => GameConfig::from_json_str(&raw),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(GameConfig::default()),
        Err(e) => Err(e.into()),
    }
}

/// Returns the platform-correct per-user config file path.
#[must_use]
pub fn default_config_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    base
}

/// Returns the platform-correct log file path.
#[must_use]
pub fn default_log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(LOG_FILE_NAME);
    base
}

/// A color theme applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub name: &'static str,
    pub snake: Color,
    pub obstacle: Color,
    /// Food with no speed effect.
    pub food_neutral: Color,
    pub food_slow: Color,
    pub food_fast: Color,
    pub food_very_slow: Color,
    pub food_very_fast: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub text: Color,
    pub text_muted: Color,
    pub title: Color,
}

/// Green snake on black, the default.
pub const THEME_CLASSIC: Theme = Theme {
    name: "classic",
    snake: Color::Green,
    obstacle: Color::Gray,
    food_neutral: Color::Red,
    food_slow: Color::LightBlue,
    food_fast: Color::LightYellow,
    food_very_slow: Color::Blue,
    food_very_fast: Color::Yellow,
    play_bg: Color::Black,
    border_fg: Color::White,
    text: Color::White,
    text_muted: Color::DarkGray,
    title: Color::Green,
};

/// Ocean cyan theme.
pub const THEME_OCEAN: Theme = Theme {
    name: "ocean",
    snake: Color::Cyan,
    obstacle: Color::DarkGray,
    food_neutral: Color::Yellow,
    food_slow: Color::LightGreen,
    food_fast: Color::LightMagenta,
    food_very_slow: Color::Green,
    food_very_fast: Color::Magenta,
    play_bg: Color::Black,
    border_fg: Color::Cyan,
    text: Color::Cyan,
    text_muted: Color::DarkGray,
    title: Color::Cyan,
};

/// All available themes.
pub const THEMES: &[Theme] = &[THEME_CLASSIC, THEME_OCEAN];

#[must_use]
pub fn theme_by_name(name: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|theme| theme.name.eq_ignore_ascii_case(name))
}

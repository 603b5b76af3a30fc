use std::collections::VecDeque;
use std::time::Instant;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::collision::{DeathReason, detect_collision};
use crate::config::{GameConfig, GridSize};
use crate::error::GameError;
use crate::food::{Food, FoodGenerator, SpawnedFood};
use crate::input::{Direction, GameInput, reverse_blocked};
use crate::level::{Level, LevelRules, tick_interval_ms};
use crate::obstacle::ObstacleSet;
use crate::records::LevelRecords;
use crate::renderer::{Renderer, SegmentHandle};
use crate::scheduler::TickScheduler;
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    /// No session has been played yet.
    Idle,
    Running,
    GameOver,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The tick belonged to a finished or replaced session and was ignored.
    Stale,
    Moved,
    Ate,
    GameOver(DeathReason),
}

/// Entities owned by one play-through of a level.
#[derive(Debug, Clone)]
pub struct Session {
    pub score: u32,
    pub snake: Snake,
    pub food: Food,
    pub obstacles: ObstacleSet,
    level: Level,
    rules: LevelRules,
    segment_handles: VecDeque<SegmentHandle>,
}

impl Session {
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }
}

/// Everything that outlives a single session, plus the current session.
#[derive(Debug, Clone)]
pub struct ApplicationState {
    config: GameConfig,
    bounds: GridSize,
    status: GameStatus,
    direction: Direction,
    records: LevelRecords,
    food_generator: FoodGenerator,
    generation: u64,
    scheduler: TickScheduler,
    session: Option<Session>,
    death_reason: Option<DeathReason>,
    rng: StdRng,
}

impl ApplicationState {
    /// Creates an idle application seeded from system entropy.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        Self {
            bounds: config.grid(),
            food_generator: FoodGenerator::new(config.max_placement_attempts),
            config,
            status: GameStatus::Idle,
            direction: Direction::Down,
            records: LevelRecords::new(),
            generation: 0,
            scheduler: TickScheduler::new(),
            session: None,
            death_reason: None,
            rng,
        }
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// True while a session is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Running
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn records(&self) -> &LevelRecords {
        &self.records
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Generation of the most recently started session.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    /// The running or last finished session.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    /// Why the last session ended, if it ended in a collision.
    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    /// Applies one external command. Quit is left to the caller.
    pub fn apply_input<R: Renderer + ?Sized>(
        &mut self,
        input: GameInput,
        renderer: &mut R,
    ) -> Result<(), GameError> {
        match input {
            GameInput::StartLevel(level) => self.start_level(level, renderer)?,
            GameInput::ShowRecords => {
                self.show_records(renderer);
            }
            GameInput::Direction(direction) => {
                self.change_direction(direction);
            }
            GameInput::Quit => {}
        }

        Ok(())
    }

    /// Starts a fresh session on `level`, unless one is already running.
    ///
    /// Any tick still pending from an earlier session is dropped and the
    /// first tick of the new session is scheduled immediately.
    pub fn start_level<R: Renderer + ?Sized>(
        &mut self,
        level: Level,
        renderer: &mut R,
    ) -> Result<(), GameError> {
        if self.is_active() {
            debug!("ignoring start of level {}: a session is running", level.number());
            return Ok(());
        }

        self.generation += 1;
        self.scheduler.cancel();
        self.session = None;
        self.death_reason = None;
        renderer.clear_all();

        let rules = level.rules(&self.config);
        let mut obstacles = ObstacleSet::scatter(&mut self.rng, self.bounds, rules.initial_obstacles);
        for obstacle in obstacles.iter() {
            renderer.draw_obstacle(*obstacle);
        }

        self.direction = Direction::Down;
        let snake = Snake::new(Position::ORIGIN, self.config.initial_snake_length);
        let segment_handles = snake
            .segments()
            .map(|segment| renderer.draw_snake_segment(*segment))
            .collect();

        let spawned = match self.food_generator.spawn(
            &mut self.rng,
            self.bounds,
            rules.food_policy,
            &snake,
            &mut obstacles,
        ) {
            Ok(spawned) => spawned,
            Err(error) => {
                warn!("could not start level {}: {error}", level.number());
                self.status = GameStatus::Idle;
                return Err(error);
            }
        };
        draw_spawned(renderer, spawned);

        renderer.update_status_line(level, self.records.get(level), 0);
        self.session = Some(Session {
            score: 0,
            snake,
            food: spawned.food,
            obstacles,
            level,
            rules,
            segment_handles,
        });
        self.status = GameStatus::Running;
        self.scheduler.schedule(self.generation, 0, Instant::now());

        info!(
            "started level {} (session {}, {} obstacles)",
            level.number(),
            self.generation,
            self.session.as_ref().map_or(0, |session| session.obstacles.len())
        );
        Ok(())
    }

    /// Turns the snake unless `requested` reverses it. Accepted in any state.
    ///
    /// Returns true when the direction was taken.
    pub fn change_direction(&mut self, requested: Direction) -> bool {
        if reverse_blocked(self.direction, requested) {
            return false;
        }

        self.direction = requested;
        true
    }

    /// Shows the records table. Refused while a session is running.
    pub fn show_records<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> bool {
        if self.is_active() {
            return false;
        }

        renderer.clear_all();
        renderer.show_records_table(&self.records);
        true
    }

    /// Runs the pending tick if it is due at `now`.
    pub fn run_due_tick<R: Renderer + ?Sized>(
        &mut self,
        now: Instant,
        renderer: &mut R,
    ) -> Result<Option<TickOutcome>, GameError> {
        match self.scheduler.take_due(now) {
            Some(tick) => self.tick(tick.generation, renderer).map(Some),
            None => Ok(None),
        }
    }

    /// Runs the pending tick without waiting for its due time.
    pub fn run_pending_tick<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
    ) -> Result<Option<TickOutcome>, GameError> {
        match self.scheduler.take_pending() {
            Some(tick) => self.tick(tick.generation, renderer).map(Some),
            None => Ok(None),
        }
    }

    /// Advances the session started as `generation` by one step.
    ///
    /// Ticks from any other generation, or arriving while no session runs,
    /// are ignored.
    pub fn tick<R: Renderer + ?Sized>(
        &mut self,
        generation: u64,
        renderer: &mut R,
    ) -> Result<TickOutcome, GameError> {
        if generation != self.generation || !self.is_active() {
            debug!("discarding stale tick of session {generation}");
            return Ok(TickOutcome::Stale);
        }
        let Some(session) = self.session.as_mut() else {
            return Ok(TickOutcome::Stale);
        };

        let next_head = session.snake.compute_next_head(self.direction);
        let ate = next_head == session.food.position;

        if ate {
            session.score += 1;
            if self.records.submit(session.level, session.score) {
                debug!(
                    "new level {} record: {}",
                    session.level.number(),
                    session.score
                );
            }
            renderer.update_status_line(
                session.level,
                self.records.get(session.level),
                session.score,
            );
            session.snake.set_speed_modifier(session.food.effect_value);
        }

        session.snake.advance(next_head, ate);
        session
            .segment_handles
            .push_front(renderer.draw_snake_segment(next_head));
        if !ate {
            if let Some(tail) = session.segment_handles.pop_back() {
                renderer.remove_snake_segment(tail);
            }
        }

        if ate {
            renderer.remove_food();
            let spawned = self.food_generator.spawn(
                &mut self.rng,
                self.bounds,
                session.rules.food_policy,
                &session.snake,
                &mut session.obstacles,
            );
            match spawned {
                Ok(spawned) => {
                    debug!(
                        "food #{} at {:?} (effect {})",
                        self.food_generator.created(),
                        spawned.food.position,
                        spawned.food.effect_value
                    );
                    session.food = spawned.food;
                    draw_spawned(renderer, spawned);
                }
                Err(error) => {
                    warn!("ending session {generation}: {error}");
                    self.end_session(None, renderer);
                    return Err(error);
                }
            }
        }

        if let Some(reason) = detect_collision(self.bounds, &session.snake, &session.obstacles) {
            info!(
                "game over on level {} with score {}: {reason:?}",
                session.level.number(),
                session.score
            );
            self.end_session(Some(reason), renderer);
            return Ok(TickOutcome::GameOver(reason));
        }

        let interval = tick_interval_ms(
            &self.config,
            session.snake.len(),
            session.snake.speed_modifier(),
        );
        self.scheduler.schedule(generation, interval, Instant::now());

        Ok(if ate {
            TickOutcome::Ate
        } else {
            TickOutcome::Moved
        })
    }

    fn end_session<R: Renderer + ?Sized>(&mut self, reason: Option<DeathReason>, renderer: &mut R) {
        self.status = GameStatus::GameOver;
        self.death_reason = reason;
        self.scheduler.cancel();
        renderer.clear_all();
        renderer.show_game_over_message(reason);
    }
}

fn draw_spawned<R: Renderer + ?Sized>(renderer: &mut R, spawned: SpawnedFood) {
    if let Some(obstacle) = spawned.new_obstacle {
        renderer.draw_obstacle(obstacle);
    }
    renderer.draw_food(spawned.food.position, spawned.food.category());
}

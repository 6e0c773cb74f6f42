//! Simulation state and core types
//!
//! One [`SnakeSim`] owns one grid/snake pair for one run; `reset` swaps in a
//! freshly built pair in a single assignment so no partial state is ever
//! observable.

use std::time::Duration;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{BASE_FOOD_VALUE, BASE_TICK_MS, DEFAULT_EXCLUSION_RADIUS, DEFAULT_OBSTACLE_DENSITY};

use super::grid::{Cell, GridWorld};
use super::snake::{Direction, Snake};

/// Lifecycle of one simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimStatus {
    /// Built or reset, waiting for a start (or a first direction input)
    Idle,
    /// Ticks advance the snake
    Running,
    /// Frozen; elapsed time is discarded, not owed
    Paused,
    /// Run ended; absorbing until an explicit reset
    Terminated,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionCause {
    Wall,
    SelfHit,
    Obstacle,
    /// The snake and obstacles cover the whole grid; no food can spawn
    BoardFull,
}

/// What a single tick did. This is the sole signal to the caller; nothing
/// escapes as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Moved { head: Cell },
    Ate { at: Cell, score: u64 },
    Collided { cause: CollisionCause, at: Cell },
}

/// Gameplay parameters, fixed for one run
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimConfig {
    pub cols: i32,
    pub rows: i32,
    /// Difficulty multiplier: scales the tick rate and the food value
    pub speed_factor: f32,
    pub obstacle_density: f32,
    pub exclusion_radius: i32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            cols: 30,
            rows: 20,
            speed_factor: 1.0,
            obstacle_density: DEFAULT_OBSTACLE_DENSITY,
            exclusion_radius: DEFAULT_EXCLUSION_RADIUS,
        }
    }
}

impl SimConfig {
    /// How long one tick lasts at this speed factor. The host accumulates
    /// elapsed wall-clock time against this.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(f64::from(BASE_TICK_MS) / f64::from(self.speed_factor) / 1000.0)
    }

    /// Points awarded per food at this speed factor.
    pub fn food_points(&self) -> u64 {
        (BASE_FOOD_VALUE as f32 * self.speed_factor).floor() as u64
    }
}

/// Read-only view of the simulation, handed to renderers each frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub cols: i32,
    pub rows: i32,
    /// Sorted row-major so equal states snapshot identically
    pub obstacles: Vec<Cell>,
    pub food: Option<Cell>,
    /// Head first
    pub body: Vec<Cell>,
    pub score: u64,
    pub status: SimStatus,
    pub ticks: u64,
}

/// One snake game: grid, body, directions, score, and run status
#[derive(Debug, Clone)]
pub struct SnakeSim {
    pub(super) config: SimConfig,
    pub(super) seed: u64,
    pub(super) rng: Pcg32,
    pub(super) grid: GridWorld,
    pub(super) snake: Snake,
    pub(super) current_dir: Direction,
    pub(super) pending_dir: Direction,
    pub(super) score: u64,
    pub(super) status: SimStatus,
    pub(super) ticks: u64,
}

impl SnakeSim {
    /// Build a fresh run: length-1 snake at the grid center facing right,
    /// obstacles scattered outside the exclusion zone, food spawned.
    pub fn new(config: SimConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let start = Cell::new(config.cols / 2, config.rows / 2);
        let mut grid = GridWorld::generate(
            config.cols,
            config.rows,
            config.obstacle_density,
            config.exclusion_radius,
            start,
            &mut rng,
        );
        let snake = Snake::spawn_at(start);

        // A board too cramped to hold food starts without one; the snake can
        // still move until it collides.
        let _ = grid.spawn_food(&mut rng, &snake);

        Self {
            config,
            seed,
            rng,
            grid,
            snake,
            current_dir: Direction::Right,
            pending_dir: Direction::Right,
            score: 0,
            status: SimStatus::Idle,
            ticks: 0,
        }
    }

    /// Discard the current run and build a fresh grid/snake pair. Valid from
    /// any state; a single assignment, so never partially observable.
    pub fn reset(&mut self, seed: u64) {
        *self = Self::new(self.config, seed);
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn status(&self) -> SimStatus {
        self.status
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Direction applied on the next tick's movement resolution.
    pub fn direction(&self) -> Direction {
        self.current_dir
    }

    pub fn grid(&self) -> &GridWorld {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Read-only state for rendering. Obstacles are sorted so two equal
    /// simulations produce byte-identical snapshots.
    pub fn snapshot(&self) -> Snapshot {
        let mut obstacles: Vec<Cell> = self.grid.obstacles().iter().copied().collect();
        obstacles.sort_unstable_by_key(|c| (c.y, c.x));

        Snapshot {
            cols: self.grid.cols(),
            rows: self.grid.rows(),
            obstacles,
            food: self.grid.food(),
            body: self.snake.cells().collect(),
            score: self.score,
            status: self.status,
            ticks: self.ticks,
        }
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut GridWorld {
        &mut self.grid
    }
}

//! Bramble Snake - a tick-based grid snake game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, snake body, tick state machine)
//! - `settings`: Difficulty presets and gameplay configuration
//! - `highscores`: Best-score persistence adapter
//! - `wasm`: Browser host (frame accumulator + JSON snapshots)
//!
//! The simulation never renders, persists, or schedules anything itself; a
//! host loop accumulates elapsed time, runs the ticks that are due, and reads
//! a snapshot for drawing.

pub mod highscores;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use highscores::BestScore;
pub use settings::{Difficulty, Settings};

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    /// Base tick interval in milliseconds, divided by the speed factor
    pub const BASE_TICK_MS: f32 = 100.0;
    /// Maximum ticks consumed per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Points for one food at speed factor 1.0
    pub const BASE_FOOD_VALUE: u64 = 10;
    /// Fraction of grid cells turned into obstacle bushes
    pub const DEFAULT_OBSTACLE_DENSITY: f32 = 0.08;
    /// Manhattan radius around the start cell kept free of obstacles
    pub const DEFAULT_EXCLUSION_RADIUS: i32 = 3;
    /// Rejection-sampling attempts per obstacle slot before it is skipped
    pub const OBSTACLE_SLOT_ATTEMPTS: u32 = 50;
    /// Uniform draws tried before food placement falls back to a full scan
    pub const FOOD_SAMPLE_ATTEMPTS: u32 = 64;
    /// Default pixels per grid cell
    pub const DEFAULT_CELL_SIZE_PX: u32 = 20;
}

/// Manhattan (taxicab) distance between two grid cells
#[inline]
pub fn manhattan(a: IVec2, b: IVec2) -> i32 {
    let d = (a - b).abs();
    d.x + d.y
}

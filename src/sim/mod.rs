//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, driven externally
//! - Seeded RNG only
//! - No rendering, storage, or platform dependencies

pub mod grid;
pub mod snake;
pub mod state;
pub mod tick;

pub use grid::{BoardFull, Cell, GridWorld};
pub use snake::{Direction, Snake};
pub use state::{CollisionCause, SimConfig, SimStatus, SnakeSim, Snapshot, TickOutcome};

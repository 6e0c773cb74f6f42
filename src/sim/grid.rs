//! Grid world: bounds, obstacle bushes, and food placement
//!
//! Coordinates are integer cells; (0, 0) is the top-left corner and y grows
//! downward. The grid owns everything static for one run (dimensions and
//! obstacles) plus the single food cell.

use std::collections::HashSet;
use std::fmt;

use glam::IVec2;
use rand::Rng;

use crate::consts::{FOOD_SAMPLE_ATTEMPTS, OBSTACLE_SLOT_ATTEMPTS};
use crate::manhattan;

use super::snake::Snake;

/// A single grid coordinate
pub type Cell = IVec2;

/// Food placement failed because no free cell remains on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardFull;

impl fmt::Display for BoardFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no free cell left on the board")
    }
}

impl std::error::Error for BoardFull {}

/// Static playfield for one simulation run
#[derive(Debug, Clone)]
pub struct GridWorld {
    cols: i32,
    rows: i32,
    obstacles: HashSet<Cell>,
    food: Option<Cell>,
}

impl GridWorld {
    /// Build a grid and scatter obstacles by rejection sampling.
    ///
    /// The obstacle count is a target, not a guarantee: each slot gets a
    /// bounded number of draws, and cells inside the exclusion radius around
    /// `start` or already occupied are rejected. A slot that runs out of
    /// attempts is skipped, so sparse or tiny grids end up with fewer bushes.
    pub fn generate(
        cols: i32,
        rows: i32,
        obstacle_density: f32,
        exclusion_radius: i32,
        start: Cell,
        rng: &mut impl Rng,
    ) -> Self {
        debug_assert!(cols > 0 && rows > 0);

        let target = ((cols * rows) as f32 * obstacle_density).floor() as usize;
        let mut obstacles = HashSet::with_capacity(target);

        for _ in 0..target {
            for _ in 0..OBSTACLE_SLOT_ATTEMPTS {
                let cell = Cell::new(rng.random_range(0..cols), rng.random_range(0..rows));
                if manhattan(cell, start) > exclusion_radius && !obstacles.contains(&cell) {
                    obstacles.insert(cell);
                    break;
                }
            }
        }

        Self {
            cols,
            rows,
            obstacles,
            food: None,
        }
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn obstacles(&self) -> &HashSet<Cell> {
        &self.obstacles
    }

    pub fn has_obstacle(&self, cell: Cell) -> bool {
        self.obstacles.contains(&cell)
    }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.cols && cell.y >= 0 && cell.y < self.rows
    }

    /// True if `cell` lies outside the grid or on an obstacle.
    pub fn is_blocked(&self, cell: Cell) -> bool {
        !self.in_bounds(cell) || self.obstacles.contains(&cell)
    }

    /// Place food on a uniformly random free cell.
    ///
    /// A bounded number of uniform draws rejects cells on the snake or on an
    /// obstacle; if they all miss, the remaining free cells are collected and
    /// one is picked uniformly, so placement stays uniform on crowded boards
    /// and a fully packed board reports [`BoardFull`] instead of spinning.
    pub fn spawn_food(&mut self, rng: &mut impl Rng, occupied: &Snake) -> Result<Cell, BoardFull> {
        for _ in 0..FOOD_SAMPLE_ATTEMPTS {
            let cell = Cell::new(
                rng.random_range(0..self.cols),
                rng.random_range(0..self.rows),
            );
            if !occupied.contains(cell) && !self.obstacles.contains(&cell) {
                self.food = Some(cell);
                return Ok(cell);
            }
        }

        let free: Vec<Cell> = (0..self.rows)
            .flat_map(|y| (0..self.cols).map(move |x| Cell::new(x, y)))
            .filter(|&cell| !occupied.contains(cell) && !self.obstacles.contains(&cell))
            .collect();

        if free.is_empty() {
            self.food = None;
            return Err(BoardFull);
        }

        let cell = free[rng.random_range(0..free.len())];
        self.food = Some(cell);
        Ok(cell)
    }

    #[cfg(test)]
    pub(crate) fn place_food(&mut self, cell: Cell) {
        self.food = Some(cell);
    }

    #[cfg(test)]
    pub(crate) fn add_obstacle(&mut self, cell: Cell) {
        self.obstacles.insert(cell);
    }
}

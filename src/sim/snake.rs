//! Snake body and movement directions
//!
//! The body is an ordered run of cells, head first. Adjacency and
//! distinctness are maintained by construction: the only mutations are
//! growing by one adjacent head cell and retracting the tail.

use std::collections::VecDeque;

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::manhattan;

use super::grid::Cell;

/// One of the four grid movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step for this direction; y grows downward.
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Map a raw unit vector to a direction. Anything that is not one of the
    /// four unit vectors is rejected.
    pub fn try_from_delta(delta: IVec2) -> Option<Self> {
        match (delta.x, delta.y) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }

    /// Map a touch-swipe vector to a direction by its dominant axis.
    /// Ties go vertical; a zero vector maps to nothing.
    pub fn from_swipe(delta: Vec2) -> Option<Self> {
        if delta == Vec2::ZERO {
            return None;
        }
        if delta.x.abs() > delta.y.abs() {
            Some(if delta.x > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            })
        } else {
            Some(if delta.y > 0.0 {
                Direction::Down
            } else {
                Direction::Up
            })
        }
    }
}

/// The snake's body: head at the front, tail at the back, length >= 1
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// A length-1 snake sitting on `cell`.
    pub fn spawn_at(cell: Cell) -> Self {
        let mut body = VecDeque::new();
        body.push_front(cell);
        Self { body }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    /// Prepend a new head. The caller passes an adjacent cell.
    pub fn grow(&mut self, head: Cell) {
        debug_assert_eq!(manhattan(head, self.head()), 1);
        self.body.push_front(head);
    }

    /// Drop the tail cell (movement without growth).
    pub fn retract(&mut self) {
        debug_assert!(self.body.len() > 1);
        self.body.pop_back();
    }
}

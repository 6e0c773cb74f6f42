//! Tick advance state machine
//!
//! `advance` resolves exactly one discrete step: promote the queued
//! direction, move the head, classify collisions in wall / self / obstacle
//! order, then grow or slide. A tick either fully commits or, on collision,
//! freezes the state before the invalid move. Control methods guard their
//! transitions and silently ignore everything else.

use super::grid::{BoardFull, Cell};
use super::snake::Direction;
use super::state::{CollisionCause, SimStatus, SnakeSim, TickOutcome};

impl SnakeSim {
    /// Idle -> Running. Any other state is a silent no-op; a terminated run
    /// needs an explicit [`reset`](Self::reset) first.
    pub fn start(&mut self) {
        if self.status != SimStatus::Idle {
            return;
        }
        self.status = SimStatus::Running;
    }

    /// Running -> Paused, otherwise a no-op.
    pub fn pause(&mut self) {
        if self.status == SimStatus::Running {
            self.status = SimStatus::Paused;
        }
    }

    /// Paused -> Running, otherwise a no-op.
    pub fn resume(&mut self) {
        if self.status == SimStatus::Paused {
            self.status = SimStatus::Running;
        }
    }

    /// Queue a direction for the next tick.
    ///
    /// An instant reversal of the direction applied this tick is rejected
    /// silently (it would bite the neck). Steering an idle game starts it;
    /// that coupling is how a run begins from input alone.
    pub fn set_direction(&mut self, dir: Direction) {
        if self.status == SimStatus::Terminated {
            return;
        }
        if dir == self.current_dir.opposite() {
            return;
        }
        self.pending_dir = dir;
        if self.status == SimStatus::Idle {
            self.start();
        }
    }

    /// Advance exactly one tick. Returns `None` unless Running; otherwise
    /// the outcome is the sole signal to the caller.
    pub fn advance(&mut self) -> Option<TickOutcome> {
        if self.status != SimStatus::Running {
            return None;
        }

        self.current_dir = self.pending_dir;
        let new_head = self.snake.head() + self.current_dir.delta();

        // Collision order: wall, then body (the tail has not been popped
        // yet, so it counts), then obstacle.
        if !self.grid.in_bounds(new_head) {
            return Some(self.terminate(CollisionCause::Wall, new_head));
        }
        if self.snake.contains(new_head) {
            return Some(self.terminate(CollisionCause::SelfHit, new_head));
        }
        if self.grid.has_obstacle(new_head) {
            return Some(self.terminate(CollisionCause::Obstacle, new_head));
        }

        self.snake.grow(new_head);
        self.ticks += 1;

        if self.grid.food() == Some(new_head) {
            self.score += self.config.food_points();
            match self.grid.spawn_food(&mut self.rng, &self.snake) {
                Ok(_) => Some(TickOutcome::Ate {
                    at: new_head,
                    score: self.score,
                }),
                // Snake plus obstacles cover the grid: nothing left to eat.
                Err(BoardFull) => Some(self.terminate(CollisionCause::BoardFull, new_head)),
            }
        } else {
            self.snake.retract();
            Some(TickOutcome::Moved { head: new_head })
        }
    }

    fn terminate(&mut self, cause: CollisionCause, at: Cell) -> TickOutcome {
        self.status = SimStatus::Terminated;
        TickOutcome::Collided { cause, at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manhattan;
    use crate::sim::state::SimConfig;
    use proptest::prelude::*;

    fn open_config(cols: i32, rows: i32) -> SimConfig {
        SimConfig {
            cols,
            rows,
            speed_factor: 1.0,
            obstacle_density: 0.0,
            exclusion_radius: 0,
        }
    }

    /// 5x5, no obstacles, snake at (2, 2) facing right.
    fn sim_5x5() -> SnakeSim {
        SnakeSim::new(open_config(5, 5), 99)
    }

    #[test]
    fn test_eat_grows_and_scores() {
        let mut sim = sim_5x5();
        sim.grid_mut().place_food(Cell::new(3, 2));
        sim.start();

        let outcome = sim.advance().unwrap();
        assert_eq!(
            outcome,
            TickOutcome::Ate {
                at: Cell::new(3, 2),
                score: 10
            }
        );
        assert_eq!(
            sim.snake().cells().collect::<Vec<_>>(),
            vec![Cell::new(3, 2), Cell::new(2, 2)]
        );
        assert_eq!(sim.score(), 10);

        let food = sim.grid().food().expect("food respawned");
        assert_ne!(food, Cell::new(3, 2));
        assert!(!sim.snake().contains(food));
    }

    #[test]
    fn test_food_score_scales_with_speed() {
        let mut config = open_config(7, 7);
        config.speed_factor = 1.12;
        let mut sim = SnakeSim::new(config, 5);
        sim.grid_mut().place_food(Cell::new(4, 3));
        sim.start();

        sim.advance();
        assert_eq!(sim.score(), 11); // floor(10 * 1.12)
    }

    #[test]
    fn test_wall_collision_terminates() {
        let mut sim = sim_5x5();
        sim.grid_mut().place_food(Cell::new(0, 0));
        sim.set_direction(Direction::Up);
        assert_eq!(sim.status(), SimStatus::Running);

        sim.advance(); // (2, 1)
        sim.advance(); // (2, 0)
        let outcome = sim.advance().unwrap();
        assert_eq!(
            outcome,
            TickOutcome::Collided {
                cause: CollisionCause::Wall,
                at: Cell::new(2, -1)
            }
        );
        assert_eq!(sim.status(), SimStatus::Terminated);
        // State froze before the invalid move.
        assert_eq!(sim.snake().head(), Cell::new(2, 0));
        assert_eq!(sim.advance(), None);
    }

    #[test]
    fn test_self_collision_on_body_cell() {
        let mut sim = sim_5x5();
        sim.start();

        // Grow a hook by eating along the way.
        sim.grid_mut().place_food(Cell::new(3, 2));
        assert!(matches!(sim.advance(), Some(TickOutcome::Ate { .. })));
        sim.grid_mut().place_food(Cell::new(3, 3));
        sim.set_direction(Direction::Down);
        assert!(matches!(sim.advance(), Some(TickOutcome::Ate { .. })));
        sim.grid_mut().place_food(Cell::new(3, 4));
        assert!(matches!(sim.advance(), Some(TickOutcome::Ate { .. })));
        sim.grid_mut().place_food(Cell::new(2, 4));
        sim.set_direction(Direction::Left);
        assert!(matches!(sim.advance(), Some(TickOutcome::Ate { .. })));

        // body: [(2,4), (3,4), (3,3), (3,2), (2,2)]
        sim.grid_mut().place_food(Cell::new(0, 0));
        sim.set_direction(Direction::Up);
        assert!(matches!(sim.advance(), Some(TickOutcome::Moved { .. })));

        // body: [(2,3), (2,4), (3,4), (3,3), (3,2)]; turning right runs
        // into (3,3), a body cell that is not the tail.
        sim.set_direction(Direction::Right);
        let outcome = sim.advance().unwrap();
        assert_eq!(
            outcome,
            TickOutcome::Collided {
                cause: CollisionCause::SelfHit,
                at: Cell::new(3, 3)
            }
        );
        assert_eq!(sim.status(), SimStatus::Terminated);
        assert_eq!(sim.snake().len(), 5);
    }

    #[test]
    fn test_tail_cell_counts_as_self_collision() {
        // The tail has not been popped when the head moves, so re-entering
        // the tail cell terminates.
        let mut sim = sim_5x5();
        sim.start();

        sim.grid_mut().place_food(Cell::new(3, 2));
        sim.advance();
        sim.grid_mut().place_food(Cell::new(3, 3));
        sim.set_direction(Direction::Down);
        sim.advance();
        sim.grid_mut().place_food(Cell::new(2, 3));
        sim.set_direction(Direction::Left);
        sim.advance();

        // body: [(2,3), (3,3), (3,2), (2,2)]; up closes the square onto
        // the current tail.
        sim.set_direction(Direction::Up);
        let outcome = sim.advance().unwrap();
        assert_eq!(
            outcome,
            TickOutcome::Collided {
                cause: CollisionCause::SelfHit,
                at: Cell::new(2, 2)
            }
        );
    }

    #[test]
    fn test_obstacle_collision_terminates() {
        let mut sim = sim_5x5();
        sim.grid_mut().add_obstacle(Cell::new(3, 2));
        sim.grid_mut().place_food(Cell::new(0, 0));
        sim.start();

        let outcome = sim.advance().unwrap();
        assert_eq!(
            outcome,
            TickOutcome::Collided {
                cause: CollisionCause::Obstacle,
                at: Cell::new(3, 2)
            }
        );
        assert_eq!(sim.status(), SimStatus::Terminated);
        assert_eq!(sim.snake().len(), 1);
    }

    #[test]
    fn test_reversal_rejected() {
        let mut sim = sim_5x5();
        sim.grid_mut().place_food(Cell::new(0, 0));
        sim.set_direction(Direction::Right); // also starts the game
        sim.set_direction(Direction::Left); // instant reversal, ignored

        sim.advance();
        assert_eq!(sim.snake().head(), Cell::new(3, 2)); // moved right
    }

    #[test]
    fn test_pause_resume_idempotent() {
        let mut sim = sim_5x5();
        sim.start();

        sim.pause();
        sim.pause();
        assert_eq!(sim.status(), SimStatus::Paused);
        assert_eq!(sim.advance(), None);

        sim.resume();
        sim.resume();
        assert_eq!(sim.status(), SimStatus::Running);
    }

    #[test]
    fn test_invalid_transitions_are_noops() {
        let mut sim = sim_5x5();
        assert_eq!(sim.advance(), None); // not running yet

        sim.pause();
        assert_eq!(sim.status(), SimStatus::Idle);
        sim.resume();
        assert_eq!(sim.status(), SimStatus::Idle);

        sim.start();
        sim.start();
        assert_eq!(sim.status(), SimStatus::Running);
    }

    #[test]
    fn test_direction_input_starts_idle_game() {
        let mut sim = sim_5x5();
        assert_eq!(sim.status(), SimStatus::Idle);
        sim.set_direction(Direction::Down);
        assert_eq!(sim.status(), SimStatus::Running);
    }

    #[test]
    fn test_terminated_is_absorbing_until_reset() {
        let mut sim = SnakeSim::new(open_config(3, 3), 11); // head (1, 1)
        sim.grid_mut().place_food(Cell::new(0, 0));
        sim.start();
        sim.advance(); // (2, 1)
        sim.advance(); // wall at (3, 1)
        assert_eq!(sim.status(), SimStatus::Terminated);

        let frozen = sim.snapshot();
        sim.start();
        sim.set_direction(Direction::Down);
        assert_eq!(sim.advance(), None);
        assert_eq!(sim.snapshot(), frozen);

        sim.reset(12);
        assert_eq!(sim.status(), SimStatus::Idle);
        assert_eq!(sim.score(), 0);
        assert_eq!(sim.snake().len(), 1);
        assert_eq!(sim.snake().head(), Cell::new(1, 1));
        assert!(sim.grid().food().is_some());
    }

    #[test]
    fn test_board_full_terminates_with_distinct_cause() {
        // 1x2 column: eating the only free cell fills the board.
        let mut sim = SnakeSim::new(open_config(1, 2), 3); // head (0, 1)
        assert_eq!(sim.grid().food(), Some(Cell::new(0, 0)));

        sim.set_direction(Direction::Up);
        let outcome = sim.advance().unwrap();
        assert_eq!(
            outcome,
            TickOutcome::Collided {
                cause: CollisionCause::BoardFull,
                at: Cell::new(0, 0)
            }
        );
        assert_eq!(sim.status(), SimStatus::Terminated);
        assert_eq!(sim.score(), 10); // the food was still eaten
        assert_eq!(sim.snake().len(), 2);
        assert_eq!(sim.grid().food(), None);
    }

    #[test]
    fn test_determinism_identical_inputs() {
        let config = SimConfig {
            cols: 12,
            rows: 12,
            speed_factor: 1.0,
            obstacle_density: 0.1,
            exclusion_radius: 2,
        };
        let mut a = SnakeSim::new(config, 777);
        let mut b = SnakeSim::new(config, 777);
        a.start();
        b.start();

        let script = [
            Some(Direction::Down),
            None,
            Some(Direction::Left),
            None,
            None,
            Some(Direction::Up),
            None,
            Some(Direction::Right),
            None,
            None,
        ];
        for step in script {
            if let Some(dir) = step {
                a.set_direction(dir);
                b.set_direction(dir);
            }
            assert_eq!(a.advance(), b.advance());
            assert_eq!(a.snapshot(), b.snapshot());
        }
    }

    proptest! {
        #[test]
        fn prop_reachable_states_keep_invariants(
            seed in any::<u64>(),
            moves in prop::collection::vec(0u8..4, 1..120),
        ) {
            let config = SimConfig {
                cols: 8,
                rows: 8,
                speed_factor: 1.0,
                obstacle_density: 0.1,
                exclusion_radius: 2,
            };
            let mut sim = SnakeSim::new(config, seed);
            sim.start();

            for &m in &moves {
                let dir = match m {
                    0 => Direction::Up,
                    1 => Direction::Down,
                    2 => Direction::Left,
                    _ => Direction::Right,
                };
                sim.set_direction(dir);
                sim.advance();

                let snap = sim.snapshot();
                for (i, &a) in snap.body.iter().enumerate() {
                    for &b in &snap.body[i + 1..] {
                        prop_assert_ne!(a, b);
                    }
                }
                for pair in snap.body.windows(2) {
                    prop_assert_eq!(manhattan(pair[0], pair[1]), 1);
                }
                if let Some(food) = snap.food {
                    prop_assert!(!snap.body.contains(&food));
                    prop_assert!(!snap.obstacles.contains(&food));
                }
            }
        }
    }
}

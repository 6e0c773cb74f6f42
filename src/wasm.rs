//! Browser host adapter
//!
//! Owns the fixed-timestep accumulator and the storage adapters so the page
//! script only forwards input events, calls [`WebGame::frame`] from its
//! `requestAnimationFrame` loop, and draws from the JSON snapshot. All
//! simulation rules stay inside `sim`.

use glam::{IVec2, Vec2};
use rand::Rng;
use wasm_bindgen::prelude::*;

use crate::consts::MAX_SUBSTEPS;
use crate::highscores::BestScore;
use crate::settings::Settings;
use crate::sim::{Direction, SimStatus, SnakeSim, TickOutcome};

/// Longest frame gap credited to the accumulator, in milliseconds. Tab
/// switches and debugger pauses otherwise show up as huge catch-up bursts.
const MAX_FRAME_MS: f64 = 250.0;

/// One browser game: simulation plus the host-side loop state.
#[wasm_bindgen]
pub struct WebGame {
    sim: SnakeSim,
    settings: Settings,
    best: BestScore,
    tick_ms: f64,
    accumulator_ms: f64,
    best_recorded: bool,
}

#[wasm_bindgen]
impl WebGame {
    /// Build a game sized to the canvas, with stored settings and a fresh
    /// entropy seed.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_width_px: u32, canvas_height_px: u32) -> WebGame {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let settings = Settings::load();
        let config = settings.sim_config(canvas_width_px, canvas_height_px);
        let seed: u64 = rand::rng().random();
        log::info!(
            "new game: {}x{} grid, speed {}, seed {}",
            config.cols,
            config.rows,
            config.speed_factor,
            seed
        );

        let tick_ms = config.tick_interval().as_secs_f64() * 1000.0;
        WebGame {
            sim: SnakeSim::new(config, seed),
            settings,
            best: BestScore::load(),
            tick_ms,
            accumulator_ms: 0.0,
            best_recorded: false,
        }
    }

    /// Run the ticks owed for `elapsed_ms` of wall-clock time. Returns the
    /// number of ticks executed so the page can skip redraws on idle frames.
    ///
    /// While the game is not running the accumulator is cleared: paused or
    /// idle time is discarded, never repaid as a tick burst.
    pub fn frame(&mut self, elapsed_ms: f64) -> u32 {
        if self.sim.status() != SimStatus::Running {
            self.accumulator_ms = 0.0;
            return 0;
        }

        self.accumulator_ms += elapsed_ms.min(MAX_FRAME_MS);
        let mut steps = 0;
        while self.accumulator_ms >= self.tick_ms && steps < MAX_SUBSTEPS {
            self.accumulator_ms -= self.tick_ms;
            steps += 1;

            match self.sim.advance() {
                Some(TickOutcome::Collided { cause, at }) => {
                    log::info!("game over: {:?} at ({}, {})", cause, at.x, at.y);
                    self.record_best();
                    break;
                }
                Some(TickOutcome::Ate { score, .. }) => {
                    log::debug!("food eaten, score {score}");
                }
                _ => {}
            }
        }
        steps
    }

    /// Forward a raw unit vector from keys or on-screen buttons. Non-unit
    /// vectors are ignored; steering an idle game starts it.
    pub fn set_direction(&mut self, dx: i32, dy: i32) {
        if let Some(dir) = Direction::try_from_delta(IVec2::new(dx, dy)) {
            self.sim.set_direction(dir);
        }
    }

    /// Forward a touch-swipe vector (pixels); dominant axis wins.
    pub fn swipe(&mut self, dx: f32, dy: f32) {
        if let Some(dir) = Direction::from_swipe(Vec2::new(dx, dy)) {
            self.sim.set_direction(dir);
        }
    }

    pub fn pause(&mut self) {
        self.sim.pause();
    }

    pub fn resume(&mut self) {
        self.sim.resume();
    }

    /// Fresh run with a fresh seed; settings are re-read so slider changes
    /// take effect on the next game.
    pub fn reset(&mut self, canvas_width_px: u32, canvas_height_px: u32) {
        self.settings = Settings::load();
        let config = self.settings.sim_config(canvas_width_px, canvas_height_px);
        self.tick_ms = config.tick_interval().as_secs_f64() * 1000.0;
        self.sim = SnakeSim::new(config, rand::rng().random());
        self.accumulator_ms = 0.0;
        self.best_recorded = false;
    }

    /// Read-only render state as JSON:
    /// `{cols, rows, obstacles, food, body, score, status, ticks}`.
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.sim.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn best_score(&self) -> u64 {
        self.best.value()
    }

    fn record_best(&mut self) {
        if self.best_recorded {
            return;
        }
        self.best_recorded = true;
        if self.best.update(self.sim.score()) {
            self.best.save();
            log::info!("new best score: {}", self.best.value());
        }
    }
}

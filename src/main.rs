//! Bramble Snake entry point
//!
//! The web build is driven through the `wasm` module by the page script;
//! this binary runs a headless demo game on native: a greedy driver stands
//! in for a human while the real fixed-timestep loop consumes wall-clock
//! time, which makes it a handy smoke test for the whole stack.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::time::{Duration, Instant};

    use bramble_snake::consts::MAX_SUBSTEPS;
    use bramble_snake::highscores::BestScore;
    use bramble_snake::manhattan;
    use bramble_snake::settings::Settings;
    use bramble_snake::sim::{Direction, SnakeSim, TickOutcome};

    /// Render cadence of the pretend frontend.
    const FRAME: Duration = Duration::from_millis(16);
    /// Demo canvas, pixels.
    const CANVAS: (u32, u32) = (600, 400);
    /// The driver is not very good; cap the run regardless.
    const MAX_TICKS: u64 = 10_000;

    /// Greedy stand-in for a human: steer toward the food along the axis
    /// that shrinks the Manhattan distance, never into a wall, bush, or the
    /// body, never reversing.
    fn choose_direction(sim: &SnakeSim) -> Option<Direction> {
        let food = sim.grid().food()?;
        let head = sim.snake().head();
        let current = sim.direction();

        let mut best: Option<(i32, Direction)> = None;
        for dir in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            if dir == current.opposite() {
                continue;
            }
            let next = head + dir.delta();
            if sim.grid().is_blocked(next) || sim.snake().contains(next) {
                continue;
            }
            let dist = manhattan(next, food);
            if best.is_none_or(|(d, _)| dist < d) {
                best = Some((dist, dir));
            }
        }
        best.map(|(_, dir)| dir)
    }

    pub fn run(seed: u64) {
        let settings = Settings::load();
        let config = settings.sim_config(CANVAS.0, CANVAS.1);
        let tick = config.tick_interval();
        log::info!(
            "demo: {}x{} grid, speed {}, tick {:?}, seed {}",
            config.cols,
            config.rows,
            config.speed_factor,
            tick,
            seed
        );

        let mut sim = SnakeSim::new(config, seed);
        let mut best = BestScore::load();
        let mut accumulator = Duration::ZERO;
        let mut last = Instant::now();

        'frames: loop {
            std::thread::sleep(FRAME);
            let now = Instant::now();
            accumulator += now - last;
            last = now;

            // Input arrives at frame cadence, like a human on a keyboard.
            if let Some(dir) = choose_direction(&sim) {
                sim.set_direction(dir); // starts the run on the first frame
            }

            let mut substeps = 0;
            while accumulator >= tick && substeps < MAX_SUBSTEPS {
                accumulator -= tick;
                substeps += 1;

                match sim.advance() {
                    Some(TickOutcome::Ate { score, .. }) => {
                        log::info!("food eaten, score {score}");
                    }
                    Some(TickOutcome::Collided { cause, at }) => {
                        log::info!("game over: {:?} at ({}, {})", cause, at.x, at.y);
                        break 'frames;
                    }
                    _ => {}
                }
            }

            if sim.ticks() >= MAX_TICKS {
                log::info!("demo tick limit reached");
                break;
            }
        }

        let score = sim.score();
        if best.update(score) {
            best.save();
        }
        println!(
            "final score: {} (best {}), snake length {}, {} ticks",
            score,
            best.value(),
            sim.snake().len(),
            sim.ticks()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            use rand::Rng;
            rand::rng().random()
        });

    demo::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The wasm build is a library; the page script drives `wasm::WebGame`.
}

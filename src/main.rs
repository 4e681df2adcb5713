//! Invaders Core entry point
//!
//! Headless attract-mode runner: the autopilot plays a seeded game for a
//! fixed amount of simulated time and the outcome is printed.
//!
//! Usage: `invaders-core [tuning.json] [seed]`

use std::path::Path;

use invaders_core::Tuning;
use invaders_core::consts::*;
use invaders_core::renderer::draw_list;
use invaders_core::sim::{GameEvent, GameState, TickInput, tick};

/// Simulated host frames to run (five minutes at 60 Hz)
const DEMO_FRAMES: u32 = 60 * 60 * 5;

/// Host frame time; slightly off the sim rate to exercise the accumulator
const HOST_DT: f32 = 1.0 / 59.0;

struct Demo {
    state: GameState,
    accumulator: f32,
    input: TickInput,
    kills: u32,
    deaths: u32,
}

impl Demo {
    fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: GameState::with_tuning(seed, tuning),
            accumulator: 0.0,
            input: TickInput {
                idle_mode: true,
                ..Default::default()
            },
            kills: 0,
            deaths: 0,
        }
    }

    /// Run simulation ticks for one host frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            for event in self.state.drain_events() {
                match event {
                    GameEvent::AlienKilled => self.kills += 1,
                    GameEvent::PlayerDestroyed => self.deaths += 1,
                    GameEvent::WaveCleared(wave) => log::info!("Demo reached wave {wave}"),
                    _ => {}
                }
            }
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Invaders Core (headless demo) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => Tuning::load_or_default(Path::new(&path)),
        None => Tuning::default(),
    };
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::warn!("Invalid seed argument ({e}), using 0");
            0
        }
        None => 0,
    };

    let mut demo = Demo::new(seed, tuning);
    let mut frames = 0;
    while frames < DEMO_FRAMES && !demo.state.is_game_over() {
        demo.update(HOST_DT);
        frames += 1;
    }

    let quads = draw_list(&demo.state).len();
    log::debug!("Final frame has {quads} draw commands");

    let state = &demo.state;
    println!(
        "seed {} | {} frames | score {} (hi {}) | wave {} | lives {} | kills {} | deaths {}{}",
        seed,
        frames,
        state.score,
        state.hi_score,
        state.wave,
        state.player.lives,
        demo.kills,
        demo.deaths,
        if state.is_game_over() { " | game over" } else { "" }
    );
}

//! Lane Runner entry point
//!
//! Native builds run a headless demo round driven by the autopilot and keep
//! the best score in a JSON file. The browser build is driven from
//! JavaScript through `lane_runner::wasm`.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use lane_runner::best_score::{BestScore, FileStore};
    use lane_runner::sim::{GameEvent, RunnerSimulation, SeededRng, autopilot_command};
    use lane_runner::tuning::Tuning;

    /// Safety cap so a perfect autopilot still terminates
    const MAX_TICKS: u64 = 60 * 60 * 30;

    pub fn run() {
        let seed = std::env::var("LANE_RUNNER_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(2024);
        let tuning = match std::env::var("LANE_RUNNER_TUNING") {
            Ok(path) => match std::fs::read_to_string(&path) {
                Ok(json) => Tuning::from_json(&json),
                Err(e) => {
                    log::warn!("Could not read tuning {}: {}, using defaults", path, e);
                    Tuning::default()
                }
            },
            Err(_) => Tuning::default(),
        };
        let best_path = std::env::temp_dir().join("lane_runner_best.json");

        let mut sim = RunnerSimulation::with_parts(
            tuning,
            SeededRng::new(seed),
            BestScore::new(FileStore::new(&best_path)),
        );
        log::info!("Demo round (seed {}, best so far {})", seed, sim.best_score());

        sim.start();
        let mut ticks = 0;
        while sim.is_running() && ticks < MAX_TICKS {
            let command = autopilot_command(sim.state(), sim.tuning());
            for event in sim.tick(command) {
                match event {
                    GameEvent::LifeLost { lives } => log::info!("Life lost at tick {ticks}, {lives} left"),
                    GameEvent::PowerUpGained(p) => log::info!("Picked up {p:?}"),
                    GameEvent::NewBestScore { score } => log::info!("New best score: {score}"),
                    other => log::debug!("{other:?}"),
                }
            }
            ticks += 1;
        }

        let snap = sim.snapshot();
        println!(
            "Final score {} after {} ticks ({:?}), best {}",
            snap.score, ticks, snap.phase, snap.best_score
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Lane Runner (native) starting...");
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is lane_runner::wasm::wasm_start, this is just to satisfy the compiler
}

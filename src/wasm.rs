//! Browser bindings
//!
//! Exposes a [`WebRunner`] to JavaScript. The page owns the canvas and the
//! `requestAnimationFrame` loop; it forwards keys/swipes, calls `tick` once
//! per frame and draws from the snapshot JSON.

use wasm_bindgen::prelude::*;

use crate::best_score::{BestScore, LocalStore};
use crate::input::Command;
use crate::sim::{RunnerSimulation, SeededRng};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Lane Runner loaded");
}

/// One browser game instance
#[wasm_bindgen]
pub struct WebRunner {
    sim: RunnerSimulation<SeededRng>,
}

#[wasm_bindgen]
impl WebRunner {
    /// Create a runner. `tuning_json` may be empty for the default balance.
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: &str) -> WebRunner {
        let tuning = if tuning_json.trim().is_empty() {
            Tuning::default()
        } else {
            Tuning::from_json(tuning_json)
        };
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64 ^ js_sys::Date::now() as u64;
        log::info!("New runner (seed {seed})");
        WebRunner {
            sim: RunnerSimulation::with_parts(tuning, SeededRng::new(seed), BestScore::new(LocalStore)),
        }
    }

    pub fn start(&mut self) {
        self.sim.start();
    }

    /// Queue a named command ("left", "right", "jump"). Unknown names are ignored.
    pub fn command(&mut self, name: &str) -> bool {
        self.queue(Command::parse(name))
    }

    /// Queue the command for a `KeyboardEvent.key`
    pub fn key(&mut self, key: &str) -> bool {
        self.queue(Command::from_key(key))
    }

    /// Queue the command for a touch swipe delta
    pub fn swipe(&mut self, dx: f32, dy: f32) -> bool {
        self.queue(Command::from_swipe(dx, dy))
    }

    /// Advance one frame; returns the emitted events as JSON
    pub fn tick(&mut self) -> String {
        let events = self.sim.tick(None);
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn snapshot(&self) -> String {
        self.sim.snapshot().to_json()
    }

    pub fn running(&self) -> bool {
        self.sim.is_running()
    }

    #[wasm_bindgen(js_name = bestScore)]
    pub fn best_score(&self) -> f64 {
        self.sim.best_score() as f64
    }
}

impl WebRunner {
    fn queue(&mut self, command: Option<Command>) -> bool {
        match command {
            Some(command) if self.sim.is_running() => {
                self.sim.queue_command(command);
                true
            }
            _ => false,
        }
    }
}

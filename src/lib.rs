//! Lane Runner - A three-lane endless runner simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, round state)
//! - `tuning`: Data-driven game balance
//! - `best_score`: Persisted best score (LocalStorage on web, JSON file on native)
//! - `input`: Key/swipe classification into lane commands
//! - `projection`: Pseudo-3D lane/depth to screen mapping for renderers

pub mod best_score;
pub mod input;
pub mod projection;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use best_score::{BestScore, MemoryStore, ScoreStore};
pub use input::Command;
pub use sim::{GameEvent, GamePhase, RunnerSimulation, Snapshot};
pub use tuning::Tuning;

/// Game configuration constants shared by every tuning
pub mod consts {
    /// Number of lanes (0 = left, 1 = center, 2 = right)
    pub const LANE_COUNT: u8 = 3;
    /// Lane the player starts in
    pub const CENTER_LANE: u8 = 1;

    /// Numerator of the spawn interval formula: `60 / (speed * 100)`
    pub const SPAWN_INTERVAL_NUMERATOR: f32 = 60.0;
    /// Speed is scaled by this before dividing into the numerator
    pub const SPAWN_SPEED_SCALE: f32 = 100.0;

    /// Score at which the difficulty factor would reach 1.0
    pub const DIFFICULTY_SCORE_DIVISOR: f32 = 500.0;
    /// Difficulty factor cap (good items never drop below 20%)
    pub const DIFFICULTY_CAP: f32 = 0.4;

    /// Cumulative spawn thresholds at difficulty 0
    pub const GOOD_BAND: f32 = 0.6;
    pub const WALL_BAND: f32 = 0.85;
    pub const BAD_BAND: f32 = 0.95;

    /// Cosmetic icon variants per kind
    pub const GOOD_VARIANTS: u8 = 4;
    pub const BAD_VARIANTS: u8 = 3;

    /// Key under which the best score is persisted
    pub const BEST_SCORE_KEY: &str = "promiseHighScore";
}

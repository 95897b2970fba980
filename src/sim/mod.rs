//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete step per host call, no internal timers
//! - Injected RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod events;
pub mod rng;
pub mod runner;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_command;
pub use collision::{Contact, apply_hit, check_contact, resolve_collisions};
pub use events::GameEvent;
pub use rng::{RandomSource, ScriptedRandom, SeededRng};
pub use runner::RunnerSimulation;
pub use snapshot::{ObjectView, PlayerView, Snapshot};
pub use spawn::{classify_roll, difficulty_factor, spawn_interval, spawn_object};
pub use state::{GamePhase, GameState, LaneObject, ObjectKind, Player, PowerUp, RoundState};
pub use tick::{apply_command, start, tick};

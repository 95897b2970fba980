//! Events emitted by a tick for the presentation layer

use serde::{Deserialize, Serialize};

use super::state::{ObjectKind, PowerUp};

/// Something the host may want to draw, play or persist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ObjectSpawned { id: u32, kind: ObjectKind, lane: u8 },
    ObjectHit { id: u32, kind: ObjectKind },
    PowerUpGained(PowerUp),
    PowerUpExpired(PowerUp),
    /// Shield absorbed a hazard
    ShieldConsumed,
    ScoreChanged { score: u64 },
    LifeLost { lives: u8 },
    GameOver { final_score: u64 },
    /// Final score beat the stored best
    NewBestScore { score: u64 },
}

//! Read-only view of a simulation for renderers

use serde::{Deserialize, Serialize};

use super::state::{GamePhase, GameState, ObjectKind};

/// Player fields a renderer needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub lane: u8,
    pub x: f32,
    pub y: f32,
    pub is_jumping: bool,
    pub has_magnet: bool,
    pub magnet_ticks_remaining: u32,
    pub has_shield: bool,
}

/// A lane object as drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectView {
    pub id: u32,
    pub kind: ObjectKind,
    pub lane: u8,
    pub x_pos: f32,
    pub depth: f32,
    pub variant: u8,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    pub speed: f32,
    pub frame: u64,
    pub best_score: u64,
    pub player: PlayerView,
    /// Sorted far to near so renderers can paint back to front
    pub objects: Vec<ObjectView>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let p = &state.player;
        let mut objects: Vec<ObjectView> = state
            .objects
            .iter()
            .filter(|o| o.active)
            .map(|o| ObjectView {
                id: o.id,
                kind: o.kind,
                lane: o.lane,
                x_pos: o.x_pos,
                depth: o.depth,
                variant: o.variant,
            })
            .collect();
        objects.sort_by(|a, b| a.depth.total_cmp(&b.depth).then(a.id.cmp(&b.id)));

        Self {
            phase: state.round.phase,
            score: state.round.score,
            lives: state.round.lives,
            speed: state.round.speed,
            frame: state.round.frame_counter,
            best_score: state.best_score,
            player: PlayerView {
                lane: p.lane,
                x: p.x,
                y: p.y,
                is_jumping: p.is_jumping,
                has_magnet: p.has_magnet,
                magnet_ticks_remaining: p.magnet_ticks_remaining,
                has_shield: p.has_shield,
            },
            objects,
        }
    }

    /// JSON for hosts that render outside Rust
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

//! Collision detection and hit resolution
//!
//! Objects are tested only while inside the collision band just in front of
//! the player. Contact is a lateral tolerance check, since the eased player
//! position never lands exactly on a lane.

use super::events::GameEvent;
use super::state::{GamePhase, GameState, LaneObject, ObjectKind, Player, PowerUp};
use crate::tuning::Tuning;

/// Outcome of testing one object against the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Not in the band, or too far sideways
    None,
    /// Wall in the player's lane, cleared by jumping
    JumpedOver,
    /// The object touches the player
    Hit,
}

/// Test a single object against the player
pub fn check_contact(obj: &LaneObject, player: &Player, tuning: &Tuning) -> Contact {
    if !obj.in_collision_band(tuning) {
        return Contact::None;
    }
    if (obj.x_pos - player.x).abs() >= tuning.hit_radius {
        return Contact::None;
    }
    if obj.kind == ObjectKind::Wall && player.clears_walls(tuning.wall_clearance) {
        Contact::JumpedOver
    } else {
        Contact::Hit
    }
}

/// Apply the effect of hitting `kind`.
///
/// | kind   | effect                                           |
/// |--------|--------------------------------------------------|
/// | good   | score += reward                                  |
/// | magnet | magnet on, timer reset                           |
/// | shield | shield on (idempotent)                           |
/// | bad    | shield consumed, else one life lost              |
/// | wall   | same as bad                                      |
pub fn apply_hit(state: &mut GameState, kind: ObjectKind, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    match kind {
        ObjectKind::Good => {
            state.round.score += tuning.good_reward;
            events.push(GameEvent::ScoreChanged {
                score: state.round.score,
            });
        }
        ObjectKind::Magnet => {
            state.player.grant_magnet(tuning.magnet_duration_ticks);
            events.push(GameEvent::PowerUpGained(PowerUp::Magnet));
        }
        ObjectKind::Shield => {
            state.player.has_shield = true;
            events.push(GameEvent::PowerUpGained(PowerUp::Shield));
        }
        ObjectKind::Bad | ObjectKind::Wall => {
            if state.player.has_shield {
                state.player.has_shield = false;
                events.push(GameEvent::ShieldConsumed);
                return;
            }
            state.round.lives = state.round.lives.saturating_sub(1);
            events.push(GameEvent::LifeLost {
                lives: state.round.lives,
            });
            if state.round.lives == 0 && state.round.phase == GamePhase::Running {
                state.round.phase = GamePhase::GameOver;
                log::info!("Game over with score {}", state.round.score);
                events.push(GameEvent::GameOver {
                    final_score: state.round.score,
                });
            }
        }
    }
}

/// Test every object in spawn order and resolve hits.
///
/// Hit objects are deactivated so they never resolve twice. Resolution stops
/// as soon as the round ends.
pub fn resolve_collisions(state: &mut GameState, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    for i in 0..state.objects.len() {
        if state.round.phase != GamePhase::Running {
            break;
        }
        let obj = &state.objects[i];
        match check_contact(obj, &state.player, tuning) {
            Contact::None => {}
            Contact::JumpedOver => {
                log::trace!("Cleared wall #{}", obj.id);
            }
            Contact::Hit => {
                let (id, kind) = (obj.id, obj.kind);
                state.objects[i].active = false;
                log::debug!("Hit {:?} #{}", kind, id);
                events.push(GameEvent::ObjectHit { id, kind });
                apply_hit(state, kind, tuning, events);
            }
        }
    }
}

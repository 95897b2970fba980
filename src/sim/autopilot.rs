//! Idle/demo mode - AI plays the game
//!
//! Produces one command per tick from the current state only, so a demo run
//! stays deterministic for a given seed.

use super::state::{GameState, LaneObject, ObjectKind};
use crate::consts::LANE_COUNT;
use crate::input::Command;
use crate::tuning::Tuning;

/// How many ticks ahead hazards are considered
const LOOKAHEAD_TICKS: f32 = 45.0;
/// Jump this many ticks before a wall enters the collision band
const JUMP_LEAD_TICKS: f32 = 4.0;

fn lane_of(obj: &LaneObject) -> u8 {
    (obj.x_pos.round().max(0.0) as u8).min(LANE_COUNT - 1)
}

/// Nearest hazard still ahead of the player in `lane`
fn nearest_hazard<'a>(state: &'a GameState, lane: u8, window: f32, tuning: &Tuning) -> Option<&'a LaneObject> {
    state
        .objects
        .iter()
        .filter(|o| o.active && o.kind.is_hazard() && lane_of(o) == lane)
        .filter(|o| o.depth < tuning.collision_far && o.depth > tuning.collision_near - window)
        .max_by(|a, b| a.depth.total_cmp(&b.depth))
}

/// Pick a command for this tick, or `None` to keep running straight
pub fn autopilot_command(state: &GameState, tuning: &Tuning) -> Option<Command> {
    if !state.round.is_running() {
        return None;
    }

    let player = &state.player;
    let speed = state.round.speed.max(f32::EPSILON);
    let window = speed * LOOKAHEAD_TICKS;
    let lane_is_safe = |lane: u8| nearest_hazard(state, lane, window, tuning).is_none();

    if let Some(hazard) = nearest_hazard(state, player.lane, window, tuning) {
        let only_walls = state
            .objects
            .iter()
            .filter(|o| o.active && lane_of(o) == player.lane && o.kind == ObjectKind::Bad)
            .all(|o| o.depth >= tuning.collision_far || o.depth <= tuning.collision_near - window);

        if hazard.kind == ObjectKind::Wall && only_walls {
            let jump_at = tuning.collision_near - speed * JUMP_LEAD_TICKS;
            if hazard.depth >= jump_at && !player.is_jumping {
                return Some(Command::Jump);
            }
            return None;
        }

        // Sidestep toward the first safe neighbour
        if player.lane > 0 && lane_is_safe(player.lane - 1) {
            return Some(Command::Left);
        }
        if player.lane + 1 < LANE_COUNT && lane_is_safe(player.lane + 1) {
            return Some(Command::Right);
        }
        return None;
    }

    // Nothing threatening: chase the closest pickup that hasn't passed yet
    let target = state
        .objects
        .iter()
        .filter(|o| o.active && !o.kind.is_hazard() && o.depth < tuning.collision_near)
        .max_by(|a, b| a.depth.total_cmp(&b.depth))?;

    let target_lane = lane_of(target);
    if target_lane < player.lane && lane_is_safe(player.lane - 1) {
        Some(Command::Left)
    } else if target_lane > player.lane && lane_is_safe(player.lane + 1) {
        Some(Command::Right)
    } else {
        None
    }
}

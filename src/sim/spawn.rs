//! Spawn scheduling and difficulty model
//!
//! Spawn frequency follows speed and the kind mix follows score: good items
//! get rarer as the score climbs and walls get rarer at half that rate, so
//! the bad band widens into the gap. Power-ups keep a flat band.

use super::rng::RandomSource;
use super::state::{GameState, ObjectKind};
use crate::consts::*;

/// Score-derived difficulty in `[0, DIFFICULTY_CAP]`
pub fn difficulty_factor(score: u64) -> f32 {
    (score as f32 / DIFFICULTY_SCORE_DIVISOR).min(DIFFICULTY_CAP)
}

/// Cumulative upper bounds for (good, wall, bad) at a score; anything above
/// the bad bound is a power-up.
pub fn kind_thresholds(score: u64) -> (f32, f32, f32) {
    let d = difficulty_factor(score);
    (GOOD_BAND - d, WALL_BAND - d / 2.0, BAD_BAND)
}

/// Map a uniform roll to an object kind. `None` means the power-up band,
/// which needs a second roll to pick magnet or shield.
pub fn classify_roll(roll: f32, score: u64) -> Option<ObjectKind> {
    let (good, wall, bad) = kind_thresholds(score);
    if roll < good {
        Some(ObjectKind::Good)
    } else if roll < wall {
        Some(ObjectKind::Wall)
    } else if roll < bad {
        Some(ObjectKind::Bad)
    } else {
        None
    }
}

/// Slack added to the spawn ratio before flooring
const SPAWN_INTERVAL_TOLERANCE: f64 = 1e-4;

/// Ticks between spawns at a given speed, never below 1
pub fn spawn_interval(speed: f32) -> u64 {
    // f32 speeds land a few ulps off their decimal value (0.0075 comes out as
    // 7.5000003e-3), which would floor 80 down to 79. The tolerance covers
    // that error without moving any genuine fractional ratio.
    let ratio = SPAWN_INTERVAL_NUMERATOR as f64 / (speed as f64 * SPAWN_SPEED_SCALE as f64);
    let interval = (ratio + SPAWN_INTERVAL_TOLERANCE).floor();
    if interval.is_finite() && interval >= 1.0 {
        interval as u64
    } else {
        1
    }
}

/// Whether the tick at `frame` spawns an object
pub fn should_spawn(frame: u64, speed: f32) -> bool {
    frame % spawn_interval(speed) == 0
}

/// Roll a lane and kind and append the object to the state.
///
/// Rolls are consumed in a fixed order: lane, kind, then either an icon
/// variant (good/bad) or the magnet/shield coin (power-up band). Walls use
/// no third roll.
pub fn spawn_object(state: &mut GameState, rng: &mut impl RandomSource) -> (u32, ObjectKind, u8) {
    let lane = rng.next_index(LANE_COUNT);
    let roll = rng.next_f32();

    let (kind, variant) = match classify_roll(roll, state.round.score) {
        Some(ObjectKind::Good) => (ObjectKind::Good, rng.next_index(GOOD_VARIANTS)),
        Some(ObjectKind::Bad) => (ObjectKind::Bad, rng.next_index(BAD_VARIANTS)),
        Some(kind) => (kind, 0),
        None => {
            let kind = if rng.next_f32() > 0.5 {
                ObjectKind::Magnet
            } else {
                ObjectKind::Shield
            };
            (kind, 0)
        }
    };

    let id = state.push_object(kind, lane, variant);
    log::debug!("Spawned {:?} #{} in lane {}", kind, id, lane);
    (id, kind, lane)
}
